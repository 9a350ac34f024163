//! Repository-wide constants.

/// Name of the file marking an otherwise-empty directory as tracked inventory.
pub const ANCHOR_FILE_NAME: &str = ".anchor";

/// Name of the YAML file that makes a directory an asset directory.
pub const ASSET_DIR_FILE_NAME: &str = ".onyo-asset-dir.yaml";

/// Directory holding onyo's own state, relative to the repository root.
pub const ONYO_DIR: &str = ".onyo";

/// Directory holding asset templates, relative to `ONYO_DIR`.
pub const TEMPLATE_DIR: &str = "templates";

/// Directory holding schema validation files, relative to `ONYO_DIR`.
pub const VALIDATION_DIR: &str = "validation";

/// Name of the onyo config file, relative to `ONYO_DIR`.
pub const CONFIG_FILE_NAME: &str = "config";

/// Name of the ignore-patterns file, relative to `ONYO_DIR`.
pub const IGNORE_FILE_NAME: &str = "ignore";

/// Config key holding the asset name format string.
pub const CONFIG_NAME_FORMAT: &str = "onyo.assets.name-format";

/// Config key for the editor command used by `onyo edit`.
pub const CONFIG_EDITOR: &str = "onyo.core.editor";

/// Config key for the command used to view history interactively.
pub const CONFIG_HISTORY_INTERACTIVE: &str = "onyo.history.interactive";

/// Config key for the command used to view history non-interactively.
pub const CONFIG_HISTORY_NON_INTERACTIVE: &str = "onyo.history.non-interactive";

/// Config key for the default template applied by `onyo new`.
pub const CONFIG_NEW_TEMPLATE: &str = "onyo.new.template";

/// Config key for the repository's onyo schema version.
pub const CONFIG_REPO_VERSION: &str = "onyo.repo.version";

/// Onyo repository versions this build understands.
pub const KNOWN_REPO_VERSIONS: &[&str] = &["1", "2"];

/// Sentinel string rendered for keys that are missing or empty.
pub const UNSET_VALUE: &str = "<unset>";

/// Marker line that opens the structured operations block of a commit message.
pub const OPERATIONS_MARKER: &str = "--- Inventory Operations ---";

/// Minimum length of the random suffix of a generated faux serial.
pub const DEFAULT_FAUX_SERIAL_LENGTH: usize = 6;

/// `onyo.assets.name-format` used when the repository's config sets none.
pub const DEFAULT_NAME_FORMAT: &str = "{type}_{make}_{model}.{serial_number}";

/// Prefix given to a generated (as opposed to user-supplied) serial number.
pub const FAUX_SERIAL_PREFIX: &str = "faux";
