//! `onyo tsv-to-yaml` (spec SPEC_FULL §B).

use std::io::Read;
use std::path::Path;

use crate::cli::Command;
use crate::commands::util;
use crate::error::OnyoError;
use crate::tsv;

pub fn run(cwd: &Path, cmd: Command) -> Result<i32, OnyoError> {
    let Command::TsvToYaml { file } = cmd else { unreachable!() };
    let text = match file {
        Some(path) => std::fs::read_to_string(util::resolve(cwd, &path)).map_err(|e| OnyoError::Io(e.to_string()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(|e| OnyoError::Io(e.to_string()))?;
            buf
        }
    };
    let rows = tsv::parse(&text)?;
    print!("{}", tsv::to_yaml_documents(&rows));
    Ok(0)
}
