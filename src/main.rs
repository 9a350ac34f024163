use clap::Parser;
use onyo::cli::Cli;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.debug { "debug" } else { "off" }),
    )
    .format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "onyo-trace: {}", record.args())
    })
    .init();

    match onyo::commands::dispatch(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("onyo: error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
