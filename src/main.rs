use clap::Parser;
use console::style;
use duosync::config::Cli;
use duosync::SyncError;
use std::process::ExitCode;

/// Exit code for invalid configuration, matching clap's usage errors
const CONFIG_ERROR_EXIT: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = duosync::logging::init(cli.verbose, cli.quiet) {
        eprintln!("duosync: could not initialise logging: {err}");
    }

    match duosync::commands::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            match err.downcast_ref::<SyncError>() {
                Some(sync_err) if sync_err.is_config_error() => ExitCode::from(CONFIG_ERROR_EXIT),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
