//! Equality check command

use crate::types::SyncError;
use crate::Config;
use console::style;

/// Run the equality check, returning whether both roots are identical
pub fn run(config: &Config) -> Result<bool, SyncError> {
    let synchronizer = config.synchronizer()?;
    let synced = synchronizer.is_synced();
    println!("{}", format_check_result(config, synced));
    Ok(synced)
}

fn format_check_result(config: &Config, synced: bool) -> String {
    if synced {
        format!(
            "{} {} and {} are in sync",
            style("OK").green().bold(),
            config.root_a,
            config.root_b
        )
    } else {
        format!(
            "{} {} and {} differ (or could not be compared)",
            style("DIFFER").red().bold(),
            config.root_a,
            config.root_b
        )
    }
}
