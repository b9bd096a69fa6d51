//! Check command: validate configuration and component paths.

use crate::cli::CheckArgs;
use crate::error::Result;
use crate::ui;
use nook_discovery::{FixtureDiscovery, FsFixtureDiscovery};

/// Execute the check command.
///
/// Loads and validates the configuration, then runs a discovery pass to
/// confirm the component paths resolve and report what would be served.
///
/// # Errors
///
/// Returns errors for missing config files, invalid values, or component
/// paths that don't exist.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let config = super::load_config(&args.project)?;
    config.validate()?;
    ui::success(&format!(
        "Configuration valid (root: {})",
        config.root_path.display()
    ));

    let discovery = FsFixtureDiscovery::new(config.resolved_component_paths());
    let output = discovery.discover()?;

    ui::success(&format!(
        "Found {} components and {} fixture files",
        output.components.len(),
        output.fixtures.len()
    ));

    if output.fixtures.is_empty() {
        ui::warning("No fixtures found; the playground will be empty");
    }

    if let Some(proxies) = config.resolved_proxies_path() {
        ui::info(&format!("Proxies module: {}", proxies.display()));
    }

    ui::info(&format!("Dev server would run at {}", config.server_url()));
    Ok(())
}
