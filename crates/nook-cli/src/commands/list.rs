//! List command: print discovered components and fixtures.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::ui;
use nook_discovery::{DiscoveryOutput, FixtureDiscovery, FsFixtureDiscovery};

/// Execute the list command.
///
/// Runs fixture discovery over the configured component paths and prints
/// the result, either human-readable or as JSON with `--json`.
///
/// # Errors
///
/// Returns errors for invalid configuration or discovery failures.
pub async fn execute(args: ListArgs) -> Result<()> {
    let config = super::load_config(&args.project)?;
    config.validate()?;

    let discovery = FsFixtureDiscovery::new(config.resolved_component_paths());
    let output = discovery.discover()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_listing(&output);
    Ok(())
}

/// Print the discovery output grouped by component.
fn print_listing(output: &DiscoveryOutput) {
    if output.fixtures.is_empty() {
        ui::warning("No fixtures found");
        return;
    }

    for (name, path) in output.components.iter() {
        println!("{} ({})", name, path.display());

        for fixture in output.fixtures.iter() {
            let for_component = fixture
                .components
                .iter()
                .any(|c| c.file_path == *path);
            if for_component {
                println!("  {}", fixture.file_path.display());
            }
        }
    }

    ui::info(&format!(
        "{} components, {} fixture files",
        output.components.len(),
        output.fixtures.len()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use nook_discovery::{ComponentMapping, ComponentRef, FixtureFile, FixtureMapping};
    use std::path::PathBuf;

    #[test]
    fn test_print_listing_handles_empty_output() {
        print_listing(&DiscoveryOutput {
            components: ComponentMapping::new(),
            fixtures: FixtureMapping::new(),
        });
    }

    #[test]
    fn test_print_listing_with_fixtures() {
        let mut components = ComponentMapping::new();
        components.insert("Button", "/c/Button.jsx");

        let fixtures = FixtureMapping::from(vec![FixtureFile {
            file_path: PathBuf::from("/c/__fixtures__/Button/default.js"),
            components: vec![ComponentRef {
                file_path: PathBuf::from("/c/Button.jsx"),
                name: "Button".to_string(),
            }],
        }]);

        print_listing(&DiscoveryOutput {
            components,
            fixtures,
        });
    }
}
