//! Development server command implementation.
//!
//! Orchestrates the entire dev server lifecycle:
//! - Configuration loading with CLI overrides
//! - Initial fixture discovery and bundle compilation
//! - File watching over the component paths
//! - HTTP server with SSE for hot reload
//! - Automatic rebuilds on file changes
//! - Graceful shutdown on Ctrl+C

use crate::bundler::{BundlerFactory, Compiler, EmbedBundlerFactory};
use crate::cli::DevArgs;
use crate::dev::{
    DefaultMiddlewareFactory, DevEvent, DevServer, DevServerState, FileChange, FileWatcher,
    SharedState,
};
use crate::error::Result;
use crate::ui;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;

/// Debounce window for file change events.
const WATCH_DEBOUNCE_MS: u64 = 300;

/// Directories never worth rebuilding for.
const WATCH_IGNORE: &[&str] = &["node_modules", "*.log"];

/// Execute the dev command.
///
/// # Process Flow
///
/// 1. Load and validate configuration, applying CLI overrides
/// 2. Create the compiler and perform the initial build
/// 3. Start the file watcher over the component paths
/// 4. Start the HTTP server with SSE
/// 5. Main event loop:
///    - Watch for file changes
///    - Trigger rebuilds on changes
///    - Broadcast events to connected clients
///    - Handle Ctrl+C for graceful shutdown
///
/// # Errors
///
/// Returns errors for:
/// - Invalid configuration
/// - Discovery failures on the initial build
/// - Server startup failures
/// - File watcher errors
pub async fn execute(args: DevArgs) -> Result<()> {
    ui::info("Starting development server...");

    // Step 1: Load configuration and apply CLI overrides
    let mut config = super::load_config(&args.project)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(hostname) = &args.hostname {
        config.hostname = hostname.clone();
    }
    if args.no_hot {
        config.hot = false;
    }
    config.validate()?;

    ui::info(&format!("Project root: {}", config.root_path.display()));
    for path in config.resolved_component_paths() {
        ui::info(&format!("Component path: {}", path.display()));
    }

    // Step 2: Create compiler and shared state
    let compiler = EmbedBundlerFactory.create_compiler(&config)?;
    let state = Arc::new(DevServerState::new(config.hot));

    // Step 3: Initial build
    ui::info("Discovering fixtures...");
    run_build(&compiler, &state, true).await?;

    // Step 4: Start file watcher over the component paths
    let (watcher, mut change_rx) = FileWatcher::new(
        config.resolved_component_paths(),
        WATCH_IGNORE.iter().map(|s| s.to_string()).collect(),
        WATCH_DEBOUNCE_MS,
    )?;

    for root in watcher.roots() {
        ui::info(&format!("Watching for changes in: {}", root.display()));
    }

    // Step 5: Start HTTP server in background
    let server_url = config.server_url();
    let server = DevServer::new(
        config,
        Arc::clone(&compiler),
        &DefaultMiddlewareFactory,
        state.clone(),
    );
    let mut server_handle = tokio::spawn(async move {
        if let Err(e) = server.start().await {
            ui::error(&format!("Server error: {}", e));
        }
    });

    // Step 6: Open browser if requested
    if args.open {
        open_browser(&server_url);
    }

    // Step 7: Main event loop
    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            // File change detected
            Some(change) = change_rx.recv() => {
                handle_file_change(change, &compiler, &state).await;
            }

            // Ctrl+C received
            _ = signal::ctrl_c() => {
                ui::info("Shutting down development server...");
                break;
            }

            // Server task completed (error or shutdown)
            _ = &mut server_handle => {
                ui::warning("Server task completed unexpectedly");
                break;
            }
        }
    }

    ui::success("Development server stopped");
    Ok(())
}

/// Run one build pass and record the result in shared state.
///
/// The initial build propagates failures to the caller; later builds leave
/// the error in the state for the error response and SSE clients.
async fn run_build(
    compiler: &Arc<dyn Compiler>,
    state: &SharedState,
    initial: bool,
) -> Result<()> {
    state.start_build();
    let started = Instant::now();

    match compiler.compile() {
        Ok(output) => {
            let duration_ms = started.elapsed().as_millis() as u64;
            state.complete_build(duration_ms);
            state.update_cache(output.cache);
            state.update_fixtures(output.fixtures);

            ui::success(&format!(
                "Found {} fixture files ({}ms)",
                state.fixtures().len(),
                duration_ms
            ));
            Ok(())
        }
        Err(e) => {
            let error_msg = e.to_string();
            state.fail_build(error_msg.clone());
            ui::error(&format!("Build failed: {}", error_msg));
            if initial {
                return Err(e);
            }
            Ok(())
        }
    }
}

/// Handle a file change event.
///
/// Triggers a rebuild and broadcasts the result to connected clients.
async fn handle_file_change(change: FileChange, compiler: &Arc<dyn Compiler>, state: &SharedState) {
    let path = change.path();
    ui::info(&format!("File changed: {}", path.display()));

    let _ = state.broadcast(&DevEvent::BuildStarted).await;

    let _ = run_build(compiler, state, false).await;

    // Broadcast the outcome; success triggers a client reload.
    match state.get_status() {
        crate::dev::BuildStatus::Success { duration_ms } => {
            let _ = state
                .broadcast(&DevEvent::BuildCompleted { duration_ms })
                .await;
        }
        crate::dev::BuildStatus::Failed { error } => {
            let _ = state.broadcast(&DevEvent::BuildFailed { error }).await;
        }
        _ => {}
    }
}

/// Open the server URL in the default browser.
///
/// Uses platform-specific commands:
/// - macOS: `open`
/// - Windows: `start`
/// - Linux: `xdg-open`
fn open_browser(url: &str) {
    use std::process::Command;

    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };

    match result {
        Ok(_) => ui::info(&format!("Opened browser at {}", url)),
        Err(e) => ui::warning(&format!("Failed to open browser: {}", e)),
    }
}
