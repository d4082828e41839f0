//! Application entry point for the tree traversal viewer.
//!
//! This binary sets up logging, loads the optional configuration file and
//! delegates all interactive logic and rendering to [`Viewer`] from the
//! `viewer` module.

mod viewer;

use tree_core::config::Config;
use viewer::Viewer;

/// Environment variable naming a TOML configuration file.
const CONFIG_ENV: &str = "TREE_VIZ_CONFIG";

/// Reads the configuration named by [`CONFIG_ENV`], falling back to defaults
/// when it is unset or unusable.
fn load_config() -> Config {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return Config::default();
    };
    match Config::load(&path) {
        Ok(cfg) => {
            log::info!("loaded config from {}", path.to_string_lossy());
            cfg
        }
        Err(e) => {
            log::error!("ignoring config {}: {e}", path.to_string_lossy());
            Config::default()
        }
    }
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cfg = load_config();
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Tree Traversals",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg)))),
    )
}
