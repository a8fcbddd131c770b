// Sea Power Mod Manager - load order management for Sea Power workshop mods
//
// This is the library crate containing the load order engine. The binary crate
// (main.rs) is a headless front-end; GUIs drive the same `Session` API.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::SettingsStore;
pub use error::ModOrderError;
pub use models::{Catalog, LoadOrder, ModEntry, ReorderOp, Settings};
pub use services::LoadOrderCodec;
pub use state::{ModListing, PersistMode, Session};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
