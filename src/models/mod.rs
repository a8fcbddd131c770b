//! Data models for the mod manager.
//!
//! - [`Catalog`] / [`ModEntry`]: snapshot of installed mod folders, rebuilt on every scan
//! - [`LoadOrder`]: the ordered identity list and its reorder operations ([`ReorderOp`])
//! - [`Settings`]: contents of the manager's own YAML settings file

pub mod catalog;
pub mod load_order;
pub mod settings;

pub use catalog::{Catalog, ModEntry};
pub use load_order::{LoadOrder, ReorderOp};
pub use settings::{DEFAULT_SECTION_MARKER, DEFAULT_SLOT_KEY_PREFIX, ManagerSettings, Settings};
