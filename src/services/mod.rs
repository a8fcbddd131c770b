//! Services module - filesystem-facing logic of the load order engine.
//!
//! None of these services hold state; they take explicit paths and return values,
//! which keeps them usable from any front-end and easy to test against temp dirs.
//!
//! # Components
//!
//! - [`catalog::scan`]: lists the mod folders under the install root and resolves
//!   display names from each mod's `_user.ini` ([`metadata`])
//! - [`LoadOrderCodec`]: reads and rewrites the `Slot<N>Directory=` entries in the
//!   load order section of the game's `usersettings.ini`
//! - [`install_path`]: strategies for locating the workshop folder and the game's
//!   settings file
//!
//! # Usage Example
//!
//! ```ignore
//! use seapower_modman::models::LoadOrder;
//! use seapower_modman::services::{scan, LoadOrderCodec};
//!
//! let catalog = scan(workshop_dir)?;
//! let codec = LoadOrderCodec::default();
//! let persisted = codec.read_order(usersettings)?;
//! let order = LoadOrder::initialize(&catalog, persisted.as_deref());
//! codec.write(usersettings, &order.move_to_position("2871823014", 1)?)?;
//! ```

pub mod catalog;
pub mod install_path;
pub mod load_order_file;
pub mod metadata;

pub use catalog::scan;
pub use install_path::{RootStrategy, default_strategies, resolve_install_root};
pub use load_order_file::{BodyLine, LoadOrderCodec, LoadOrderSection};
