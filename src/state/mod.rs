// Session module
//
// The Session owns the current Catalog and LoadOrder and is the only interface the
// presentation layer talks to: list, reorder, persist.

use crate::error::{ModOrderError, Result};
use crate::models::{Catalog, LoadOrder, ManagerSettings, ReorderOp};
use crate::services::{LoadOrderCodec, scan};
use camino::{Utf8Path, Utf8PathBuf};

/// When the load order is written back to the game's settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// After every successful reorder.
    Immediate,
    /// Only when [`Session::persist`] is called.
    Explicit,
}

/// One row of the mod list as the UI shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModListing {
    /// 1-based load order position.
    pub position: usize,
    pub identity: String,
    pub display_name: String,
}

/// Load order session for one game settings file.
///
/// Holds the catalog from the last scan and the order the user is editing. A
/// session starts empty; [`load`](Self::load) scans the install root and picks up
/// the order already stored in the game's file.
///
/// # Related Types
///
/// - [`crate::services::LoadOrderCodec`]: reads and writes the game's file
/// - [`crate::models::LoadOrder`]: the reorder operations
#[derive(Debug)]
pub struct Session {
    codec: LoadOrderCodec,
    target: Utf8PathBuf,
    persist_mode: PersistMode,
    catalog: Catalog,
    order: LoadOrder,
    scan_error: Option<ModOrderError>,
    dirty: bool,
}

impl Session {
    pub fn new(
        codec: LoadOrderCodec,
        target: impl Into<Utf8PathBuf>,
        persist_mode: PersistMode,
    ) -> Self {
        Self {
            codec,
            target: target.into(),
            persist_mode,
            catalog: Catalog::new(),
            order: LoadOrder::default(),
            scan_error: None,
            dirty: false,
        }
    }

    /// Build a session from the manager settings and the resolved game settings file.
    pub fn from_settings(settings: &ManagerSettings, target: impl Into<Utf8PathBuf>) -> Self {
        let codec = LoadOrderCodec::with_key_prefix(
            settings.section_marker.clone(),
            settings.slot_key_prefix.clone(),
        );
        let persist_mode = if settings.auto_persist {
            PersistMode::Immediate
        } else {
            PersistMode::Explicit
        };
        Self::new(codec, target, persist_mode)
    }

    /// Rescan the install root and rebuild the order.
    ///
    /// A missing root leaves an empty catalog and is reported through
    /// [`scan_error`](Self::scan_error) rather than failing, so the UI can offer to
    /// pick another folder. A game file without the load order section simply
    /// means there is no saved order yet.
    ///
    /// # Errors
    ///
    /// [`ModOrderError::Io`] when the mod folder listing or the game file cannot be read.
    /// The session keeps its previous catalog, order and scan state in that case.
    pub fn load(&mut self, install_root: Option<&Utf8Path>) -> Result<()> {
        let scanned = match install_root {
            Some(root) => scan(root),
            None => Err(ModOrderError::DirectoryNotFound(String::new())),
        };

        let (catalog, scan_error) = match scanned {
            Ok(catalog) => (catalog, None),
            Err(e @ ModOrderError::DirectoryNotFound(_)) => {
                tracing::warn!("{}", e);
                (Catalog::new(), Some(e))
            }
            Err(e) => return Err(e),
        };

        let persisted = self.codec.read_order(&self.target)?;
        self.order = LoadOrder::initialize(&catalog, persisted.as_deref());
        self.catalog = catalog;
        self.scan_error = scan_error;
        self.dirty = false;

        tracing::info!(
            "Loaded {} mods ({} from saved order)",
            self.order.len(),
            persisted.map_or(0, |order| order.len())
        );
        Ok(())
    }

    /// Current list as `(position, identity, display name)` rows.
    pub fn list_mods(&self) -> Vec<ModListing> {
        self.order
            .iter()
            .enumerate()
            .map(|(index, identity)| ModListing {
                position: index + 1,
                identity: identity.to_string(),
                display_name: self.catalog.display_name(identity).to_string(),
            })
            .collect()
    }

    /// Apply a reorder and return the updated list.
    ///
    /// Invalid requests leave the order unchanged. In [`PersistMode::Immediate`]
    /// the new order is written right away; if that write fails the new order is
    /// kept in memory, marked unsaved, and the I/O error is returned.
    pub fn request_reorder(&mut self, op: ReorderOp) -> Result<Vec<ModListing>> {
        let reordered = self.order.apply(&op)?;
        tracing::debug!("Applied {:?}", op);

        if reordered != self.order {
            self.order = reordered;
            self.dirty = true;
        }

        if self.persist_mode == PersistMode::Immediate && self.dirty {
            self.persist()?;
        }

        Ok(self.list_mods())
    }

    /// Write the current order to the game's settings file.
    ///
    /// # Errors
    ///
    /// - [`ModOrderError::DirectoryNotFound`] if the last [`load`](Self::load) could not
    ///   scan the install root; the empty list would wipe the saved order
    /// - [`ModOrderError::SectionNotFound`] if the file has no load order section
    /// - [`ModOrderError::Io`] on any file error; the file is left as it was
    pub fn persist(&mut self) -> Result<()> {
        if let Some(ModOrderError::DirectoryNotFound(root)) = &self.scan_error {
            tracing::warn!("Not saving load order: mod directory was not found");
            return Err(ModOrderError::DirectoryNotFound(root.clone()));
        }

        self.codec.write(&self.target, &self.order)?;
        self.dirty = false;
        tracing::info!(
            "Saved load order ({} mods) to {}",
            self.order.len(),
            self.target
        );
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn order(&self) -> &LoadOrder {
        &self.order
    }

    /// Why the last scan came back empty, if the install root was missing.
    pub fn scan_error(&self) -> Option<&ModOrderError> {
        self.scan_error.as_ref()
    }

    /// `true` when the in-memory order differs from what was last written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn persist_mode(&self) -> PersistMode {
        self.persist_mode
    }

    pub fn target(&self) -> &Utf8Path {
        &self.target
    }
}
