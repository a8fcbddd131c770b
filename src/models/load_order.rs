use crate::error::{ModOrderError, Result};
use crate::models::Catalog;
use std::collections::HashSet;

/// A reorder request coming from the presentation layer.
///
/// Positions are 1-based, matching what the user sees in the mod list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOp {
    /// Take one mod out of the list and insert it at `position`.
    MoveToPosition { identity: String, position: usize },

    /// Put the selected mods first, in selection order.
    PromoteSelection(Vec<String>),

    /// Exchange the slots of two mods.
    Swap { first: String, second: String },

    /// Requested position per mod. Mods without an entry keep their current
    /// position as their rank; ties keep the previous relative order.
    AssignRanks(Vec<(String, usize)>),
}

/// Ordered list of mod identities as the game should activate them.
///
/// Every operation returns a new `LoadOrder` and leaves `self` untouched, so a
/// rejected request never leaves a half-applied order behind. Successful
/// operations always return a permutation of the identities they started with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOrder {
    identities: Vec<String>,
}

impl LoadOrder {
    /// Build an order from a list of identities, rejecting duplicates.
    pub fn from_identities<I, S>(identities: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identities: Vec<String> = identities.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(identities.len());
        for identity in &identities {
            if !seen.insert(identity.as_str()) {
                return Err(ModOrderError::UnknownIdentity(identity.clone()));
            }
        }
        Ok(Self { identities })
    }

    /// Catalog order, one slot per installed mod.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            identities: catalog.identities().map(str::to_string).collect(),
        }
    }

    /// Initial order for a freshly scanned catalog.
    ///
    /// A persisted order wins when every identity in it is still installed and it
    /// lists no mod twice; newly installed mods are appended in catalog order.
    /// Anything else falls back to plain catalog order.
    pub fn initialize(catalog: &Catalog, persisted: Option<&[String]>) -> Self {
        let Some(persisted) = persisted else {
            return Self::from_catalog(catalog);
        };

        let mut seen = HashSet::with_capacity(persisted.len());
        for identity in persisted {
            if !catalog.contains(identity) || !seen.insert(identity.as_str()) {
                tracing::debug!(
                    "Persisted order does not match installed mods ({}), using catalog order",
                    identity
                );
                return Self::from_catalog(catalog);
            }
        }

        let mut identities = persisted.to_vec();
        identities.extend(
            catalog
                .identities()
                .filter(|identity| !seen.contains(identity))
                .map(str::to_string),
        );

        Self { identities }
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn identities(&self) -> &[String] {
        &self.identities
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.identities.iter().map(String::as_str)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.identities.iter().any(|id| id == identity)
    }

    /// 1-based position of `identity`.
    pub fn position_of(&self, identity: &str) -> Option<usize> {
        self.identities
            .iter()
            .position(|id| id == identity)
            .map(|index| index + 1)
    }

    fn index_of(&self, identity: &str) -> Result<usize> {
        self.identities
            .iter()
            .position(|id| id == identity)
            .ok_or_else(|| ModOrderError::UnknownIdentity(identity.to_string()))
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position < 1 || position > self.identities.len() {
            return Err(ModOrderError::InvalidPosition {
                position,
                len: self.identities.len(),
            });
        }
        Ok(())
    }

    /// Move `identity` to `new_position`, shifting everything in between by one.
    ///
    /// `[A, B, C, D]` with `D -> 1` gives `[D, A, B, C]`.
    pub fn move_to_position(&self, identity: &str, new_position: usize) -> Result<Self> {
        let from = self.index_of(identity)?;
        self.check_position(new_position)?;

        let mut identities = self.identities.clone();
        let moved = identities.remove(from);
        identities.insert(new_position - 1, moved);

        Ok(Self { identities })
    }

    /// Promote the selected mods to the top, keeping the rest in their prior order.
    pub fn reorder_by_selection<S: AsRef<str>>(&self, selected: &[S]) -> Result<Self> {
        let mut chosen = HashSet::with_capacity(selected.len());
        for identity in selected {
            let identity = identity.as_ref();
            self.index_of(identity)?;
            if !chosen.insert(identity) {
                return Err(ModOrderError::UnknownIdentity(identity.to_string()));
            }
        }

        let mut identities: Vec<String> =
            selected.iter().map(|id| id.as_ref().to_string()).collect();
        identities.extend(
            self.identities
                .iter()
                .filter(|id| !chosen.contains(id.as_str()))
                .cloned(),
        );

        Ok(Self { identities })
    }

    /// Exchange the slots of two mods. Swapping a mod with itself changes nothing.
    pub fn swap(&self, first: &str, second: &str) -> Result<Self> {
        let a = self.index_of(first)?;
        let b = self.index_of(second)?;

        let mut identities = self.identities.clone();
        identities.swap(a, b);
        Ok(Self { identities })
    }

    /// Sort by requested position; see [`ReorderOp::AssignRanks`].
    pub fn reorder_by_ranks<S: AsRef<str>>(&self, ranks: &[(S, usize)]) -> Result<Self> {
        let mut requested: Vec<usize> = (1..=self.identities.len()).collect();
        let mut assigned = HashSet::with_capacity(ranks.len());

        for (identity, rank) in ranks {
            let identity = identity.as_ref();
            let index = self.index_of(identity)?;
            if !assigned.insert(index) {
                return Err(ModOrderError::UnknownIdentity(identity.to_string()));
            }
            self.check_position(*rank)?;
            requested[index] = *rank;
        }

        let mut keyed: Vec<(usize, usize)> = requested
            .into_iter()
            .enumerate()
            .map(|(index, rank)| (rank, index))
            .collect();
        keyed.sort();

        let identities = keyed
            .into_iter()
            .map(|(_, index)| self.identities[index].clone())
            .collect();

        Ok(Self { identities })
    }

    /// Apply a [`ReorderOp`].
    pub fn apply(&self, op: &ReorderOp) -> Result<Self> {
        match op {
            ReorderOp::MoveToPosition { identity, position } => {
                self.move_to_position(identity, *position)
            }
            ReorderOp::PromoteSelection(selected) => self.reorder_by_selection(selected),
            ReorderOp::Swap { first, second } => self.swap(first, second),
            ReorderOp::AssignRanks(ranks) => self.reorder_by_ranks(ranks),
        }
    }
}
