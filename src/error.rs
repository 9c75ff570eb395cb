//! Error kinds for the stowage core.
//!
//! Only [`Error::InvalidInput`] and [`Error::CapacityExceeded`] are rejected
//! before any mutation takes place. A missing item or container on a lookup
//! path is reported as [`Error::NotFound`] rather than an exception; planning
//! calls that merely fail to fit an item are not errors at all; see
//! [`crate::plan::PlacementPlan::unplaced`].

use thiserror::Error;

use crate::ids::{ContainerId, ItemId};

/// What kind of entity a [`Error::NotFound`] refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundKind {
    Item(ItemId),
    Container(ContainerId),
}

impl std::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFoundKind::Item(id) => write!(f, "item {id}"),
            NotFoundKind::Container(id) => write!(f, "container {id}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The referenced item or container does not exist in the store.
    #[error("not found: {0}")]
    NotFound(NotFoundKind),

    /// A dimension or mass was not strictly positive, priority was out of
    /// `[1,100]`, or an expiry date other than the `"N/A"` sentinel could
    /// not be parsed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An internal invariant was about to be violated. Fatal: the caller
    /// must treat the store as untouched and should not retry the same
    /// operation without investigating.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),
}

impl Error {
    pub fn item_not_found(id: ItemId) -> Self {
        Error::NotFound(NotFoundKind::Item(id))
    }

    pub fn container_not_found(id: ContainerId) -> Self {
        Error::NotFound(NotFoundKind::Container(id))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
