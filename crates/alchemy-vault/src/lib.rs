//! alchemy-vault: local persistence and the Studio state container.
//!
//! Drafts, favorites and history live behind a [`KeyValuePort`] under fixed
//! versioned keys. [`Studio`] owns the in-memory state, applies engine
//! operations from `alchemy-core`, and writes through after every mutation.

mod error;
pub mod favorites;
pub mod history;
pub mod port;
pub mod studio;

pub use error::VaultError;
pub use favorites::{Favorite, ImportReport, FAVORITES_SCHEMA_VERSION};
pub use history::HistoryEntry;
pub use port::{KeyValuePort, MemoryPort, SledPort};
pub use studio::{Studio, DRAFTS_KEY, FAVORITES_KEY, HISTORY_KEY};
