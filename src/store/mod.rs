//! Character storage.
//!
//! Callers only see the [`CharacterStore`] trait; [`InMemoryStore`] is the
//! single implementation and keeps records for the lifetime of the process.

mod memory;

pub use memory::InMemoryStore;

use thiserror::Error;
use uuid::Uuid;

use crate::models::Character;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("character {0} not found")]
    NotFound(Uuid),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Concurrency-safe collection of characters keyed by identifier.
///
/// Every mutation is atomic with respect to concurrent readers: a record is
/// either fully visible or absent.
pub trait CharacterStore: Send + Sync + 'static {
    /// Insert the character, replacing any record with the same id.
    fn create(&self, character: Character) -> StoreResult<()>;

    /// Snapshot of every stored character, in no particular order.
    fn list(&self) -> StoreResult<Vec<Character>>;

    fn get(&self, id: Uuid) -> StoreResult<Character>;

    fn delete(&self, id: Uuid) -> StoreResult<()>;
}
