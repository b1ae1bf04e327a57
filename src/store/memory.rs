use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::{CharacterStore, StoreError, StoreResult};
use crate::models::Character;

/// Characters held in a map behind a reader/writer lock.
///
/// Readers share the lock; `create` and `delete` take it exclusively for a
/// single map operation.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    characters: RwLock<HashMap<Uuid, Character>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking holder cannot leave a half-applied record behind, so a
    // poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, Character>> {
        self.characters.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, Character>> {
        self.characters.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CharacterStore for InMemoryStore {
    fn create(&self, character: Character) -> StoreResult<()> {
        self.write().insert(character.id, character);
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Character>> {
        Ok(self.read().values().cloned().collect())
    }

    fn get(&self, id: Uuid) -> StoreResult<Character> {
        self.read().get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
