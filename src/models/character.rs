use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tabletop investigator kept in the store.
///
/// Display attributes are free text; the keeper does not interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub occupation: String,
    pub age: String,
}

/// Form input for creating a character. Missing fields are treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCharacterInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub age: String,
}

impl CreateCharacterInput {
    /// Build a new character with a freshly generated identifier.
    pub fn into_character(self) -> Character {
        Character {
            id: Uuid::new_v4(),
            name: self.name,
            occupation: self.occupation,
            age: self.age,
        }
    }
}
