//! Domain models for the character keeper.
//!
//! # Core Concepts
//!
//! - [`Character`]: A stored investigator record. The identifier is assigned by the
//!   server when the record is created and never changes afterwards.
//! - [`CreateCharacterInput`]: Form fields submitted to create a character.
//! - [`OperationResult`]: The uniform message body returned by mutating
//!   operations and by every failure.

mod character;
mod operation;

pub use character::*;
pub use operation::*;
