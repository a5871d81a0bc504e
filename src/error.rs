use thiserror::Error;

use crate::equip::WearableKind;

/// Missing collaborators found while setting an object up. None of these stop
/// the object from running; it just does less.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("{name}: no physics body found")]
    MissingPhysicsBody { name: String },

    #[error("{name}: no surface color found, the flask will not change color")]
    MissingSurface { name: String },

    #[error("{name}: no liquid spawn anchor assigned, pouring will not spawn liquid")]
    MissingSpawnAnchor { name: String },

    #[error("no body slot named `{slot}` for {kind:?}, the item cannot be equipped")]
    UnresolvedBodySlot { kind: WearableKind, slot: String },
}
