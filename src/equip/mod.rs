//! Proximity equip for wearable items
//!
//! A held item that comes within range of its body slot is frozen and
//! re-parented onto the slot. The latch never releases.

pub mod systems;
pub mod wearable;

pub use systems::{WearableEquipped, equip_when_near, resolve_body_slots};
pub use wearable::{Interactable, SlotBinding, Wearable, WearableKind};
