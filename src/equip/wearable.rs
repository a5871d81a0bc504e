//! Wearable items that snap onto a body slot when brought close enough

use std::fmt;

use bevy::prelude::*;

use crate::config::{BODY_SLOT_PREFIX, DEFAULT_EQUIP_DISTANCE};
use crate::error::SetupError;
use crate::math::Real;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WearableKind {
    Head,
    Chest,
    Hands,
    Feet,
}

impl WearableKind {
    pub fn slot_name(self) -> String {
        format!("{BODY_SLOT_PREFIX}{self}")
    }
}

impl fmt::Display for WearableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Head => "Head",
            Self::Chest => "Chest",
            Self::Hands => "Hands",
            Self::Feet => "Feet",
        };
        f.write_str(name)
    }
}

/// Slot lookup happens once; `Missing` is permanent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotBinding {
    #[default]
    Pending,
    Bound(Entity),
    Missing,
}

#[derive(Component, Clone, Debug)]
pub struct Wearable {
    pub kind: WearableKind,
    pub max_equip_distance: Real,
    equipped: bool,
    slot: SlotBinding,
}

impl Wearable {
    pub fn new(kind: WearableKind) -> Self {
        Self {
            kind,
            max_equip_distance: DEFAULT_EQUIP_DISTANCE,
            equipped: false,
            slot: SlotBinding::Pending,
        }
    }

    pub fn with_max_distance(mut self, distance: Real) -> Self {
        self.max_equip_distance = distance;
        self
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    pub fn slot(&self) -> SlotBinding {
        self.slot
    }

    /// Record the result of the slot lookup. Only the first call counts.
    pub fn bind_slot(&mut self, found: Option<Entity>) -> Result<SlotBinding, SetupError> {
        if self.slot != SlotBinding::Pending {
            return Ok(self.slot);
        }

        match found {
            Some(slot) => {
                self.slot = SlotBinding::Bound(slot);
                Ok(self.slot)
            }
            None => {
                self.slot = SlotBinding::Missing;
                Err(SetupError::UnresolvedBodySlot {
                    kind: self.kind,
                    slot: self.kind.slot_name(),
                })
            }
        }
    }

    /// The bound slot, if this item is held and could still be equipped
    pub fn candidate_slot(&self, held: bool) -> Option<Entity> {
        if self.equipped || !held {
            return None;
        }
        match self.slot {
            SlotBinding::Bound(slot) => Some(slot),
            _ => None,
        }
    }

    /// Latch as equipped when `distance` is strictly inside the equip radius.
    /// Returns the slot to attach to the one time this succeeds.
    pub fn try_equip(&mut self, held: bool, distance: Real) -> Option<Entity> {
        let slot = self.candidate_slot(held)?;
        if distance >= self.max_equip_distance {
            return None;
        }
        self.equipped = true;
        Some(slot)
    }
}

/// Grab handle exposed by the interaction layer
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interactable {
    /// Currently held by a hand or pointer
    pub selected: bool,
    /// Disabled interactables can no longer be grabbed
    pub enabled: bool,
}

impl Default for Interactable {
    fn default() -> Self {
        Self {
            selected: false,
            enabled: true,
        }
    }
}
