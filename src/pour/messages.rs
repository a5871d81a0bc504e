use bevy::color::Srgba;
use bevy::prelude::*;

use crate::core::PourState;

/// Two bodies started touching. Written by the host's collision layer once per
/// receiving flask; `other_tag` is the tag of the object that was hit.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct ContainerContact {
    pub container: Entity,
    pub other: Entity,
    pub other_tag: Option<String>,
}

impl ContainerContact {
    pub fn new(container: Entity, other: Entity, other_tag: impl Into<String>) -> Self {
        Self {
            container,
            other,
            other_tag: Some(other_tag.into()),
        }
    }

    pub fn untagged(container: Entity, other: Entity) -> Self {
        Self {
            container,
            other,
            other_tag: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartnerCommandKind {
    Tint(Srgba),
    EnterMixing,
}

/// A flask asking its mix partner to change itself. Applied by the partner's
/// own driver so each flask stays the only writer of its state.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct PartnerCommand {
    pub partner: Entity,
    pub kind: PartnerCommandKind,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerStateChanged {
    pub container: Entity,
    pub from: PourState,
    pub to: PourState,
}
