//! ECS driver for pouring flasks
//!
//! Feeds tilt, contacts and time into each `PourMixController` and turns the
//! effects it returns into spawns, despawns, tints and messages.

pub mod messages;
pub mod systems;

pub use messages::{ContainerContact, ContainerStateChanged, PartnerCommand, PartnerCommandKind};
pub use systems::{
    EffectSink, advance_container_tasks, apply_partner_commands, handle_container_contacts,
    poll_container_tilt, setup_new_containers,
};
