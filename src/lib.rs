use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod equip;
pub mod error;
pub mod math;
pub mod pour;
pub mod render;

// Public re-exports for clean API
pub use config::{ContainerConfig, FlaskMixSettings, LiquidPrefab};
pub use crate::core::{LiquidProxy, PhysicsBody, PourMixController, PourState};
pub use equip::{Interactable, Wearable, WearableEquipped, WearableKind};
pub use error::SetupError;
pub use pour::{ContainerContact, ContainerStateChanged, PartnerCommand};
pub use render::SurfaceColor;

use crate::equip::{equip_when_near, resolve_body_slots};
use crate::pour::{
    advance_container_tasks, apply_partner_commands, handle_container_contacts,
    poll_container_tilt, setup_new_containers,
};
use crate::render::sync_surface_materials;

/// Ordering handles for hosts that need to run their collision layer first
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlaskMixSystems {
    Pour,
    Equip,
}

pub struct FlaskMixPlugin;

impl Plugin for FlaskMixPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlaskMixSettings>()
            .add_message::<ContainerContact>()
            .add_message::<PartnerCommand>()
            .add_message::<ContainerStateChanged>()
            .add_message::<WearableEquipped>()
            .add_systems(
                Update,
                (
                    setup_new_containers,
                    advance_container_tasks,
                    handle_container_contacts,
                    poll_container_tilt,
                    apply_partner_commands,
                    sync_surface_materials,
                )
                    .chain()
                    .in_set(FlaskMixSystems::Pour),
            )
            .add_systems(
                Update,
                (resolve_body_slots, equip_when_near)
                    .chain()
                    .in_set(FlaskMixSystems::Equip),
            );
    }
}
