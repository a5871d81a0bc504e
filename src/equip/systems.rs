use bevy::prelude::*;

use crate::core::physics::PhysicsBody;
use crate::error::SetupError;

use super::wearable::{Interactable, SlotBinding, Wearable};

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WearableEquipped {
    pub item: Entity,
    pub slot: Entity,
}

/// One-time body slot lookup by name for newly seen wearables.
pub fn resolve_body_slots(
    mut wearables: Query<(Entity, &mut Wearable, Option<&Name>, Has<PhysicsBody>)>,
    named: Query<(Entity, &Name)>,
) {
    for (entity, mut wearable, name, has_body) in &mut wearables {
        if wearable.slot() != SlotBinding::Pending {
            continue;
        }

        if !has_body {
            let name = name.map_or_else(|| entity.to_string(), |name| name.as_str().to_string());
            error!("{}", SetupError::MissingPhysicsBody { name });
        }

        let slot_name = wearable.kind.slot_name();
        let found = named
            .iter()
            .find(|(_, name)| name.as_str() == slot_name)
            .map(|(slot, _)| slot);

        match wearable.bind_slot(found) {
            Ok(binding) => debug!("{entity}: body slot {slot_name} -> {binding:?}"),
            Err(err) => warn!("{err}"),
        }
    }
}

pub fn equip_when_near(
    mut commands: Commands,
    mut items: Query<(
        Entity,
        &mut Wearable,
        &mut Interactable,
        &mut Transform,
        &GlobalTransform,
        Option<&mut PhysicsBody>,
    )>,
    slots: Query<&GlobalTransform, Without<Wearable>>,
    mut equipped: MessageWriter<WearableEquipped>,
) {
    for (item, mut wearable, mut interactable, mut transform, global, body) in &mut items {
        let Some(slot) = wearable.candidate_slot(interactable.selected) else {
            continue;
        };
        let Ok(slot_transform) = slots.get(slot) else {
            continue;
        };

        let distance = global.translation().distance(slot_transform.translation());
        if wearable.try_equip(interactable.selected, distance).is_none() {
            continue;
        }

        interactable.enabled = false;
        if let Some(mut body) = body {
            body.set_kinematic(true);
        }
        commands.entity(item).insert(ChildOf(slot));
        transform.translation = Vec3::ZERO;
        transform.rotation = Quat::IDENTITY;

        info!("{item}: equipped {} on {slot}", wearable.kind);
        equipped.write(WearableEquipped { item, slot });
    }
}
