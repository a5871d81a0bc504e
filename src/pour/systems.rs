use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::config::{FlaskMixSettings, LiquidPrefab};
use crate::core::physics::{LiquidProxy, PhysicsBody};
use crate::core::tilt::pour_axis_degrees;
use crate::core::{ContainerEffect, MixPartner, PourMixController, PourState};
use crate::error::SetupError;
use crate::render::SurfaceColor;

use super::messages::{ContainerContact, ContainerStateChanged, PartnerCommand, PartnerCommandKind};

fn label(entity: Entity, name: Option<&Name>) -> String {
    name.map_or_else(|| entity.to_string(), |name| name.as_str().to_string())
}

/// Everything a flask's effects may touch in the world
#[derive(SystemParam)]
pub struct EffectSink<'w, 's> {
    commands: Commands<'w, 's>,
    proxies: Query<'w, 's, (), With<LiquidProxy>>,
    partner_commands: MessageWriter<'w, PartnerCommand>,
    state_changes: MessageWriter<'w, ContainerStateChanged>,
}

impl EffectSink<'_, '_> {
    fn apply(
        &mut self,
        container: Entity,
        mut surface: Option<&mut SurfaceColor>,
        effects: Vec<ContainerEffect>,
    ) {
        for effect in effects {
            match effect {
                ContainerEffect::StateChanged { from, to } => self.state_changed(container, from, to),
                ContainerEffect::DespawnLiquid(proxy) => {
                    // Already gone is fine: the world owns liquid lifetimes.
                    if self.proxies.contains(proxy) {
                        self.commands.entity(proxy).despawn();
                    }
                }
                ContainerEffect::TintSurface(color) => {
                    if let Some(surface) = surface.as_mut() {
                        surface.0 = color;
                    }
                }
                ContainerEffect::TintPartner { partner, color } => {
                    self.partner_commands.write(PartnerCommand {
                        partner,
                        kind: PartnerCommandKind::Tint(color),
                    });
                }
                ContainerEffect::PartnerMixed { partner } => {
                    self.partner_commands.write(PartnerCommand {
                        partner,
                        kind: PartnerCommandKind::EnterMixing,
                    });
                }
            }
        }
    }

    fn state_changed(&mut self, container: Entity, from: PourState, to: PourState) {
        debug!("{container}: {from:?} -> {to:?}");
        self.state_changes.write(ContainerStateChanged {
            container,
            from,
            to,
        });
    }

    fn spawn_liquid(
        &mut self,
        source: Entity,
        prefab: &LiquidPrefab,
        anchor: &GlobalTransform,
        force: f32,
    ) -> Entity {
        let mut body = PhysicsBody::with_mass(prefab.mass);
        body.apply_impulse(anchor.forward().as_vec3() * force);

        let mut proxy = self.commands.spawn((
            Name::new("Liquid"),
            LiquidProxy { source },
            body,
            Transform::from_translation(anchor.translation()).with_rotation(anchor.rotation()),
        ));
        if let Some(mesh) = &prefab.mesh {
            proxy.insert(Mesh3d(mesh.clone()));
        }
        if let Some(material) = &prefab.material {
            proxy.insert(MeshMaterial3d(material.clone()));
        }
        proxy.id()
    }
}

/// First-tick setup for new flasks: paint the initial color and report
/// missing collaborators. Nothing here is fatal.
pub fn setup_new_containers(
    mut containers: Query<
        (
            Entity,
            &PourMixController,
            Option<&Name>,
            Option<&mut SurfaceColor>,
            Has<PhysicsBody>,
        ),
        Added<PourMixController>,
    >,
) {
    for (entity, controller, name, surface, has_body) in &mut containers {
        let name = label(entity, name);

        if !has_body {
            error!("{}", SetupError::MissingPhysicsBody { name: name.clone() });
        }
        match surface {
            Some(mut surface) => surface.0 = controller.config().initial_color,
            None => error!("{}", SetupError::MissingSurface { name: name.clone() }),
        }
        if controller.spawn_anchor.is_none() {
            error!("{}", SetupError::MissingSpawnAnchor { name });
        }
    }
}

/// Resume pour timers and color blends started on earlier ticks.
pub fn advance_container_tasks(
    time: Res<Time>,
    mut containers: Query<(Entity, &mut PourMixController, Option<&mut SurfaceColor>)>,
    mut sink: EffectSink,
) {
    let dt = time.delta_secs();
    for (entity, mut controller, mut surface) in &mut containers {
        if controller.pending_tasks() == 0 {
            continue;
        }
        let effects = controller.advance(dt);
        sink.apply(entity, surface.as_deref_mut(), effects);
    }
}

pub fn handle_container_contacts(
    time: Res<Time>,
    settings: Res<FlaskMixSettings>,
    mut contacts: MessageReader<ContainerContact>,
    mut containers: Query<(&mut PourMixController, Option<&mut SurfaceColor>, Option<&Name>)>,
    mut sink: EffectSink,
) {
    let dt = time.delta_secs();
    for contact in contacts.read() {
        if contact.container == contact.other {
            continue;
        }

        let partner = containers
            .get(contact.other)
            .ok()
            .map(|(partner, surface, _)| MixPartner {
                entity: contact.other,
                final_color: partner.config().final_color,
                surface_color: surface.map(|surface| surface.0),
            });

        let Ok((mut controller, mut surface, name)) = containers.get_mut(contact.container) else {
            continue;
        };
        if controller.state() != PourState::Pouring {
            continue;
        }

        let own_color = surface.as_ref().map(|surface| surface.0);
        let effects = controller.on_contact(
            contact.other_tag.as_deref(),
            partner,
            own_color,
            &settings,
            dt,
        );
        if effects.is_empty() {
            continue;
        }

        info!("{}: mix detected, changing color", label(contact.container, name));
        sink.apply(contact.container, surface.as_deref_mut(), effects);
    }
}

pub fn poll_container_tilt(
    mut containers: Query<(Entity, &mut PourMixController, &Transform, Option<&Name>)>,
    anchors: Query<&GlobalTransform>,
    mut sink: EffectSink,
) {
    for (entity, mut controller, transform, name) in &mut containers {
        if controller.state() != PourState::Idle {
            continue;
        }
        let Some(request) = controller.poll_tilt(pour_axis_degrees(transform.rotation)) else {
            continue;
        };

        info!("{}: pouring liquid", label(entity, name));
        sink.state_changed(entity, PourState::Idle, PourState::Pouring);

        let Some(prefab) = controller.config().liquid.clone() else {
            continue;
        };
        let Some(anchor) = controller
            .spawn_anchor
            .and_then(|anchor| anchors.get(anchor).ok())
        else {
            continue;
        };

        let proxy = sink.spawn_liquid(entity, &prefab, anchor, request.force);
        controller.attach_liquid(proxy);
    }
}

/// Apply tints and the final `Mixing` flag that other flasks sent this one.
pub fn apply_partner_commands(
    mut partner_commands: MessageReader<PartnerCommand>,
    mut containers: Query<(&mut PourMixController, Option<&mut SurfaceColor>)>,
    mut state_changes: MessageWriter<ContainerStateChanged>,
) {
    for command in partner_commands.read() {
        let Ok((mut controller, surface)) = containers.get_mut(command.partner) else {
            continue;
        };

        match command.kind {
            PartnerCommandKind::Tint(color) => {
                if let Some(mut surface) = surface {
                    surface.0 = color;
                }
            }
            PartnerCommandKind::EnterMixing => {
                if let Some(ContainerEffect::StateChanged { from, to }) =
                    controller.enter_mixing_from_partner()
                {
                    debug!("{}: {from:?} -> {to:?} (partner)", command.partner);
                    state_changes.write(ContainerStateChanged {
                        container: command.partner,
                        from,
                        to,
                    });
                }
            }
        }
    }
}
