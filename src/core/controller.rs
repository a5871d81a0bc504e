//! Pour/mix state machine for a single flask
//!
//! `Idle -> Pouring` on tilt, `Pouring -> Idle` on timeout, `Pouring -> Mixing`
//! on contact with another flask. `Mixing` is terminal. The controller never
//! touches the world: it returns [`ContainerEffect`]s and the driver systems
//! apply them.

use bevy::color::Srgba;
use bevy::prelude::*;

use crate::config::{ContainerConfig, FlaskMixSettings};
use crate::core::tasks::{BlendTarget, Task, TaskOutput, TaskRegistry};
use crate::core::tilt::normalize_tilt;
use crate::math::{Real, average_color};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PourState {
    #[default]
    Idle,
    Pouring,
    Mixing,
}

/// Returned when a tilt check starts a pour. The driver instantiates the
/// liquid and reports it back through [`PourMixController::attach_liquid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PourRequest {
    pub force: Real,
}

/// Snapshot of the other flask taken when a mix starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MixPartner {
    pub entity: Entity,
    pub final_color: Srgba,
    /// `None` when the partner has no surface to blend
    pub surface_color: Option<Srgba>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContainerEffect {
    StateChanged { from: PourState, to: PourState },
    DespawnLiquid(Entity),
    TintSurface(Srgba),
    TintPartner { partner: Entity, color: Srgba },
    PartnerMixed { partner: Entity },
}

#[derive(Component, Clone, Debug)]
pub struct PourMixController {
    config: ContainerConfig,
    state: PourState,
    tasks: TaskRegistry,
    liquid: Option<Entity>,
    /// Where liquid is instantiated; read through its `GlobalTransform`
    pub spawn_anchor: Option<Entity>,
}

impl PourMixController {
    pub fn new(config: ContainerConfig) -> Self {
        Self {
            config,
            state: PourState::Idle,
            tasks: TaskRegistry::new(),
            liquid: None,
            spawn_anchor: None,
        }
    }

    pub fn with_spawn_anchor(mut self, anchor: Entity) -> Self {
        self.spawn_anchor = Some(anchor);
        self
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn state(&self) -> PourState {
        self.state
    }

    pub fn liquid(&self) -> Option<Entity> {
        self.liquid
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_mixing(&self) -> bool {
        self.state == PourState::Mixing
    }

    fn transition(&mut self, to: PourState, effects: &mut Vec<ContainerEffect>) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        effects.push(ContainerEffect::StateChanged { from, to });
    }

    /// Tilt check for one tick. `raw_angle` is the pour-axis angle in degrees.
    pub fn poll_tilt(&mut self, raw_angle: Real) -> Option<PourRequest> {
        if self.state != PourState::Idle {
            return None;
        }
        if normalize_tilt(raw_angle) < self.config.tilt_threshold {
            return None;
        }

        self.state = PourState::Pouring;
        self.tasks.spawn(Task::pour_timeout(self.config.pour_duration));
        Some(PourRequest {
            force: self.config.pour_force,
        })
    }

    /// Remember the liquid spawned for the current pour. Ignored outside `Pouring`.
    pub fn attach_liquid(&mut self, proxy: Entity) {
        if self.state == PourState::Pouring {
            self.liquid = Some(proxy);
        }
    }

    /// Contact with another object. Starts a mix when this flask is pouring
    /// and the other object is tagged as a flask. Blend tasks run their first
    /// slice with `dt` before returning.
    pub fn on_contact(
        &mut self,
        other_tag: Option<&str>,
        partner: Option<MixPartner>,
        own_color: Option<Srgba>,
        settings: &FlaskMixSettings,
        dt: Real,
    ) -> Vec<ContainerEffect> {
        let mut effects = Vec::new();
        if self.state != PourState::Pouring {
            return effects;
        }
        if !other_tag.is_some_and(|tag| settings.is_container_tag(tag)) {
            return effects;
        }

        // The pour timeout must never run once a mix starts.
        self.tasks.cancel_all();
        // The poured liquid stays in the scene; only the handle is dropped.
        self.liquid = None;
        self.transition(PourState::Mixing, &mut effects);

        let mut blends = Vec::with_capacity(2);
        if let Some(start) = own_color {
            blends.push(Task::blend(
                BlendTarget::OwnSurface,
                start,
                self.config.final_color,
                settings.blend_rate,
            ));
        }
        if let Some(partner) = partner {
            if let Some(start) = partner.surface_color {
                let target = average_color(self.config.final_color, partner.final_color);
                blends.push(Task::blend(
                    BlendTarget::Partner(partner.entity),
                    start,
                    target,
                    settings.blend_rate,
                ));
            }
        }

        for blend in blends {
            let (_, output) = self.tasks.spawn_and_step(blend, dt);
            collect_output(output, &mut effects);
        }
        effects
    }

    /// Advance pending tasks by one tick.
    pub fn advance(&mut self, dt: Real) -> Vec<ContainerEffect> {
        let mut effects = Vec::new();
        if self.tasks.is_empty() {
            return effects;
        }

        for output in self.tasks.advance(dt) {
            match output {
                TaskOutput::TimedOut => self.finish_pour(&mut effects),
                other => collect_output(other, &mut effects),
            }
        }
        effects
    }

    fn finish_pour(&mut self, effects: &mut Vec<ContainerEffect>) {
        if self.state != PourState::Pouring {
            return;
        }
        if let Some(proxy) = self.liquid.take() {
            effects.push(ContainerEffect::DespawnLiquid(proxy));
        }
        self.transition(PourState::Idle, effects);
    }

    /// Another flask finished blending this one. Freezes this flask; a pour in
    /// progress is abandoned the same way a self-started mix abandons it.
    pub fn enter_mixing_from_partner(&mut self) -> Option<ContainerEffect> {
        if self.state == PourState::Mixing {
            return None;
        }
        if self.state == PourState::Pouring {
            self.tasks.cancel_all();
            self.liquid = None;
        }
        let from = self.state;
        self.state = PourState::Mixing;
        Some(ContainerEffect::StateChanged {
            from,
            to: PourState::Mixing,
        })
    }
}

fn collect_output(output: TaskOutput, effects: &mut Vec<ContainerEffect>) {
    let TaskOutput::Tint {
        target,
        color,
        done,
    } = output
    else {
        return;
    };

    match target {
        BlendTarget::OwnSurface => effects.push(ContainerEffect::TintSurface(color)),
        BlendTarget::Partner(partner) => {
            effects.push(ContainerEffect::TintPartner { partner, color });
            if done {
                effects.push(ContainerEffect::PartnerMixed { partner });
            }
        }
    }
}
