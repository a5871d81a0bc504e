//! Minimal rigid-body surface
//!
//! The host's physics engine owns real simulation. Flasks only need to push
//! an impulse into a freshly spawned liquid proxy and to freeze equipped
//! items, so this is the whole interface they see.

use bevy::prelude::*;

use crate::math::Real;

pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

#[derive(Component, Clone, Debug, PartialEq)]
pub struct PhysicsBody {
    pub mass: Real,
    pub linear_velocity: Vec3,
    /// Kinematic bodies ignore impulses and integration
    pub kinematic: bool,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::with_mass(1.0)
    }
}

impl PhysicsBody {
    pub fn with_mass(mass: Real) -> Self {
        Self {
            mass,
            linear_velocity: Vec3::ZERO,
            kinematic: false,
        }
    }

    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if self.kinematic || self.mass <= 0.0 {
            return;
        }
        self.linear_velocity += impulse / self.mass;
    }

    pub fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
        if kinematic {
            self.linear_velocity = Vec3::ZERO;
        }
    }
}

/// A poured stream of liquid. The flask that spawned it keeps only this
/// entity id; the world owns its lifetime.
#[derive(Component, Clone, Copy, Debug)]
pub struct LiquidProxy {
    pub source: Entity,
}

/// Explicit gravity + velocity integration for dynamic bodies. Not added by
/// the plugin; hosts without a physics engine (the demo) opt in.
pub fn integrate_bodies(time: Res<Time>, mut bodies: Query<(&mut PhysicsBody, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut body, mut transform) in &mut bodies {
        if body.kinematic {
            continue;
        }
        body.linear_velocity += GRAVITY * dt;
        transform.translation += body.linear_velocity * dt;
    }
}
