use bevy::color::Srgba;
use bevy::prelude::*;

use super::constants::{
    BLEND_RATE, CONTAINER_TAG, DEFAULT_FINAL_COLOR, DEFAULT_INITIAL_COLOR, DEFAULT_LIQUID_MASS,
    DEFAULT_POUR_DURATION, DEFAULT_POUR_FORCE, DEFAULT_TILT_THRESHOLD,
};

/// What gets instantiated at the spawn anchor when a flask starts pouring.
#[derive(Clone, Debug)]
pub struct LiquidPrefab {
    /// Mass of the spawned proxy's physics body
    pub mass: f32,
    pub mesh: Option<Handle<Mesh>>,
    pub material: Option<Handle<StandardMaterial>>,
}

impl Default for LiquidPrefab {
    fn default() -> Self {
        Self {
            mass: DEFAULT_LIQUID_MASS,
            mesh: None,
            material: None,
        }
    }
}

/// Per-flask tunables, set once at construction and never changed during a run.
#[derive(Clone, Debug)]
pub struct ContainerConfig {
    /// Folded tilt angle (degrees) at or above which pouring starts.
    /// Meant to lie in 20..=180 but not validated.
    pub tilt_threshold: f32,

    /// Seconds a pour lasts before the liquid proxy is cleaned up
    pub pour_duration: f32,

    /// Impulse magnitude along the spawn anchor's forward axis
    pub pour_force: f32,

    pub initial_color: Srgba,
    pub final_color: Srgba,

    /// `None` means pouring never instantiates anything
    pub liquid: Option<LiquidPrefab>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            tilt_threshold: DEFAULT_TILT_THRESHOLD,
            pour_duration: DEFAULT_POUR_DURATION,
            pour_force: DEFAULT_POUR_FORCE,
            initial_color: DEFAULT_INITIAL_COLOR,
            final_color: DEFAULT_FINAL_COLOR,
            liquid: Some(LiquidPrefab::default()),
        }
    }
}

impl ContainerConfig {
    pub fn with_tilt_threshold(mut self, degrees: f32) -> Self {
        self.tilt_threshold = degrees;
        self
    }

    pub fn with_pour_duration(mut self, seconds: f32) -> Self {
        self.pour_duration = seconds;
        self
    }

    pub fn with_pour_force(mut self, force: f32) -> Self {
        self.pour_force = force;
        self
    }

    pub fn with_colors(mut self, initial: Srgba, final_color: Srgba) -> Self {
        self.initial_color = initial;
        self.final_color = final_color;
        self
    }

    pub fn with_final_color(mut self, final_color: Srgba) -> Self {
        self.final_color = final_color;
        self
    }

    pub fn with_liquid(mut self, liquid: Option<LiquidPrefab>) -> Self {
        self.liquid = liquid;
        self
    }
}

/// Settings shared by every flask in the world
#[derive(Resource, Clone, Debug)]
pub struct FlaskMixSettings {
    /// Blend progress gained per second (3.0 reaches a full blend in ~0.33s)
    pub blend_rate: f32,

    /// Tags that make a colliding object count as another flask
    pub container_tags: Vec<String>,
}

impl Default for FlaskMixSettings {
    fn default() -> Self {
        Self {
            blend_rate: BLEND_RATE,
            container_tags: vec![CONTAINER_TAG.to_string()],
        }
    }
}

impl FlaskMixSettings {
    pub fn is_container_tag(&self, tag: &str) -> bool {
        self.container_tags.iter().any(|known| known == tag)
    }

    pub fn with_blend_rate(mut self, rate: f32) -> Self {
        self.blend_rate = rate;
        self
    }

    pub fn with_container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tags.push(tag.into());
        self
    }
}
