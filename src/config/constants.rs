// Default tunables for flasks and wearables
use bevy::color::Srgba;

// Pouring
pub const DEFAULT_TILT_THRESHOLD: f32 = 60.0;
pub const MIN_TILT_THRESHOLD: f32 = 20.0;
pub const MAX_TILT_THRESHOLD: f32 = 180.0;
pub const DEFAULT_POUR_DURATION: f32 = 1.0;
pub const DEFAULT_POUR_FORCE: f32 = 2.0;
pub const DEFAULT_LIQUID_MASS: f32 = 1.0;

// Mixing
pub const BLEND_RATE: f32 = 3.0;
pub const CONTAINER_TAG: &str = "Matraz";
pub const DEFAULT_INITIAL_COLOR: Srgba = Srgba::new(0.0, 0.0, 1.0, 1.0);
pub const DEFAULT_FINAL_COLOR: Srgba = Srgba::new(0.0, 1.0, 0.0, 1.0);

// Equipping
pub const DEFAULT_EQUIP_DISTANCE: f32 = 0.2;
pub const BODY_SLOT_PREFIX: &str = "Slot_";
