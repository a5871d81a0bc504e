pub mod controller;
pub mod physics;
pub mod tasks;
pub mod tilt;

pub use controller::{ContainerEffect, MixPartner, PourMixController, PourRequest, PourState};
pub use physics::{GRAVITY, LiquidProxy, PhysicsBody, integrate_bodies};
pub use tasks::{BlendTarget, Task, TaskId, TaskKind, TaskOutput, TaskPhase, TaskRegistry};
pub use tilt::{exceeds_threshold, normalize_tilt, pour_axis_degrees};
