//! Configuration and tunables
//!
//! Default constants, per-container parameters and global settings.

pub mod constants;
pub mod container_params;

pub use constants::*;
pub use container_params::*;
