//! Utility Module
//!
//! - [`Clock`]: wall-clock frame deltas
//! - [`FpsCounter`]: frame rate readout for the stats overlay
//! - [`OrbitControls`]: orbiting controller for the default camera

pub mod fps_counter;
pub mod orbit_control;
pub mod time;

pub use fps_counter::FpsCounter;
pub use orbit_control::{OrbitControls, OrbitInput};
pub use time::Clock;
