//! Per-frame presentation effects layered over the loaded scene.

pub mod blink;

pub use blink::{
    BlinkConfig, BlinkEngine, BlinkEntry, BlinkTarget, RestingColorPolicy, TOTAL_BLINKS,
    blink_color, blink_intensity, frame_index,
};
