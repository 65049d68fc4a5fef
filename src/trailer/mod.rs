//! Pointer trailer core: geometry, easing, tweens and the event handlers.
//!
//! Nothing in here touches the ECS world directly. Handlers emit
//! [`AnimationCommand`]s that the visual layer applies to entities.

mod commands;
mod config;
mod controller;
mod easing;
mod geometry;
mod session;
mod tween;

pub use commands::{AnimationQueue, Follower, Property, RegionId, Target, TextTone, Transition};
pub use config::{RegionSpec, TrailerConfig};
pub use controller::{RegionSnapshot, TrailerController};
pub use geometry::Bounds;
pub use session::{Approach, HoverSession};
pub use tween::{Timing, Tweened};
