use bevy::math::Vec2;
use bevy::prelude::Resource;
use std::fmt;

use super::tween::Timing;

/// The two pointer-following visuals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Follower {
    Lead,
    Shadow,
}

/// Stable identity of a hover region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

/// Who an animation command is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Follower(Follower),
    Region(RegionId),
}

/// Text color endpoints of a hover region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Baseline,
    Highlight,
}

impl TextTone {
    /// Scalar tone the color tween interpolates (0 = baseline, 1 = highlight)
    pub fn level(self) -> f32 {
        match self {
            TextTone::Baseline => 0.0,
            TextTone::Highlight => 1.0,
        }
    }
}

/// Animated property and its end value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property {
    /// Follower center, screen px
    Position(Vec2),
    /// Follower width/height, px
    Size(Vec2),
    Opacity(f32),
    /// Region text color
    Color(TextTone),
    /// Region visual translation, px
    Translation(Vec2),
}

/// How the property gets to its end value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Direct assignment, no animation
    Snap,
    Tween(Timing),
}

/// One fire-and-forget animation request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationCommand {
    pub target: Target,
    pub property: Property,
    pub transition: Transition,
}

/// Commands emitted by the handlers, drained by the visual layer every frame
#[derive(Resource, Debug, Default, Clone)]
pub struct AnimationQueue {
    commands: Vec<AnimationCommand>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tween(&mut self, target: Target, property: Property, timing: Timing) {
        self.commands.push(AnimationCommand {
            target,
            property,
            transition: Transition::Tween(timing),
        });
    }

    pub fn snap(&mut self, target: Target, property: Property) {
        self.commands.push(AnimationCommand {
            target,
            property,
            transition: Transition::Snap,
        });
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationCommand> {
        self.commands.iter()
    }

    /// Take every pending command in issue order
    pub fn drain(&mut self) -> std::vec::Drain<'_, AnimationCommand> {
        self.commands.drain(..)
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
