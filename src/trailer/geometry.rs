use bevy::math::Vec2;
use serde::Deserialize;

/// Axis-aligned rectangle in screen space (origin top-left, y down, logical px)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Is the point inside? Left/top edges inclusive, right/bottom exclusive
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Same rectangle shifted by a visual translation
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Exact (unrounded) midpoint
    pub fn midpoint(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// Rounded center and influence radius of a hover region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionCenter {
    pub left: f32,
    pub top: f32,
    pub radius: f32,
}

impl RegionCenter {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// Round to the nearest integer, halves toward +infinity
pub fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// Center and radius of a region's live bounds.
///
/// The radius is half the width: influence areas are treated as circles.
pub fn compute_center(bounds: &Bounds) -> RegionCenter {
    let mid = bounds.midpoint();
    RegionCenter {
        left: round_half_up(mid.x),
        top: round_half_up(mid.y),
        radius: round_half_up(bounds.width * 0.5),
    }
}

/// Pointer coordinates as whole pixels
pub fn floor_pointer(pointer: Vec2) -> Vec2 {
    pointer.floor()
}
