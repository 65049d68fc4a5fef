//! Per-property tween scheduler.
//!
//! Each animated property owns one [`Tweened`] slot. Issuing a new tween
//! replaces whatever is in flight and starts from the value currently on
//! screen; finished tweens hold their final value.

use bevy::math::Vec2;

use super::commands::Transition;
use super::easing::Easing;

/// Values a tween can interpolate
pub trait Tweenable: Copy {
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Tweenable for f32 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Tweenable for Vec2 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

/// Duration and curve of one animation command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Duration in seconds
    pub duration: f32,
    pub easing: Easing,
}

impl Timing {
    pub fn from_millis(ms: u32) -> Self {
        Self {
            duration: ms as f32 / 1000.0,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveTween<T: Tweenable> {
    from: T,
    to: T,
    timing: Timing,
    elapsed: f32,
}

/// An animated property: its displayed value plus at most one live tween
#[derive(Debug, Clone, Copy)]
pub struct Tweened<T: Tweenable> {
    current: T,
    active: Option<ActiveTween<T>>,
}

impl<T: Tweenable> Tweened<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            active: None,
        }
    }

    /// Value currently displayed
    pub fn value(&self) -> T {
        self.current
    }

    /// Where the property will come to rest
    #[cfg(test)]
    pub fn target(&self) -> T {
        self.active.map_or(self.current, |tween| tween.to)
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Start a tween toward `to`, superseding any tween in flight
    pub fn animate(&mut self, to: T, timing: Timing) {
        if timing.duration <= 0.0 {
            self.snap(to);
            return;
        }
        self.active = Some(ActiveTween {
            from: self.current,
            to,
            timing,
            elapsed: 0.0,
        });
    }

    /// Jump straight to `value`, dropping any tween in flight
    pub fn snap(&mut self, value: T) {
        self.active = None;
        self.current = value;
    }

    /// Carry out an animation command's transition
    pub fn apply(&mut self, to: T, transition: Transition) {
        match transition {
            Transition::Snap => self.snap(to),
            Transition::Tween(timing) => self.animate(to, timing),
        }
    }

    /// Advance by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let Some(tween) = self.active.as_mut() else {
            return;
        };

        tween.elapsed += dt;
        let progress = (tween.elapsed / tween.timing.duration).min(1.0);

        if progress >= 1.0 {
            // Hold the final value
            self.current = tween.to;
            self.active = None;
        } else {
            self.current = tween.from.lerp_to(tween.to, tween.timing.easing.apply(progress));
        }
    }
}

impl<T: Tweenable + Default> Default for Tweened<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
