use bevy::math::{UVec2, Vec2};
use bevy::prelude::Resource;

use super::commands::{AnimationQueue, Follower, Property, RegionId, Target, TextTone};
use super::config::MotionConfig;
use super::easing::{ease_in_cubic, ease_out_cubic};
use super::geometry::{Bounds, RegionCenter, compute_center, floor_pointer, round_half_up};
use super::session::{Approach, HoverSession};

const LEAD: Target = Target::Follower(Follower::Lead);
const SHADOW: Target = Target::Follower(Follower::Shadow);

/// What the handlers need to know about a hover region at event time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSnapshot {
    pub id: RegionId,
    /// Declared follower size while hovering
    pub natural_size: UVec2,
    /// Live bounds, including the region's current translation
    pub bounds: Bounds,
}

/// Drives the lead and shadow followers from pointer events.
///
/// Owns the single `hovering` flag; per-region state lives in the
/// [`HoverSession`] handed to each region handler.
#[derive(Resource, Debug, Clone)]
pub struct TrailerController {
    hovering: bool,
    motion: MotionConfig,
}

impl TrailerController {
    pub fn new(motion: MotionConfig) -> Self {
        TrailerController {
            hovering: false,
            motion,
        }
    }

    /// Is free-roam tracking suppressed by a hover region?
    #[cfg(test)]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    // === Screen-level handlers ===

    /// Pointer moved anywhere on screen
    pub fn on_pointer_move_screen(&self, pointer: Vec2, out: &mut AnimationQueue) {
        if self.hovering {
            return;
        }

        let position = floor_pointer(pointer);
        out.tween(LEAD, Property::Position(position), self.motion.lead_move());
        out.tween(SHADOW, Property::Position(position), self.motion.shadow_move());
    }

    /// Pointer came onto the screen: jump there, then fade in
    pub fn on_pointer_enter_screen(&mut self, pointer: Vec2, out: &mut AnimationQueue) {
        self.hovering = false;

        let position = floor_pointer(pointer);
        out.snap(LEAD, Property::Position(position));
        out.snap(SHADOW, Property::Position(position));

        out.tween(LEAD, Property::Opacity(1.0), self.motion.medium());
        out.tween(SHADOW, Property::Opacity(1.0), self.motion.medium());
    }

    /// Pointer left the screen: fade out where we are
    pub fn on_pointer_leave_screen(&self, out: &mut AnimationQueue) {
        out.tween(LEAD, Property::Opacity(0.0), self.motion.short());
        out.tween(SHADOW, Property::Opacity(0.0), self.motion.short());
    }

    // === Hover-region handlers ===

    /// Pointer entered a region: grow to its declared size, highlight its text
    pub fn on_hover_enter(
        &mut self,
        region: &RegionSnapshot,
        session: &mut HoverSession,
        out: &mut AnimationQueue,
    ) {
        self.hovering = true;
        session.reset();

        let size = region.natural_size.as_vec2();
        let long = self.motion.long();

        out.tween(LEAD, Property::Size(size), long);
        out.tween(SHADOW, Property::Size(size * self.motion.shadow_scale), long);
        out.tween(
            Target::Region(region.id),
            Property::Color(TextTone::Highlight),
            long,
        );
    }

    /// Pointer left a region: shrink back and let the region spring home
    pub fn on_hover_leave(
        &mut self,
        region: &RegionSnapshot,
        session: &mut HoverSession,
        out: &mut AnimationQueue,
    ) {
        self.hovering = false;
        session.reset();

        let size = Vec2::splat(self.motion.default_radius as f32);
        let short = self.motion.short();

        out.tween(LEAD, Property::Size(size), short);
        out.tween(SHADOW, Property::Size(size), short);

        let release = self.motion.release();
        let target = Target::Region(region.id);
        out.tween(target, Property::Color(TextTone::Baseline), release);
        out.tween(target, Property::Translation(Vec2::ZERO), release);
    }

    /// Pointer moved inside a region: pull the followers toward its center
    pub fn on_hover_move(
        &self,
        pointer: Vec2,
        region: &RegionSnapshot,
        session: &mut HoverSession,
        out: &mut AnimationQueue,
    ) -> Approach {
        let center = compute_center(&region.bounds);
        let delta = pointer - center.position();
        let dist = delta.length();
        let ang = delta.y.atan2(delta.x);
        let direction = Vec2::new(ang.cos(), ang.sin());

        let ratio = dist / center.radius;
        let h_eased = ease_in_cubic(ratio) * center.radius * self.motion.influence;

        let approach = session.classify(dist);
        match approach {
            Approach::Entering => {
                self.move_into_region(&center, h_eased, direction, out);
                session.record(dist);
            }
            Approach::Leaving => {
                let t_eased = ease_out_cubic(ratio) * center.radius * self.motion.influence;
                self.move_out_of_region(region.id, &center, h_eased, t_eased, direction, out);
            }
        }
        approach
    }

    /// Slow, smooth pull with the lead overshooting the shadow
    fn move_into_region(
        &self,
        center: &RegionCenter,
        h_eased: f32,
        direction: Vec2,
        out: &mut AnimationQueue,
    ) {
        let offset = direction * h_eased;
        let long = self.motion.long();

        out.tween(
            LEAD,
            Property::Position(center.position() + offset * self.motion.lead_enter_mul),
            long,
        );
        out.tween(SHADOW, Property::Position(center.position() + offset), long);
    }

    /// Snappy follow outward; the region itself is dragged along by `h_eased`
    fn move_out_of_region(
        &self,
        region: RegionId,
        center: &RegionCenter,
        h_eased: f32,
        t_eased: f32,
        direction: Vec2,
        out: &mut AnimationQueue,
    ) {
        let trail = direction * t_eased;
        let short = self.motion.short();

        out.tween(
            LEAD,
            Property::Position(round_vec(center.position() + trail)),
            short,
        );
        out.tween(
            SHADOW,
            Property::Position(round_vec(
                center.position() + trail * self.motion.shadow_exit_mul,
            )),
            short,
        );
        out.tween(
            Target::Region(region),
            Property::Translation(direction * h_eased),
            short,
        );
    }
}

impl Default for TrailerController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

fn round_vec(v: Vec2) -> Vec2 {
    Vec2::new(round_half_up(v.x), round_half_up(v.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trailer::commands::{AnimationCommand, Transition};
    use crate::trailer::easing::Easing;
    use crate::trailer::tween::Timing;

    const EPS: f32 = 1e-3;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    /// Region of radius 100 centered on (300, 300), declared size 40x40
    fn region() -> RegionSnapshot {
        RegionSnapshot {
            id: RegionId(7),
            natural_size: UVec2::new(40, 40),
            bounds: Bounds::new(200.0, 200.0, 200.0, 200.0),
        }
    }

    const CENTER: Vec2 = Vec2::new(300.0, 300.0);

    fn find(
        out: &AnimationQueue,
        target: Target,
        pred: fn(&Property) -> bool,
    ) -> Vec<AnimationCommand> {
        out.iter()
            .filter(|c| c.target == target && pred(&c.property))
            .copied()
            .collect()
    }

    fn position_of(out: &AnimationQueue, target: Target) -> Vec2 {
        let found = find(out, target, |p| matches!(p, Property::Position(_)));
        assert_eq!(found.len(), 1, "expected one position command for {:?}", target);
        match found[0].property {
            Property::Position(p) => p,
            _ => unreachable!(),
        }
    }

    fn duration_of(command: &AnimationCommand) -> f32 {
        match command.transition {
            Transition::Tween(timing) => timing.duration,
            Transition::Snap => 0.0,
        }
    }

    #[test]
    fn test_screen_move_tracks_pointer_when_free() {
        let controller = TrailerController::default();
        for pointer in [Vec2::new(0.0, 0.0), Vec2::new(12.7, 640.2), Vec2::new(1919.0, 3.5)] {
            let mut out = AnimationQueue::new();
            controller.on_pointer_move_screen(pointer, &mut out);

            assert_eq!(out.len(), 2);
            assert!(out.iter().all(|c| matches!(c.property, Property::Position(_))));
            assert_eq!(position_of(&out, LEAD), pointer.floor());
            assert_eq!(position_of(&out, SHADOW), pointer.floor());
        }
    }

    #[test]
    fn test_screen_move_shadow_lags() {
        let controller = TrailerController::default();
        let mut out = AnimationQueue::new();
        controller.on_pointer_move_screen(Vec2::new(5.0, 5.0), &mut out);

        let lead = find(&out, LEAD, |_| true);
        let shadow = find(&out, SHADOW, |_| true);
        assert!(approx(duration_of(&lead[0]), 0.1));
        assert!(approx(duration_of(&shadow[0]), 0.13));
    }

    #[test]
    fn test_screen_move_ignored_while_hovering() {
        let mut controller = TrailerController::default();
        let mut session = HoverSession::new();
        controller.on_hover_enter(&region(), &mut session, &mut AnimationQueue::new());

        let mut out = AnimationQueue::new();
        controller.on_pointer_move_screen(Vec2::new(5.0, 5.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_screen_enter_snaps_then_fades_in() {
        let mut controller = TrailerController::default();
        let mut session = HoverSession::new();
        controller.on_hover_enter(&region(), &mut session, &mut AnimationQueue::new());
        assert!(controller.is_hovering());

        let mut out = AnimationQueue::new();
        controller.on_pointer_enter_screen(Vec2::new(10.9, 20.1), &mut out);
        assert!(!controller.is_hovering(), "screen enter clears the flag");

        let commands: Vec<_> = out.iter().copied().collect();
        assert_eq!(commands.len(), 4);
        for follower in [LEAD, SHADOW] {
            let snaps: Vec<_> = commands
                .iter()
                .filter(|c| c.target == follower && c.transition == Transition::Snap)
                .collect();
            assert_eq!(snaps.len(), 1);
            assert_eq!(snaps[0].property, Property::Position(Vec2::new(10.0, 20.0)));

            let fades = find(&out, follower, |p| matches!(p, Property::Opacity(_)));
            assert_eq!(fades[0].property, Property::Opacity(1.0));
            assert!(approx(duration_of(&fades[0]), 0.2));
        }
    }

    #[test]
    fn test_screen_leave_fades_out_only() {
        let controller = TrailerController::default();
        let mut out = AnimationQueue::new();
        controller.on_pointer_leave_screen(&mut out);

        assert_eq!(out.len(), 2);
        for command in out.iter() {
            assert_eq!(command.property, Property::Opacity(0.0));
            assert!(approx(duration_of(command), 0.1));
        }
        assert!(!controller.is_hovering());
    }

    #[test]
    fn test_hover_enter_sets_flag_and_resets_session() {
        let mut controller = TrailerController::default();
        let mut session = HoverSession::new();
        session.record(12.0);

        let mut out = AnimationQueue::new();
        controller.on_hover_enter(&region(), &mut session, &mut out);

        assert!(controller.is_hovering());
        assert_eq!(session.last_distance(), f32::INFINITY);

        let lead = find(&out, LEAD, |p| matches!(p, Property::Size(_)));
        let shadow = find(&out, SHADOW, |p| matches!(p, Property::Size(_)));
        assert_eq!(lead[0].property, Property::Size(Vec2::new(40.0, 40.0)));
        assert_eq!(shadow[0].property, Property::Size(Vec2::new(34.0, 34.0)));
        assert!(approx(duration_of(&lead[0]), 0.3));

        let color = find(&out, Target::Region(RegionId(7)), |_| true);
        assert_eq!(color.len(), 1);
        assert_eq!(color[0].property, Property::Color(TextTone::Highlight));
        assert!(approx(duration_of(&color[0]), 0.3));
    }

    #[test]
    fn test_hover_leave_shrinks_and_springs_back() {
        let mut controller = TrailerController::default();
        let mut session = HoverSession::new();
        controller.on_hover_enter(&region(), &mut session, &mut AnimationQueue::new());
        session.record(30.0);

        let mut out = AnimationQueue::new();
        controller.on_hover_leave(&region(), &mut session, &mut out);

        assert!(!controller.is_hovering());
        assert_eq!(session.last_distance(), f32::INFINITY);

        for follower in [LEAD, SHADOW] {
            let size = find(&out, follower, |p| matches!(p, Property::Size(_)));
            assert_eq!(size[0].property, Property::Size(Vec2::new(20.0, 20.0)));
            assert!(approx(duration_of(&size[0]), 0.1));
        }

        // Short timing, back-out curve
        let release = Timing::from_millis(100).with_easing(Easing::BACK_OUT);
        let region_cmds = find(&out, Target::Region(RegionId(7)), |_| true);
        assert_eq!(region_cmds.len(), 2);
        assert!(region_cmds.iter().all(|c| c.transition == Transition::Tween(release)));
        assert!(region_cmds.iter().any(|c| c.property == Property::Color(TextTone::Baseline)));
        assert!(region_cmds.iter().any(|c| c.property == Property::Translation(Vec2::ZERO)));
    }

    #[test]
    fn test_rim_scenario_offsets() {
        // dist == radius == 100 -> h_eased = 1 * 100 * 0.4 = 40
        let controller = TrailerController::default();
        let mut session = HoverSession::new();
        let mut out = AnimationQueue::new();

        let pointer = CENTER + Vec2::new(100.0, 0.0);
        let approach = controller.on_hover_move(pointer, &region(), &mut session, &mut out);

        assert_eq!(approach, Approach::Entering);
        let lead = position_of(&out, LEAD) - CENTER;
        let shadow = position_of(&out, SHADOW) - CENTER;
        assert!(approx(lead.x, 48.0) && approx(lead.y, 0.0), "lead offset {:?}", lead);
        assert!(approx(shadow.x, 40.0) && approx(shadow.y, 0.0), "shadow offset {:?}", shadow);
        assert_eq!(session.last_distance(), 100.0);
        assert!(find(&out, Target::Region(RegionId(7)), |_| true).is_empty());
    }

    #[test]
    fn test_decreasing_distances_all_enter() {
        let controller = TrailerController::default();
        let mut session = HoverSession::new();

        for d in [50.0_f32, 40.0, 30.0] {
            let mut out = AnimationQueue::new();
            let pointer = CENTER + Vec2::new(0.0, d);
            let approach = controller.on_hover_move(pointer, &region(), &mut session, &mut out);
            assert_eq!(approach, Approach::Entering, "d={}", d);

            let expected = ease_in_cubic(d / 100.0) * 100.0 * 0.4 * 1.2;
            let lead = position_of(&out, LEAD) - CENTER;
            assert!(approx(lead.length(), expected), "d={} got {}", d, lead.length());
            assert!(lead.y > 0.0, "offset points from center toward pointer");

            let lead_cmd = find(&out, LEAD, |_| true);
            assert!(approx(duration_of(&lead_cmd[0]), 0.3));
            assert_eq!(session.last_distance(), d);
        }
    }

    #[test]
    fn test_increasing_distances_leave_and_pin_baseline() {
        let controller = TrailerController::default();
        let mut session = HoverSession::new();

        let mut out = AnimationQueue::new();
        controller.on_hover_move(CENTER + Vec2::new(-30.0, 0.0), &region(), &mut session, &mut out);
        assert_eq!(session.last_distance(), 30.0);

        for d in [40.0_f32, 50.0] {
            let mut out = AnimationQueue::new();
            let pointer = CENTER + Vec2::new(-d, 0.0);
            let approach = controller.on_hover_move(pointer, &region(), &mut session, &mut out);
            assert_eq!(approach, Approach::Leaving, "d={}", d);
            assert_eq!(session.last_distance(), 30.0, "leaving never advances the baseline");

            let ratio = d / 100.0;
            let t_eased = ease_out_cubic(ratio) * 100.0 * 0.4;
            let h_eased = ease_in_cubic(ratio) * 100.0 * 0.4;

            let lead = position_of(&out, LEAD);
            let shadow = position_of(&out, SHADOW);
            assert_eq!(lead, Vec2::new((300.0 - t_eased + 0.5).floor(), 300.0));
            assert_eq!(shadow, Vec2::new((300.0 - t_eased * 0.6 + 0.5).floor(), 300.0));

            let pull = find(&out, Target::Region(RegionId(7)), |_| true);
            assert_eq!(pull.len(), 1);
            match pull[0].property {
                Property::Translation(t) => {
                    assert!(approx(t.x, -h_eased), "region pulled by h_eased, got {:?}", t);
                    assert!(approx(t.y, 0.0));
                }
                other => panic!("unexpected region property {:?}", other),
            }
            assert!(approx(duration_of(&pull[0]), 0.1));
        }
    }

    #[test]
    fn test_repeated_position_classifies_as_leaving() {
        let controller = TrailerController::default();
        let mut session = HoverSession::new();
        let pointer = CENTER + Vec2::new(30.0, 40.0);

        let mut out = AnimationQueue::new();
        let first = controller.on_hover_move(pointer, &region(), &mut session, &mut out);
        let second = controller.on_hover_move(pointer, &region(), &mut session, &mut out);

        assert_eq!(first, Approach::Entering);
        assert_eq!(second, Approach::Leaving);
        assert_eq!(session.last_distance(), 50.0);
    }

    #[test]
    fn test_center_uses_translated_bounds() {
        let controller = TrailerController::default();
        let mut session = HoverSession::new();
        let mut shifted = region();
        shifted.bounds = shifted.bounds.translated(Vec2::new(10.0, 0.0));

        let mut out = AnimationQueue::new();
        controller.on_hover_move(Vec2::new(410.0, 300.0), &shifted, &mut session, &mut out);

        // Center moved to (310, 300); pointer sits exactly on the rim
        let lead = position_of(&out, LEAD);
        assert!(approx(lead.x, 310.0 + 48.0));
    }
}
