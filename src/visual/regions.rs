use bevy::prelude::*;

use crate::{
    camera::ScreenMetrics,
    trailer::{
        Bounds, HoverSession, Property, RegionId, RegionSnapshot, RegionSpec, Transition, Tweened,
    },
};

/// Region text draws above the followers so the highlight reads on the lead
const REGION_Z: f32 = 30.0;

/// Hover regions to spawn at startup
#[derive(Resource, Debug, Clone, Default)]
pub struct RegionLayout(pub Vec<RegionSpec>);

/// A hover-enabled element and its per-region session
#[derive(Component, Debug)]
pub struct HoverRegion {
    pub id: RegionId,
    /// Declared follower size while hovering
    pub natural_size: UVec2,
    /// Untransformed layout rect, screen space
    pub layout: Bounds,
    pub session: HoverSession,
    /// Was the pointer inside on the last move?
    pub pointer_inside: bool,
}

impl HoverRegion {
    pub fn new(id: RegionId, natural_size: UVec2, layout: Bounds) -> Self {
        Self {
            id,
            natural_size,
            layout,
            session: HoverSession::new(),
            pointer_inside: false,
        }
    }

    /// Current geometry, including the region's animated translation
    pub fn snapshot(&self, animation: &RegionAnimation) -> RegionSnapshot {
        RegionSnapshot {
            id: self.id,
            natural_size: self.natural_size,
            bounds: self.layout.translated(animation.translation.value()),
        }
    }
}

/// Animated properties of a hover region
#[derive(Component, Debug, Default)]
pub struct RegionAnimation {
    /// Text tone: 0 = baseline, 1 = highlight (may overshoot while springing back)
    pub tone: Tweened<f32>,
    pub translation: Tweened<Vec2>,
}

impl RegionAnimation {
    pub fn apply(&mut self, property: Property, transition: Transition) {
        match property {
            Property::Color(tone) => self.tone.apply(tone.level(), transition),
            Property::Translation(offset) => self.translation.apply(offset, transition),
            Property::Position(_) | Property::Size(_) | Property::Opacity(_) => {
                warn!("Hover regions do not animate {:?}", property);
            }
        }
    }
}

/// Text color for a tone level: black baseline, white highlight
pub fn tone_color(tone: f32) -> Color {
    let v = tone.clamp(0.0, 1.0);
    Color::srgb(v, v, v)
}

pub fn spawn_regions(mut commands: Commands, layout: Res<RegionLayout>) {
    for (index, spec) in layout.0.iter().enumerate() {
        let id = RegionId(index as u32);
        commands.spawn((
            Text2d::new(spec.label.clone()),
            TextFont {
                font_size: spec.font_size,
                ..default()
            },
            TextColor(tone_color(0.0)),
            Transform::from_xyz(0.0, 0.0, REGION_Z),
            HoverRegion::new(id, UVec2::new(spec.width, spec.height), spec.rect),
            RegionAnimation::default(),
        ));
        debug!("Spawned {} '{}' at {:?}", id, spec.label, spec.rect);
    }

    info!("Spawned {} hover regions", layout.0.len());
}

/// System: Advance region tweens
pub fn tick_region_animations(time: Res<Time>, mut regions: Query<&mut RegionAnimation>) {
    let dt = time.delta_secs();

    for mut animation in &mut regions {
        animation.tone.tick(dt);
        animation.translation.tick(dt);
    }
}

/// System: Place region text at its translated center and recolor it
pub fn sync_region_visuals(
    screen: Res<ScreenMetrics>,
    mut regions: Query<(&HoverRegion, &RegionAnimation, &mut Transform, &mut TextColor)>,
) {
    for (region, animation, mut transform, mut text_color) in &mut regions {
        let center = region.snapshot(animation).bounds.midpoint();
        let world = screen.screen_to_world(center);
        transform.translation.x = world.x;
        transform.translation.y = world.y;

        let color = tone_color(animation.tone.value());
        if text_color.0 != color {
            text_color.0 = color;
        }
    }
}
