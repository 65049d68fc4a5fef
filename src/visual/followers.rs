use bevy::prelude::*;

use crate::{
    camera::ScreenMetrics,
    trailer::{Follower, Property, TrailerController, Transition, Tweened},
};

/// Shadow draws under the lead; region text draws above both
const SHADOW_Z: f32 = 10.0;
const LEAD_Z: f32 = 20.0;

const LEAD_TINT: Color = Color::srgb(0.08, 0.08, 0.1);
const SHADOW_TINT: Color = Color::srgba(0.1, 0.1, 0.12, 0.35);

#[derive(Component, Debug, Clone, Copy)]
pub struct FollowerVisual {
    pub role: Follower,
    /// Fill color at full opacity
    pub tint: Color,
}

/// Animated properties of a follower (screen space)
#[derive(Component, Debug)]
pub struct FollowerAnimation {
    pub position: Tweened<Vec2>,
    pub size: Tweened<Vec2>,
    /// Hidden until the pointer first enters the screen
    pub opacity: Tweened<f32>,
}

impl FollowerAnimation {
    pub fn new(default_radius: f32) -> Self {
        Self {
            position: Tweened::new(Vec2::ZERO),
            size: Tweened::new(Vec2::splat(default_radius)),
            opacity: Tweened::new(0.0),
        }
    }

    pub fn apply(&mut self, property: Property, transition: Transition) {
        match property {
            Property::Position(p) => self.position.apply(p, transition),
            Property::Size(s) => self.size.apply(s, transition),
            Property::Opacity(o) => self.opacity.apply(o, transition),
            Property::Color(_) | Property::Translation(_) => {
                warn!("Followers do not animate {:?}", property);
            }
        }
    }
}

pub fn spawn_followers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    controller: Res<TrailerController>,
) {
    let radius = controller.motion().default_radius as f32;
    // Unit circle, scaled to the animated width/height
    let circle = meshes.add(Circle::new(0.5));

    for (role, tint, z) in [
        (Follower::Shadow, SHADOW_TINT, SHADOW_Z),
        (Follower::Lead, LEAD_TINT, LEAD_Z),
    ] {
        commands.spawn((
            Mesh2d(circle.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(tint.with_alpha(0.0)))),
            Transform::from_xyz(0.0, 0.0, z).with_scale(Vec3::new(radius, radius, 1.0)),
            FollowerVisual { role, tint },
            FollowerAnimation::new(radius),
        ));
    }

    info!("Spawned lead and shadow followers (radius {})", radius);
}

/// System: Advance follower tweens
pub fn tick_follower_animations(time: Res<Time>, mut followers: Query<&mut FollowerAnimation>) {
    let dt = time.delta_secs();

    for mut animation in &mut followers {
        animation.position.tick(dt);
        animation.size.tick(dt);
        animation.opacity.tick(dt);
    }
}

/// System: Push animated values into transform and material
pub fn sync_follower_visuals(
    screen: Res<ScreenMetrics>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut followers: Query<(
        &FollowerVisual,
        &FollowerAnimation,
        &mut Transform,
        &MeshMaterial2d<ColorMaterial>,
    )>,
) {
    for (visual, animation, mut transform, material) in &mut followers {
        let world = screen.screen_to_world(animation.position.value());
        transform.translation.x = world.x;
        transform.translation.y = world.y;

        let size = animation.size.value().max(Vec2::ZERO);
        transform.scale = size.extend(1.0);

        let opacity = animation.opacity.value().clamp(0.0, 1.0);
        let color = visual.tint.with_alpha(visual.tint.alpha() * opacity);

        // Only touch the asset when the color actually changed
        let stale = materials
            .get(&material.0)
            .is_some_and(|m| m.color != color);
        if stale {
            if let Some(m) = materials.get_mut(&material.0) {
                m.color = color;
            }
        }
    }
}
