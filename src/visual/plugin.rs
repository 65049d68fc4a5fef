use crate::input::collect_pointer_events;
use crate::trailer::{AnimationQueue, TrailerConfig, TrailerController};
use crate::visual::dispatch::{apply_animation_commands, dispatch_pointer_events};
use crate::visual::followers::{spawn_followers, sync_follower_visuals, tick_follower_animations};
use crate::visual::regions::{
    RegionLayout, spawn_regions, sync_region_visuals, tick_region_animations,
};
use bevy::prelude::*;

pub struct TrailerPlugin;

impl Plugin for TrailerPlugin {
    fn build(&self, app: &mut App) {
        let config = load_config();

        app.insert_resource(TrailerController::new(config.motion))
            .insert_resource(RegionLayout(config.regions))
            .init_resource::<AnimationQueue>()
            .add_systems(Startup, (spawn_followers, spawn_regions))
            .add_systems(
                Update,
                (
                    // Pointer events -> animation commands
                    dispatch_pointer_events,
                    apply_animation_commands,
                    // Tweens
                    tick_follower_animations,
                    tick_region_animations,
                    // Visual updates
                    sync_follower_visuals,
                    sync_region_visuals,
                )
                    .chain()
                    .after(collect_pointer_events),
            );
    }
}

/// Configured trailer, falling back to the embedded defaults on any error
fn load_config() -> TrailerConfig {
    match TrailerConfig::load() {
        Ok(config) => {
            info!("Trailer config loaded: {} hover regions", config.regions.len());
            config
        }
        Err(err) => {
            warn!("{} - using embedded trailer config", err);
            TrailerConfig::embedded().unwrap_or_else(|err| {
                error!("{} - using bare defaults", err);
                TrailerConfig::default()
            })
        }
    }
}
