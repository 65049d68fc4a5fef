use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenMetrics>()
            .add_systems(Startup, setup_camera)
            .add_systems(PreUpdate, update_screen_metrics);
    }
}

/// Logical window size, used to map screen coordinates into the 2D world
#[derive(Resource, Debug, Clone, Copy)]
pub struct ScreenMetrics {
    pub size: Vec2,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            size: Vec2::new(1280.0, 720.0),
        }
    }
}

impl ScreenMetrics {
    /// Screen point (origin top-left, y down) to world point (origin center, y up)
    ///
    /// ```
    ///   screen (0,0) ----------→ x
    ///        |
    ///        ↓ y          world (0,0) at the window center, +y up
    /// ```
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.size.x * 0.5, self.size.y * 0.5 - screen.y)
    }
}

/// One world unit per logical pixel
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Track window resizes so screen-space layout stays put
fn update_screen_metrics(mut metrics: ResMut<ScreenMetrics>, windows: Query<&Window>) {
    let Ok(window) = windows.single() else {
        return;
    };

    let size = Vec2::new(window.width(), window.height());
    if (size - metrics.size).abs().max_element() > 0.5 {
        metrics.size = size;
        info!("Screen resized to {}x{}", size.x, size.y);
    }
}
