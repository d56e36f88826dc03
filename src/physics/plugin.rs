use avian2d::prelude::*;
use bevy::prelude::*;

/// Plugin that sets up the Avian2D physics engine
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            PhysicsPlugins::default()
                .with_length_unit(1.0), // 1 unit = 1 meter
        );

        // Characters integrate their own gravity
        app.insert_resource(Gravity(Vec2::ZERO));
    }
}
