pub mod camera;
pub mod debug;
pub mod physics;
pub mod player;

pub use camera::CameraPlugin;
pub use debug::MovementDebugPlugin;
pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;

use bevy::prelude::*;

/// Unified plugin that adds physics, player controller, and camera systems.
pub struct PlatformerLocomotionPlugin;

impl Plugin for PlatformerLocomotionPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }
        if !app.is_plugin_added::<CameraPlugin>() {
            app.add_plugins(CameraPlugin);
        }
    }
}

pub mod prelude {
    pub use crate::camera::{spawn_follow_camera, CameraFollow, CameraPlugin};
    pub use crate::debug::{MovementDebug, MovementDebugPlugin};
    pub use crate::physics::{
        CharacterShape, Contacts, GameLayer, PhysicsPlugin, ShapeCaster, detect_contacts,
    };
    pub use crate::player::{
        spawn_player, CharacterBody, ConfigError, Facing, FrameInput, JumpKind, JumpPhase,
        MotionSnapshot, MovementMessage, MovementParams, MovementStats, MovementSystems, Player,
        PlayerPlugin, ReloadMovementStats,
    };
    pub use crate::PlatformerLocomotionPlugin;
}
