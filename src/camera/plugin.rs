use bevy::prelude::*;

use super::follow::*;
use crate::player::MovementSystems;

/// Plugin for the 2D follow camera
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            follow_target.after(MovementSystems::Present),
        );
    }
}
