use bevy::prelude::*;

use crate::player::MotionSnapshot;

/// Camera that eases toward a character's position
#[derive(Component, Clone, Debug)]
pub struct CameraFollow {
    /// Entity carrying the `MotionSnapshot` to track
    pub target: Entity,
    /// Added to the target's y
    pub vertical_offset: f32,
    /// Lerp rate (1/s)
    pub sharpness: f32,
}

impl CameraFollow {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            vertical_offset: 0.0,
            sharpness: 10.0,
        }
    }
}

/// Spawns a 2D camera following `target`
pub fn spawn_follow_camera(commands: &mut Commands, target: Entity, vertical_offset: f32) -> Entity {
    commands
        .spawn((
            Camera2d,
            CameraFollow {
                vertical_offset,
                ..CameraFollow::new(target)
            },
            Transform::default(),
        ))
        .id()
}

/// Next camera position: eases x/y toward the target, keeps z
pub fn follow_step(current: Vec3, target: Vec2, follow: &CameraFollow, dt: f32) -> Vec3 {
    let goal = Vec3::new(target.x, target.y + follow.vertical_offset, current.z);
    current.lerp(goal, (dt * follow.sharpness).clamp(0.0, 1.0))
}

/// Moves follow cameras toward their targets
pub fn follow_target(
    mut camera_query: Query<(&CameraFollow, &mut Transform)>,
    target_query: Query<&MotionSnapshot>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (follow, mut transform) in &mut camera_query {
        let Ok(snapshot) = target_query.get(follow.target) else {
            continue;
        };

        transform.translation = follow_step(transform.translation, snapshot.position, follow, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follow() -> CameraFollow {
        CameraFollow {
            vertical_offset: 2.0,
            ..CameraFollow::new(Entity::PLACEHOLDER)
        }
    }

    #[test]
    fn test_follow_step_keeps_depth() {
        let next = follow_step(Vec3::new(0.0, 0.0, 10.0), Vec2::new(5.0, 5.0), &follow(), 0.016);
        assert_eq!(next.z, 10.0);
    }

    #[test]
    fn test_follow_step_moves_partway_toward_offset_target() {
        let next = follow_step(Vec3::ZERO, Vec2::new(10.0, 0.0), &follow(), 0.05);

        // sharpness 10 * dt 0.05 = half the distance
        assert!((next.x - 5.0).abs() < 1e-5);
        assert!((next.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_follow_step_snaps_on_long_frames() {
        let next = follow_step(Vec3::new(3.0, 3.0, 1.0), Vec2::new(-4.0, 8.0), &follow(), 1.0);
        assert_eq!(next, Vec3::new(-4.0, 10.0, 1.0));
    }
}
