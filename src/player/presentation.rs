use bevy::prelude::*;

use super::state::*;

/// Refreshes the read model animation and camera consumers look at
pub fn publish_motion_snapshot(mut query: Query<(&CharacterBody, &mut MotionSnapshot)>) {
    for (body, mut snapshot) in &mut query {
        snapshot.set_if_neq(body.snapshot());
    }
}

/// Mirrors the sprite to match the character's facing
pub fn sync_sprite_facing(mut query: Query<(&MotionSnapshot, &mut Sprite), Changed<MotionSnapshot>>) {
    for (snapshot, mut sprite) in &mut query {
        let flip = snapshot.facing == Facing::Left;
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}
