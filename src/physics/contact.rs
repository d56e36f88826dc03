use avian2d::prelude::*;
use bevy::prelude::*;

use super::GameLayer;
use crate::player::MovementStats;

/// Result of the per-tick contact probes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub grounded: bool,
    pub bumped_head: bool,
}

/// Collider dimensions the contact probes are shaped to.
///
/// The feet collider sits at the bottom of the body, horizontally centred.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CharacterShape {
    pub body_size: Vec2,
    pub feet_size: Vec2,
}

impl Default for CharacterShape {
    fn default() -> Self {
        Self {
            body_size: Vec2::new(1.0, 2.0),
            feet_size: Vec2::new(0.9, 0.2),
        }
    }
}

/// A box swept along a direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxProbe {
    pub origin: Vec2,
    pub size: Vec2,
    pub direction: Dir2,
    pub max_distance: f32,
}

/// Box-cast query against walkable geometry.
///
/// Only hit presence matters; a miss is the normal "no contact" outcome.
pub trait ShapeCaster {
    fn cast_box(&self, origin: Vec2, size: Vec2, direction: Dir2, max_distance: f32) -> bool;

    fn cast_probe(&self, probe: &BoxProbe) -> bool {
        self.cast_box(probe.origin, probe.size, probe.direction, probe.max_distance)
    }
}

/// Feet probe: the feet collider swept downward
pub fn ground_probe(position: Vec2, shape: &CharacterShape, stats: &MovementStats) -> BoxProbe {
    let feet_center_y = position.y - shape.body_size.y / 2.0 + shape.feet_size.y / 2.0;
    BoxProbe {
        origin: Vec2::new(position.x, feet_center_y),
        size: shape.feet_size,
        direction: Dir2::NEG_Y,
        max_distance: stats.ground_detection_ray_length,
    }
}

/// Head probe: a thin slab on top of the body swept upward
pub fn head_probe(position: Vec2, shape: &CharacterShape, stats: &MovementStats) -> BoxProbe {
    BoxProbe {
        origin: Vec2::new(position.x, position.y + shape.body_size.y / 2.0),
        size: Vec2::new(
            shape.body_size.x * stats.head_width,
            stats.head_detection_ray_length,
        ),
        direction: Dir2::Y,
        max_distance: stats.head_detection_ray_length,
    }
}

/// Runs both probes for a body at `position`
pub fn detect_contacts(
    position: Vec2,
    shape: &CharacterShape,
    stats: &MovementStats,
    caster: &impl ShapeCaster,
) -> Contacts {
    Contacts {
        grounded: caster.cast_probe(&ground_probe(position, shape, stats)),
        bumped_head: caster.cast_probe(&head_probe(position, shape, stats)),
    }
}

/// [`ShapeCaster`] backed by Avian's spatial query, filtered to [`GameLayer::Ground`]
pub struct AvianCaster<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> AvianCaster<'a, 'w, 's> {
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>) -> Self {
        Self {
            spatial_query,
            filter: SpatialQueryFilter::from_mask(GameLayer::Ground),
        }
    }
}

impl ShapeCaster for AvianCaster<'_, '_, '_> {
    fn cast_box(&self, origin: Vec2, size: Vec2, direction: Dir2, max_distance: f32) -> bool {
        let shape = Collider::rectangle(size.x, size.y);
        let config = ShapeCastConfig {
            max_distance,
            ..default()
        };

        self.spatial_query
            .cast_shape(&shape, origin, 0.0, direction, &config, &self.filter)
            .is_some()
    }
}
