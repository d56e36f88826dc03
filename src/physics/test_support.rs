//! Fake world geometry for driving bodies without Avian.

use bevy::prelude::*;

use super::ShapeCaster;

/// Infinite horizontal floor and/or ceiling planes
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatWorld {
    /// y of the floor's top surface
    pub floor_y: Option<f32>,
    /// y of the ceiling's bottom surface
    pub ceiling_y: Option<f32>,
}

impl FlatWorld {
    pub fn floor(y: f32) -> Self {
        Self {
            floor_y: Some(y),
            ceiling_y: None,
        }
    }

    pub fn with_ceiling(mut self, y: f32) -> Self {
        self.ceiling_y = Some(y);
        self
    }
}

impl ShapeCaster for FlatWorld {
    fn cast_box(&self, origin: Vec2, size: Vec2, direction: Dir2, max_distance: f32) -> bool {
        if direction == Dir2::NEG_Y {
            let bottom = origin.y - size.y / 2.0;
            self.floor_y.is_some_and(|floor| bottom - max_distance <= floor)
        } else if direction == Dir2::Y {
            let top = origin.y + size.y / 2.0;
            self.ceiling_y.is_some_and(|ceiling| ceiling <= top + max_distance)
        } else {
            false
        }
    }
}
