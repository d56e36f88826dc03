use avian2d::prelude::*;
use bevy::prelude::*;

use crate::physics::{BoxProbe, CharacterShape, GameLayer, ground_probe, head_probe};
use crate::player::{CharacterBody, MovementParams, MovementSystems};

/// Toggles for the movement gizmo overlay
#[derive(Resource, Clone, Debug)]
pub struct MovementDebug {
    pub show_ground_box: bool,
    pub show_head_box: bool,
    pub show_walk_arc: bool,
    pub show_run_arc: bool,
    /// Draw arcs toward +x instead of the facing direction
    pub draw_right: bool,
    /// Cut arcs at the first ground hit
    pub stop_on_collision: bool,
    /// Arc samples per `time_till_jump_apex`
    pub arc_resolution: usize,
    /// Total arc samples
    pub visualization_steps: usize,
}

impl Default for MovementDebug {
    fn default() -> Self {
        Self {
            show_ground_box: false,
            show_head_box: false,
            show_walk_arc: false,
            show_run_arc: false,
            draw_right: true,
            stop_on_collision: true,
            arc_resolution: 20,
            visualization_steps: 90,
        }
    }
}

/// Plugin for the movement gizmo overlay
pub struct MovementDebugPlugin;

impl Plugin for MovementDebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementDebug>();
        app.add_systems(
            Update,
            (draw_contact_probes, draw_jump_arcs).after(MovementSystems::Present),
        );
    }
}

fn probe_color(hit: bool) -> Color {
    if hit {
        Color::srgb(0.2, 0.9, 0.2)
    } else {
        Color::srgb(0.9, 0.2, 0.2)
    }
}

fn draw_probe(gizmos: &mut Gizmos, probe: &BoxProbe, hit: bool) {
    // Cover the whole swept area
    let sweep = probe.direction.as_vec2() * probe.max_distance;
    let center = probe.origin + sweep / 2.0;
    let size = probe.size + sweep.abs();
    gizmos.rect_2d(Isometry2d::from_translation(center), size, probe_color(hit));
}

/// Draws the feet and head probes in green (hit) or red (miss)
pub fn draw_contact_probes(
    mut gizmos: Gizmos,
    debug: Res<MovementDebug>,
    query: Query<(&CharacterBody, &CharacterShape, &MovementParams)>,
) {
    if !debug.show_ground_box && !debug.show_head_box {
        return;
    }

    for (body, shape, params) in &query {
        if debug.show_ground_box {
            let probe = ground_probe(body.position, shape, params.stats());
            draw_probe(&mut gizmos, &probe, body.contacts.grounded);
        }
        if debug.show_head_box {
            let probe = head_probe(body.position, shape, params.stats());
            draw_probe(&mut gizmos, &probe, body.contacts.bumped_head);
        }
    }
}

/// Truncates `points` after the first segment that crosses ground geometry
fn clip_at_ground(points: &mut Vec<Vec2>, spatial_query: &SpatialQuery) {
    let filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for i in 1..points.len() {
        let (from, to) = (points[i - 1], points[i]);
        let Ok((direction, length)) = Dir2::new_and_length(to - from) else {
            continue;
        };

        if let Some(hit) = spatial_query.cast_ray(from, direction, length, true, &filter) {
            points[i] = from + direction.as_vec2() * hit.distance;
            points.truncate(i + 1);
            return;
        }
    }
}

/// Draws the analytic walk and run jump arcs from each character's feet
pub fn draw_jump_arcs(
    mut gizmos: Gizmos,
    debug: Res<MovementDebug>,
    spatial_query: SpatialQuery,
    query: Query<(&CharacterBody, &CharacterShape, &MovementParams)>,
) {
    if !debug.show_walk_arc && !debug.show_run_arc {
        return;
    }

    for (body, shape, params) in &query {
        let direction = if debug.draw_right {
            1.0
        } else {
            body.facing.sign()
        };
        let feet = body.position - Vec2::new(0.0, shape.body_size.y / 2.0);
        let stats = params.stats();

        let arcs = [
            (
                debug.show_walk_arc,
                stats.max_walk_speed,
                Color::srgb(1.0, 1.0, 1.0),
            ),
            (
                debug.show_run_arc,
                stats.max_run_speed,
                Color::srgb(1.0, 0.6, 0.1),
            ),
        ];

        for (enabled, speed, color) in arcs {
            if !enabled {
                continue;
            }
            let mut points = params.jump_arc(
                feet,
                speed * direction,
                debug.arc_resolution,
                debug.visualization_steps,
            );
            if debug.stop_on_collision {
                clip_at_ground(&mut points, &spatial_query);
            }
            gizmos.linestrip_2d(points, color);
        }
    }
}
