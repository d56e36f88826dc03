use std::path::{Path, PathBuf};

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_platformer_locomotion::prelude::*;

const STATS_PATH: &str = "assets/movement.ron";

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Platformer Playground".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((PlatformerLocomotionPlugin, MovementDebugPlugin))
        .add_systems(Startup, setup)
        .add_systems(Update, (debug_hotkeys, log_movement_messages))
        .run();
}

fn load_params() -> MovementParams {
    match MovementStats::load(Path::new(STATS_PATH)).and_then(MovementParams::configure) {
        Ok(params) => params,
        Err(e) => {
            warn!("Using default movement stats: {}", e);
            MovementParams::default()
        }
    }
}

fn setup(mut commands: Commands) {
    let player = spawn_player(
        &mut commands,
        load_params(),
        CharacterShape::default(),
        Vec2::new(0.0, 4.0),
    );

    let camera = spawn_follow_camera(&mut commands, player, 2.0);
    commands.entity(camera).insert(Projection::Orthographic(OrthographicProjection {
        scale: 0.05,
        ..OrthographicProjection::default_2d()
    }));

    spawn_level(&mut commands);
}

// ── Level ───────────────────────────────────────────────────────────

fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) {
    commands.spawn((
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
    ));
}

fn spawn_level(commands: &mut Commands) {
    let floor = Color::srgb(0.4, 0.5, 0.4);
    let platform = Color::srgb(0.5, 0.4, 0.3);

    // Floor and walls
    spawn_block(commands, Vec2::new(0.0, -1.0), Vec2::new(120.0, 2.0), floor);
    spawn_block(commands, Vec2::new(-61.0, 10.0), Vec2::new(2.0, 24.0), floor);
    spawn_block(commands, Vec2::new(61.0, 10.0), Vec2::new(2.0, 24.0), floor);

    // Stepping platforms
    spawn_block(commands, Vec2::new(-20.0, 5.0), Vec2::new(10.0, 1.0), platform);
    spawn_block(commands, Vec2::new(0.0, 10.0), Vec2::new(10.0, 1.0), platform);
    spawn_block(commands, Vec2::new(20.0, 15.0), Vec2::new(10.0, 1.0), platform);

    // Low ceiling for head bumps
    spawn_block(commands, Vec2::new(40.0, 6.0), Vec2::new(12.0, 1.0), platform);
}

// ── Debug ───────────────────────────────────────────────────────────

fn debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug: ResMut<MovementDebug>,
    mut reload: MessageWriter<ReloadMovementStats>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug.show_ground_box = !debug.show_ground_box;
        debug.show_head_box = !debug.show_head_box;
    }
    if keyboard.just_pressed(KeyCode::F2) {
        debug.show_walk_arc = !debug.show_walk_arc;
    }
    if keyboard.just_pressed(KeyCode::F3) {
        debug.show_run_arc = !debug.show_run_arc;
    }
    if keyboard.just_pressed(KeyCode::F5) {
        reload.write(ReloadMovementStats {
            path: PathBuf::from(STATS_PATH),
        });
    }
}

fn log_movement_messages(mut reader: MessageReader<MovementMessage>) {
    for message in reader.read() {
        info!("{:?}", message);
    }
}
