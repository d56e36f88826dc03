//! Physics domain: tests for probe geometry and contact detection.

use approx::assert_relative_eq;
use bevy::prelude::*;

use super::test_support::FlatWorld;
use super::{CharacterShape, Contacts, detect_contacts, ground_probe, head_probe};
use crate::player::MovementStats;

fn shape() -> CharacterShape {
    CharacterShape {
        body_size: Vec2::new(1.0, 2.0),
        feet_size: Vec2::new(0.8, 0.2),
    }
}

// -----------------------------------------------------------------------------
// Probe geometry
// -----------------------------------------------------------------------------

#[test]
fn test_ground_probe_is_feet_collider_swept_down() {
    let stats = MovementStats::default();
    let probe = ground_probe(Vec2::new(3.0, 1.0), &shape(), &stats);

    // Feet collider spans y = 0.0..0.2
    assert_relative_eq!(probe.origin.x, 3.0);
    assert_relative_eq!(probe.origin.y, 0.1);
    assert_eq!(probe.size, Vec2::new(0.8, 0.2));
    assert_eq!(probe.direction, Dir2::NEG_Y);
    assert_relative_eq!(probe.max_distance, stats.ground_detection_ray_length);
}

#[test]
fn test_head_probe_is_narrowed_slab_on_top() {
    let stats = MovementStats::default();
    let probe = head_probe(Vec2::new(0.0, 1.0), &shape(), &stats);

    assert_relative_eq!(probe.origin.y, 2.0);
    assert_relative_eq!(probe.size.x, 1.0 * stats.head_width);
    assert_relative_eq!(probe.size.y, stats.head_detection_ray_length);
    assert_eq!(probe.direction, Dir2::Y);
    assert_relative_eq!(probe.max_distance, stats.head_detection_ray_length);
}

// -----------------------------------------------------------------------------
// Contact detection
// -----------------------------------------------------------------------------

#[test]
fn test_standing_on_floor_is_grounded() {
    let stats = MovementStats::default();
    let contacts = detect_contacts(Vec2::new(0.0, 1.0), &shape(), &stats, &FlatWorld::floor(0.0));

    assert_eq!(
        contacts,
        Contacts {
            grounded: true,
            bumped_head: false,
        }
    );
}

#[test]
fn test_floor_beyond_probe_length_is_not_grounded() {
    let stats = MovementStats::default();
    let world = FlatWorld::floor(-0.1);
    let contacts = detect_contacts(Vec2::new(0.0, 1.0), &shape(), &stats, &world);

    assert!(!contacts.grounded);
}

#[test]
fn test_floor_within_probe_length_is_grounded() {
    let stats = MovementStats::default();
    let world = FlatWorld::floor(-0.01);
    let contacts = detect_contacts(Vec2::new(0.0, 1.0), &shape(), &stats, &world);

    assert!(contacts.grounded);
}

#[test]
fn test_low_ceiling_bumps_head() {
    let stats = MovementStats::default();
    let world = FlatWorld::floor(-5.0).with_ceiling(2.15);
    let contacts = detect_contacts(Vec2::new(0.0, 1.0), &shape(), &stats, &world);

    assert!(contacts.bumped_head);
    assert!(!contacts.grounded);
}

#[test]
fn test_high_ceiling_does_not_bump_head() {
    let stats = MovementStats::default();
    let world = FlatWorld::floor(0.0).with_ceiling(3.0);
    let contacts = detect_contacts(Vec2::new(0.0, 1.0), &shape(), &stats, &world);

    assert!(!contacts.bumped_head);
}

#[test]
fn test_empty_world_has_no_contacts() {
    let stats = MovementStats::default();
    let contacts = detect_contacts(Vec2::ZERO, &shape(), &stats, &FlatWorld::default());

    assert_eq!(contacts, Contacts::default());
}
