use bevy::math::{Quat, Vec3};

use crate::config::SpawnPoint;

/// Where and how a participant's avatar is placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnTransform {
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub orientation: Quat,
    /// Index into the spawn point set, `None` when the set was empty.
    pub point_index: Option<usize>,
}

impl SpawnTransform {
    /// Used when no spawn points are configured.
    pub const ORIGIN: SpawnTransform = SpawnTransform {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
        point_index: None,
    };
}

/// Round-robin spawn point for a 1-based ordinal.
///
/// Ordinals are unique per participant, so two participants only share a
/// point when there are fewer points than participants. Ordinals below 1 are
/// wrapped with Euclidean modulo instead of indexing out of range.
pub fn spawn_point_index(ordinal: i32, point_count: usize) -> Option<usize> {
    if point_count == 0 {
        return None;
    }
    let index = (i64::from(ordinal) - 1).rem_euclid(point_count as i64);
    Some(index as usize)
}

/// Transform for `ordinal`, falling back to [`SpawnTransform::ORIGIN`].
pub fn spawn_transform(points: &[SpawnPoint], ordinal: i32) -> SpawnTransform {
    spawn_point_index(ordinal, points.len())
        .map(|index| SpawnTransform {
            position: points[index].position,
            orientation: points[index].orientation,
            point_index: Some(index),
        })
        .unwrap_or(SpawnTransform::ORIGIN)
}
