//! Validation predicates over position sets.
//!
//! Both public predicates are total: they never panic and never mutate their input.
use std::collections::HashMap;

use tracing::debug;

use crate::geometry::euclidean_distance;
use crate::position::{ObjectId, PositionSet};

/// Returns true iff every object id occurs exactly once and every coordinate
/// is a finite number. An empty set is valid.
pub fn is_valid_position(position: &PositionSet) -> bool {
    let duplicates = find_duplicate_ids(position);
    if !duplicates.is_empty() {
        debug!("Position set has duplicate object ids: {:?}.", duplicates);
        return false;
    }

    if let Some(bad) = position
        .iter()
        .find(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        debug!(
            "Object {} has a missing or non-finite coordinate ({}, {}).",
            bad.object, bad.x, bad.y
        );
        return false;
    }

    true
}

/// Returns true iff every unordered pair of objects is at least
/// `min_distance` apart (inclusive). Sets with fewer than two objects
/// satisfy any threshold.
pub fn is_distance_at_least(position: &PositionSet, min_distance: f64) -> bool {
    let points = position.as_slice();
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            // Negated so that a NaN distance or threshold fails the check.
            if !(euclidean_distance(a.point(), b.point()) >= min_distance) {
                return false;
            }
        }
    }
    true
}

/// Smallest pairwise distance, or `None` for sets with fewer than two objects.
pub fn min_pairwise_distance(position: &PositionSet) -> Option<f64> {
    let points = position.as_slice();
    let mut min: Option<f64> = None;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = euclidean_distance(a.point(), b.point());
            min = Some(min.map_or(d, |m| m.min(d)));
        }
    }
    min
}

/// Ids that occur more than once, in order of first occurrence.
pub fn find_duplicate_ids(position: &PositionSet) -> Vec<ObjectId> {
    let mut counts: HashMap<ObjectId, usize> = HashMap::with_capacity(position.len());
    let mut duplicates = Vec::new();
    for p in position {
        let count = counts.entry(p.object).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(p.object);
        }
    }
    duplicates
}
