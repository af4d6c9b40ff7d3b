//! Nearest-neighbour matching of access points to distribution points inside one region

use cabledrop_core::models::{NamedPoint, Region};

use crate::spatial::{distance, ContainmentTest};

/// One source point paired with its nearest target
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair<'a> {
    pub source: &'a NamedPoint,
    pub target: &'a NamedPoint,
    /// Position of `source` in the slice it came from
    pub source_index: usize,
    pub target_index: usize,
    /// Haversine distance in meters
    pub distance: f64,
}

/// Pair every source inside `region` with its nearest target inside `region`.
///
/// Sources are visited in slice order and targets are scanned in slice order.
/// A target only replaces the current best when it is strictly closer, so
/// ties go to the first target. A pair is kept when its distance is at most
/// `max_distance`; a NaN ceiling keeps nothing.
///
/// Brute force, `O(sources * targets)`.
pub fn match_nearest<'a>(
    region: &Region,
    sources: &'a [NamedPoint],
    targets: &'a [NamedPoint],
    max_distance: f64,
) -> Vec<MatchedPair<'a>> {
    let ring = ContainmentTest::new(&region.outer);

    let inside_targets: Vec<(usize, &NamedPoint)> =
        targets.iter().enumerate().filter(|(_, t)| ring.contains(&t.position)).collect();
    if inside_targets.is_empty() {
        return Vec::new();
    }

    sources
        .iter()
        .enumerate()
        .filter(|(_, s)| ring.contains(&s.position))
        .filter_map(|(source_index, source)| {
            let mut best: Option<(usize, &NamedPoint)> = None;
            let mut best_distance = f64::INFINITY;

            for &(target_index, target) in &inside_targets {
                let d = distance(&source.position, &target.position);
                if d < best_distance {
                    best_distance = d;
                    best = Some((target_index, target));
                }
            }

            let (target_index, target) = best?;
            (best_distance <= max_distance).then_some(MatchedPair {
                source,
                target,
                source_index,
                target_index,
                distance: best_distance,
            })
        })
        .collect()
}

/// Match access points (sources) to distribution points (targets) in `region`
pub fn match_region<'a>(
    region: &Region,
    distribution: &'a [NamedPoint],
    access: &'a [NamedPoint],
    max_distance: f64,
) -> Vec<MatchedPair<'a>> {
    match_nearest(region, access, distribution, max_distance)
}
