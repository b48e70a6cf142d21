//! Orientation selection against a container's depth limit.
//!
//! An orientation decides which item dimension runs along the container's
//! depth axis; the other two become the footprint on the open face.

use stowage_core::{Dimensions, OrientationPolicy};

/// Axis indices into `[width, height, depth]` as
/// (footprint width, footprint height, depth).
pub type AxisMap = (usize, usize, usize);

/// The default candidates, in tie-breaking order.
const THREE_CANDIDATES: [AxisMap; 3] = [
    (0, 1, 2), // width x height face, depth along depth
    (0, 2, 1), // width x depth face, height along depth
    (1, 2, 0), // height x depth face, width along depth
];

/// Every axis permutation; the default candidates come first.
const ALL_PERMUTATIONS: [AxisMap; 6] = [
    (0, 1, 2),
    (0, 2, 1),
    (1, 2, 0),
    (1, 0, 2),
    (2, 0, 1),
    (2, 1, 0),
];

/// A chosen orientation of an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Footprint extent along the container's width axis.
    pub footprint_width: f64,
    /// Footprint extent along the container's height axis.
    pub footprint_height: f64,
    /// Extent along the container's depth axis.
    pub depth: f64,
    /// Position of this candidate in the policy's candidate list.
    pub candidate: usize,
}

impl Orientation {
    fn from_axes(dims: &Dimensions, axes: AxisMap, candidate: usize) -> Self {
        let extents = [dims.width, dims.height, dims.depth];
        Self {
            footprint_width: extents[axes.0],
            footprint_height: extents[axes.1],
            depth: extents[axes.2],
            candidate,
        }
    }

    /// Area of the footprint on the open face.
    pub fn footprint_area(&self) -> f64 {
        self.footprint_width * self.footprint_height
    }
}

/// Returns the candidate axis maps of a policy.
pub fn candidates(policy: OrientationPolicy) -> &'static [AxisMap] {
    match policy {
        OrientationPolicy::ThreeCandidates => &THREE_CANDIDATES,
        OrientationPolicy::AllPermutations => &ALL_PERMUTATIONS,
    }
}

/// Returns every candidate whose depth fits, smallest footprint first.
///
/// Equal areas keep candidate order.
pub fn feasible_orientations(
    policy: OrientationPolicy,
    dims: &Dimensions,
    container_depth: f64,
) -> Vec<Orientation> {
    let mut feasible: Vec<Orientation> = candidates(policy)
        .iter()
        .enumerate()
        .map(|(idx, &axes)| Orientation::from_axes(dims, axes, idx))
        .filter(|o| o.depth <= container_depth)
        .collect();

    feasible.sort_by(|a, b| a.footprint_area().total_cmp(&b.footprint_area()));
    feasible
}

/// Picks the depth-feasible orientation with the smallest footprint among
/// the three default candidates.
///
/// Returns `None` when every candidate is deeper than `container_depth`.
pub fn select_orientation(dims: &Dimensions, container_depth: f64) -> Option<Orientation> {
    select_orientation_with(OrientationPolicy::ThreeCandidates, dims, container_depth)
}

/// Like [`select_orientation`] with an explicit candidate policy.
pub fn select_orientation_with(
    policy: OrientationPolicy,
    dims: &Dimensions,
    container_depth: f64,
) -> Option<Orientation> {
    candidates(policy)
        .iter()
        .enumerate()
        .map(|(idx, &axes)| Orientation::from_axes(dims, axes, idx))
        .filter(|o| o.depth <= container_depth)
        .min_by(|a, b| a.footprint_area().total_cmp(&b.footprint_area()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prefers_smallest_footprint() {
        // Candidates: 30x40 (d20), 30x20 (d40), 40x20 (d30).
        let dims = Dimensions::new(30.0, 40.0, 20.0);
        let o = select_orientation(&dims, 50.0).unwrap();

        assert_relative_eq!(o.footprint_width, 30.0);
        assert_relative_eq!(o.footprint_height, 20.0);
        assert_relative_eq!(o.depth, 40.0);
        assert_eq!(o.candidate, 1);
    }

    #[test]
    fn test_depth_limit_filters_candidates() {
        let dims = Dimensions::new(30.0, 40.0, 20.0);
        let o = select_orientation(&dims, 20.0).unwrap();

        assert_relative_eq!(o.footprint_area(), 1200.0);
        assert_relative_eq!(o.depth, 20.0);
        assert_eq!(o.candidate, 0);
    }

    #[test]
    fn test_infeasible() {
        let dims = Dimensions::new(30.0, 40.0, 20.0);
        assert!(select_orientation(&dims, 19.9).is_none());
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let cube = Dimensions::new(10.0, 10.0, 10.0);
        let o = select_orientation(&cube, 10.0).unwrap();
        assert_eq!(o.candidate, 0);
    }

    #[test]
    fn test_three_candidates_only() {
        let dims = Dimensions::new(50.0, 20.0, 10.0);
        let three = select_orientation(&dims, 50.0).unwrap();
        assert_relative_eq!(three.footprint_width, 20.0);
        assert_relative_eq!(three.footprint_height, 10.0);
        assert_eq!(three.candidate, 2);

        let feasible = feasible_orientations(OrientationPolicy::ThreeCandidates, &dims, 50.0);
        assert_eq!(feasible.len(), 3);
    }

    #[test]
    fn test_all_permutations_order() {
        let dims = Dimensions::new(50.0, 20.0, 10.0);
        let feasible = feasible_orientations(OrientationPolicy::AllPermutations, &dims, 50.0);

        assert_eq!(feasible.len(), 6);
        for pair in feasible.windows(2) {
            assert!(pair[0].footprint_area() <= pair[1].footprint_area());
        }
        // 20 x 10 comes from the default candidate before its swapped twin.
        assert_eq!(feasible[0].candidate, 2);
        assert_eq!(feasible[1].candidate, 5);
    }
}
