//! Detection of blocks that wrap onto themselves, as an O-grid around a
//! blade or an annulus closed in one index direction does. The two
//! boundary faces perpendicular to the wrapped axis carry the same nodes,
//! and the connectivity table records them as matched to each other.

use crate::face::{Axis, BlockFaces};
use crate::predicates::{components_equal, faces_equal};

/// Check whether a block's min and max faces coincide along some axis.
///
/// Axes are probed in I, J, K order and the first wrapped axis wins; a
/// block closed in more than one direction reports only that first axis.
/// The corner node is screened first, with the same per-coordinate test
/// as the full face comparison, so that comparison only runs on
/// plausible candidates.
pub fn detect_self_wrap(faces: &BlockFaces, res: f64) -> Option<Axis> {
    for axis in Axis::ALL {
        let (min_id, max_id) = axis.face_pair();
        let lo = faces.get(min_id);
        let hi = faces.get(max_id);
        if !components_equal(lo.at(0, 0), hi.at(0, 0), res) {
            continue;
        }
        if faces_equal(lo, hi, res) {
            return Some(axis);
        }
    }
    None
}
