//! Matching of declared periodic face pairs.
//!
//! Periodic interfaces connect faces that do not touch: translationally
//! periodic faces are congruent up to a rigid offset, rotationally
//! periodic faces up to a rigid rotation about the z axis. The caller
//! names the candidate pairs; this module confirms them geometrically and
//! produces the same kind of index spans as plain face matching.

use log::warn;
use serde::Serialize;

use crate::block::Block;
use crate::face::{Face, FaceId};
use crate::face_match::{small_in_big, FaceSpan, MatchContext, MatchResult};
use crate::predicates::faces_rotated;

/// A user-declared periodic face pair, identified by block index and face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PeriodicFaces {
    pub block1: usize,
    pub face1: FaceId,
    pub block2: usize,
    pub face2: FaceId,
    /// Rotationally periodic about the z axis instead of translationally.
    pub rotated: bool,
}

impl PeriodicFaces {
    pub fn translational(block1: usize, face1: FaceId, block2: usize, face2: FaceId) -> Self {
        PeriodicFaces {
            block1,
            face1,
            block2,
            face2,
            rotated: false,
        }
    }

    pub fn rotational(block1: usize, face1: FaceId, block2: usize, face2: FaceId) -> Self {
        PeriodicFaces {
            block1,
            face1,
            block2,
            face2,
            rotated: true,
        }
    }
}

/// Match two translationally periodic faces.
///
/// The rigid offset is estimated as the average of the four corner-node
/// offsets, `face2` is shifted back by it, and the shifted face goes
/// through the ordinary contained-face matching. Partial periodic overlap
/// therefore works exactly like partial abutting overlap.
pub fn match_periodic_faces(
    face1: &Face,
    face2: &Face,
    res: f64,
    ctx: &MatchContext,
) -> Option<MatchResult> {
    let c1 = face1.corner_points();
    let c2 = face2.corner_points();
    let mut offset = [0.0f64; 3];
    for corner in 0..4 {
        for c in 0..3 {
            offset[c] += c2[corner][c] - c1[corner][c];
        }
    }
    for c in offset.iter_mut() {
        *c /= 4.0;
    }
    let shifted = face2.translated([-offset[0], -offset[1], -offset[2]]);
    small_in_big(face1, &shifted, res, ctx)
}

/// Match two rotationally periodic faces about the z axis.
///
/// Both faces must have the same shape; only full-face rotational matches
/// are supported. Row alignment is fixed by comparing corner z values and
/// column alignment by comparing corner radii, flipping `face2` as needed,
/// and the aligned pair must then keep a constant rotation angle over
/// every node. Flips are encoded as reversed index ranges in the result.
pub fn match_rotated_periodic_faces(
    face1: &Face,
    face2: &Face,
    res: f64,
    ctx: &MatchContext,
) -> Option<MatchResult> {
    if face1.shape() != face2.shape() {
        warn!(
            "{}: rotationally periodic faces must have equal shapes",
            ctx.label()
        );
        return None;
    }
    let (nr, nc) = face1.shape();
    let close = |a: f64, b: f64| (a - b).abs() < res;

    let z1 = |r: usize, c: usize| face1.at(r, c)[2];
    let z2 = |r: usize, c: usize| face2.at(r, c)[2];
    let row_flip = (close(z2(0, 0), z1(nr - 1, 0)) && close(z2(0, nc - 1), z1(nr - 1, nc - 1)))
        || (close(z2(0, 0), z1(nr - 1, nc - 1)) && close(z2(0, nc - 1), z1(nr - 1, 0)));
    let work = if row_flip {
        face2.reversed_rows()
    } else {
        face2.clone()
    };

    let radius = |f: &Face, r: usize, c: usize| {
        let p = f.at(r, c);
        (p[0] * p[0] + p[1] * p[1]).sqrt()
    };
    let col_flip = close(radius(&work, 0, 0), radius(face1, 0, nc - 1))
        && close(radius(&work, 0, nc - 1), radius(face1, 0, 0));
    let work = if col_flip { work.reversed_cols() } else { work };

    if !faces_rotated(face1, &work, res) {
        warn!(
            "{}: rotation angle is not constant over the faces",
            ctx.label()
        );
        return None;
    }

    let span1 = FaceSpan::full(nr, nc);
    let rows2 = if row_flip { (nr - 1, 0) } else { (0, nr - 1) };
    let cols2 = if col_flip { (nc - 1, 0) } else { (0, nc - 1) };
    Some(MatchResult::Single(
        span1,
        FaceSpan {
            rows: rows2,
            cols: cols2,
            axes: (0, 1),
        },
    ))
}

/// Rotation matrix for the requested axis.
///
/// # Arguments
/// * `angle` - Rotation angle in radians.
/// * `axis` - Axis designator (`'x'`, `'y'`, `'z'`, case-insensitive).
///
/// # Returns
/// A 3×3 rotation matrix in row-major order.
pub fn create_rotation_matrix(angle: f64, axis: char) -> [[f64; 3]; 3] {
    match axis.to_ascii_lowercase() {
        'x' => [
            [1.0, 0.0, 0.0],
            [0.0, angle.cos(), -angle.sin()],
            [0.0, angle.sin(), angle.cos()],
        ],
        'y' => [
            [angle.cos(), 0.0, angle.sin()],
            [0.0, 1.0, 0.0],
            [-angle.sin(), 0.0, angle.cos()],
        ],
        'z' => [
            [angle.cos(), -angle.sin(), 0.0],
            [angle.sin(), angle.cos(), 0.0],
            [0.0, 0.0, 1.0],
        ],
        _ => panic!("Unsupported rotation axis '{axis}'"),
    }
}

/// Rotate every node of a block using a precomputed rotation matrix.
pub fn rotate_block(block: &Block, rotation: [[f64; 3]; 3]) -> Block {
    let mut out = block.clone();
    for n in 0..block.npoints() {
        let p = [block.x[n], block.y[n], block.z[n]];
        out.x[n] = rotation[0][0] * p[0] + rotation[0][1] * p[1] + rotation[0][2] * p[2];
        out.y[n] = rotation[1][0] * p[0] + rotation[1][1] * p[1] + rotation[1][2] * p[2];
        out.z[n] = rotation[2][0] * p[0] + rotation[2][1] * p[1] + rotation[2][2] * p[2];
    }
    out
}
