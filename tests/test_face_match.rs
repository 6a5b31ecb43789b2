use one2one::{
    faces_equal, faces_parallel, faces_rotated, match_faces, nearest_point_in_face, points_equal,
    Face, FaceId, FaceSpan, MatchContext, MatchResult,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A planar rows x cols grid face with unit spacing, node (r, c) at (r, c, 0).
fn grid_face(rows: usize, cols: usize) -> Face {
    let mut points = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            points.push([r as f64, c as f64, 0.0]);
        }
    }
    Face::from_points(rows, cols, points)
}

/// A cylinder surface face: rows walk the angle in 30 degree steps from
/// `start_deg`, columns walk z in 0.5 steps, radius 1.
fn cylinder_face(rows: usize, cols: usize, start_deg: f64) -> Face {
    let mut points = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        let theta = (start_deg + 30.0 * r as f64).to_radians();
        for c in 0..cols {
            points.push([theta.cos(), theta.sin(), 0.5 * c as f64]);
        }
    }
    Face::from_points(rows, cols, points)
}

fn ctx() -> MatchContext {
    MatchContext::new(0, FaceId::KMin, 1, FaceId::KMax)
}

#[test]
fn identical_faces_match_in_full() {
    let face = grid_face(5, 7);
    let got = match_faces(&face, &face.clone(), 1e-3, &ctx());
    assert_eq!(
        got,
        Some(MatchResult::Single(
            FaceSpan::full(5, 7),
            FaceSpan::full(5, 7)
        ))
    );
}

#[test]
fn disjoint_faces_do_not_match() {
    let face1 = grid_face(5, 5);
    let face2 = face1.translated([100.0, 0.0, 0.0]);
    assert_eq!(match_faces(&face1, &face2, 1e-3, &ctx()), None);
}

#[test]
fn contained_face_reports_its_window() {
    let big = grid_face(9, 9);
    let small = big.subface(2, 6, 1, 5);
    let got = match_faces(&big, &small, 1e-3, &ctx());
    assert_eq!(
        got,
        Some(MatchResult::Single(
            FaceSpan {
                rows: (2, 6),
                cols: (1, 5),
                axes: (0, 1),
            },
            FaceSpan::full(5, 5)
        ))
    );
}

#[test]
fn containment_is_symmetric_under_swap() {
    let big = grid_face(9, 9);
    let small = big.subface(2, 6, 1, 5);
    let got = match_faces(&small, &big, 1e-3, &ctx());
    assert_eq!(
        got,
        Some(MatchResult::Single(
            FaceSpan::full(5, 5),
            FaceSpan {
                rows: (2, 6),
                cols: (1, 5),
                axes: (0, 1),
            }
        ))
    );
}

#[test]
fn random_windows_are_recovered() {
    // windows of random position, direction and orientation, always at
    // least one node narrower than the face so the size ordering is strict
    let big = grid_face(9, 9);
    let mut rng = StdRng::seed_from_u64(9241);
    for _ in 0..40 {
        let r0 = rng.gen_range(0..7);
        let r1 = r0 + rng.gen_range(2..(10 - r0).min(9)) - 1;
        let c0 = rng.gen_range(0..7);
        let c1 = c0 + rng.gen_range(2..(10 - c0).min(9)) - 1;
        let (ra, rb) = if rng.gen() { (r1, r0) } else { (r0, r1) };
        let (ca, cb) = if rng.gen() { (c1, c0) } else { (c0, c1) };
        let transpose: bool = rng.gen();

        let window = big.subface(ra, rb, ca, cb);
        let (height, width) = window.shape();
        let small = if transpose {
            window.transposed()
        } else {
            window
        };

        let span1 = FaceSpan {
            rows: (ra, rb),
            cols: (ca, cb),
            axes: (0, 1),
        };
        let span2 = if transpose {
            FaceSpan {
                rows: (0, width - 1),
                cols: (0, height - 1),
                axes: (1, 0),
            }
        } else {
            FaceSpan::full(height, width)
        };

        let tag = format!("rows {ra}->{rb} cols {ca}->{cb} transpose {transpose}");
        let got = match_faces(&big, &small, 1e-3, &ctx());
        assert_eq!(got, Some(MatchResult::Single(span1, span2)), "{tag}");
        let swapped = match_faces(&small, &big, 1e-3, &ctx());
        assert_eq!(
            swapped,
            Some(MatchResult::Single(span2, span1)),
            "swapped, {tag}"
        );
    }
}

#[test]
fn reversed_window_keeps_its_direction() {
    let big = grid_face(9, 9);
    let small = big.subface(6, 2, 5, 1);
    let got = match_faces(&big, &small, 1e-3, &ctx());
    assert_eq!(
        got,
        Some(MatchResult::Single(
            FaceSpan {
                rows: (6, 2),
                cols: (5, 1),
                axes: (0, 1),
            },
            FaceSpan::full(5, 5)
        ))
    );
}

#[test]
fn transposed_window_swaps_the_axis_tags() {
    let big = grid_face(9, 5);
    let small = big.subface(2, 7, 1, 4).transposed();
    let got = match_faces(&big, &small, 1e-3, &ctx());
    assert_eq!(
        got,
        Some(MatchResult::Single(
            FaceSpan {
                rows: (2, 7),
                cols: (1, 4),
                axes: (0, 1),
            },
            FaceSpan {
                rows: (0, 3),
                cols: (0, 5),
                axes: (1, 0),
            }
        ))
    );
}

#[test]
fn window_across_the_wrap_seam_splits_in_two() {
    // closed ring: rows 0 and 12 carry the same nodes
    let big = cylinder_face(13, 3, 0.0);
    // seven rows running 270..450 degrees, through the seam at 360
    let small = cylinder_face(7, 3, 270.0);
    let mut context = ctx();
    context.wrap1 = true;
    let got = match_faces(&big, &small, 1e-3, &context);
    assert_eq!(
        got,
        Some(MatchResult::Double(
            (
                FaceSpan {
                    rows: (9, 12),
                    cols: (0, 2),
                    axes: (0, 1),
                },
                FaceSpan {
                    rows: (0, 3),
                    cols: (0, 2),
                    axes: (0, 1),
                },
            ),
            (
                FaceSpan {
                    rows: (0, 3),
                    cols: (0, 2),
                    axes: (0, 1),
                },
                FaceSpan {
                    rows: (3, 6),
                    cols: (0, 2),
                    axes: (0, 1),
                },
            ),
        ))
    );
}

#[test]
fn window_across_the_column_seam_splits_in_two() {
    // same ring, but the angle runs along the columns instead of the rows
    let big = cylinder_face(13, 3, 0.0).transposed();
    let small = cylinder_face(7, 3, 270.0).transposed();
    let mut context = ctx();
    context.wrap1 = true;
    let got = match_faces(&big, &small, 1e-3, &context);
    assert_eq!(
        got,
        Some(MatchResult::Double(
            (
                FaceSpan {
                    rows: (0, 2),
                    cols: (9, 12),
                    axes: (0, 1),
                },
                FaceSpan {
                    rows: (0, 2),
                    cols: (0, 3),
                    axes: (0, 1),
                },
            ),
            (
                FaceSpan {
                    rows: (0, 2),
                    cols: (0, 3),
                    axes: (0, 1),
                },
                FaceSpan {
                    rows: (0, 2),
                    cols: (3, 6),
                    axes: (0, 1),
                },
            ),
        ))
    );
}

#[test]
fn edge_band_overlap_reports_both_windows() {
    // the faces overhang each other, so no corner of either lies on the
    // other and only a band of rows is shared
    let big = grid_face(9, 3);
    let small = grid_face(7, 3).translated([-2.0, 0.0, 0.0]);
    let band1 = FaceSpan {
        rows: (0, 4),
        cols: (0, 2),
        axes: (0, 1),
    };
    let band2 = FaceSpan {
        rows: (2, 6),
        cols: (0, 2),
        axes: (0, 1),
    };
    assert_eq!(
        match_faces(&big, &small, 1e-3, &ctx()),
        Some(MatchResult::Single(band1, band2))
    );
    assert_eq!(
        match_faces(&small, &big, 1e-3, &ctx()),
        Some(MatchResult::Single(band2, band1))
    );
}

#[test]
fn small_offsets_stay_within_tolerance() {
    let res = 1e-3;
    let big = grid_face(9, 9);
    let window = big.subface(2, 6, 1, 5);

    let nudged = window.translated([0.5 * res, 0.0, 0.0]);
    let got = match_faces(&big, &nudged, res, &ctx());
    assert_eq!(
        got,
        Some(MatchResult::Single(
            FaceSpan {
                rows: (2, 6),
                cols: (1, 5),
                axes: (0, 1),
            },
            FaceSpan::full(5, 5)
        ))
    );

    let shifted = window.translated([2.0 * res, 0.0, 0.0]);
    assert_eq!(match_faces(&big, &shifted, res, &ctx()), None);
}

#[test]
fn predicate_basics() {
    let res = 1e-3;
    assert!(points_equal([0.0, 0.0, 0.0], [0.0004, 0.0, 0.0], res));
    assert!(!points_equal([0.0, 0.0, 0.0], [0.002, 0.0, 0.0], res));

    let face = grid_face(4, 4);
    assert!(faces_equal(&face, &face.clone(), res));
    assert!(!faces_equal(&face, &grid_face(4, 5), res));

    // rigid translation, any distance
    let moved = face.translated([0.3, -0.2, 5.0]);
    assert!(faces_parallel(&face, &moved, res));
    // perturbing one node spreads the offsets past the limit
    let mut pts = moved.points().to_vec();
    pts[5][0] += 3.0 * res;
    let warped = Face::from_points(4, 4, pts);
    assert!(!faces_parallel(&face, &warped, res));

    assert_eq!(nearest_point_in_face(&face, [2.0, 3.0, 0.0], res), Some((2, 3)));
    assert_eq!(nearest_point_in_face(&face, [2.0, 3.0, 0.5], res), None);
}

#[test]
fn rotated_faces_keep_a_constant_angle() {
    let res = 1e-3;
    let arc = cylinder_face(4, 3, 0.0);
    let angle = 20.0f64.to_radians();
    let turned = Face::from_points(
        4,
        3,
        arc.points()
            .iter()
            .map(|p| {
                [
                    p[0] * angle.cos() - p[1] * angle.sin(),
                    p[0] * angle.sin() + p[1] * angle.cos(),
                    p[2],
                ]
            })
            .collect(),
    );
    assert!(faces_rotated(&arc, &turned, res));

    // bending one node breaks the constant-angle property
    let mut pts = turned.points().to_vec();
    let bent = 0.1f64;
    let p = pts[4];
    pts[4] = [
        p[0] * bent.cos() - p[1] * bent.sin(),
        p[0] * bent.sin() + p[1] * bent.cos(),
        p[2],
    ];
    let warped = Face::from_points(4, 3, pts);
    assert!(!faces_rotated(&arc, &warped, res));

    // a node sitting on the axis has no angle at all
    let with_origin = grid_face(3, 3);
    assert!(!faces_rotated(&with_origin, &with_origin.clone(), res));
}
