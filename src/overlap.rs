//! Locates the overlapping run of rows when a small face shares only part
//! of an edge with a big face, so no corner of either face lands on the
//! other. The small face's first column is probed against the big face's
//! two boundary columns; a hit is then widened into a contiguous run by
//! bisection.

use crate::face::Face;
use crate::predicates::curve_distance;

/// Probe the points of a curve against a set of rails and report the first
/// point that lies on one, as `(point index, rail index)`.
///
/// Index 0 is tried first, then the remaining indices in a coarse-to-fine
/// stride pattern so that long overlaps are found in a few probes.
pub fn find_point_in_lines(
    points: &[[f64; 3]],
    lines: &[&[[f64; 3]]],
    res: f64,
) -> Option<(usize, usize)> {
    for (line_n, line) in lines.iter().enumerate() {
        if curve_distance(line, points[0]) < res {
            return Some((0, line_n));
        }
    }
    for i in (0..=6).rev() {
        let step = 1usize << i;
        for j in (0..points.len()).step_by(step) {
            if j % (step * 2) == 0 {
                continue;
            }
            for (line_n, line) in lines.iter().enumerate() {
                if curve_distance(line, points[j]) < res {
                    return Some((j, line_n));
                }
            }
        }
    }
    None
}

/// Bisect for the boundary of the on-line run of `points` between
/// `p_start` and `p_end`.
///
/// The run must be contiguous for the answer to be meaningful; callers
/// re-verify the bracketed slice afterwards. With `points[p_start]` on the
/// line this walks the run's far end (and returns an on-line index); with
/// `points[p_start]` off the line it walks backwards to the run's first
/// index.
pub fn find_bound_point_in_line(
    mut p_start: usize,
    mut p_end: usize,
    points: &[[f64; 3]],
    line: &[[f64; 3]],
    res: f64,
) -> usize {
    let state = |p: usize| -> i32 {
        if curve_distance(line, points[p]) < res {
            1
        } else {
            -1
        }
    };
    let mut state_s = state(p_start);
    loop {
        let p_m = (p_start + p_end) / 2;
        let state_m = state(p_m);
        if state_m * state_s < 0 {
            p_end = p_m;
        } else {
            p_start = p_m;
            state_s = state_m;
        }
        if p_end - p_start <= 1 {
            return if state_s == 1 { p_start } else { p_end };
        }
    }
}

/// Find the run of rows `p1..=p2` of `small` whose first column lies along
/// one boundary column of `big`.
///
/// The opposite column of `small` must track the opposite boundary column
/// of `big` at both ends of the run, otherwise the overlap does not span
/// the face and the candidate is rejected. Runs of a single row are also
/// rejected.
pub fn find_part_in_face(big: &Face, small: &Face, res: f64) -> Option<(usize, usize)> {
    let points0 = small.column_curve(0);
    let points1 = small.column_curve(small.cols() - 1);
    let line1 = big.column_curve(0);
    let line2 = big.column_curve(big.cols() - 1);
    let lines: [&[[f64; 3]]; 2] = [&line1, &line2];

    let (p_n, line_n) = find_point_in_lines(&points0, &lines, res)?;
    let p1 = find_bound_point_in_line(0, p_n, &points0, lines[line_n], res);
    let p2 = find_bound_point_in_line(p_n, points0.len(), &points0, lines[line_n], res);

    let other = lines[1 - line_n];
    if curve_distance(other, points1[p1]) > res {
        return None;
    }
    if curve_distance(other, points1[p2]) > res {
        return None;
    }
    if p1 == p2 {
        return None;
    }
    Some((p1, p2))
}
