use one2one::{find_bound_point_in_line, find_part_in_face, find_point_in_lines, Face};

fn line_points(xs: std::ops::Range<i32>, y: f64, z: f64) -> Vec<[f64; 3]> {
    xs.map(|x| [x as f64, y, z]).collect()
}

#[test]
fn probe_prefers_index_zero() {
    let points = line_points(4..9, 0.0, 0.0);
    let miss = line_points(20..25, 0.0, 0.0);
    let hit = line_points(0..9, 0.0, 0.0);
    let lines: [&[[f64; 3]]; 2] = [&miss, &hit];
    assert_eq!(find_point_in_lines(&points, &lines, 1e-3), Some((0, 1)));
}

#[test]
fn probe_strides_into_the_interior() {
    let points = line_points(0..9, 0.0, 0.0);
    let rail = line_points(4..7, 0.0, 0.0);
    let lines: [&[[f64; 3]]; 1] = [&rail];
    // index 0 misses; the stride pattern reaches index 4 first
    assert_eq!(find_point_in_lines(&points, &lines, 1e-3), Some((4, 0)));
}

#[test]
fn probe_reports_no_contact() {
    let points = line_points(0..5, 0.0, 0.0);
    let rail = line_points(0..5, 3.0, 0.0);
    let lines: [&[[f64; 3]]; 1] = [&rail];
    assert_eq!(find_point_in_lines(&points, &lines, 1e-3), None);
}

#[test]
fn bisection_brackets_the_run() {
    // points 3..=7 lie on the rail, the rest do not
    let points = line_points(0..11, 0.0, 0.0);
    let rail = line_points(3..8, 0.0, 0.0);

    let first = find_bound_point_in_line(0, 5, &points, &rail, 1e-3);
    assert_eq!(first, 3);

    let last = find_bound_point_in_line(5, points.len(), &points, &rail, 1e-3);
    assert_eq!(last, 7);
}

/// A planar face, node (r, c) at (r + row0, c, 0).
fn strip_face(rows: usize, cols: usize, row0: f64) -> Face {
    let mut points = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            points.push([r as f64 + row0, c as f64, 0.0]);
        }
    }
    Face::from_points(rows, cols, points)
}

#[test]
fn edge_overlap_run_is_located() {
    let big = strip_face(9, 3, 0.0);
    // rows 0..=4 of the small face lie on the big one, rows 5 and 6 hang off
    let small = strip_face(7, 3, 4.0);
    assert_eq!(find_part_in_face(&big, &small, 1e-3), Some((0, 4)));
}

#[test]
fn overlap_must_span_both_boundary_columns() {
    let big = strip_face(9, 3, 0.0);
    // first column tracks the big face but the far column runs at y = 6
    let mut points = Vec::new();
    for r in 0..5 {
        for c in 0..3 {
            points.push([r as f64 + 4.0, 3.0 * c as f64, 0.0]);
        }
    }
    let wide = Face::from_points(5, 3, points);
    assert_eq!(find_part_in_face(&big, &wide, 1e-3), None);
}

#[test]
fn single_node_contact_is_rejected() {
    let big = strip_face(9, 3, 0.0);
    // only row 0 of the small face touches the big one
    let small = strip_face(5, 3, 8.0);
    assert_eq!(find_part_in_face(&big, &small, 1e-3), None);
}
