use approx::assert_abs_diff_eq;
use one2one::{
    connectivity_with, create_rotation_matrix, rotate_block, Axis, Block, BlockRange,
    ConnectivityOptions, FaceId, FaceMatch, IndexRange, MatchKind, PeriodicFaces,
};

fn range(
    i: (usize, usize),
    j: (usize, usize),
    k: (usize, usize),
    axis1: Axis,
    axis2: Axis,
) -> BlockRange {
    BlockRange {
        i: IndexRange::new(i.0, i.1),
        j: IndexRange::new(j.0, j.1),
        k: IndexRange::new(k.0, k.1),
        axis1,
        axis2,
    }
}

fn periodic_options(periodic: Vec<PeriodicFaces>) -> ConnectivityOptions {
    ConnectivityOptions {
        periodic,
        periodic_only: true,
        ..ConnectivityOptions::default()
    }
}

/// A 15 degree sector of an annulus: i walks the angle, j walks z, k walks
/// the radius.
fn sector() -> Block {
    Block::from_fn(3, 3, 3, |i, j, k| {
        let theta = (15.0 * i as f64).to_radians();
        let r = 1.0 + 0.25 * k as f64;
        [r * theta.cos(), r * theta.sin(), 0.5 * j as f64]
    })
}

#[test]
fn translational_pair_connects_across_the_gap() {
    let channel = Block::from_fn(4, 3, 3, |i, j, k| [i as f64, 2.0 * j as f64, k as f64]);
    let decl = PeriodicFaces::translational(0, FaceId::JMin, 0, FaceId::JMax);
    let table = connectivity_with(&[channel], &periodic_options(vec![decl])).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.matches[0],
        FaceMatch {
            block1: 0,
            range1: range((1, 4), (1, 1), (1, 3), Axis::I, Axis::K),
            block2: 0,
            range2: range((1, 4), (3, 3), (1, 3), Axis::I, Axis::K),
            kind: MatchKind::PeriodicTranslated,
        }
    );
    assert_eq!(table.periodic_matches().len(), 1);
}

#[test]
fn rotational_pair_connects_the_sector_sides() {
    let decl = PeriodicFaces::rotational(0, FaceId::IMin, 0, FaceId::IMax);
    let table = connectivity_with(&[sector()], &periodic_options(vec![decl])).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.matches[0],
        FaceMatch {
            block1: 0,
            range1: range((1, 1), (1, 3), (1, 3), Axis::J, Axis::K),
            block2: 0,
            range2: range((3, 3), (1, 3), (1, 3), Axis::J, Axis::K),
            kind: MatchKind::PeriodicRotated,
        }
    );
}

#[test]
fn flipped_rotational_pair_reverses_the_range() {
    // the neighbouring sector stores z in the opposite j direction
    let flipped = Block::from_fn(3, 3, 3, |i, j, k| {
        let theta = (15.0 + 15.0 * i as f64).to_radians();
        let r = 1.0 + 0.25 * k as f64;
        [r * theta.cos(), r * theta.sin(), 0.5 * (2 - j) as f64]
    });
    let decl = PeriodicFaces::rotational(0, FaceId::IMin, 1, FaceId::IMax);
    let table = connectivity_with(&[sector(), flipped], &periodic_options(vec![decl])).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.matches[0],
        FaceMatch {
            block1: 0,
            range1: range((1, 1), (1, 3), (1, 3), Axis::J, Axis::K),
            block2: 1,
            range2: range((3, 3), (3, 1), (1, 3), Axis::J, Axis::K),
            kind: MatchKind::PeriodicRotated,
        }
    );
}

#[test]
fn failed_declarations_are_skipped_not_fatal() {
    let cube = Block::from_fn(3, 3, 3, |i, j, k| [i as f64, j as f64, k as f64]);
    let declarations = vec![
        // orthogonal faces, no rigid offset connects them
        PeriodicFaces::translational(0, FaceId::IMin, 0, FaceId::JMax),
        // same shape but the rotation angle varies node to node
        PeriodicFaces::rotational(0, FaceId::IMin, 0, FaceId::JMax),
        // block index out of range
        PeriodicFaces::translational(0, FaceId::IMin, 7, FaceId::IMax),
    ];
    let table = connectivity_with(&[cube], &periodic_options(declarations)).unwrap();
    assert!(table.is_empty());
}

#[test]
fn rotation_matrix_and_block_rotation() {
    let block = sector();
    let turned = rotate_block(&block, create_rotation_matrix(-15.0f64.to_radians(), 'z'));
    // node (1, 0, 0) sat at 15 degrees, radius 1; it lands on the x axis
    let p = turned.point(1, 0, 0);
    assert_abs_diff_eq!(p[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p[1], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p[2], 0.0, epsilon = 1e-12);

    let rx = create_rotation_matrix(std::f64::consts::FRAC_PI_2, 'x');
    assert_abs_diff_eq!(rx[1][2], -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rx[2][1], 1.0, epsilon = 1e-12);
}
