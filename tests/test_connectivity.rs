use one2one::{
    blocking_data_string, connectivity, verify_connectivity, Axis, Block, BlockRange,
    ConnectivityError, FaceMatch, FaceMatchPrinter, IndexRange, MatchKind,
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

/// Two 5x5x5 cubes stacked along x, sharing the x = 4 plane.
fn two_cubes() -> Vec<Block> {
    let left = Block::from_fn(5, 5, 5, |i, j, k| [i as f64, j as f64, k as f64]);
    let right = Block::from_fn(5, 5, 5, |i, j, k| [i as f64 + 4.0, j as f64, k as f64]);
    vec![left, right]
}

#[test]
fn two_cubes_share_one_interface() {
    let blocks = two_cubes();
    let table = connectivity(&blocks).unwrap();
    table.matches.print();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.matches[0],
        FaceMatch {
            block1: 0,
            range1: range((5, 5), (1, 5), (1, 5), Axis::J, Axis::K),
            block2: 1,
            range2: range((1, 1), (1, 5), (1, 5), Axis::J, Axis::K),
            kind: MatchKind::Abutting,
        }
    );
    assert!(table.self_wraps().is_empty());
    assert!(table.periodic_matches().is_empty());
}

#[test]
fn blocking_data_lists_both_sides() {
    let blocks = two_cubes();
    let table = connectivity(&blocks).unwrap();
    let expected = [
        "   1-1 BLOCKING DATA:",
        "      NBLI",
        "         1",
        "   NUMBER   GRID   :   ISTA   JSTA   KSTA   IEND   JEND   KEND   ISVA1   ISVA2",
        "        1      1          5      1      1      5      5      5       2       3",
        "   NUMBER   GRID   :   ISTA   JSTA   KSTA   IEND   JEND   KEND   ISVA1   ISVA2",
        "        1      2          1      1      1      5      5      5       2       3",
    ]
    .join("\n");
    assert_eq!(blocking_data_string(&table), expected);
}

#[test]
fn corrupted_entry_fails_verification() {
    let blocks = two_cubes();
    let mut table = connectivity(&blocks).unwrap();
    table.matches[0].range2.j.end = 4;
    assert_eq!(
        verify_connectivity(&blocks, &table, 1e-3),
        Err(ConnectivityError::verification(0, 0, 1))
    );
}

#[test]
fn degenerate_block_is_rejected() {
    let good = Block::from_fn(3, 3, 3, |i, j, k| [i as f64, j as f64, k as f64]);
    let flat = Block::from_fn(5, 1, 5, |i, j, k| [i as f64, j as f64, k as f64]);
    assert_eq!(
        connectivity(&[good, flat]),
        Err(ConnectivityError::malformed_block(1, 5, 1, 5))
    );
}

#[test]
fn partial_overlap_reports_the_shared_window() {
    // the small block's top face covers rows 3..7, columns 2..6 of the big
    // block's bottom face
    let big = Block::from_fn(9, 9, 2, |i, j, k| [i as f64, j as f64, k as f64]);
    let small = Block::from_fn(5, 5, 2, |i, j, k| {
        [i as f64 + 2.0, j as f64 + 1.0, k as f64 - 1.0]
    });
    let table = connectivity(&[big, small]).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.matches[0],
        FaceMatch {
            block1: 0,
            range1: range((3, 7), (2, 6), (1, 1), Axis::I, Axis::J),
            block2: 1,
            range2: range((1, 5), (1, 5), (2, 2), Axis::I, Axis::J),
            kind: MatchKind::Abutting,
        }
    );
}

#[test]
fn staggered_blocks_connect_along_a_partial_band() {
    // the blocks overhang each other along i, so the shared k plane is a
    // band holding no corner of either face
    let lower = Block::from_fn(9, 3, 2, |i, j, k| [i as f64, j as f64, k as f64]);
    let upper = Block::from_fn(7, 3, 2, |i, j, k| {
        [i as f64 - 2.0, j as f64, k as f64 + 1.0]
    });
    let table = connectivity(&[lower, upper]).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.matches[0],
        FaceMatch {
            block1: 0,
            range1: range((1, 5), (1, 3), (2, 2), Axis::I, Axis::J),
            block2: 1,
            range2: range((3, 7), (1, 3), (1, 1), Axis::I, Axis::J),
            kind: MatchKind::Abutting,
        }
    );
}

#[test]
fn index_range_direction_and_count() {
    let forward = IndexRange::new(2, 6);
    assert!(!forward.is_reversed());
    assert_eq!(forward.count(), 5);

    let backward = IndexRange::new(6, 2);
    assert!(backward.is_reversed());
    assert_eq!(backward.count(), 5);

    assert_eq!(IndexRange::single(3), IndexRange::new(3, 3));
}
