//! Builds the one-to-one connectivity table of a multi-block mesh.
//!
//! Every pair of block faces is tested geometrically for full, contained,
//! seam-split or partial-edge coincidence; blocks that wrap onto
//! themselves and user-declared periodic pairs are resolved first. The
//! finished table is re-checked node by node before it is returned, so a
//! table handed to the caller always describes real coincidences.

use log::warn;
use rayon::prelude::*;
use serde::Serialize;

use crate::block::Block;
use crate::error::{ConnectivityError, ConnectivityResult};
use crate::face::{Axis, BlockFaces, Face, FaceId};
use crate::face_match::{match_faces, FaceSpan, MatchContext, MatchResult};
use crate::ogrid::detect_self_wrap;
use crate::periodic::{match_periodic_faces, match_rotated_periodic_faces, PeriodicFaces};
use crate::predicates::{faces_equal, faces_parallel, faces_rotated};

/// Default geometric tolerance for node coincidence.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Probe order for the pairwise sweep: K faces, then J, then I.
const FACE_PROBE_ORDER: [FaceId; 6] = [
    FaceId::KMin,
    FaceId::KMax,
    FaceId::JMin,
    FaceId::JMax,
    FaceId::IMin,
    FaceId::IMax,
];

/// A one-based inclusive node index range along one block axis.
///
/// `start > end` means the range is traversed backwards; a collapsed axis
/// has `start == end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    pub fn new(start: usize, end: usize) -> Self {
        IndexRange { start, end }
    }

    pub fn single(at: usize) -> Self {
        IndexRange { start: at, end: at }
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.start.abs_diff(self.end) + 1
    }
}

/// One side of a connectivity entry: a directed index rectangle on a
/// block boundary.
///
/// Exactly one of the three ranges is collapsed to a single index, naming
/// the boundary plane. `axis1` and `axis2` tag the two in-plane axes in
/// correspondence order: the `axis1` of one side runs with the `axis1` of
/// the other, so a transposed interface shows up as swapped tags rather
/// than swapped ranges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockRange {
    pub i: IndexRange,
    pub j: IndexRange,
    pub k: IndexRange,
    pub axis1: Axis,
    pub axis2: Axis,
}

impl BlockRange {
    pub fn range_along(&self, axis: Axis) -> IndexRange {
        match axis {
            Axis::I => self.i,
            Axis::J => self.j,
            Axis::K => self.k,
        }
    }

    /// The axis held constant by this range, `None` if the tags are
    /// inconsistent and no single axis is left out.
    pub fn collapsed_axis(&self) -> Option<Axis> {
        if self.axis1 == self.axis2 {
            return None;
        }
        Axis::ALL
            .into_iter()
            .find(|axis| *axis != self.axis1 && *axis != self.axis2)
    }
}

/// How a connectivity entry was found.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    /// Plainly adjacent faces sharing nodes.
    Abutting,
    /// The two boundary faces of a block closed onto itself.
    SelfWrap,
    /// Declared translationally periodic pair.
    PeriodicTranslated,
    /// Declared rotationally periodic pair.
    PeriodicRotated,
}

impl MatchKind {
    pub fn name(self) -> &'static str {
        match self {
            MatchKind::Abutting => "abutting",
            MatchKind::SelfWrap => "self-wrap",
            MatchKind::PeriodicTranslated => "periodic-translated",
            MatchKind::PeriodicRotated => "periodic-rotated",
        }
    }
}

/// One entry of the connectivity table: two block ranges holding the same
/// mesh nodes. Block indices are zero based, node indices one based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FaceMatch {
    pub block1: usize,
    pub range1: BlockRange,
    pub block2: usize,
    pub range2: BlockRange,
    pub kind: MatchKind,
}

/// The resolved connectivity of a mesh.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConnectivityTable {
    pub matches: Vec<FaceMatch>,
}

impl ConnectivityTable {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The entries connecting a block to itself across a wrapped axis.
    pub fn self_wraps(&self) -> Vec<FaceMatch> {
        self.matches
            .iter()
            .copied()
            .filter(|m| m.kind == MatchKind::SelfWrap)
            .collect()
    }

    /// The entries that came from declared periodic pairs.
    pub fn periodic_matches(&self) -> Vec<FaceMatch> {
        self.matches
            .iter()
            .copied()
            .filter(|m| {
                matches!(
                    m.kind,
                    MatchKind::PeriodicTranslated | MatchKind::PeriodicRotated
                )
            })
            .collect()
    }
}

/// Helper trait to print summaries of connectivity entries.
pub trait FaceMatchPrinter {
    fn print(&self);
}

impl FaceMatchPrinter for [FaceMatch] {
    fn print(&self) {
        for (idx, m) in self.iter().enumerate() {
            println!(
                "match #{idx}: block{} I[{},{}] J[{},{}] K[{},{}] ↔ block{} I[{},{}] J[{},{}] K[{},{}] ({})",
                m.block1,
                m.range1.i.start,
                m.range1.i.end,
                m.range1.j.start,
                m.range1.j.end,
                m.range1.k.start,
                m.range1.k.end,
                m.block2,
                m.range2.i.start,
                m.range2.i.end,
                m.range2.j.start,
                m.range2.j.end,
                m.range2.k.start,
                m.range2.k.end,
                m.kind.name()
            );
        }
    }
}

impl FaceMatchPrinter for Vec<FaceMatch> {
    fn print(&self) {
        self.as_slice().print();
    }
}

/// Settings for [`connectivity_with`].
#[derive(Clone, Debug)]
pub struct ConnectivityOptions {
    /// Node coincidence tolerance.
    pub tolerance: f64,
    /// Periodic face pairs to resolve before the pairwise sweep.
    pub periodic: Vec<PeriodicFaces>,
    /// Skip the pairwise sweep and resolve only self-wraps and declared
    /// periodic pairs.
    pub periodic_only: bool,
}

impl Default for ConnectivityOptions {
    fn default() -> Self {
        ConnectivityOptions {
            tolerance: DEFAULT_TOLERANCE,
            periodic: Vec::new(),
            periodic_only: false,
        }
    }
}

/// Resolve the connectivity of `blocks` with default options.
pub fn connectivity(blocks: &[Block]) -> ConnectivityResult<ConnectivityTable> {
    connectivity_with(blocks, &ConnectivityOptions::default())
}

/// Resolve the connectivity of `blocks`.
///
/// Runs in three phases: self-wrap detection per block, declared periodic
/// pairs, then the pairwise sweep over all block pairs and all 36 face
/// combinations of each. A declared periodic pair that fails to match is
/// logged and skipped; a malformed block or a table entry that fails the
/// final geometric verification aborts with an error.
///
/// # Arguments
/// * `blocks` - The mesh, each block at least 2x2x2 nodes.
/// * `options` - Tolerance, periodic declarations and phase selection.
///
/// # Returns
/// The verified connectivity table.
pub fn connectivity_with(
    blocks: &[Block],
    options: &ConnectivityOptions,
) -> ConnectivityResult<ConnectivityTable> {
    for (index, block) in blocks.iter().enumerate() {
        if !block.has_min_extent() {
            return Err(ConnectivityError::malformed_block(
                index,
                block.imax,
                block.jmax,
                block.kmax,
            ));
        }
    }
    let res = options.tolerance;
    let faces: Vec<BlockFaces> = blocks.par_iter().map(BlockFaces::extract).collect();

    let mut matches = Vec::new();

    let wraps: Vec<Option<Axis>> = faces
        .par_iter()
        .map(|block_faces| detect_self_wrap(block_faces, res))
        .collect();
    for (index, wrap) in wraps.iter().enumerate() {
        if let Some(axis) = wrap {
            let (min_id, max_id) = axis.face_pair();
            let dims = blocks[index].dims();
            matches.push(FaceMatch {
                block1: index,
                range1: expand_span(min_id, full_span(faces[index].get(min_id)), dims),
                block2: index,
                range2: expand_span(max_id, full_span(faces[index].get(max_id)), dims),
                kind: MatchKind::SelfWrap,
            });
        }
    }
    let wrapped: Vec<bool> = wraps.iter().map(Option::is_some).collect();

    for decl in &options.periodic {
        if let Some(found) = declared_periodic_match(blocks, &faces, decl, res) {
            matches.push(found);
        }
    }

    if !options.periodic_only {
        let pairs: Vec<(usize, usize)> = (0..blocks.len())
            .flat_map(|i| ((i + 1)..blocks.len()).map(move |j| (i, j)))
            .collect();
        let per_pair: Vec<Vec<FaceMatch>> = pairs
            .par_iter()
            .map(|&(i, j)| block_pair_matches(blocks, &faces, &wrapped, i, j, res))
            .collect();
        for list in per_pair {
            matches.extend(list);
        }
    }

    let table = ConnectivityTable { matches };
    verify_connectivity(blocks, &table, res)?;
    Ok(table)
}

/// Re-check every table entry against the mesh geometry.
///
/// Both ranges of each entry are re-extracted from their blocks and must
/// coincide node by node, either directly, as a rigid translation, or as
/// a rigid rotation about z. Any inconsistency, including a range that no
/// longer addresses a valid face, fails the whole table.
pub fn verify_connectivity(
    blocks: &[Block],
    table: &ConnectivityTable,
    res: f64,
) -> ConnectivityResult<()> {
    for (match_index, m) in table.matches.iter().enumerate() {
        let face1 = extract_range_face(blocks, m.block1, &m.range1);
        let face2 = extract_range_face(blocks, m.block2, &m.range2);
        let agrees = match (face1, face2) {
            (Some(a), Some(b)) => {
                faces_equal(&a, &b, res) || faces_parallel(&a, &b, res) || faces_rotated(&a, &b, res)
            }
            _ => false,
        };
        if !agrees {
            return Err(ConnectivityError::verification(
                match_index,
                m.block1,
                m.block2,
            ));
        }
    }
    Ok(())
}

/// Resolve one declared periodic pair; failures are logged, not fatal.
fn declared_periodic_match(
    blocks: &[Block],
    faces: &[BlockFaces],
    decl: &PeriodicFaces,
    res: f64,
) -> Option<FaceMatch> {
    if decl.block1 >= blocks.len() || decl.block2 >= blocks.len() {
        warn!(
            "periodic declaration names block {} or {}, mesh has {} blocks",
            decl.block1,
            decl.block2,
            blocks.len()
        );
        return None;
    }
    let face1 = faces[decl.block1].get(decl.face1);
    let face2 = faces[decl.block2].get(decl.face2);
    let ctx = MatchContext::new(decl.block1, decl.face1, decl.block2, decl.face2);
    let (result, kind) = if decl.rotated {
        (
            match_rotated_periodic_faces(face1, face2, res, &ctx),
            MatchKind::PeriodicRotated,
        )
    } else {
        (
            match_periodic_faces(face1, face2, res, &ctx),
            MatchKind::PeriodicTranslated,
        )
    };
    match result {
        Some(MatchResult::Single(span1, span2)) => Some(FaceMatch {
            block1: decl.block1,
            range1: expand_span(decl.face1, span1, blocks[decl.block1].dims()),
            block2: decl.block2,
            range2: expand_span(decl.face2, span2, blocks[decl.block2].dims()),
            kind,
        }),
        Some(MatchResult::Double(_, _)) => {
            warn!(
                "{}: periodic pair matched across a wrap seam, entry skipped",
                ctx.label()
            );
            None
        }
        None => {
            warn!("{}: declared periodic pair did not match", ctx.label());
            None
        }
    }
}

/// All face matches between two blocks, probing the 36 face combinations.
fn block_pair_matches(
    blocks: &[Block],
    faces: &[BlockFaces],
    wrapped: &[bool],
    i: usize,
    j: usize,
    res: f64,
) -> Vec<FaceMatch> {
    let mut found = Vec::new();
    let dims_i = blocks[i].dims();
    let dims_j = blocks[j].dims();
    for id1 in FACE_PROBE_ORDER {
        let face1 = faces[i].get(id1);
        for id2 in FACE_PROBE_ORDER {
            let face2 = faces[j].get(id2);
            let mut ctx = MatchContext::new(i, id1, j, id2);
            ctx.wrap1 = wrapped[i];
            ctx.wrap2 = wrapped[j];
            if let Some(result) = match_faces(face1, face2, res, &ctx) {
                for (span1, span2) in result.into_pairs() {
                    found.push(FaceMatch {
                        block1: i,
                        range1: expand_span(id1, span1, dims_i),
                        block2: j,
                        range2: expand_span(id2, span2, dims_j),
                        kind: MatchKind::Abutting,
                    });
                }
            }
        }
    }
    found
}

fn full_span(face: &Face) -> FaceSpan {
    FaceSpan::full(face.rows(), face.cols())
}

/// Expand a two-dimensional face span into a one-based block range.
///
/// The span's rows and columns land on the face's retained axes, the
/// collapsed axis pins the boundary plane, and the correspondence tags
/// are mapped by value: tag 0 names the face's row axis and tag 1 its
/// column axis, whichever axes those are.
fn expand_span(face_id: FaceId, span: FaceSpan, dims: (usize, usize, usize)) -> BlockRange {
    let (row_axis, col_axis) = face_id.retained_axes();
    let bound = face_id.boundary_index(dims);
    let pick = |axis: Axis| -> IndexRange {
        if axis == row_axis {
            IndexRange::new(span.rows.0 + 1, span.rows.1 + 1)
        } else if axis == col_axis {
            IndexRange::new(span.cols.0 + 1, span.cols.1 + 1)
        } else {
            IndexRange::single(bound + 1)
        }
    };
    let tag = |slot: usize| if slot == 0 { row_axis } else { col_axis };
    BlockRange {
        i: pick(Axis::I),
        j: pick(Axis::J),
        k: pick(Axis::K),
        axis1: tag(span.axes.0),
        axis2: tag(span.axes.1),
    }
}

/// Materialise the nodes addressed by a block range, rows along `axis1`
/// and columns along `axis2`, honouring traversal direction. `None` when
/// the range does not describe a face of the block.
fn extract_range_face(blocks: &[Block], block_index: usize, range: &BlockRange) -> Option<Face> {
    let block = blocks.get(block_index)?;
    let collapsed = range.collapsed_axis()?;
    let fixed = range.range_along(collapsed);
    if fixed.start != fixed.end {
        return None;
    }
    let dims = block.dims();
    for axis in Axis::ALL {
        let r = range.range_along(axis);
        let extent = match axis {
            Axis::I => dims.0,
            Axis::J => dims.1,
            Axis::K => dims.2,
        };
        if r.start < 1 || r.end < 1 || r.start > extent || r.end > extent {
            return None;
        }
    }

    let rows = axis_indices(range.range_along(range.axis1));
    let cols = axis_indices(range.range_along(range.axis2));
    let plane = fixed.start - 1;
    let mut points = Vec::with_capacity(rows.len() * cols.len());
    for &r in &rows {
        for &c in &cols {
            let mut ijk = [0usize; 3];
            ijk[range.axis1.index()] = r;
            ijk[range.axis2.index()] = c;
            ijk[collapsed.index()] = plane;
            points.push(block.point(ijk[0], ijk[1], ijk[2]));
        }
    }
    Some(Face::from_points(rows.len(), cols.len(), points))
}

/// Zero-based directed index list of a one-based range.
fn axis_indices(range: IndexRange) -> Vec<usize> {
    if range.start <= range.end {
        (range.start - 1..=range.end - 1).collect()
    } else {
        (range.end - 1..=range.start - 1).rev().collect()
    }
}
