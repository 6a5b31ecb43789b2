//! Geometric matching of two block faces.
//!
//! [`match_faces`] recognises four arrangements: the faces coincide
//! entirely, one face is a sub-rectangle of the other, the smaller face
//! straddles the wrap seam of an O-grid face and matches as two pieces, or
//! the faces share only part of an edge and the overlap has no corner on
//! either face. Results come back as directed index spans on each face
//! plus axis correspondence tags; the caller expands them to block ranges.

use log::{debug, warn};

use crate::face::{Face, FaceId};
use crate::overlap::find_part_in_face;
use crate::predicates::{faces_equal, nearest_point_in_face, points_equal};

/// A directed, inclusive rectangle of face nodes.
///
/// `rows`/`cols` are zero-based inclusive endpoint pairs; a start above its
/// end means that axis is traversed backwards. `axes` carries the
/// correspondence tags: slot order pairs up across the two sides of a
/// match, and the value says whether the slot holds this face's row axis
/// (0) or column axis (1).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceSpan {
    pub rows: (usize, usize),
    pub cols: (usize, usize),
    pub axes: (usize, usize),
}

impl FaceSpan {
    /// The whole of a face with `rows` x `cols` nodes, traversed naturally.
    pub fn full(rows: usize, cols: usize) -> Self {
        FaceSpan {
            rows: (0, rows - 1),
            cols: (0, cols - 1),
            axes: (0, 1),
        }
    }

    /// Restate a span measured on a transposed face in the frame of the
    /// face it was transposed from.
    pub fn untransposed(self) -> Self {
        FaceSpan {
            rows: self.cols,
            cols: self.rows,
            axes: (self.axes.1, self.axes.0),
        }
    }
}

/// Outcome of a face match: one matched rectangle per side, or two when
/// the smaller face crosses a wrap seam and splits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchResult {
    Single(FaceSpan, FaceSpan),
    Double((FaceSpan, FaceSpan), (FaceSpan, FaceSpan)),
}

impl MatchResult {
    pub fn into_pairs(self) -> Vec<(FaceSpan, FaceSpan)> {
        match self {
            MatchResult::Single(a, b) => vec![(a, b)],
            MatchResult::Double(first, second) => vec![first, second],
        }
    }

    fn map_pairs<F>(self, f: F) -> MatchResult
    where
        F: Fn(FaceSpan, FaceSpan) -> (FaceSpan, FaceSpan),
    {
        match self {
            MatchResult::Single(a, b) => {
                let (a, b) = f(a, b);
                MatchResult::Single(a, b)
            }
            MatchResult::Double((a, b), (c, d)) => {
                let (a, b) = f(a, b);
                let (c, d) = f(c, d);
                MatchResult::Double((a, b), (c, d))
            }
        }
    }
}

/// Identifies the two faces being matched, for log messages, and carries
/// the flags that adjust matching behaviour.
///
/// `wrap1`/`wrap2` mark faces whose owning block wraps onto itself, which
/// silences direction-probe failures expected at a seam. `quiet` downgrades
/// soft rejections from `warn` to `debug`, used for the first pass of
/// [`match_faces`] before the partial-overlap rescue has had its turn.
#[derive(Copy, Clone, Debug)]
pub struct MatchContext {
    pub block1: usize,
    pub face1: FaceId,
    pub block2: usize,
    pub face2: FaceId,
    pub wrap1: bool,
    pub wrap2: bool,
    pub quiet: bool,
}

impl MatchContext {
    pub fn new(block1: usize, face1: FaceId, block2: usize, face2: FaceId) -> Self {
        MatchContext {
            block1,
            face1,
            block2,
            face2,
            wrap1: false,
            wrap2: false,
            quiet: false,
        }
    }

    fn hushed(&self) -> Self {
        MatchContext {
            quiet: true,
            ..*self
        }
    }

    fn swapped(&self) -> Self {
        MatchContext {
            block1: self.block2,
            face1: self.face2,
            block2: self.block1,
            face2: self.face1,
            wrap1: self.wrap2,
            wrap2: self.wrap1,
            quiet: self.quiet,
        }
    }

    pub(crate) fn label(&self) -> String {
        format!(
            "block {} {} vs block {} {}",
            self.block1,
            self.face1.name(),
            self.block2,
            self.face2.name()
        )
    }
}

/// Match two block faces geometrically.
///
/// Returns the matched spans of `face1` and `face2`, or `None` when the
/// faces are not connected. Fast rejects run first: disjoint bounding
/// boxes, then a shape fit check ruling out any containment. Identical
/// faces short-circuit to a full-face match; everything else goes through
/// corner anchoring and, failing that, the partial edge-overlap rescue.
pub fn match_faces(
    face1: &Face,
    face2: &Face,
    res: f64,
    ctx: &MatchContext,
) -> Option<MatchResult> {
    if !face1.bounding_box().overlaps(face2.bounding_box(), res) {
        return None;
    }
    let (n1, m1) = face1.shape();
    let (n2, m2) = face2.shape();
    if (n1, m1) == (n2, m2) && faces_equal(face1, face2, res) {
        return Some(MatchResult::Single(
            FaceSpan::full(n1, m1),
            FaceSpan::full(n2, m2),
        ));
    }
    let contained = (n1 >= n2 && m1 >= m2)
        || (n1 <= n2 && m1 <= m2)
        || (n1 >= m2 && m1 >= n2)
        || (n1 <= m2 && m1 <= n2);
    if !contained {
        debug!(
            "{}: neither face can contain the other ({}x{} vs {}x{})",
            ctx.label(),
            n1,
            m1,
            n2,
            m2
        );
        return None;
    }
    if let Some(result) = small_in_big(face1, face2, res, &ctx.hushed()) {
        return Some(result);
    }
    partial_edge_match(face1, face2, res, ctx)
}

/// Match a face contained in (or equal to) another by anchoring its
/// corners on the bigger face.
///
/// Three corners and one interior node of the smaller face are located on
/// the bigger face; the corner positions fix transposition and traversal
/// direction, which neighbour probes then confirm against the actual grid
/// lines (wrapping across the seam of an O-grid face). The implied index
/// rectangle is re-extracted and compared node by node before anything is
/// returned.
pub fn small_in_big(
    face1: &Face,
    face2: &Face,
    res: f64,
    ctx: &MatchContext,
) -> Option<MatchResult> {
    let exchanged = face1.point_count() < face2.point_count();
    let (big, small, wrap_big, wrap_small) = if exchanged {
        (face2, face1, ctx.wrap2, ctx.wrap1)
    } else {
        (face1, face2, ctx.wrap1, ctx.wrap2)
    };

    let miss = |what: &str| {
        if ctx.quiet {
            debug!("{}: {}", ctx.label(), what);
        } else {
            warn!("{}: {}", ctx.label(), what);
        }
    };

    let (sr, sc) = small.shape();
    let Some((px3, py3)) = nearest_point_in_face(big, small.at(sr - 1, sc - 1), res) else {
        miss("far corner of the small face is off the big face");
        return None;
    };
    let Some((px1, py1)) = nearest_point_in_face(big, small.at(0, 0), res) else {
        miss("origin corner of the small face is off the big face");
        return None;
    };
    let Some((px2, py2)) = nearest_point_in_face(big, small.at(0, sc - 1), res) else {
        miss("third corner of the small face is off the big face");
        return None;
    };
    // all corners landed but the interior did not: the faces form a ring,
    // not an overlap
    if nearest_point_in_face(big, small.at(1, 1), res).is_none() {
        miss("corner nodes coincide but an interior node is off the big face");
        return None;
    }
    if (px1 == px2 && px2 == px3) || (py1 == py2 && py2 == py3) {
        return None;
    }

    let transposed = px2 != px1;
    let aligned = if transposed {
        small.transposed()
    } else {
        small.clone()
    };

    let mut xstep: isize = if px2 > px3 { -1 } else { 1 };
    let mut ystep: isize = if py1 > py2 { -1 } else { 1 };

    let row_probe = aligned.at(1, 0);
    let col_probe = aligned.at(0, 1);
    let nrb = big.rows();
    let ncb = big.cols();

    if !points_equal(row_probe, big.at(wrapped(px1, xstep, nrb), py1), res) {
        xstep = -xstep;
        if px1 as isize + xstep >= nrb as isize {
            return None;
        }
        if !points_equal(row_probe, big.at(wrapped(px1, xstep, nrb), py1), res) {
            debug!("{}: row neighbour probe failed in both directions", ctx.label());
            return None;
        }
    }
    if !points_equal(col_probe, big.at(px1, wrapped(py1, ystep, ncb)), res) {
        ystep = -ystep;
        if py1 as isize + ystep >= ncb as isize {
            return None;
        }
        if !points_equal(col_probe, big.at(px1, wrapped(py1, ystep, ncb)), res) {
            if !wrap_big {
                miss("column neighbour probe failed in both directions");
            }
            return None;
        }
    }

    let result = matched_ranges(big, &aligned, (px1, py1), (px3, py3), xstep, ystep, res, ctx);
    let Some(result) = result else {
        if !(wrap_big && wrap_small) {
            miss("corner frame located but the spanned nodes do not agree");
        }
        return None;
    };

    Some(result.map_pairs(|big_span, small_span| {
        let small_span = if transposed {
            small_span.untransposed()
        } else {
            small_span
        };
        if exchanged {
            (small_span, big_span)
        } else {
            (big_span, small_span)
        }
    }))
}

/// Step off `p` by one node, wrapping around the face extent.
fn wrapped(p: usize, step: isize, n: usize) -> usize {
    (p as isize + step).rem_euclid(n as isize) as usize
}

/// Turn the validated corner frame into index spans.
///
/// When the traversal from the anchor corner exits the big face before
/// reaching the far corner, the small face straddles a wrap seam and the
/// match splits in two; a column-wise straddle is handled by transposing
/// the whole problem. Otherwise the single spanned rectangle is
/// re-extracted and verified.
#[allow(clippy::too_many_arguments)]
fn matched_ranges(
    big: &Face,
    small: &Face,
    anchor: (usize, usize),
    opposite: (usize, usize),
    xstep: isize,
    ystep: isize,
    res: f64,
    ctx: &MatchContext,
) -> Option<MatchResult> {
    let (px1, py1) = anchor;
    let (px3, py3) = opposite;
    if (px1 as isize - px3 as isize) * xstep > 0 {
        return seam_split_rows(big, small, anchor, opposite, xstep, res, ctx);
    }
    if (py1 as isize - py3 as isize) * ystep > 0 {
        let result = seam_split_rows(
            &big.transposed(),
            &small.transposed(),
            (py1, px1),
            (py3, px3),
            ystep,
            res,
            ctx,
        )?;
        // back to the untransposed problem: ranges swap, tags already agree
        return Some(result.map_pairs(|b, s| {
            (
                FaceSpan {
                    rows: b.cols,
                    cols: b.rows,
                    axes: b.axes,
                },
                FaceSpan {
                    rows: s.cols,
                    cols: s.rows,
                    axes: s.axes,
                },
            )
        }));
    }

    let slice = big.subface(px1, px3, py1, py3);
    if faces_equal(&slice, small, res) {
        Some(MatchResult::Single(
            FaceSpan {
                rows: (px1, px3),
                cols: (py1, py3),
                axes: (0, 1),
            },
            FaceSpan::full(small.rows(), small.cols()),
        ))
    } else {
        None
    }
}

/// Split a row-wise seam straddle into its two pieces.
///
/// Piece one runs from the anchor corner to the edge the traversal exits
/// through; piece two re-enters from the opposite edge and runs to the far
/// corner. Each piece is verified node by node on its own, and a piece
/// that fails is dropped with a warning rather than failing the other.
fn seam_split_rows(
    big: &Face,
    small: &Face,
    anchor: (usize, usize),
    opposite: (usize, usize),
    xstep: isize,
    res: f64,
    ctx: &MatchContext,
) -> Option<MatchResult> {
    let (px1, py1) = anchor;
    let (px3, py3) = opposite;
    let nrb = big.rows();
    let nrs = small.rows();
    let ncs = small.cols();
    let mut pieces: Vec<(FaceSpan, FaceSpan)> = Vec::new();

    let edge_a = if xstep > 0 { nrb - 1 } else { 0 };
    let width_a = if xstep > 0 { nrb - px1 } else { px1 + 1 };
    if width_a <= nrs
        && faces_equal(
            &big.subface(px1, edge_a, py1, py3),
            &small.subface(0, width_a - 1, 0, ncs - 1),
            res,
        )
    {
        pieces.push((
            FaceSpan {
                rows: (px1, edge_a),
                cols: (py1, py3),
                axes: (0, 1),
            },
            FaceSpan {
                rows: (0, width_a - 1),
                cols: (0, ncs - 1),
                axes: (0, 1),
            },
        ));
    } else {
        warn!(
            "{}: seam piece from the anchor corner failed to verify",
            ctx.label()
        );
    }

    let edge_b = if xstep > 0 { 0 } else { nrb - 1 };
    let width_b = if xstep > 0 { px3 + 1 } else { nrb - px3 };
    if width_b <= nrs
        && faces_equal(
            &big.subface(edge_b, px3, py1, py3),
            &small.subface(nrs - width_b, nrs - 1, 0, ncs - 1),
            res,
        )
    {
        pieces.push((
            FaceSpan {
                rows: (edge_b, px3),
                cols: (py1, py3),
                axes: (0, 1),
            },
            FaceSpan {
                rows: (nrs - width_b, nrs - 1),
                cols: (0, ncs - 1),
                axes: (0, 1),
            },
        ));
    } else {
        warn!(
            "{}: seam piece to the far corner failed to verify",
            ctx.label()
        );
    }

    let mut it = pieces.into_iter();
    match (it.next(), it.next()) {
        (Some(a), Some(b)) => Some(MatchResult::Double(a, b)),
        (Some(a), None) => Some(MatchResult::Single(a.0, a.1)),
        _ => None,
    }
}

/// Last-resort matching when no corner of either face lies on the other
/// but the faces still share part of an edge.
///
/// The overlapping run of rows is located along the boundary columns, the
/// smaller face is cut down to that run and re-anchored through
/// [`small_in_big`], and the resulting spans are shifted back into the
/// uncut face's frame.
fn partial_edge_match(
    face1: &Face,
    face2: &Face,
    res: f64,
    ctx: &MatchContext,
) -> Option<MatchResult> {
    let exchanged = face1.point_count() < face2.point_count();
    let (big, small, inner_ctx) = if exchanged {
        (face2, face1, ctx.swapped())
    } else {
        (face1, face2, *ctx)
    };

    let big_transposed = big.cols() > big.rows();
    let big_t = if big_transposed {
        big.transposed()
    } else {
        big.clone()
    };

    if big_t.cols() != small.cols() && big_t.cols() != small.rows() {
        debug!(
            "{}: partial overlap ruled out, no edge extent in common",
            ctx.label()
        );
        return None;
    }

    let mut run = None;
    if small.rows() == small.cols() {
        run = find_part_in_face(&big_t, small, res);
    }
    let small_transposed = run.is_none() && big_t.cols() == small.rows();
    let aligned_small = if small_transposed {
        small.transposed()
    } else {
        small.clone()
    };
    if run.is_none() {
        run = find_part_in_face(&big_t, &aligned_small, res);
    }
    let Some((p1, p2)) = run else {
        debug!("{}: no boundary overlap run located", ctx.label());
        return None;
    };

    let sliced = aligned_small.subface(p1, p2, 0, aligned_small.cols() - 1);
    let inner = small_in_big(&big_t, &sliced, res, &inner_ctx)?;

    Some(inner.map_pairs(|big_span, small_span| {
        let small_span = FaceSpan {
            rows: (small_span.rows.0 + p1, small_span.rows.1 + p1),
            ..small_span
        };
        let (mut span1, mut span2, t1, t2) = if exchanged {
            (small_span, big_span, small_transposed, big_transposed)
        } else {
            (big_span, small_span, big_transposed, small_transposed)
        };
        if t1 {
            span1 = span1.untransposed();
        }
        if t2 {
            span2 = span2.untransposed();
        }
        (span1, span2)
    }))
}
