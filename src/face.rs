use serde::Serialize;

use crate::block::Block;

/// One of the three computational axes of a structured block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    I,
    J,
    K,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::I, Axis::J, Axis::K];

    /// Zero-based position of the axis in (i, j, k) order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::I => 0,
            Axis::J => 1,
            Axis::K => 2,
        }
    }

    /// The min and max face perpendicular to this axis.
    pub fn face_pair(self) -> (FaceId, FaceId) {
        match self {
            Axis::I => (FaceId::IMin, FaceId::IMax),
            Axis::J => (FaceId::JMin, FaceId::JMax),
            Axis::K => (FaceId::KMin, FaceId::KMax),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::I => "I",
            Axis::J => "J",
            Axis::K => "K",
        }
    }
}

/// Identifier of one of the six boundary faces of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FaceId {
    IMin,
    IMax,
    JMin,
    JMax,
    KMin,
    KMax,
}

impl FaceId {
    pub const ALL: [FaceId; 6] = [
        FaceId::IMin,
        FaceId::IMax,
        FaceId::JMin,
        FaceId::JMax,
        FaceId::KMin,
        FaceId::KMax,
    ];

    /// Axis held constant over the face.
    pub fn collapsed_axis(self) -> Axis {
        match self {
            FaceId::IMin | FaceId::IMax => Axis::I,
            FaceId::JMin | FaceId::JMax => Axis::J,
            FaceId::KMin | FaceId::KMax => Axis::K,
        }
    }

    /// The two axes that survive on the face, as (row axis, column axis).
    ///
    /// Rows always run along the lower of the two retained axes: I faces keep
    /// (J, K), J faces keep (I, K) and K faces keep (I, J).
    pub fn retained_axes(self) -> (Axis, Axis) {
        match self {
            FaceId::IMin | FaceId::IMax => (Axis::J, Axis::K),
            FaceId::JMin | FaceId::JMax => (Axis::I, Axis::K),
            FaceId::KMin | FaceId::KMax => (Axis::I, Axis::J),
        }
    }

    /// True for the max-side face of the collapsed axis.
    pub fn is_max(self) -> bool {
        matches!(self, FaceId::IMax | FaceId::JMax | FaceId::KMax)
    }

    /// Zero-based index of the face plane along the collapsed axis.
    pub fn boundary_index(self, dims: (usize, usize, usize)) -> usize {
        if !self.is_max() {
            return 0;
        }
        match self.collapsed_axis() {
            Axis::I => dims.0 - 1,
            Axis::J => dims.1 - 1,
            Axis::K => dims.2 - 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FaceId::IMin => "IMin",
            FaceId::IMax => "IMax",
            FaceId::JMin => "JMin",
            FaceId::JMax => "JMax",
            FaceId::KMin => "KMin",
            FaceId::KMax => "KMax",
        }
    }
}

/// Axis-aligned bounding box of a set of points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn of_points(points: &[[f64; 3]]) -> Self {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in points {
            for c in 0..3 {
                min[c] = min[c].min(p[c]);
                max[c] = max[c].max(p[c]);
            }
        }
        BoundingBox { min, max }
    }

    /// True unless the boxes are separated by more than `res` on some axis.
    pub fn overlaps(&self, other: &BoundingBox, res: f64) -> bool {
        for c in 0..3 {
            if other.min[c] - self.max[c] > res || self.min[c] - other.max[c] > res {
                return false;
            }
        }
        true
    }
}

/// A rectangular grid of mesh nodes, typically one boundary face of a block.
///
/// Points are stored row major, so node `(row, col)` lives at
/// `row * cols + col`. Rows and columns follow the owning face's retained
/// axes; see [`FaceId::retained_axes`].
#[derive(Clone, Debug)]
pub struct Face {
    rows: usize,
    cols: usize,
    points: Vec<[f64; 3]>,
    bbox: BoundingBox,
}

impl Face {
    pub fn from_points(rows: usize, cols: usize, points: Vec<[f64; 3]>) -> Self {
        assert_eq!(points.len(), rows * cols);
        let bbox = BoundingBox::of_points(&points);
        Face {
            rows,
            cols,
            points,
            bbox,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> [f64; 3] {
        debug_assert!(row < self.rows && col < self.cols);
        self.points[row * self.cols + col]
    }

    #[inline]
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    #[inline]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    /// The four corner nodes in the order (first, last, row-first/col-last,
    /// row-last/col-first).
    pub fn corner_points(&self) -> [[f64; 3]; 4] {
        let (r, c) = (self.rows - 1, self.cols - 1);
        [self.at(0, 0), self.at(r, c), self.at(0, c), self.at(r, 0)]
    }

    /// Swap rows and columns.
    pub fn transposed(&self) -> Face {
        let mut points = Vec::with_capacity(self.points.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                points.push(self.at(r, c));
            }
        }
        Face {
            rows: self.cols,
            cols: self.rows,
            points,
            bbox: self.bbox,
        }
    }

    /// Reverse the traversal direction of the rows.
    pub fn reversed_rows(&self) -> Face {
        let mut points = Vec::with_capacity(self.points.len());
        for r in (0..self.rows).rev() {
            for c in 0..self.cols {
                points.push(self.at(r, c));
            }
        }
        Face {
            rows: self.rows,
            cols: self.cols,
            points,
            bbox: self.bbox,
        }
    }

    /// Reverse the traversal direction of the columns.
    pub fn reversed_cols(&self) -> Face {
        let mut points = Vec::with_capacity(self.points.len());
        for r in 0..self.rows {
            for c in (0..self.cols).rev() {
                points.push(self.at(r, c));
            }
        }
        Face {
            rows: self.rows,
            cols: self.cols,
            points,
            bbox: self.bbox,
        }
    }

    /// Extract the sub-face spanned by the inclusive row range `r0..=r1` and
    /// column range `c0..=c1`. A start above its end walks that axis
    /// backwards, so direction is part of the request.
    pub fn subface(&self, r0: usize, r1: usize, c0: usize, c1: usize) -> Face {
        let rows = index_walk(r0, r1);
        let cols = index_walk(c0, c1);
        let mut points = Vec::with_capacity(rows.len() * cols.len());
        for &r in &rows {
            for &c in &cols {
                points.push(self.at(r, c));
            }
        }
        Face::from_points(rows.len(), cols.len(), points)
    }

    /// The column `col` as a curve running along the rows.
    pub fn column_curve(&self, col: usize) -> Vec<[f64; 3]> {
        (0..self.rows).map(|r| self.at(r, col)).collect()
    }

    /// A copy of the face moved by `offset`.
    pub fn translated(&self, offset: [f64; 3]) -> Face {
        let points = self
            .points
            .iter()
            .map(|p| [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]])
            .collect();
        Face::from_points(self.rows, self.cols, points)
    }
}

/// Walk `a..=b` inclusively in whichever direction connects `a` to `b`.
fn index_walk(a: usize, b: usize) -> Vec<usize> {
    if a <= b {
        (a..=b).collect()
    } else {
        (b..=a).rev().collect()
    }
}

/// Pull one boundary face out of a block.
///
/// Rows and columns of the returned face follow
/// [`FaceId::retained_axes`]: for example the IMin face has `jmax` rows and
/// `kmax` columns, with `face.at(j, k) == block.point(0, j, k)`.
pub fn extract_face(block: &Block, id: FaceId) -> Face {
    let dims = block.dims();
    let fixed = id.boundary_index(dims);
    let (rows, cols) = match id.collapsed_axis() {
        Axis::I => (dims.1, dims.2),
        Axis::J => (dims.0, dims.2),
        Axis::K => (dims.0, dims.1),
    };
    let mut points = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let p = match id.collapsed_axis() {
                Axis::I => block.point(fixed, r, c),
                Axis::J => block.point(r, fixed, c),
                Axis::K => block.point(r, c, fixed),
            };
            points.push(p);
        }
    }
    Face::from_points(rows, cols, points)
}

/// All six boundary faces of a block, extracted once and reused.
#[derive(Clone, Debug)]
pub struct BlockFaces {
    faces: [Face; 6],
}

impl BlockFaces {
    pub fn extract(block: &Block) -> Self {
        let faces = [
            extract_face(block, FaceId::IMin),
            extract_face(block, FaceId::IMax),
            extract_face(block, FaceId::JMin),
            extract_face(block, FaceId::JMax),
            extract_face(block, FaceId::KMin),
            extract_face(block, FaceId::KMax),
        ];
        BlockFaces { faces }
    }

    #[inline]
    pub fn get(&self, id: FaceId) -> &Face {
        let slot = match id {
            FaceId::IMin => 0,
            FaceId::IMax => 1,
            FaceId::JMin => 2,
            FaceId::JMax => 3,
            FaceId::KMin => 4,
            FaceId::KMax => 5,
        };
        &self.faces[slot]
    }
}
