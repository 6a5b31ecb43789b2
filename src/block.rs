/// A single structured block of a multi-block PLOT3D mesh.
///
/// Coordinates are stored as three flat arrays in i-fastest order, so the
/// node `(i, j, k)` lives at `(k*jmax + j)*imax + i`.
#[derive(Clone, Debug)]
pub struct Block {
    pub imax: usize,
    pub jmax: usize,
    pub kmax: usize,
    pub x: Vec<f64>, // length = imax*jmax*kmax
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl Block {
    pub fn new(
        imax: usize,
        jmax: usize,
        kmax: usize,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
    ) -> Self {
        let n = imax * jmax * kmax;
        assert_eq!(x.len(), n);
        assert_eq!(y.len(), n);
        assert_eq!(z.len(), n);
        Self {
            imax,
            jmax,
            kmax,
            x,
            y,
            z,
        }
    }

    /// Build a block by evaluating `f(i, j, k)` at every node.
    pub fn from_fn<F>(imax: usize, jmax: usize, kmax: usize, f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> [f64; 3],
    {
        let n = imax * jmax * kmax;
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut z = Vec::with_capacity(n);
        for k in 0..kmax {
            for j in 0..jmax {
                for i in 0..imax {
                    let p = f(i, j, k);
                    x.push(p[0]);
                    y.push(p[1]);
                    z.push(p[2]);
                }
            }
        }
        Self::new(imax, jmax, kmax, x, y, z)
    }

    #[inline]
    pub fn npoints(&self) -> usize {
        self.imax * self.jmax * self.kmax
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.imax, self.jmax, self.kmax)
    }

    /// True when every axis carries at least two nodes, the minimum for a
    /// block to expose six non-degenerate faces.
    #[inline]
    pub fn has_min_extent(&self) -> bool {
        self.imax >= 2 && self.jmax >= 2 && self.kmax >= 2
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        // i–j–k order (i fastest)
        debug_assert!(i < self.imax && j < self.jmax && k < self.kmax);
        (k * self.jmax + j) * self.imax + i
    }

    #[inline]
    pub fn point(&self, i: usize, j: usize, k: usize) -> [f64; 3] {
        let idx = self.idx(i, j, k);
        [self.x[idx], self.y[idx], self.z[idx]]
    }
}
