// ─────────────────────────────────────────────────────────────────────
// Swirl String Core — Filament
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed discretized space curve in R³.
//!
//! Point `N-1` connects back to point `0`; no endpoint is distinguished.
//! Derived quantities (tangents, length, centroid) are recomputed on
//! demand and never cached across mutation.

use ndarray::Array2;

use crate::error::{SwirlError, SwirlResult};

/// 3-component point or vector in Cartesian coordinates.
pub type Vec3 = [f64; 3];

pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn norm_squared(a: Vec3) -> f64 {
    dot(a, a)
}

pub fn norm(a: Vec3) -> f64 {
    norm_squared(a).sqrt()
}

/// Closed, ordered point loop. Indices are cyclic modulo `len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filament {
    points: Vec<Vec3>,
}

impl Filament {
    pub fn new(points: Vec<Vec3>) -> Self {
        Filament { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Vec3] {
        &mut self.points
    }

    /// Build from a flat row-major buffer of 3·N reals. Point order and
    /// 3-component grouping are preserved exactly.
    pub fn from_flat(values: &[f64]) -> SwirlResult<Self> {
        if values.len() % 3 != 0 {
            return Err(SwirlError::Geometry(format!(
                "Flat point buffer length must be divisible by 3, got {}",
                values.len()
            )));
        }
        let points = values
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Filament { points })
    }

    /// Flatten to a row-major buffer of 3·N reals (inverse of `from_flat`).
    pub fn to_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.points.len() * 3);
        for p in &self.points {
            out.extend_from_slice(p);
        }
        out
    }

    /// Build from an (N, 3) array.
    pub fn from_array2(array: &Array2<f64>) -> SwirlResult<Self> {
        if array.ncols() != 3 {
            return Err(SwirlError::Geometry(format!(
                "Point array must have 3 columns, got {}",
                array.ncols()
            )));
        }
        let points = array
            .rows()
            .into_iter()
            .map(|row| [row[0], row[1], row[2]])
            .collect();
        Ok(Filament { points })
    }

    /// View as an (N, 3) array for numeric interop.
    pub fn to_array2(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.points.len(), 3), |(i, k)| self.points[i][k])
    }

    /// Per-edge tangent vectors `dp[i] = p[(i+1) mod N] - p[i]`.
    pub fn tangents(&self) -> Vec<Vec3> {
        let n = self.points.len();
        (0..n)
            .map(|i| sub(self.points[(i + 1) % n], self.points[i]))
            .collect()
    }

    /// Total polygonal length `L_K = Σ |dp[i]|`.
    pub fn total_length(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| norm(sub(self.points[(i + 1) % n], self.points[i])))
            .sum()
    }

    /// Arithmetic mean of all points. Zero for the empty filament.
    pub fn centroid(&self) -> Vec3 {
        let n = self.points.len();
        if n == 0 {
            return [0.0; 3];
        }
        let mut c = [0.0; 3];
        for p in &self.points {
            c = add(c, *p);
        }
        scale(c, 1.0 / n as f64)
    }

    /// Maximum distance of any point from the centroid. Zero when empty.
    pub fn max_radial_extent(&self) -> f64 {
        let centroid = self.centroid();
        self.points
            .iter()
            .map(|p| norm_squared(sub(*p, centroid)))
            .fold(0.0_f64, f64::max)
            .sqrt()
    }
}
