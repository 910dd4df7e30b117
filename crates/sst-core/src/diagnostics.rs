//! Scalar diagnostics over filament geometry.
//!
//! Pure measurements, callable before or after relaxation.

use sst_types::filament::Filament;

/// Dimensionless ropelength `L_K / (2 r_c)`.
///
/// Zero below two points, where no edge exists.
pub fn dimensionless_ropelength(filament: &Filament, core_radius_m: f64) -> f64 {
    if filament.len() < 2 {
        return 0.0;
    }
    filament.total_length() / (2.0 * core_radius_m)
}

/// Scalar report over a filament snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilamentSummary {
    pub point_count: usize,
    pub total_length: f64,
    pub ropelength: f64,
    pub max_radial_extent: f64,
    pub mean_edge_length: f64,
}

pub fn summarize(filament: &Filament, core_radius_m: f64) -> FilamentSummary {
    let point_count = filament.len();
    let total_length = filament.total_length();
    FilamentSummary {
        point_count,
        total_length,
        ropelength: dimensionless_ropelength(filament, core_radius_m),
        max_radial_extent: filament.max_radial_extent(),
        mean_edge_length: if point_count > 0 {
            total_length / point_count as f64
        } else {
            0.0
        },
    }
}
