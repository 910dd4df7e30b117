// ─────────────────────────────────────────────────────────────────────
// Swirl String Core — Self-Interaction Integrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Regularized self-interaction integrator.
//!
//! Computes the invariant core/fluid mass pair of a closed filament from
//! the Rosenhead-Moore regularized mutual-induction kernel
//! `(dpᵢ·dpⱼ)/√(|pᵢ−pⱼ|² + r_c²)`, summed over all N² ordered pairs.

use rayon::prelude::*;
use sst_types::config::SwirlConfig;
use sst_types::constants::KG_PER_MEV;
use sst_types::filament::{dot, norm, norm_squared, sub, Filament};
use std::f64::consts::PI;

/// Minimum point count for a well-defined tangent cycle.
const MIN_POINTS: usize = 3;

/// Invariant mass pair in SI kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassResult {
    /// Geometric core contribution: π r_c² ρ_core L_K.
    pub core_mass_kg: f64,
    /// Hydrodynamic dressing: regularized self-induction energy over c².
    pub fluid_mass_kg: f64,
}

impl MassResult {
    pub const ZERO: MassResult = MassResult {
        core_mass_kg: 0.0,
        fluid_mass_kg: 0.0,
    };

    pub fn total_mass_kg(&self) -> f64 {
        self.core_mass_kg + self.fluid_mass_kg
    }

    /// PDG-equivalent total mass in MeV/c².
    pub fn total_mass_mev(&self) -> f64 {
        self.total_mass_kg() / KG_PER_MEV
    }
}

/// Stateless integrator over filament snapshots; never mutates geometry.
#[derive(Debug, Clone)]
pub struct MassIntegrator {
    config: SwirlConfig,
}

impl MassIntegrator {
    pub fn new(config: SwirlConfig) -> Self {
        MassIntegrator { config }
    }

    pub fn config(&self) -> &SwirlConfig {
        &self.config
    }

    /// Core and fluid invariant mass of a filament snapshot.
    ///
    /// Returns zero for fewer than 3 points: below that size the tangent
    /// cycle is degenerate and the integral is defined as empty. Total
    /// over all finite numeric input; no error path.
    pub fn compute_invariant_mass(&self, filament: &Filament, chi_spin: f64) -> MassResult {
        let n = filament.len();
        if n < MIN_POINTS {
            return MassResult::ZERO;
        }

        let points = filament.points();
        let dp = filament.tangents();
        let l_k: f64 = dp.iter().map(|d| norm(*d)).sum();

        let r_c = self.config.core_radius_m;
        let core_mass_kg = PI * r_c * r_c * self.config.core_density_kg_m3 * l_k;

        // Regularized double sum over all ordered pairs, i = j included.
        // The r_c² term keeps the kernel finite at zero separation and
        // converges to 1/|r| beyond the core scale.
        //
        // Each worker owns a disjoint outer-index range and accumulates a
        // local partial sum; partials merge through the associative `sum`.
        let r_c_sq = r_c * r_c;
        let neumann_integral: f64 = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut local = 0.0;
                for j in 0..n {
                    let separation_sq = norm_squared(sub(points[i], points[j]));
                    local += dot(dp[i], dp[j]) / (separation_sq + r_c_sq).sqrt();
                }
                local
            })
            .sum();

        let gamma = 2.0 * PI * r_c * self.config.swirl_speed_m_s;
        let e_fluid = (self.config.fluid_density_kg_m3 * gamma * gamma / (8.0 * PI))
            * (chi_spin * chi_spin)
            * neumann_integral;
        let c = self.config.light_speed_m_s;

        MassResult {
            core_mass_kg,
            fluid_mass_kg: e_fluid / (c * c),
        }
    }
}
