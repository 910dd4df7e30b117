// ─────────────────────────────────────────────────────────────────────
// Swirl String Core — Python Bindings
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! PyO3 Python bindings for Swirl String Core.
//!
//! Exposes the knot particle evaluator (database lookup, Hamiltonian
//! relaxation, invariant mass) and the raw integrator over numpy arrays.

use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use sst_core::diagnostics::dimensionless_ropelength;
use sst_core::mass::MassIntegrator;
use sst_core::relax::{ProgressSignal, RelaxProgress, RelaxationEngine};
use sst_knots::database::KnotDatabase;
use sst_types::config::SwirlConfig;
use sst_types::error::SwirlError;
use sst_types::filament::Filament;

fn to_py_err(err: SwirlError) -> PyErr {
    match err {
        SwirlError::KnotNotFound { .. } => PyKeyError::new_err(err.to_string()),
        SwirlError::ConfigError(_) | SwirlError::PhysicsViolation(_) | SwirlError::Geometry(_) => {
            PyValueError::new_err(err.to_string())
        }
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

/// Python-accessible knot particle evaluator.
///
/// Builds a filament from the embedded ideal-knot table, relaxes it,
/// and reports invariant masses and ropelength.
#[pyclass]
struct ParticleEvaluator {
    filament: Filament,
    config: SwirlConfig,
}

#[pymethods]
impl ParticleEvaluator {
    #[new]
    #[pyo3(signature = (knot_ab_id, resolution = 4000))]
    fn new(knot_ab_id: &str, resolution: usize) -> PyResult<Self> {
        let filament = KnotDatabase::embedded()
            .build_filament(knot_ab_id, resolution)
            .map_err(to_py_err)?;
        Ok(ParticleEvaluator {
            filament,
            config: SwirlConfig::default(),
        })
    }

    /// Relax the filament in place. Polls Python signals at the engine's
    /// progress cadence so Ctrl-C aborts the loop; the filament is still
    /// canonically rescaled before the interrupt propagates.
    ///
    /// Returns True when the run completed, False when it was cancelled.
    #[pyo3(signature = (iterations = 1000, timestep = 0.01))]
    fn relax(&mut self, py: Python<'_>, iterations: usize, timestep: f64) -> PyResult<bool> {
        let engine = RelaxationEngine::new(self.config.clone());
        let mut signal_err: Option<PyErr> = None;
        let mut on_progress = |_report: &RelaxProgress| match py.check_signals() {
            Ok(()) => ProgressSignal::Continue,
            Err(err) => {
                signal_err = Some(err);
                ProgressSignal::Abort
            }
        };

        let outcome = engine
            .relax(&mut self.filament, iterations, timestep, Some(&mut on_progress))
            .map_err(to_py_err)?;

        if let Some(err) = signal_err {
            return Err(err);
        }
        Ok(!outcome.is_cancelled())
    }

    /// Invariant (core, fluid) mass pair in kilograms.
    #[pyo3(signature = (chi_spin = 2.0))]
    fn compute_mass_kg(&self, chi_spin: f64) -> (f64, f64) {
        let result =
            MassIntegrator::new(self.config.clone()).compute_invariant_mass(&self.filament, chi_spin);
        (result.core_mass_kg, result.fluid_mass_kg)
    }

    /// PDG-equivalent total mass in MeV/c².
    #[pyo3(signature = (chi_spin = 2.0))]
    fn compute_mass_mev(&self, chi_spin: f64) -> f64 {
        MassIntegrator::new(self.config.clone())
            .compute_invariant_mass(&self.filament, chi_spin)
            .total_mass_mev()
    }

    fn get_dimless_ropelength(&self) -> f64 {
        dimensionless_ropelength(&self.filament, self.config.core_radius_m)
    }

    /// Current filament points as an (N, 3) numpy array.
    fn get_points<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.filament.to_array2().into_pyarray_bound(py)
    }

    /// Replace the filament with an (N, 3) numpy array. Point order and
    /// 3-component grouping are preserved exactly.
    fn set_points(&mut self, points: PyReadonlyArray2<'_, f64>) -> PyResult<()> {
        self.filament = Filament::from_array2(&points.as_array().to_owned()).map_err(to_py_err)?;
        Ok(())
    }

    fn point_count(&self) -> usize {
        self.filament.len()
    }
}

/// Invariant (core, fluid) mass pair of a raw (N, 3) point array under
/// the canonical constants.
#[pyfunction]
#[pyo3(signature = (points, chi_spin = 2.0))]
fn compute_invariant_mass(
    points: PyReadonlyArray2<'_, f64>,
    chi_spin: f64,
) -> PyResult<(f64, f64)> {
    let filament = Filament::from_array2(&points.as_array().to_owned()).map_err(to_py_err)?;
    let result =
        MassIntegrator::new(SwirlConfig::default()).compute_invariant_mass(&filament, chi_spin);
    Ok((result.core_mass_kg, result.fluid_mass_kg))
}

/// Identifiers available in the embedded ideal-knot table.
#[pyfunction]
fn knot_ids() -> Vec<String> {
    KnotDatabase::embedded().ids()
}

#[pymodule]
fn swirl_string_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ParticleEvaluator>()?;
    m.add_function(wrap_pyfunction!(compute_invariant_mass, m)?)?;
    m.add_function(wrap_pyfunction!(knot_ids, m)?)?;
    Ok(())
}
