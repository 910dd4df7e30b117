// ─────────────────────────────────────────────────────────────────────
// Swirl String Core — Hamiltonian Relaxation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Hamiltonian relaxation engine.
//!
//! Evolves a closed filament toward mechanical equilibrium under neighbor
//! tension, centroid pressure, and short-range repulsion, with damped
//! velocity integration. Every run ends with a uniform rescale about the
//! centroid that pins the maximum radial extent to the canonical core
//! diameter `2 r_c`, so downstream invariants see one absolute size
//! convention regardless of iteration count or initial scale.

use rayon::prelude::*;
use sst_types::config::{RelaxationParams, SwirlConfig};
use sst_types::error::{SwirlError, SwirlResult};
use sst_types::filament::{add, norm_squared, scale, sub, Filament, Vec3};
use std::time::Instant;

/// Minimum point count for a well-defined tangent cycle.
const MIN_POINTS: usize = 3;

/// Progress/cancellation poll cadence in iterations.
const PROGRESS_STRIDE: usize = 10;

/// Repulsion magnitude ceiling in force units.
const MAX_REPULSION: f64 = 200.0;

/// Squared separation floor below which repulsion is skipped entirely.
const MIN_SEPARATION_SQ: f64 = 1e-8;

/// Squared speed ceiling; faster velocities are rescaled onto the sphere.
const MAX_SPEED_SQ: f64 = 10.0;

/// Raw radial extents below this are treated as degenerate.
const MIN_RADIAL_EXTENT: f64 = 1e-12;

/// Replacement extent for degenerate (collapsed) configurations.
const RADIAL_EXTENT_FLOOR: f64 = 1e-6;

/// Snapshot handed to the progress callback at each poll point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxProgress {
    /// Zero-based index of the iteration about to run.
    pub iteration: usize,
    pub total_iterations: usize,
    /// Fractional completion in (0, 1].
    pub fraction: f64,
    pub elapsed_s: f64,
    /// Remaining-time estimate from mean per-iteration cost so far.
    pub eta_s: f64,
}

/// Caller verdict returned from a progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSignal {
    Continue,
    Abort,
}

/// Terminal state of a relaxation run. Cancellation is an early-exit
/// outcome, not an error: the geometry is valid and canonically rescaled
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxOutcome {
    Completed { iterations: usize },
    Cancelled { at_iteration: usize },
}

impl RelaxOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RelaxOutcome::Cancelled { .. })
    }
}

/// Damped force integrator over filament geometry.
///
/// Positions and the run-scoped velocity array are owned exclusively by
/// one in-progress `relax` call; the configuration is immutable.
pub struct RelaxationEngine {
    config: SwirlConfig,
}

impl RelaxationEngine {
    pub fn new(config: SwirlConfig) -> Self {
        RelaxationEngine { config }
    }

    pub fn config(&self) -> &SwirlConfig {
        &self.config
    }

    /// Relax the filament in place for `iterations` steps of `timestep`.
    ///
    /// The progress callback fires every 10th iteration and on the final
    /// iteration; returning [`ProgressSignal::Abort`] stops the loop at
    /// that boundary. The final rescale runs on every exit path.
    ///
    /// No-op (and no rescale) below 3 points.
    pub fn relax(
        &self,
        filament: &mut Filament,
        iterations: usize,
        timestep: f64,
        mut progress: Option<&mut dyn FnMut(&RelaxProgress) -> ProgressSignal>,
    ) -> SwirlResult<RelaxOutcome> {
        validate_run(filament, iterations, timestep)?;

        let n = filament.len();
        if n < MIN_POINTS {
            return Ok(RelaxOutcome::Completed { iterations: 0 });
        }

        let params = self.config.relaxation.clone();
        let repulsion_radius_sq = params.repulsion_radius * params.repulsion_radius;

        let mut velocities: Vec<Vec3> = vec![[0.0; 3]; n];
        let start = Instant::now();
        let mut cancelled_at = None;

        for iter in 0..iterations {
            if iter % PROGRESS_STRIDE == 0 || iter + 1 == iterations {
                if let Some(callback) = progress.as_mut() {
                    let elapsed_s = start.elapsed().as_secs_f64();
                    let done = (iter + 1) as f64;
                    let report = RelaxProgress {
                        iteration: iter,
                        total_iterations: iterations,
                        fraction: done / iterations as f64,
                        elapsed_s,
                        eta_s: elapsed_s / done * (iterations - iter - 1) as f64,
                    };
                    if callback(&report) == ProgressSignal::Abort {
                        cancelled_at = Some(iter);
                        break;
                    }
                }
            }

            let centroid = filament.centroid();

            // All forces for this step read one frozen position snapshot;
            // integration below must not begin until the map completes.
            let forces: Vec<Vec3> = {
                let points = filament.points();
                (0..n)
                    .into_par_iter()
                    .map(|i| point_force(points, i, centroid, &params, repulsion_radius_sq))
                    .collect()
            };

            let points = filament.points_mut();
            for i in 0..n {
                let damped = scale(
                    add(velocities[i], scale(forces[i], timestep)),
                    params.damping,
                );
                let v = clamp_speed(damped);
                velocities[i] = v;
                points[i] = add(points[i], scale(v, timestep));
            }
        }

        rescale_to_core_diameter(filament, self.config.core_radius_m);

        Ok(match cancelled_at {
            Some(at_iteration) => RelaxOutcome::Cancelled { at_iteration },
            None => RelaxOutcome::Completed { iterations },
        })
    }
}

/// Net force on point `i` from one consistent position snapshot.
fn point_force(
    points: &[Vec3],
    i: usize,
    centroid: Vec3,
    params: &RelaxationParams,
    repulsion_radius_sq: f64,
) -> Vec3 {
    let n = points.len();
    let prev = (i + n - 1) % n;
    let next = (i + 1) % n;
    let pt = points[i];

    // Discretized tension: pull toward both cyclic neighbors.
    let mut force = scale(
        add(sub(points[prev], pt), sub(points[next], pt)),
        params.k_spring,
    );

    // Inflation pressure analog: pull toward the centroid.
    force = add(force, scale(sub(centroid, pt), params.k_pressure));

    // Short-range inverse-quartic repulsion from all non-neighbor points
    // inside the cutoff. Skipped below the separation floor; magnitude
    // capped so close approaches cannot blow up the integration.
    for j in 0..n {
        if j == i || j == prev || j == next {
            continue;
        }
        let d = sub(pt, points[j]);
        let dist_sq = norm_squared(d);
        if dist_sq >= repulsion_radius_sq || dist_sq <= MIN_SEPARATION_SQ {
            continue;
        }
        let dist = dist_sq.sqrt();
        let magnitude = (params.k_repulsion / (dist_sq * dist_sq)).min(MAX_REPULSION);
        force = add(force, scale(d, magnitude / dist));
    }

    force
}

/// Direction-preserving clamp of `|v|` to √MAX_SPEED_SQ.
fn clamp_speed(v: Vec3) -> Vec3 {
    let v_sq = norm_squared(v);
    if v_sq > MAX_SPEED_SQ {
        scale(v, (MAX_SPEED_SQ / v_sq).sqrt())
    } else {
        v
    }
}

/// Uniform scaling about the centroid pinning the maximum radial extent
/// to `2 r_c`. Never a translation: the centroid is the fixed point.
pub fn rescale_to_core_diameter(filament: &mut Filament, core_radius_m: f64) {
    if filament.is_empty() {
        return;
    }
    let centroid = filament.centroid();
    let mut r_raw = filament.max_radial_extent();
    if r_raw < MIN_RADIAL_EXTENT {
        r_raw = RADIAL_EXTENT_FLOOR;
    }
    let factor = 2.0 * core_radius_m / r_raw;
    for p in filament.points_mut() {
        *p = add(centroid, scale(sub(*p, centroid), factor));
    }
}

fn validate_run(filament: &Filament, iterations: usize, timestep: f64) -> SwirlResult<()> {
    if iterations == 0 {
        return Err(SwirlError::PhysicsViolation(
            "Relaxation requires iterations >= 1".to_string(),
        ));
    }
    if !timestep.is_finite() || timestep <= 0.0 {
        return Err(SwirlError::PhysicsViolation(format!(
            "Relaxation timestep must be finite and > 0, got {timestep}"
        )));
    }
    if filament
        .points()
        .iter()
        .any(|p| p.iter().any(|v| !v.is_finite()))
    {
        return Err(SwirlError::Geometry(
            "Filament points must be finite".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sst_types::filament::norm;
    use std::f64::consts::PI;

    fn circle(n: usize, radius: f64) -> Filament {
        let points = (0..n)
            .map(|i| {
                let theta = 2.0 * PI * i as f64 / n as f64;
                [radius * theta.cos(), radius * theta.sin(), 0.0]
            })
            .collect();
        Filament::new(points)
    }

    fn engine() -> RelaxationEngine {
        RelaxationEngine::new(SwirlConfig::default())
    }

    #[test]
    fn test_degenerate_filament_is_untouched() {
        let engine = engine();
        for n in 0..3 {
            let mut filament = circle(n, 1.0);
            let before = filament.clone();
            let outcome = engine.relax(&mut filament, 100, 0.01, None).unwrap();
            assert_eq!(outcome, RelaxOutcome::Completed { iterations: 0 });
            assert_eq!(filament, before, "N={n} must be a strict no-op");
        }
    }

    #[test]
    fn test_rejects_invalid_run_parameters() {
        let engine = engine();
        let mut filament = circle(8, 1.0);
        assert!(engine.relax(&mut filament, 0, 0.01, None).is_err());
        assert!(engine.relax(&mut filament, 10, 0.0, None).is_err());
        assert!(engine.relax(&mut filament, 10, -0.5, None).is_err());
        assert!(engine.relax(&mut filament, 10, f64::NAN, None).is_err());
    }

    #[test]
    fn test_rejects_non_finite_geometry() {
        let engine = engine();
        let mut filament = Filament::new(vec![
            [0.0, 0.0, 0.0],
            [1.0, f64::INFINITY, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        assert!(engine.relax(&mut filament, 10, 0.01, None).is_err());
    }

    #[test]
    fn test_final_extent_is_twice_core_radius() {
        let engine = engine();
        let r_c = engine.config().core_radius_m;
        for &n in &[3usize, 16, 101] {
            let mut filament = circle(n, 5.0);
            engine.relax(&mut filament, 40, 0.005, None).unwrap();
            let extent = filament.max_radial_extent();
            assert!(
                (extent - 2.0 * r_c).abs() / (2.0 * r_c) < 1e-6,
                "N={n}: extent {extent} != 2 r_c"
            );
        }
    }

    #[test]
    fn test_progress_cadence_and_payload() {
        let engine = engine();
        let mut filament = circle(12, 1.0);
        let mut seen = Vec::new();
        let mut callback = |report: &RelaxProgress| {
            assert_eq!(report.total_iterations, 35);
            assert!(report.fraction > 0.0 && report.fraction <= 1.0);
            assert!(report.elapsed_s >= 0.0);
            assert!(report.eta_s >= 0.0);
            seen.push(report.iteration);
            ProgressSignal::Continue
        };
        let outcome = engine
            .relax(&mut filament, 35, 0.01, Some(&mut callback))
            .unwrap();
        assert_eq!(outcome, RelaxOutcome::Completed { iterations: 35 });
        assert_eq!(seen, vec![0, 10, 20, 30, 34]);
    }

    #[test]
    fn test_cancellation_aborts_and_still_rescales() {
        let engine = engine();
        let r_c = engine.config().core_radius_m;
        let mut filament = circle(16, 3.0);
        let mut polls = 0usize;
        let mut callback = |report: &RelaxProgress| {
            polls += 1;
            if report.iteration >= 10 {
                ProgressSignal::Abort
            } else {
                ProgressSignal::Continue
            }
        };
        let outcome = engine
            .relax(&mut filament, 1000, 0.01, Some(&mut callback))
            .unwrap();
        assert_eq!(outcome, RelaxOutcome::Cancelled { at_iteration: 10 });
        assert!(outcome.is_cancelled());
        assert_eq!(polls, 2, "Abort must stop polling immediately");

        let extent = filament.max_radial_extent();
        assert!(
            (extent - 2.0 * r_c).abs() / (2.0 * r_c) < 1e-6,
            "Cancelled run must still rescale, extent={extent}"
        );
    }

    #[test]
    fn test_immediate_cancellation_before_any_motion() {
        let engine = engine();
        let mut filament = circle(9, 2.0);
        let reference = filament.clone();
        let mut callback = |_: &RelaxProgress| ProgressSignal::Abort;
        let outcome = engine
            .relax(&mut filament, 500, 0.01, Some(&mut callback))
            .unwrap();
        assert_eq!(outcome, RelaxOutcome::Cancelled { at_iteration: 0 });

        // No integration step ran, so the result is exactly the rescaled
        // input geometry.
        let mut expected = reference;
        rescale_to_core_diameter(&mut expected, engine.config().core_radius_m);
        assert_eq!(filament, expected);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let engine = engine();
        let mut a = circle(40, 1.5);
        let mut b = a.clone();
        engine.relax(&mut a, 60, 0.005, None).unwrap();
        engine.relax(&mut b, 60, 0.005, None).unwrap();
        assert_eq!(a, b, "Fixed inputs must reproduce bit-identical geometry");
    }

    #[test]
    fn test_speed_clamp_preserves_direction() {
        let clamped = clamp_speed([100.0, 0.0, 0.0]);
        assert!((norm(clamped) - MAX_SPEED_SQ.sqrt()).abs() < 1e-12);
        assert!(clamped[1].abs() < 1e-15 && clamped[2].abs() < 1e-15);

        let untouched = clamp_speed([1.0, 1.0, 1.0]);
        assert_eq!(untouched, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_repulsion_magnitude_is_capped() {
        // Points 0 and 2 are non-neighbors on a square separated by just
        // above the separation floor, far inside the cutoff: the raw
        // inverse-quartic magnitude would be astronomically beyond the cap.
        let d = 2e-4;
        let points = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [d, 0.0, 0.0],
            [1.0, 1.0, 0.0],
        ];
        let params = RelaxationParams::default();
        let cutoff_sq = params.repulsion_radius * params.repulsion_radius;

        let with_repulsion = point_force(&points, 0, [0.5, 0.5, 0.0], &params, cutoff_sq);
        let without = point_force(&points, 0, [0.5, 0.5, 0.0], &params, 0.0);
        let repulsion = sub(with_repulsion, without);
        assert!(
            norm(repulsion) <= MAX_REPULSION + 1e-9,
            "Repulsion {} exceeds cap",
            norm(repulsion)
        );
        assert!(norm(repulsion) > 0.0, "Repulsion must engage inside cutoff");
    }

    #[test]
    fn test_rescale_floors_collapsed_geometry() {
        // All points coincident: raw extent underflows the degeneracy
        // threshold and the floor takes over instead of dividing by ~0.
        let mut filament = Filament::new(vec![[1.0, 1.0, 1.0]; 5]);
        rescale_to_core_diameter(&mut filament, 1.0);
        for p in filament.points() {
            assert!(p.iter().all(|v| v.is_finite()));
        }
    }
}
