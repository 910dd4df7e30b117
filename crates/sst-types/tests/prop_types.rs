// ─────────────────────────────────────────────────────────────────────
// Swirl String Core — Property-Based Tests (proptest) for sst-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for sst-types using proptest.
//!
//! Covers: flat-buffer conversion invariants, cyclic closure of tangents,
//! centroid equivariance, radial extent bounds.

use proptest::prelude::*;
use sst_types::filament::{add, norm, sub, Filament, Vec3};

fn arb_point() -> impl Strategy<Value = Vec3> {
    [-50.0f64..50.0, -50.0f64..50.0, -50.0f64..50.0]
}

fn arb_points(max: usize) -> impl Strategy<Value = Vec<Vec3>> {
    prop::collection::vec(arb_point(), 0..max)
}

proptest! {
    /// from_flat ∘ to_flat is the identity and preserves point order.
    #[test]
    fn flat_roundtrip(points in arb_points(64)) {
        let filament = Filament::new(points.clone());
        let flat = filament.to_flat();
        prop_assert_eq!(flat.len(), points.len() * 3);
        let back = Filament::from_flat(&flat).unwrap();
        prop_assert_eq!(back.points(), filament.points());
    }

    /// Flat buffers with length not divisible by 3 are rejected.
    #[test]
    fn flat_ragged_rejected(extra in 1usize..3, points in arb_points(16)) {
        let mut flat = Filament::new(points).to_flat();
        for _ in 0..extra {
            flat.push(0.0);
        }
        prop_assert!(Filament::from_flat(&flat).is_err());
    }

    /// Tangents of any closed loop telescope to the zero vector.
    #[test]
    fn tangents_cancel(points in arb_points(64)) {
        let filament = Filament::new(points);
        let mut total = [0.0; 3];
        for dp in filament.tangents() {
            total = add(total, dp);
        }
        for component in total {
            prop_assert!(component.abs() < 1e-9,
                "Cyclic tangent sum must vanish, got {component}");
        }
    }

    /// Translating every point translates the centroid by the same offset
    /// and leaves length and radial extent unchanged.
    #[test]
    fn rigid_translation_equivariance(
        points in prop::collection::vec(arb_point(), 3..48),
        offset in arb_point(),
    ) {
        let original = Filament::new(points.clone());
        let shifted = Filament::new(points.iter().map(|p| add(*p, offset)).collect());

        let expected = add(original.centroid(), offset);
        let delta = norm(sub(shifted.centroid(), expected));
        prop_assert!(delta < 1e-9, "Centroid must commute with translation");

        prop_assert!((shifted.total_length() - original.total_length()).abs() < 1e-7);
        prop_assert!((shifted.max_radial_extent() - original.max_radial_extent()).abs() < 1e-7);
    }

    /// Every point lies within the reported maximum radial extent.
    #[test]
    fn radial_extent_bounds_all_points(points in prop::collection::vec(arb_point(), 1..48)) {
        let filament = Filament::new(points);
        let centroid = filament.centroid();
        let extent = filament.max_radial_extent();
        for p in filament.points() {
            prop_assert!(norm(sub(*p, centroid)) <= extent + 1e-9);
        }
    }
}
