//! Stability map integration tests
//!
//! Geometry of the Z-domain delay chain, continuity of the Padé poles through
//! the real/complex transition, and viewport guarantees.

mod common;

use std::f64::consts::PI;

use gridscope_core::stability::{
    clamp_axis_range, delay_order, s_domain_map, z_domain_map, CharacteristicQuadratic,
};
use gridscope_core::{ControlConstants, Domain};
use num_complex::Complex64;
use proptest::prelude::*;

/// Constants whose delay is exactly `d` sampling periods
fn chain_of(d: usize) -> ControlConstants {
    ControlConstants {
        delay_s: d as f64 * 0.125,
        sampling_period_s: 0.125,
        ..ControlConstants::default()
    }
}

proptest! {
    #[test]
    fn prop_z_poles_are_roots_of_minus_gain(
        d in 1usize..16,
        gain in prop_oneof![-4.0f64..-0.05, 0.05f64..4.0],
    ) {
        let constants = chain_of(d);
        prop_assert_eq!(delay_order(constants.delay_s, constants.sampling_period_s), d);

        let map = z_domain_map(gain, &constants);
        prop_assert_eq!(map.poles.len(), d);

        let radius = gain.abs().powf(1.0 / d as f64);
        for pole in &map.poles {
            prop_assert!((pole.norm() - radius).abs() < 1e-12 * radius.max(1.0));
            // Every pole solves p^d = -|K|.
            let power = pole.powi(d as i32);
            prop_assert!((power - Complex64::new(-gain.abs(), 0.0)).norm() < 1e-9 * gain.abs().max(1.0));
        }

        // Evenly spaced, first one at angle π/d.
        assert_complex_near!(map.poles[0], Complex64::from_polar(radius, PI / d as f64), 1e-12);
        let step = Complex64::from_polar(1.0, 2.0 * PI / d as f64);
        for pair in map.poles.windows(2) {
            assert_complex_near!(pair[1] / pair[0], step, 1e-9);
        }
    }

    #[test]
    fn prop_z_stability_tracks_gain_magnitude(d in 1usize..16, gain in 0.05f64..4.0) {
        prop_assume!((gain - 1.0).abs() > 1e-6);
        let map = z_domain_map(gain, &chain_of(d));
        prop_assert_eq!(map.is_stable(), gain < 1.0);
    }

    #[test]
    fn prop_roots_inside_viewport(
        s_gain in -0.9f64..0.9,
        z_gain in -6.0f64..6.0,
        d in 1usize..8,
    ) {
        // Right-half-plane S poles may sit past the zero's headroom, so only
        // stable S loops are covered here.
        for map in [s_domain_map(s_gain, &ControlConstants::default()), z_domain_map(z_gain, &chain_of(d))] {
            prop_assert_eq!(map.singular_roots, 0);
            for root in map.poles.iter().chain(&map.zeros) {
                prop_assert!(map.viewport.contains(*root), "{:?}: {} outside", map.domain, root);
            }
        }
    }

    #[test]
    fn prop_clamped_axis_is_ordered_and_open(min in -1e6f64..1e6, max in -1e6f64..1e6) {
        let (lo, hi) = clamp_axis_range(min, max);
        prop_assert!(lo.is_finite() && hi.is_finite());
        prop_assert!(lo < hi);
    }
}

/// Distance from `root` to the closest of `others`
fn nearest(root: Complex64, others: &[Complex64]) -> f64 {
    others
        .iter()
        .map(|other| (root - other).norm())
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn test_pade_poles_continuous_through_double_root() {
    let constants = ControlConstants::default();
    let det = |k: f64| CharacteristicQuadratic::for_loop(k, &constants).discriminant();

    // Real poles at K = 0, a complex pair just past K = 1 where b changes sign.
    assert!(det(0.0) > 0.0);
    assert!(det(1.0) < 0.0);

    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if det(mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let before = s_domain_map(lo - 1e-9, &constants);
    let after = s_domain_map(hi + 1e-9, &constants);
    assert!(before.poles.iter().all(|p| p.im == 0.0));
    assert!(after.poles.iter().all(|p| p.im != 0.0));

    for pole in &before.poles {
        let gap = nearest(*pole, &after.poles);
        assert!(gap < 1e-3 * pole.norm(), "pole {pole} jumped by {gap}");
    }
}

#[test]
fn test_complex_pair_is_conjugate() {
    let map = s_domain_map(1.0, &ControlConstants::default());

    assert_eq!(map.poles.len(), 2);
    assert_complex_near!(map.poles[0], map.poles[1].conj(), 1e-9);
    assert!(map.poles[0].im > 0.0);
}

#[test]
fn test_unit_circle_closes() {
    let map = z_domain_map(0.5, &ControlConstants::default());

    assert_eq!(map.domain, Domain::Z);
    assert_eq!(map.unit_circle.len(), 73);
    for point in &map.unit_circle {
        assert_within_tolerance!(point.norm(), 1.0, 1e-12);
    }
    assert_complex_near!(map.unit_circle[0], map.unit_circle[72], 1e-12);
}

#[test]
fn test_z_zero_is_exponential_warp() {
    let map = z_domain_map(1.0, &ControlConstants::default());

    // Td = Ts = 0.1 → z = e^{(2/0.1)·0.1} = e².
    assert_eq!(map.zeros.len(), 1);
    assert_complex_near!(map.zeros[0], Complex64::new(2.0_f64.exp(), 0.0), 1e-12);
    // Viewport extends past the zero by the margin.
    assert_within_tolerance!(map.viewport.max_real, 2.0_f64.exp() + 0.5, 1e-12);
}

#[test]
fn test_small_maps_keep_minimum_extent() {
    let constants = ControlConstants {
        delay_s: 10.0,
        sampling_period_s: 1.0,
        ..ControlConstants::default()
    };
    let map = z_domain_map(0.01, &constants);

    // Zero e^{0.2} ≈ 1.22 plus margin still beats 1.5.
    let extent = (0.2_f64.exp() + 0.5).max(1.5);
    assert_within_tolerance!(map.viewport.max_real, extent, 1e-12);
    assert_within_tolerance!(map.viewport.min_imag, -extent, 1e-12);
}

#[test]
fn test_degenerate_constants_never_panic() {
    let cases = [
        ControlConstants { time_constant_s: 0.0, ..ControlConstants::default() },
        ControlConstants { delay_s: 0.0, ..ControlConstants::default() },
        ControlConstants { sampling_period_s: 0.0, ..ControlConstants::default() },
        ControlConstants { delay_s: 0.0, time_constant_s: 0.0, sampling_period_s: 0.0, s_gain_multiplier: 0.0 },
    ];

    for constants in cases {
        for gain in [-1.0, 0.0, 1.0, 1.5] {
            for map in [s_domain_map(gain, &constants), z_domain_map(gain, &constants)] {
                let v = map.viewport;
                assert!(v.min_real < v.max_real && v.min_imag < v.max_imag, "{constants:?} K={gain}");
                assert!([v.min_real, v.max_real, v.min_imag, v.max_imag].iter().all(|x| x.is_finite()));
            }
        }
    }
}
