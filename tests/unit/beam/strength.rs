use super::*;

fn params(profile: BeamProfileKind) -> BeamShapeParams {
    BeamShapeParams {
        min_sigma: 0.1,
        max_sigma: 0.3,
        spot_power: 1.0,
        min_shape: 2.0,
        max_shape: 8.0,
        shape_power: 0.5,
        profile,
        ..BeamShapeParams::default()
    }
}

const ALL: [BeamProfileKind; 5] = [
    BeamProfileKind::Gaussian,
    BeamProfileKind::GaussianIntegral,
    BeamProfileKind::GeneralizedGaussian,
    BeamProfileKind::GeneralizedGaussianTrapezoid,
    BeamProfileKind::Linear,
];

#[test]
fn strength_is_non_negative_everywhere() {
    for kind in ALL {
        let p = params(kind);
        for ci in 0..=10 {
            let color = Rgb::new(ci as f32 / 10.0, 1.0, 0.0);
            for di in -40..=40 {
                let dist = Rgb::splat(di as f32 / 20.0);
                let s = scanline_contrib(dist, color, 0.5, &p);
                assert!(s.is_finite(), "{kind:?} {s:?}");
                for v in s.to_array() {
                    assert!(v >= 0.0, "{kind:?} dist={dist:?} color={color:?} -> {v}");
                }
            }
        }
    }
}

#[test]
fn gaussian_peaks_at_zero_and_strictly_decreases() {
    let p = params(BeamProfileKind::Gaussian);
    let color = Rgb::splat(0.6);
    let mut last = gaussian_sampled_contrib(Rgb::BLACK, color, &p).r;
    for i in 1..=30 {
        let d = i as f32 / 40.0;
        let pos = gaussian_sampled_contrib(Rgb::splat(d), color, &p).r;
        let neg = gaussian_sampled_contrib(Rgb::splat(-d), color, &p).r;
        assert!(pos < last, "not decreasing at d={d}");
        assert_eq!(pos, neg);
        last = pos;
    }
}

#[test]
fn gaussian_peak_matches_closed_form() {
    let p = params(BeamProfileKind::Gaussian);
    // c = 0.5 -> sigma 0.2 with the linear spot power.
    let s = gaussian_sampled_contrib(Rgb::BLACK, Rgb::splat(0.5), &p).g;
    let expected = 0.5 / (0.2 * (2.0 * std::f32::consts::PI).sqrt());
    assert!((s - expected).abs() < 1e-5, "{s} vs {expected}");
}

#[test]
fn generalized_gaussian_with_beta_two_is_gaussian() {
    let p = BeamShapeParams {
        min_shape: 2.0,
        max_shape: 2.0,
        ..params(BeamProfileKind::GeneralizedGaussian)
    };
    for di in -10..=10 {
        let dist = Rgb::splat(di as f32 / 10.0);
        let color = Rgb::new(0.2, 0.5, 0.9);
        let g = gaussian_sampled_contrib(dist, color, &p);
        let gg = generalized_gaussian_sampled_contrib(dist, color, &p);
        assert!(
            (g - gg).map(f32::abs).max_component() < 1e-4,
            "{g:?} vs {gg:?}"
        );
    }
}

#[test]
fn gaussian_mass_over_scanline_spacing_is_about_color() {
    // Unit-mass profile: summing samples spaced one scanline apart approximates `color`
    // once sigma is wide enough to cover the gap.
    let p = BeamShapeParams {
        min_sigma: 0.7,
        max_sigma: 0.7,
        ..params(BeamProfileKind::Gaussian)
    };
    let color = Rgb::splat(0.8);
    let mut sum = Rgb::BLACK;
    for line in -8..=8 {
        sum += gaussian_sampled_contrib(Rgb::splat(0.3 - line as f32), color, &p);
    }
    assert!((sum.r - 0.8).abs() < 1e-3, "{sum:?}");
}

#[test]
fn trapezoid_with_equal_samples_is_point_sample() {
    let p = params(BeamProfileKind::GeneralizedGaussianTrapezoid);
    let dist = Rgb::new(0.1, -0.2, 0.35);
    let color = Rgb::new(0.3, 0.6, 0.9);
    let point = generalized_gaussian_sampled_contrib(dist, color, &p);
    let trap = generalized_gaussian_trapezoid_contrib(dist, dist, color, &p);
    assert!((point - trap).map(f32::abs).max_component() < 1e-6);
}

#[test]
fn trapezoid_averages_two_distances() {
    let p = params(BeamProfileKind::GeneralizedGaussianTrapezoid);
    let color = Rgb::splat(0.7);
    let a = generalized_gaussian_sampled_contrib(Rgb::splat(0.1), color, &p);
    let b = generalized_gaussian_sampled_contrib(Rgb::splat(-0.4), color, &p);
    let via_dispatch = scanline_contrib(Rgb::splat(0.1), color, 0.5, &p);
    assert!((via_dispatch - (a + b) * 0.5).map(f32::abs).max_component() < 1e-6);
}

#[test]
fn integral_converges_to_point_sample_for_thin_pixels() {
    let p = params(BeamProfileKind::GaussianIntegral);
    let color = Rgb::splat(0.5);
    for di in -5..=5 {
        let dist = Rgb::splat(di as f32 / 20.0);
        let point = gaussian_sampled_contrib(dist, color, &p);
        let integral = gaussian_integral_contrib(dist, color, 0.01, &p);
        let rel = ((point - integral).r / point.r.max(1e-3)).abs();
        assert!(rel < 0.02, "dist={dist:?} point={point:?} integral={integral:?}");
    }
}

#[test]
fn integral_falls_back_for_degenerate_height() {
    let p = params(BeamProfileKind::GaussianIntegral);
    let dist = Rgb::splat(0.2);
    let color = Rgb::splat(0.4);
    assert_eq!(
        gaussian_integral_contrib(dist, color, 0.0, &p),
        gaussian_sampled_contrib(dist, color, &p)
    );
}

#[test]
fn linear_falloff_endpoints() {
    assert_eq!(linear_contrib(Rgb::BLACK, Rgb::WHITE), Rgb::WHITE);
    assert_eq!(linear_contrib(Rgb::splat(1.0), Rgb::WHITE), Rgb::BLACK);
    assert_eq!(linear_contrib(Rgb::splat(-1.0), Rgb::WHITE), Rgb::BLACK);
    assert_eq!(linear_contrib(Rgb::splat(2.5), Rgb::WHITE), Rgb::BLACK);
    let half = linear_contrib(Rgb::splat(-0.5), Rgb::new(1.0, 0.5, 0.0));
    assert_eq!(half, Rgb::new(0.5, 0.25, 0.0));
}

#[test]
fn linear_falloff_never_exceeds_color() {
    let color = Rgb::new(0.25, 0.75, 2.0);
    for di in -20..=20 {
        let s = linear_contrib(Rgb::splat(di as f32 / 10.0), color);
        assert!(s.r <= color.r && s.g <= color.g && s.b <= color.b);
    }
}

#[test]
fn per_channel_distances_are_independent() {
    let p = params(BeamProfileKind::Gaussian);
    let color = Rgb::splat(0.5);
    let s = gaussian_sampled_contrib(Rgb::new(0.0, 0.2, 0.4), color, &p);
    assert!(s.r > s.g && s.g > s.b);
}
