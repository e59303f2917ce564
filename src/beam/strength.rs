//! Vertical beam intensity at a distance from a scanline centre.
//!
//! Distances are in scanline units (adjacent scanline centres are 1.0 apart) and given per
//! channel, so vertical misconvergence can shift each gun independently. Every variant takes the
//! same inputs and returns per-channel intensity; the point-sampled Gaussian shapes are unit-mass
//! over distance, so their peak may exceed `color` for narrow beams.

use std::f32::consts::{PI, SQRT_2};

use crate::{
    beam::profile::{BeamShapeParams, gaussian_sigma, generalized_gaussian_beta},
    foundation::core::Rgb,
    foundation::math::{erf, gamma_fn},
};

/// Selects the strength function used by the scanline pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeamProfileKind {
    Gaussian,
    /// Gaussian integrated over the output pixel's height.
    GaussianIntegral,
    #[default]
    GeneralizedGaussian,
    /// Generalized Gaussian averaged between this and the previous sample distance.
    GeneralizedGaussianTrapezoid,
    /// `1 - |dist|` falloff; no exponentials.
    Linear,
}

/// Point-sampled Gaussian: `color * exp(-d^2 / (2 sigma^2)) / (sigma sqrt(2 pi))`.
pub fn gaussian_sampled_contrib(dist: Rgb, color: Rgb, params: &BeamShapeParams) -> Rgb {
    let color = color.max_zero();
    let sigma = gaussian_sigma(color, params);
    let norm = (2.0 * PI).sqrt();
    let falloff = dist.zip_map(sigma, |d, s| (-d * d / (2.0 * s * s)).exp() / (s * norm));
    color * falloff
}

/// Gaussian integrated over `[dist - h/2, dist + h/2]` and divided by `h`.
///
/// Falls back to the point sample for non-positive pixel heights.
pub fn gaussian_integral_contrib(
    dist: Rgb,
    color: Rgb,
    pixel_height: f32,
    params: &BeamShapeParams,
) -> Rgb {
    if pixel_height <= 0.0 || !pixel_height.is_finite() {
        return gaussian_sampled_contrib(dist, color, params);
    }
    let color = color.max_zero();
    let sigma = gaussian_sigma(color, params);
    let half = pixel_height * 0.5;
    let mass = dist.zip_map(sigma, |d, s| {
        let denom_inv = 1.0 / (s * SQRT_2);
        let high = erf((d + half) * denom_inv);
        let low = erf((d - half) * denom_inv);
        // erf is monotonic; the max only guards approximation noise.
        (0.5 * (high - low) / pixel_height).max(0.0)
    });
    color * mass
}

/// Point-sampled generalized Gaussian with `alpha = sqrt(2) sigma`:
/// `color * beta / (2 alpha Γ(1/beta)) * exp(-(|d| / alpha)^beta)`.
pub fn generalized_gaussian_sampled_contrib(
    dist: Rgb,
    color: Rgb,
    params: &BeamShapeParams,
) -> Rgb {
    let color = color.max_zero();
    let alpha = gaussian_sigma(color, params) * SQRT_2;
    let beta = generalized_gaussian_beta(color, params);
    let strength = Rgb::new(
        generalized_gaussian(dist.r, alpha.r, beta.r),
        generalized_gaussian(dist.g, alpha.g, beta.g),
        generalized_gaussian(dist.b, alpha.b, beta.b),
    );
    color * strength
}

/// Trapezoidal approximation of the generalized Gaussian's integral over one output pixel:
/// the mean of the point samples at `dist` and `prev_dist`.
pub fn generalized_gaussian_trapezoid_contrib(
    dist: Rgb,
    prev_dist: Rgb,
    color: Rgb,
    params: &BeamShapeParams,
) -> Rgb {
    let here = generalized_gaussian_sampled_contrib(dist, color, params);
    let prev = generalized_gaussian_sampled_contrib(prev_dist, color, params);
    (here + prev) * 0.5
}

/// `clamp(color * (1 - |d|), 0, color)`.
pub fn linear_contrib(dist: Rgb, color: Rgb) -> Rgb {
    let color = color.max_zero();
    color.zip_map(dist, |c, d| (c * (1.0 - d.abs())).clamp(0.0, c))
}

/// Evaluate the configured profile.
///
/// `pixel_height` is the output pixel's height in scanline units; the integral variant integrates
/// over it and the trapezoid variant takes its previous sample one pixel above.
pub fn scanline_contrib(
    dist: Rgb,
    color: Rgb,
    pixel_height: f32,
    params: &BeamShapeParams,
) -> Rgb {
    match params.profile {
        BeamProfileKind::Gaussian => gaussian_sampled_contrib(dist, color, params),
        BeamProfileKind::GaussianIntegral => {
            gaussian_integral_contrib(dist, color, pixel_height, params)
        }
        BeamProfileKind::GeneralizedGaussian => {
            generalized_gaussian_sampled_contrib(dist, color, params)
        }
        BeamProfileKind::GeneralizedGaussianTrapezoid => {
            let prev = dist.map(|d| d - pixel_height);
            generalized_gaussian_trapezoid_contrib(dist, prev, color, params)
        }
        BeamProfileKind::Linear => linear_contrib(dist, color),
    }
}

#[inline]
fn generalized_gaussian(dist: f32, alpha: f32, beta: f32) -> f32 {
    let norm = beta / (2.0 * alpha * gamma_fn(1.0 / beta));
    norm * (-(dist.abs() / alpha).powf(beta)).exp()
}

#[cfg(test)]
#[path = "../../tests/unit/beam/strength.rs"]
mod tests;
