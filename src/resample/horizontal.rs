//! Band-limited horizontal reconstruction along one scanline row.
//!
//! Coordinates are in texel units: texel `i` covers `[i, i + 1)` and has its centre at `i + 0.5`.

use std::f32::consts::PI;

use crate::{
    foundation::core::{Rgb, Weights4},
    foundation::error::{ScanbeamError, ScanbeamResult},
    foundation::math::{fix_zero, smootherstep},
    render::texture::TexelFetch,
    resample::blend::interpolated_linear_color,
};

/// Bias subtracted before flooring so sample points sitting exactly on a texel centre resolve to
/// that texel instead of flickering between neighbours.
pub const UNDER_HALF: f64 = 0.4995;

/// Substitute for exact zeros in the Lanczos argument (2^-16).
pub const LANCZOS_EPSILON: f32 = 1.0 / 65536.0;

/// Horizontal interpolation kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalFilter {
    /// Point sample of the texel at or left of the sample point.
    None,
    /// Quintic smoothstep between the two inner texels.
    #[default]
    Quilez,
    Gaussian,
    Lanczos2,
}

impl HorizontalFilter {
    /// Whether the kernel reads the outer texels at offsets `-1` and `2`.
    pub fn needs_outer_taps(self) -> bool {
        matches!(self, Self::Gaussian | Self::Lanczos2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizontalFilterParams {
    pub filter: HorizontalFilter,
    /// Gaussian kernel sigma, in texels.
    pub sigma: f32,
    /// Blend between gamma-space (0) and linear-space (1) interpolation.
    pub linear_rgb_weight: f32,
}

impl Default for HorizontalFilterParams {
    fn default() -> Self {
        Self {
            filter: HorizontalFilter::Quilez,
            sigma: 0.35,
            linear_rgb_weight: 1.0,
        }
    }
}

impl HorizontalFilterParams {
    pub fn validate(&self) -> ScanbeamResult<()> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(ScanbeamError::validation(
                "horizontal.sigma must be finite and > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.linear_rgb_weight) {
            return Err(ScanbeamError::validation(
                "horizontal.linear_rgb_weight must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// The texel at or left of a sample point, and the point's distance past that texel's centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexelSpan {
    pub prev_texel: i64,
    /// In `[0, 1)` up to the `UNDER_HALF` bias.
    pub prev_dist: f32,
}

pub fn locate_prev_texel(x_texel: f64) -> TexelSpan {
    let prev = (x_texel - UNDER_HALF).floor();
    TexelSpan {
        prev_texel: prev as i64,
        prev_dist: (x_texel - (prev + 0.5)) as f32,
    }
}

/// Distances from the sample point to the texels at offsets `{-1, 0, 1, 2}`.
pub fn sample_distances(prev_dist: f32) -> [f32; 4] {
    [1.0 + prev_dist, prev_dist, 1.0 - prev_dist, 2.0 - prev_dist]
}

/// Normalized tap weights for a sample point `prev_dist` past tap 0.
pub fn horizontal_weights(prev_dist: f32, params: &HorizontalFilterParams) -> Weights4 {
    let weights = match params.filter {
        HorizontalFilter::None => Weights4::PASSTHROUGH,
        HorizontalFilter::Quilez => {
            let w = smootherstep(prev_dist);
            Weights4([0.0, 1.0 - w, w, 0.0])
        }
        HorizontalFilter::Gaussian => {
            // Nearest tap has weight 1, so the sum cannot underflow for narrow kernels.
            let denom = 2.0 * params.sigma * params.sigma;
            let dist2 = sample_distances(prev_dist).map(|d| d * d);
            let nearest = dist2.iter().copied().fold(f32::INFINITY, f32::min);
            Weights4(dist2.map(|d2| (-(d2 - nearest) / denom).exp()))
        }
        HorizontalFilter::Lanczos2 => Weights4(sample_distances(prev_dist).map(lanczos2)),
    };
    weights.normalized()
}

/// `2 sin(pi d) sin(pi d / 2) / (pi d)^2`, with zero nudged to `LANCZOS_EPSILON`.
#[inline]
pub fn lanczos2(d: f32) -> f32 {
    let pd = fix_zero(d, LANCZOS_EPSILON) * PI;
    2.0 * pd.sin() * (pd * 0.5).sin() / (pd * pd)
}

/// Resamples one texel row of a texture horizontally and returns linear light.
pub struct HorizontalSampler<'a, T: TexelFetch + ?Sized> {
    pub texture: &'a T,
    pub params: &'a HorizontalFilterParams,
    pub intermediate_gamma: f32,
}

impl<'a, T: TexelFetch + ?Sized> HorizontalSampler<'a, T> {
    pub fn new(texture: &'a T, params: &'a HorizontalFilterParams, intermediate_gamma: f32) -> Self {
        Self {
            texture,
            params,
            intermediate_gamma,
        }
    }

    /// Sample row `row` at horizontal texel coordinate `x_texel`.
    ///
    /// Only the two inner texels are fetched unless the kernel needs the outer pair.
    pub fn sample(&self, x_texel: f64, row: i64) -> Rgb {
        let span = locate_prev_texel(x_texel);
        let weights = horizontal_weights(span.prev_dist, self.params);
        let x0 = span.prev_texel;

        let mut colors = [Rgb::BLACK; 4];
        colors[1] = self.texture.texel(x0, row);
        colors[2] = self.texture.texel(x0 + 1, row);
        if self.params.filter.needs_outer_taps() {
            colors[0] = self.texture.texel(x0 - 1, row);
            colors[3] = self.texture.texel(x0 + 2, row);
        }

        interpolated_linear_color(
            &colors,
            weights,
            self.params.linear_rgb_weight,
            self.intermediate_gamma,
            self.texture.encoding(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resample/horizontal.rs"]
mod tests;
