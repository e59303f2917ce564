//! Colorspace-aware interpolation of horizontally adjacent texels.
//!
//! Interpolating in linear light alone looks soft between bright and dark texels; interpolating
//! gamma-encoded values alone sharpens and can clip. The result is a lerp between the two,
//! weighted towards linear by `linear_weight`, and is always returned as linear light.

use crate::{
    color::gamma::{SourceEncoding, decode_gamma, encode_gamma},
    foundation::core::{Rgb, Weights4},
};

/// Weighted sum of the taps, clamped non-negative so later powers stay defined.
#[inline]
pub fn raw_interpolated_color(colors: &[Rgb; 4], weights: Weights4) -> Rgb {
    weights.apply(colors).max_zero()
}

/// General form: evaluates both interpolations and blends them.
///
/// At `linear_weight` 0 and 1 the result is exactly the gamma-space or linear-space mix.
pub fn interpolated_linear_color(
    colors: &[Rgb; 4],
    weights: Weights4,
    linear_weight: f32,
    intermediate_gamma: f32,
    encoding: SourceEncoding,
) -> Rgb {
    let linear_mixed = linear_mix(colors, weights, intermediate_gamma, encoding);
    let gamma_mixed = gamma_mix(colors, weights, intermediate_gamma, encoding);
    gamma_mixed * (1.0 - linear_weight) + linear_mixed * linear_weight
}

/// Same result as [`interpolated_linear_color`], but skips the interpolation whose blend weight
/// is zero.
pub fn interpolated_linear_color_branched(
    colors: &[Rgb; 4],
    weights: Weights4,
    linear_weight: f32,
    intermediate_gamma: f32,
    encoding: SourceEncoding,
) -> Rgb {
    if linear_weight >= 1.0 {
        linear_mix(colors, weights, intermediate_gamma, encoding)
    } else if linear_weight <= 0.0 {
        gamma_mix(colors, weights, intermediate_gamma, encoding)
    } else {
        interpolated_linear_color(colors, weights, linear_weight, intermediate_gamma, encoding)
    }
}

fn linear_mix(colors: &[Rgb; 4], weights: Weights4, gamma: f32, encoding: SourceEncoding) -> Rgb {
    match encoding {
        SourceEncoding::Linear => raw_interpolated_color(colors, weights),
        SourceEncoding::Gamma => {
            raw_interpolated_color(&colors.map(|c| decode_gamma(c, gamma)), weights)
        }
    }
}

fn gamma_mix(colors: &[Rgb; 4], weights: Weights4, gamma: f32, encoding: SourceEncoding) -> Rgb {
    let mixed = match encoding {
        SourceEncoding::Linear => {
            raw_interpolated_color(&colors.map(|c| encode_gamma(c, gamma)), weights)
        }
        SourceEncoding::Gamma => raw_interpolated_color(colors, weights),
    };
    decode_gamma(mixed, gamma)
}

#[cfg(test)]
#[path = "../../tests/unit/resample/blend.rs"]
mod tests;
