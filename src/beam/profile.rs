//! Brightness-dependent beam spread (sigma) and generalized-Gaussian shape (beta).
//!
//! Brighter phosphor excitation means a wider beam spot: each channel's sigma grows from
//! `min_sigma` towards `max_sigma` with that channel's intensity, independently of the others.

use crate::{
    beam::strength::BeamProfileKind,
    foundation::core::Rgb,
    foundation::error::{ScanbeamError, ScanbeamResult},
};

/// How intensity maps onto the sigma range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotShape {
    /// `c^spot_power`
    #[default]
    Power,
    /// `sqrt(1 - (c - 1)^2)`, a quarter circle.
    Spherical,
}

/// Frame-invariant beam shape configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeamShapeParams {
    pub min_sigma: f32,
    pub max_sigma: f32,
    pub spot_power: f32,
    pub spot_shape: SpotShape,
    pub min_shape: f32,
    pub max_shape: f32,
    pub shape_power: f32,
    /// Which strength function turns sigma/beta and distance into intensity.
    pub profile: BeamProfileKind,
}

impl Default for BeamShapeParams {
    fn default() -> Self {
        Self {
            min_sigma: 0.02,
            max_sigma: 0.3,
            spot_power: 0.33,
            spot_shape: SpotShape::Power,
            min_shape: 2.0,
            max_shape: 4.0,
            shape_power: 0.25,
            profile: BeamProfileKind::GeneralizedGaussian,
        }
    }
}

impl BeamShapeParams {
    pub fn sigma_range(&self) -> f32 {
        self.max_sigma - self.min_sigma
    }

    pub fn shape_range(&self) -> f32 {
        self.max_shape - self.min_shape
    }

    pub fn validate(&self) -> ScanbeamResult<()> {
        let fields = [
            ("min_sigma", self.min_sigma),
            ("max_sigma", self.max_sigma),
            ("spot_power", self.spot_power),
            ("min_shape", self.min_shape),
            ("max_shape", self.max_shape),
            ("shape_power", self.shape_power),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(ScanbeamError::validation(format!(
                    "beam.{name} must be finite"
                )));
            }
        }
        if self.min_sigma <= 0.0 {
            return Err(ScanbeamError::validation("beam.min_sigma must be > 0"));
        }
        if self.min_sigma > self.max_sigma {
            return Err(ScanbeamError::validation(
                "beam.min_sigma must be <= beam.max_sigma",
            ));
        }
        if self.spot_power < 0.0 || self.shape_power < 0.0 {
            return Err(ScanbeamError::validation(
                "beam.spot_power and beam.shape_power must be >= 0",
            ));
        }
        if self.min_shape < 2.0 {
            return Err(ScanbeamError::validation("beam.min_shape must be >= 2"));
        }
        if self.min_shape > self.max_shape {
            return Err(ScanbeamError::validation(
                "beam.min_shape must be <= beam.max_shape",
            ));
        }
        Ok(())
    }
}

/// Per-channel beam sigma in `[min_sigma, max_sigma]` for channel values in `[0, 1]`.
pub fn gaussian_sigma(color: Rgb, params: &BeamShapeParams) -> Rgb {
    let range = params.sigma_range();
    let color = color.max_zero();
    let spread = match params.spot_shape {
        SpotShape::Power => color.map(|c| c.powf(params.spot_power)),
        // Clamp under the root so over-range channels cannot produce NaN.
        SpotShape::Spherical => color.map(|c| {
            let d = c - 1.0;
            (1.0 - d * d).max(0.0).sqrt()
        }),
    };
    spread.map(|f| params.min_sigma + range * f)
}

/// Per-channel generalized-Gaussian exponent in `[min_shape, max_shape]` for channel values in
/// `[0, 1]`. `beta == 2` is an ordinary Gaussian.
pub fn generalized_gaussian_beta(color: Rgb, params: &BeamShapeParams) -> Rgb {
    let range = params.shape_range();
    color
        .max_zero()
        .map(|c| params.min_shape + range * c.powf(params.shape_power))
}

#[cfg(test)]
#[path = "../../tests/unit/beam/profile.rs"]
mod tests;
