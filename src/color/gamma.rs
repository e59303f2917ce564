//! Gamma conversions used at the edges of the pipeline and by the colorspace-aware blender.

use crate::{
    foundation::core::Rgb,
    foundation::error::{ScanbeamError, ScanbeamResult},
};

/// How texel values are stored in a source texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceEncoding {
    /// Texels hold linear-light values.
    #[default]
    Linear,
    /// Texels hold values encoded with the intermediate gamma.
    Gamma,
}

/// Gamma curves at the pipeline boundaries and for interpolation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GammaParams {
    /// Decodes 8-bit input into linear light (the emulated CRT's gamma).
    pub input: f32,
    /// Gamma used for gamma-space interpolation and gamma-encoded textures.
    pub intermediate: f32,
    /// Encodes linear output into 8-bit values (the display's gamma).
    pub output: f32,
    /// Storage encoding of source textures fed to the scanline pass.
    pub source_encoding: SourceEncoding,
}

impl Default for GammaParams {
    fn default() -> Self {
        Self {
            input: 2.5,
            intermediate: 2.5,
            output: 2.2,
            source_encoding: SourceEncoding::Linear,
        }
    }
}

impl GammaParams {
    pub fn validate(&self) -> ScanbeamResult<()> {
        for (name, v) in [
            ("input", self.input),
            ("intermediate", self.intermediate),
            ("output", self.output),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScanbeamError::validation(format!(
                    "gamma.{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Linear to gamma-encoded: `max(c, 0)^(1/gamma)`.
#[inline]
pub fn encode_gamma(color: Rgb, gamma: f32) -> Rgb {
    let inv = 1.0 / gamma;
    color.max_zero().map(|c| c.powf(inv))
}

/// Gamma-encoded to linear: `max(c, 0)^gamma`.
#[inline]
pub fn decode_gamma(color: Rgb, gamma: f32) -> Rgb {
    color.max_zero().map(|c| c.powf(gamma))
}

/// Decode an 8-bit channel into a linear value.
pub fn decode_u8(v: u8, gamma: f32) -> f32 {
    (f32::from(v) / 255.0).powf(gamma)
}

/// Encode a linear value into an 8-bit channel, clamping to the displayable range.
pub fn encode_u8(v: f32, gamma: f32) -> u8 {
    let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
    (v.powf(1.0 / gamma) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/color/gamma.rs"]
mod tests;
