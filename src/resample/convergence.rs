//! Per-gun misconvergence: each of R, G and B samples the scanline at its own offset.

use crate::{
    foundation::core::{Rgb, Vec2},
    foundation::error::{ScanbeamError, ScanbeamResult},
    render::texture::TexelFetch,
    resample::horizontal::HorizontalSampler,
};

/// Per-channel sub-pixel offsets, in texels, as `[x, y]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MisconvergenceOffsets {
    pub r: [f32; 2],
    pub g: [f32; 2],
    pub b: [f32; 2],
}

impl MisconvergenceOffsets {
    pub fn vertical(&self) -> Rgb {
        Rgb::new(self.r[1], self.g[1], self.b[1])
    }

    pub fn as_vectors(&self) -> [Vec2; 3] {
        [self.r, self.g, self.b].map(|[x, y]| Vec2::new(f64::from(x), f64::from(y)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MisconvergenceParams {
    pub enabled: bool,
    pub offsets: MisconvergenceOffsets,
}

impl MisconvergenceParams {
    pub fn validate(&self) -> ScanbeamResult<()> {
        let o = &self.offsets;
        if [o.r, o.g, o.b].iter().flatten().any(|v| !v.is_finite()) {
            return Err(ScanbeamError::validation(
                "misconvergence offsets must be finite",
            ));
        }
        Ok(())
    }

    /// Vertical offsets actually in effect, zero when disabled.
    pub fn vertical_offsets(&self) -> Rgb {
        if self.enabled {
            self.offsets.vertical()
        } else {
            Rgb::BLACK
        }
    }

    /// Per-channel sampling coordinates: the base coordinate minus each channel's offset.
    pub fn channel_coords(&self, base: Vec2) -> [Vec2; 3] {
        if !self.enabled {
            return [base; 3];
        }
        self.offsets.as_vectors().map(|off| base - off)
    }
}

/// Sample row `row` at `x_texel` once per channel and keep each channel from its own sample.
///
/// With misconvergence disabled this is a single resampler call shared by all channels.
pub fn sample_rgb_scanline_horizontal<T: TexelFetch + ?Sized>(
    sampler: &HorizontalSampler<'_, T>,
    x_texel: f64,
    row: i64,
    params: &MisconvergenceParams,
) -> Rgb {
    if !params.enabled {
        return sampler.sample(x_texel, row);
    }
    // Rows are fixed per scanline; vertical offsets act on beam distance instead.
    let [cr, cg, cb] = params.channel_coords(Vec2::new(x_texel, 0.0));
    let r = sampler.sample(cr.x, row);
    let g = sampler.sample(cg.x, row);
    let b = sampler.sample(cb.x, row);
    Rgb::new(r.r, g.g, b.b)
}

#[cfg(test)]
#[path = "../../tests/unit/resample/convergence.rs"]
mod tests;
