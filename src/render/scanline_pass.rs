use rayon::prelude::*;

use crate::{
    beam::strength::scanline_contrib,
    color::gamma::SourceEncoding,
    config::model::CrtConfig,
    foundation::core::Rgb,
    foundation::error::{ScanbeamError, ScanbeamResult},
    interlace::field::{DeinterlacingMode, FieldState, LineVisibility},
    render::texture::{TexelFetch, Texture},
    resample::convergence::sample_rgb_scanline_horizontal,
    resample::horizontal::HorizontalSampler,
};

/// Scanline offsets, relative to the one at or above the pixel, that may reach it.
const SCANLINE_TAPS: [i64; 4] = [-1, 0, 1, 2];

/// Read-only inputs for one frame.
#[derive(Clone, Copy)]
pub struct PassInputs<'a> {
    pub source: &'a Texture,
    /// Last frame's source; fills wrong-field lines when weaving.
    pub previous: Option<&'a Texture>,
    pub frame_count: u64,
}

/// Beam pass: each output pixel sums the beam contributions of the nearby scanlines.
pub struct ScanlinePass<'a> {
    config: &'a CrtConfig,
}

/// Geometry shared by every pixel of one pass invocation.
#[derive(Clone, Copy, Debug)]
struct PassGeometry {
    out_width: f64,
    out_height: f64,
    src_width: f64,
    src_height: f64,
    thickness: f64,
    num_lines: i64,
    /// Output pixel height in scanline units.
    pixel_height: f32,
}

impl<'a> ScanlinePass<'a> {
    pub fn new(config: &'a CrtConfig) -> Self {
        Self { config }
    }

    /// Render an `out_width x out_height` linear-light texture.
    #[tracing::instrument(skip(self, inputs, pool), fields(frame = inputs.frame_count))]
    pub fn run(
        &self,
        inputs: PassInputs<'_>,
        out_width: u32,
        out_height: u32,
        pool: &rayon::ThreadPool,
    ) -> ScanbeamResult<Texture> {
        if out_width == 0 || out_height == 0 {
            return Err(ScanbeamError::validation("output dimensions must be > 0"));
        }
        if let Some(prev) = inputs.previous
            && (prev.width(), prev.height()) != (inputs.source.width(), inputs.source.height())
        {
            return Err(ScanbeamError::evaluation(
                "previous frame must match the source dimensions",
            ));
        }

        let field = self.config.interlace.field_state(inputs.frame_count);
        let geometry = self.geometry(inputs.source, out_width, out_height);
        tracing::debug!(
            frame_field = field.frame_field,
            modulus = field.modulus,
            num_lines = geometry.num_lines,
            "scanline pass"
        );

        let width = out_width as usize;
        let mut data = vec![Rgb::BLACK; width * out_height as usize];
        pool.install(|| {
            data.par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, px) in row.iter_mut().enumerate() {
                        *px = self.shade(&inputs, field, &geometry, x as u32, y as u32);
                    }
                });
        });

        Texture::new(out_width, out_height, SourceEncoding::Linear, data)
    }

    /// Color of output pixel `(x, y)` for an `out_width x out_height` target.
    pub fn shade_pixel(
        &self,
        inputs: &PassInputs<'_>,
        out_width: u32,
        out_height: u32,
        x: u32,
        y: u32,
    ) -> Rgb {
        let field = self.config.interlace.field_state(inputs.frame_count);
        let geometry = self.geometry(inputs.source, out_width, out_height);
        self.shade(inputs, field, &geometry, x, y)
    }

    fn geometry(&self, source: &Texture, out_width: u32, out_height: u32) -> PassGeometry {
        let thickness = self.config.interlace.scanline_num_pixels.max(1);
        let src_height = f64::from(source.height());
        let out_height = f64::from(out_height);
        let thickness_f = f64::from(thickness);
        PassGeometry {
            out_width: f64::from(out_width),
            out_height,
            src_width: f64::from(source.width()),
            src_height,
            thickness: thickness_f,
            num_lines: i64::from((source.height() / thickness).max(1)),
            pixel_height: (src_height / (thickness_f * out_height)) as f32,
        }
    }

    fn shade(
        &self,
        inputs: &PassInputs<'_>,
        field: FieldState,
        g: &PassGeometry,
        x: u32,
        y: u32,
    ) -> Rgb {
        let cfg = self.config;
        let intermediate = cfg.gamma.intermediate;
        let current = HorizontalSampler::new(inputs.source, &cfg.horizontal, intermediate);
        let weave = match (cfg.interlace.mode, inputs.previous) {
            (DeinterlacingMode::Weave, Some(prev)) => {
                Some(HorizontalSampler::new(prev, &cfg.horizontal, intermediate))
            }
            _ => None,
        };

        let x_texel = (f64::from(x) + 0.5) / g.out_width * g.src_width;
        let y_texel = (f64::from(y) + 0.5) / g.out_height * g.src_height;
        // Scanline coordinate with line centres on integers.
        let s = y_texel / g.thickness - 0.5;
        let base = s.floor() as i64;
        let v_offsets = cfg.misconvergence.vertical_offsets() * (1.0 / g.thickness as f32);

        let mut sum = Rgb::BLACK;
        let mut last_line = None;
        for tap in SCANLINE_TAPS {
            let line = (base + tap).clamp(0, g.num_lines - 1);
            if last_line == Some(line) {
                continue;
            }
            last_line = Some(line);

            let row = (line as f64 * g.thickness + g.thickness * 0.5).floor() as i64;
            let scanline = cfg.interlace.scanline_index(row as f64);
            let sampler = match field.visibility(scanline) {
                LineVisibility::Visible => &current,
                LineVisibility::WrongField => match &weave {
                    Some(prev) => prev,
                    None => continue,
                },
            };

            let color =
                sample_rgb_scanline_horizontal(sampler, x_texel, row, &cfg.misconvergence);
            let dist = Rgb::splat((s - line as f64) as f32) - v_offsets;
            sum += scanline_contrib(dist, color, g.pixel_height, &cfg.beam);
        }
        sum.max_zero()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scanline_pass.rs"]
mod tests;
