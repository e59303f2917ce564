use crate::{
    config::model::CrtConfig,
    foundation::error::{ScanbeamError, ScanbeamResult},
    render::scanline_pass::{PassInputs, ScanlinePass},
    render::texture::{TexelFetch, Texture},
};

/// Options for a [`FrameRenderer`].
#[derive(Clone, Debug, Default)]
pub struct RenderOpts {
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Requested output resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

/// Drives the scanline pass over whole frames: decode, crop, beam pass, uncrop, encode.
///
/// The renderer owns its validated configuration and a dedicated thread pool; it holds no
/// per-frame state, so the host passes the frame counter (and the previous frame, when weaving)
/// on every call.
pub struct FrameRenderer {
    config: CrtConfig,
    pool: rayon::ThreadPool,
}

impl FrameRenderer {
    pub fn new(config: CrtConfig, opts: RenderOpts) -> ScanbeamResult<Self> {
        config.validate()?;
        let pool = build_thread_pool(opts.threads)?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &CrtConfig {
        &self.config
    }

    /// Render one 8-bit frame.
    #[tracing::instrument(skip(self, input, previous), fields(w = input.width(), h = input.height()))]
    pub fn render_frame(
        &self,
        input: &image::RgbImage,
        previous: Option<&image::RgbImage>,
        frame_count: u64,
        out: Option<OutputSize>,
    ) -> ScanbeamResult<image::RgbImage> {
        let source = Texture::from_rgb8(input, &self.config.gamma)?;
        let previous = previous
            .map(|p| Texture::from_rgb8(p, &self.config.gamma))
            .transpose()?;
        let out = out.unwrap_or(OutputSize {
            width: source.width(),
            height: source.height(),
        });
        let frame = self.render_texture(&source, previous.as_ref(), frame_count, out)?;
        frame.to_rgb8(&self.config.gamma)
    }

    /// Render one frame of textures; the result is linear light.
    pub fn render_texture(
        &self,
        source: &Texture,
        previous: Option<&Texture>,
        frame_count: u64,
        out: OutputSize,
    ) -> ScanbeamResult<Texture> {
        if out.width == 0 || out.height == 0 {
            return Err(ScanbeamError::validation("output dimensions must be > 0"));
        }
        let (bw, bh) = (source.width(), source.height());
        let pass = ScanlinePass::new(&self.config);

        let Some(content) = self.config.content else {
            let inputs = PassInputs {
                source,
                previous,
                frame_count,
            };
            return pass.run(inputs, out.width, out.height, &self.pool);
        };

        let cropped = content.crop(source)?;
        let cropped_prev = previous.map(|p| content.crop(p)).transpose()?;
        let (cw, ch) = content.scaled_size(bw, bh, out.width, out.height);
        tracing::debug!(cw, ch, "content box");
        let inputs = PassInputs {
            source: &cropped,
            previous: cropped_prev.as_ref(),
            frame_count,
        };
        let shaded = pass.run(inputs, cw, ch, &self.pool)?;
        content.uncrop(&shaded, bw, bh, out.width, out.height)
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> ScanbeamResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ScanbeamError::validation(
            "render 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScanbeamError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
