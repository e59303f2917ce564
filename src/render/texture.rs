use crate::{
    color::gamma::{GammaParams, SourceEncoding, decode_gamma, decode_u8, encode_gamma, encode_u8},
    foundation::core::Rgb,
    foundation::error::{ScanbeamError, ScanbeamResult},
};

/// Read-only texel access with clamp-to-edge addressing.
///
/// Implementations must be safe to read concurrently; the scanline pass shares one source across
/// all worker threads.
pub trait TexelFetch: Sync {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn encoding(&self) -> SourceEncoding;

    /// Texel at integer coordinates, clamped into the texture.
    fn texel(&self, x: i64, y: i64) -> Rgb;
}

/// CPU texture of `f32` RGB texels, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    encoding: SourceEncoding,
    data: Vec<Rgb>,
}

impl Texture {
    pub fn new(
        width: u32,
        height: u32,
        encoding: SourceEncoding,
        data: Vec<Rgb>,
    ) -> ScanbeamResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScanbeamError::validation("texture dimensions must be > 0"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| ScanbeamError::evaluation("texture size overflow"))?;
        if data.len() != expected {
            return Err(ScanbeamError::evaluation(format!(
                "texture expects {expected} texels for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            encoding,
            data,
        })
    }

    pub fn from_fn(
        width: u32,
        height: u32,
        encoding: SourceEncoding,
        f: impl Fn(u32, u32) -> Rgb,
    ) -> ScanbeamResult<Self> {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(width, height, encoding, data)
    }

    pub fn filled(
        width: u32,
        height: u32,
        encoding: SourceEncoding,
        color: Rgb,
    ) -> ScanbeamResult<Self> {
        Self::from_fn(width, height, encoding, |_, _| color)
    }

    pub fn get(&self, x: u32, y: u32) -> Rgb {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    pub fn row(&self, y: u32) -> &[Rgb] {
        let w = self.width as usize;
        let start = (y as usize) * w;
        &self.data[start..start + w]
    }

    /// Decode an 8-bit image with the input gamma, stored as `gamma.source_encoding` asks.
    pub fn from_rgb8(img: &image::RgbImage, gamma: &GammaParams) -> ScanbeamResult<Self> {
        let (width, height) = img.dimensions();
        let data = img
            .pixels()
            .map(|px| {
                let linear = Rgb::new(
                    decode_u8(px[0], gamma.input),
                    decode_u8(px[1], gamma.input),
                    decode_u8(px[2], gamma.input),
                );
                match gamma.source_encoding {
                    SourceEncoding::Linear => linear,
                    SourceEncoding::Gamma => encode_gamma(linear, gamma.intermediate),
                }
            })
            .collect();
        Self::new(width, height, gamma.source_encoding, data)
            .map_err(|e| ScanbeamError::image(format!("decode rgb8 input: {e}")))
    }

    /// Encode to 8-bit with the output gamma, clamping to the displayable range.
    pub fn to_rgb8(&self, gamma: &GammaParams) -> ScanbeamResult<image::RgbImage> {
        let mut raw = Vec::with_capacity(self.data.len() * 3);
        for &texel in &self.data {
            let linear = match self.encoding {
                SourceEncoding::Linear => texel,
                SourceEncoding::Gamma => decode_gamma(texel, gamma.intermediate),
            };
            raw.extend(linear.to_array().map(|c| encode_u8(c, gamma.output)));
        }
        image::RgbImage::from_raw(self.width, self.height, raw)
            .ok_or_else(|| ScanbeamError::image("rgb8 buffer does not match texture size"))
    }
}

impl TexelFetch for Texture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    #[inline]
    fn texel(&self, x: i64, y: i64) -> Rgb {
        let x = x.clamp(0, i64::from(self.width) - 1) as u32;
        let y = y.clamp(0, i64::from(self.height) - 1) as u32;
        self.get(x, y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
