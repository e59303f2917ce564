//! Content-area cropping around the scanline pass.
//!
//! The emulated screen usually covers only part of the backbuffer. A [`ContentBox`] names that
//! region in input pixels; normalized coordinates are mapped between the full buffer and the box
//! with an affine transform, and anything outside the box is masked.

use crate::{
    foundation::core::{Affine, Point, Rect, Rgb},
    foundation::error::{ScanbeamError, ScanbeamResult},
    render::texture::{TexelFetch, Texture},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ContentBox {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn validate(&self, buffer_width: u32, buffer_height: u32) -> ScanbeamResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ScanbeamError::validation("content box must be non-empty"));
        }
        let right = u64::from(self.x) + u64::from(self.width);
        let bottom = u64::from(self.y) + u64::from(self.height);
        if right > u64::from(buffer_width) || bottom > u64::from(buffer_height) {
            return Err(ScanbeamError::validation(format!(
                "content box {}x{}+{}+{} exceeds {buffer_width}x{buffer_height} buffer",
                self.width, self.height, self.x, self.y
            )));
        }
        Ok(())
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.width),
            f64::from(self.y) + f64::from(self.height),
        )
    }

    /// Content UV to buffer UV.
    pub fn uv_transform(&self, buffer_width: u32, buffer_height: u32) -> Affine {
        let bw = f64::from(buffer_width);
        let bh = f64::from(buffer_height);
        let r = self.rect();
        Affine::new([r.width() / bw, 0.0, 0.0, r.height() / bh, r.x0 / bw, r.y0 / bh])
    }

    pub fn from_content_uv(&self, uv: Point, buffer_width: u32, buffer_height: u32) -> Point {
        self.uv_transform(buffer_width, buffer_height) * uv
    }

    /// Buffer UV to content UV, or `None` outside the box.
    pub fn to_content_uv(&self, uv: Point, buffer_width: u32, buffer_height: u32) -> Option<Point> {
        let c = self.uv_transform(buffer_width, buffer_height).inverse() * uv;
        let inside = (0.0..1.0).contains(&c.x) && (0.0..1.0).contains(&c.y);
        inside.then_some(c)
    }

    /// Size of the box once the buffer is resized to `out_width x out_height`.
    pub fn scaled_size(
        &self,
        buffer_width: u32,
        buffer_height: u32,
        out_width: u32,
        out_height: u32,
    ) -> (u32, u32) {
        let sx = f64::from(out_width) / f64::from(buffer_width);
        let sy = f64::from(out_height) / f64::from(buffer_height);
        let w = (f64::from(self.width) * sx).round().max(1.0) as u32;
        let h = (f64::from(self.height) * sy).round().max(1.0) as u32;
        (w, h)
    }

    /// Copy the box out of a full-buffer texture.
    pub fn crop(&self, buffer: &Texture) -> ScanbeamResult<Texture> {
        self.validate(buffer.width(), buffer.height())?;
        let mut data = Vec::with_capacity((self.width as usize) * (self.height as usize));
        for y in self.y..self.y + self.height {
            let row = buffer.row(y);
            data.extend_from_slice(&row[self.x as usize..(self.x + self.width) as usize]);
        }
        Texture::new(self.width, self.height, buffer.encoding(), data)
    }

    /// Place a processed content texture back into an `out_width x out_height` buffer whose
    /// input counterpart was `buffer_width x buffer_height`. Pixels outside the box are black.
    pub fn uncrop(
        &self,
        content: &Texture,
        buffer_width: u32,
        buffer_height: u32,
        out_width: u32,
        out_height: u32,
    ) -> ScanbeamResult<Texture> {
        self.validate(buffer_width, buffer_height)?;
        let cw = f64::from(content.width());
        let ch = f64::from(content.height());
        let ow = f64::from(out_width);
        let oh = f64::from(out_height);
        Texture::from_fn(out_width, out_height, content.encoding(), |x, y| {
            let uv = Point::new((f64::from(x) + 0.5) / ow, (f64::from(y) + 0.5) / oh);
            match self.to_content_uv(uv, buffer_width, buffer_height) {
                Some(c) => content.texel((c.x * cw).floor() as i64, (c.y * ch).floor() as i64),
                None => Rgb::BLACK,
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/content.rs"]
mod tests;
