//! Interlaced field selection.
//!
//! With interlacing on, even and odd scanlines form two fields and only one is drawn per frame.
//! Scanlines in the other field are wrong-field: the scanline pass drops them or, when
//! weaving, fills them from the previous frame.

use crate::foundation::error::{ScanbeamError, ScanbeamResult};

/// Texel rows per emulated scanline unless configured otherwise.
pub const SCANLINE_NUM_PIXELS: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeinterlacingMode {
    /// Fields alternate every frame; wrong-field lines stay dark.
    #[default]
    None,
    /// Fields alternate every frame; wrong-field lines come from the previous frame when one is
    /// available.
    Weave,
    /// The same field is drawn every frame.
    Static,
}

impl DeinterlacingMode {
    pub fn alternates(self) -> bool {
        !matches!(self, Self::Static)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterlaceParams {
    pub enabled: bool,
    pub mode: DeinterlacingMode,
    /// Bottom field first: shifts which field is drawn on even frames.
    pub bff: bool,
    /// Scanline thickness in source texel rows.
    pub scanline_num_pixels: u32,
}

impl Default for InterlaceParams {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: DeinterlacingMode::None,
            bff: false,
            scanline_num_pixels: SCANLINE_NUM_PIXELS,
        }
    }
}

impl InterlaceParams {
    pub fn validate(&self) -> ScanbeamResult<()> {
        if self.scanline_num_pixels == 0 {
            return Err(ScanbeamError::validation(
                "interlace.scanline_num_pixels must be >= 1",
            ));
        }
        Ok(())
    }

    pub fn modulus(&self) -> u64 {
        if self.enabled { 2 } else { 1 }
    }

    /// Field drawn on frame `frame_count`.
    pub fn frame_field(&self, frame_count: u64) -> u64 {
        let bff = u64::from(self.bff);
        if self.mode.alternates() {
            frame_count.wrapping_add(bff) % self.modulus()
        } else {
            bff % self.modulus()
        }
    }

    /// Field a scanline belongs to.
    pub fn line_field(&self, scanline: u64) -> u64 {
        scanline % self.modulus()
    }

    /// Scanline index of a texel row.
    pub fn scanline_index(&self, y_texel: f64) -> u64 {
        (y_texel / f64::from(self.scanline_num_pixels))
            .floor()
            .max(0.0) as u64
    }

    /// Snapshot of the field state for one frame.
    pub fn field_state(&self, frame_count: u64) -> FieldState {
        FieldState {
            frame_field: self.frame_field(frame_count),
            modulus: self.modulus(),
        }
    }
}

/// Whether a scanline is drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineVisibility {
    Visible,
    WrongField,
}

/// Per-frame field selection, derived once and shared by every pixel of the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldState {
    pub frame_field: u64,
    pub modulus: u64,
}

impl FieldState {
    pub fn visibility(&self, scanline: u64) -> LineVisibility {
        if scanline % self.modulus == self.frame_field {
            LineVisibility::Visible
        } else {
            LineVisibility::WrongField
        }
    }

    pub fn is_wrong_field(&self, scanline: u64) -> bool {
        self.visibility(scanline) == LineVisibility::WrongField
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interlace/field.rs"]
mod tests;
