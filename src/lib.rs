//! Scanbeam emulates the electron-beam scanlines of a CRT display on the CPU.
//!
//! A frame flows through a fixed pipeline:
//!
//! - Decode the input and optionally crop it to the emulated screen ([`ContentBox`])
//! - Resample each scanline horizontally, with optional per-channel misconvergence
//! - Spread every scanline vertically with a color-dependent beam profile, honoring interlaced
//!   field selection
//! - Place the result back into the output buffer and encode it
//!
//! [`FrameRenderer`] drives that pipeline; the per-pixel building blocks are public for hosts that
//! run their own passes.
#![forbid(unsafe_code)]

/// Beam profiles and their color-dependent shape parameters.
pub mod beam;
/// Gamma encoding helpers.
pub mod color;
/// JSON configuration.
pub mod config;
/// Content-area cropping.
pub mod crop;
mod foundation;
/// Interlaced field selection.
pub mod interlace;
/// Frame-level rendering.
pub mod render;
/// Horizontal resampling, color blending and misconvergence.
pub mod resample;

pub use crate::foundation::core::{Affine, Point, Rect, Rgb, Vec2, Weights4};
pub use crate::foundation::error::{ScanbeamError, ScanbeamResult};
pub use crate::foundation::math;

pub use crate::config::model::CrtConfig;
pub use crate::crop::content::ContentBox;
pub use crate::render::pipeline::{FrameRenderer, OutputSize, RenderOpts};
pub use crate::render::scanline_pass::{PassInputs, ScanlinePass};
pub use crate::render::texture::{TexelFetch, Texture};
