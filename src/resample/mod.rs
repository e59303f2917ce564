//! Horizontal scanline resampling.

/// Linear/gamma-space blending of filtered texels.
pub mod blend;
/// Per-channel misconvergence offsets.
pub mod convergence;
/// Horizontal filter kernels and the texture sampler built on them.
pub mod horizontal;
