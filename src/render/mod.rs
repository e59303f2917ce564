/// Whole-frame pipeline and its thread pool.
pub mod pipeline;
/// The scanline beam pass.
pub mod scanline_pass;
/// CPU textures and texel access.
pub mod texture;
