//! Vertical beam spread.
//!
//! Brighter colors get a wider spot and a flatter profile; every profile integrates to roughly one
//! scanline's worth of energy.

/// Color-dependent sigma and shape parameters.
pub mod profile;
/// Per-scanline beam strength for each profile.
pub mod strength;
