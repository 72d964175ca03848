//! Error types for sphere mesh generation.

use thiserror::Error;

/// Precondition failures reported before any mesh work starts, plus the one
/// post-condition the pipeline checks before emitting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IcosphereError {
    /// Radius was zero, negative, subnormal, or not a finite number.
    #[error("sphere radius must be a positive normal float, got {0}")]
    InvalidRadius(f32),

    /// Subdivision depth above the supported maximum.
    #[error("subdivision depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u32, max: u32 },

    /// UV sphere needs at least two stacks and three sectors.
    #[error("uv sphere needs stacks >= 2 and sectors >= 3, got {stacks} x {sectors}")]
    InvalidUvResolution { stacks: u32, sectors: u32 },

    /// Some vertices ended up without a unit normal: `orphans` touched no leaf
    /// face, `degenerate` had a normal sum that could not be normalized.
    #[error("{orphans} vertices without a leaf face and {degenerate} with an unnormalizable normal")]
    MissingNormals { orphans: usize, degenerate: usize },
}

/// Result type for sphere generation.
pub type Result<T> = std::result::Result<T, IcosphereError>;

/// Shared radius check for every generator.
pub(crate) fn check_radius(radius: f32) -> Result<()> {
    if radius.is_normal() && radius > 0.0 {
        Ok(())
    } else {
        Err(IcosphereError::InvalidRadius(radius))
    }
}
