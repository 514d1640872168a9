//! Error types for terrain synthesis.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    /// A parameter is outside its accepted range. Raised before any sampling.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The grid has more vertices than [`crate::params::MAX_VERTICES`]
    #[error("grid {width}x{height} exceeds the {} vertex limit", crate::params::MAX_VERTICES)]
    MeshTooLarge { width: u32, height: u32 },
}

impl TerrainError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for every validation failure, including oversized grids
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::MeshTooLarge { .. }
        )
    }
}
