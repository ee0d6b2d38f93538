//! Calculator error types

use thiserror::Error;

use crate::asset::{AssetId, AssetRole};

/// Errors raised by the calculator's field and asset lookups.
///
/// Numeric degeneracy (NaN or infinite derived values) is never reported
/// here; it is carried in the derived values themselves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Unknown field for {role} asset: {field}")]
    UnknownField { role: AssetRole, field: String },

    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),

    #[error("The native asset cannot be removed")]
    NativeAssetRemoval,
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
