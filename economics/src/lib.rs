//! Alliance Economics Module
//!
//! Computes staking yield for a native asset and any number of alliance
//! assets sharing one reward pool:
//! - Reward pool makeup and value per asset
//! - Pool-wide totals (reward weight, value including LSD growth)
//! - Reward share, principal and staking APR per asset
//! - Take rate conversion to the per-interval governance parameter

pub mod asset;
pub mod calculator;
pub mod config;
pub mod derivation;
pub mod error;
pub mod fields;
pub mod pool;
pub mod take_rate;

pub use asset::{
    AllianceInputs, AssetDerived, AssetId, AssetInputs, AssetRecord, AssetRole, InputField,
    NativeInputs, OutputField, RoleDerived,
};
pub use calculator::{AllianceCalculator, CalculatorSnapshot, DEFAULT_NATIVE_LABEL};
pub use config::{ScenarioConfig, ScenarioConfigError};
pub use derivation::DerivationEngine;
pub use error::{CalculatorError, Result};
pub use fields::{
    derived_names, input_names, AllianceInput, AllianceOutput, NativeInput, NativeOutput,
};
pub use pool::{PoolAggregate, PoolContribution, PoolRegistry};
pub use take_rate::{TakeRateSchedule, DEFAULT_TAKE_RATE_INTERVAL_MINUTES, MINUTES_PER_YEAR};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_constants() {
        assert_eq!(DEFAULT_TAKE_RATE_INTERVAL_MINUTES, 5.0);
        assert_eq!(MINUTES_PER_YEAR, 525_600.0);
        assert_eq!(AssetId::NATIVE, AssetId(0));
    }
}
