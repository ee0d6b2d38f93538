//! Field names per asset role
//!
//! Each role has its own input and derived field enumerations, so a field that
//! does not exist for a role cannot be expressed in typed calls. The camelCase
//! names are the string boundary used by `AllianceCalculator::set_input` and
//! `AllianceCalculator::get_derived`.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::asset::AssetRole;
use crate::error::{CalculatorError, Result};

/// Inputs accepted by the native asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum NativeInput {
    InflationRate,
    LsdAnnualEstimate,
    TotalTokenSupply,
    AssetPrice,
    AllianceRewardWeight,
    AssetStakedInAlliance,
}

/// Inputs accepted by an alliance asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum AllianceInput {
    LsdAnnualEstimate,
    AssetPrice,
    AllianceRewardWeight,
    AnnualizedTakeRate,
    AssetStakedInAlliance,
}

/// Values derived for the native asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum NativeOutput {
    RewardPoolOnChain,
    RewardPoolWeightShare,
    RewardPoolMakeup,
    #[strum(serialize = "valueExcludingLSD")]
    ValueExcludingLsd,
    #[strum(serialize = "valueIncludingLSD")]
    ValueIncludingLsd,
    PercentageOfPoolValue,
    PrincipalExcludingRewards,
    #[strum(serialize = "principalIncludingLSD")]
    PrincipalIncludingLsd,
    StakingRewardValue,
    #[strum(serialize = "stakingAPR")]
    StakingApr,
    PoolTotalValue,
}

/// Values derived for an alliance asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum AllianceOutput {
    RewardPoolWeightShare,
    RewardPoolMakeup,
    #[strum(serialize = "valueExcludingLSD")]
    ValueExcludingLsd,
    #[strum(serialize = "valueIncludingLSD")]
    ValueIncludingLsd,
    PercentageOfPoolValue,
    PrincipalExcludingRewards,
    #[strum(serialize = "principalIncludingLSD")]
    PrincipalIncludingLsd,
    StakingRewardValue,
    #[strum(serialize = "stakingAPR")]
    StakingApr,
    TakeRateIntervalMinutes,
    TakeRateParameter,
}

fn unknown(role: AssetRole, field: &str) -> CalculatorError {
    CalculatorError::UnknownField {
        role,
        field: field.to_string(),
    }
}

impl NativeInput {
    pub fn parse(name: &str) -> Result<Self> {
        name.parse().map_err(|_| unknown(AssetRole::Native, name))
    }
}

impl AllianceInput {
    pub fn parse(name: &str) -> Result<Self> {
        name.parse().map_err(|_| unknown(AssetRole::Alliance, name))
    }
}

impl NativeOutput {
    pub fn parse(name: &str) -> Result<Self> {
        name.parse().map_err(|_| unknown(AssetRole::Native, name))
    }
}

impl AllianceOutput {
    pub fn parse(name: &str) -> Result<Self> {
        name.parse().map_err(|_| unknown(AssetRole::Alliance, name))
    }
}

/// Input field names recognized for `role`, in display order.
pub fn input_names(role: AssetRole) -> Vec<&'static str> {
    match role {
        AssetRole::Native => NativeInput::iter().map(Into::into).collect(),
        AssetRole::Alliance => AllianceInput::iter().map(Into::into).collect(),
    }
}

/// Derived field names recognized for `role`, in display order.
pub fn derived_names(role: AssetRole) -> Vec<&'static str> {
    match role {
        AssetRole::Native => NativeOutput::iter().map(Into::into).collect(),
        AssetRole::Alliance => AllianceOutput::iter().map(Into::into).collect(),
    }
}
