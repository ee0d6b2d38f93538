//! Asset records: typed inputs plus their last derived values

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString, IntoEnumIterator};

use crate::derivation::DerivationEngine;
use crate::error::{CalculatorError, Result};
use crate::fields::{AllianceInput, AllianceOutput, NativeInput, NativeOutput};
use crate::pool::{PoolContribution, PoolRegistry};
use crate::take_rate::TakeRateSchedule;

/// Stable identity of an asset within one calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u32);

impl AssetId {
    /// The native asset always uses id 0
    pub const NATIVE: AssetId = AssetId(0);

    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of an asset in the reward pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AssetRole {
    /// The chain's own staking token; contributes through inflation
    Native,
    /// An allied asset; contributes through the take rate
    Alliance,
}

/// Chain parameters of the native asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeInputs {
    pub inflation_rate: f64,
    pub lsd_annual_estimate: f64,
    pub total_token_supply: f64,
    pub asset_price: f64,
    pub alliance_reward_weight: f64,
    pub asset_staked_in_alliance: f64,
}

impl NativeInputs {
    /// Inputs with the staked amount equal to the whole supply.
    pub fn with_supply(
        inflation_rate: f64,
        total_token_supply: f64,
        asset_price: f64,
        alliance_reward_weight: f64,
    ) -> Self {
        Self {
            inflation_rate,
            lsd_annual_estimate: 0.0,
            total_token_supply,
            asset_price,
            alliance_reward_weight,
            asset_staked_in_alliance: total_token_supply,
        }
    }

    pub fn get(&self, field: NativeInput) -> f64 {
        match field {
            NativeInput::InflationRate => self.inflation_rate,
            NativeInput::LsdAnnualEstimate => self.lsd_annual_estimate,
            NativeInput::TotalTokenSupply => self.total_token_supply,
            NativeInput::AssetPrice => self.asset_price,
            NativeInput::AllianceRewardWeight => self.alliance_reward_weight,
            NativeInput::AssetStakedInAlliance => self.asset_staked_in_alliance,
        }
    }

    pub fn set(&mut self, field: NativeInput, value: f64) {
        let slot = match field {
            NativeInput::InflationRate => &mut self.inflation_rate,
            NativeInput::LsdAnnualEstimate => &mut self.lsd_annual_estimate,
            NativeInput::TotalTokenSupply => &mut self.total_token_supply,
            NativeInput::AssetPrice => &mut self.asset_price,
            NativeInput::AllianceRewardWeight => &mut self.alliance_reward_weight,
            NativeInput::AssetStakedInAlliance => &mut self.asset_staked_in_alliance,
        };
        *slot = value;
    }
}

impl Default for NativeInputs {
    fn default() -> Self {
        Self::with_supply(0.07, 1_000_000_000.0, 1.3, 1.0)
    }
}

/// Parameters of an alliance asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllianceInputs {
    pub lsd_annual_estimate: f64,
    pub asset_price: f64,
    pub alliance_reward_weight: f64,
    pub annualized_take_rate: f64,
    pub asset_staked_in_alliance: f64,
}

impl AllianceInputs {
    pub fn get(&self, field: AllianceInput) -> f64 {
        match field {
            AllianceInput::LsdAnnualEstimate => self.lsd_annual_estimate,
            AllianceInput::AssetPrice => self.asset_price,
            AllianceInput::AllianceRewardWeight => self.alliance_reward_weight,
            AllianceInput::AnnualizedTakeRate => self.annualized_take_rate,
            AllianceInput::AssetStakedInAlliance => self.asset_staked_in_alliance,
        }
    }

    pub fn set(&mut self, field: AllianceInput, value: f64) {
        let slot = match field {
            AllianceInput::LsdAnnualEstimate => &mut self.lsd_annual_estimate,
            AllianceInput::AssetPrice => &mut self.asset_price,
            AllianceInput::AllianceRewardWeight => &mut self.alliance_reward_weight,
            AllianceInput::AnnualizedTakeRate => &mut self.annualized_take_rate,
            AllianceInput::AssetStakedInAlliance => &mut self.asset_staked_in_alliance,
        };
        *slot = value;
    }
}

impl Default for AllianceInputs {
    fn default() -> Self {
        Self {
            lsd_annual_estimate: 0.0,
            asset_price: 1.3,
            alliance_reward_weight: 1.0,
            annualized_take_rate: 0.0,
            asset_staked_in_alliance: 0.0,
        }
    }
}

/// Inputs of either role; the variant determines the asset's role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum AssetInputs {
    Native(NativeInputs),
    Alliance(AllianceInputs),
}

/// An input field of either role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Native(NativeInput),
    Alliance(AllianceInput),
}

/// A derived field of either role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputField {
    Native(NativeOutput),
    Alliance(AllianceOutput),
}

impl AssetInputs {
    pub fn role(&self) -> AssetRole {
        match self {
            AssetInputs::Native(_) => AssetRole::Native,
            AssetInputs::Alliance(_) => AssetRole::Alliance,
        }
    }

    pub fn asset_price(&self) -> f64 {
        match self {
            AssetInputs::Native(n) => n.asset_price,
            AssetInputs::Alliance(a) => a.asset_price,
        }
    }

    pub fn lsd_annual_estimate(&self) -> f64 {
        match self {
            AssetInputs::Native(n) => n.lsd_annual_estimate,
            AssetInputs::Alliance(a) => a.lsd_annual_estimate,
        }
    }

    pub fn alliance_reward_weight(&self) -> f64 {
        match self {
            AssetInputs::Native(n) => n.alliance_reward_weight,
            AssetInputs::Alliance(a) => a.alliance_reward_weight,
        }
    }

    pub fn asset_staked_in_alliance(&self) -> f64 {
        match self {
            AssetInputs::Native(n) => n.asset_staked_in_alliance,
            AssetInputs::Alliance(a) => a.asset_staked_in_alliance,
        }
    }

    /// Rate at which the staked amount flows into the reward pool each year:
    /// inflation for the native asset, take rate for alliance assets.
    pub fn pool_inflow_rate(&self) -> f64 {
        match self {
            AssetInputs::Native(n) => n.inflation_rate,
            AssetInputs::Alliance(a) => a.annualized_take_rate,
        }
    }

    /// Resolve an input name against this asset's role.
    pub fn parse_field(&self, name: &str) -> Result<InputField> {
        match self.role() {
            AssetRole::Native => NativeInput::parse(name).map(InputField::Native),
            AssetRole::Alliance => AllianceInput::parse(name).map(InputField::Alliance),
        }
    }

    /// Resolve a derived field name against this asset's role.
    pub fn parse_output(&self, name: &str) -> Result<OutputField> {
        match self.role() {
            AssetRole::Native => NativeOutput::parse(name).map(OutputField::Native),
            AssetRole::Alliance => AllianceOutput::parse(name).map(OutputField::Alliance),
        }
    }

    /// Store a value. Fails without mutating if the field belongs to the other role.
    pub fn set(&mut self, field: InputField, value: f64) -> Result<()> {
        match (self, field) {
            (AssetInputs::Native(n), InputField::Native(f)) => n.set(f, value),
            (AssetInputs::Alliance(a), InputField::Alliance(f)) => a.set(f, value),
            (inputs, field) => {
                return Err(CalculatorError::UnknownField {
                    role: inputs.role(),
                    field: field.name().to_string(),
                })
            }
        }
        Ok(())
    }
}

impl InputField {
    pub fn name(&self) -> &'static str {
        match self {
            InputField::Native(f) => (*f).into(),
            InputField::Alliance(f) => (*f).into(),
        }
    }
}

impl OutputField {
    pub fn name(&self) -> &'static str {
        match self {
            OutputField::Native(f) => (*f).into(),
            OutputField::Alliance(f) => (*f).into(),
        }
    }
}

/// Values that exist for only one role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RoleDerived {
    Native {
        #[serde(rename = "rewardPoolOnChain")]
        reward_pool_on_chain: f64,
        #[serde(rename = "poolTotalValue")]
        pool_total_value: f64,
    },
    Alliance {
        #[serde(rename = "takeRateIntervalMinutes")]
        take_rate_interval_minutes: f64,
        #[serde(rename = "takeRateParameter")]
        take_rate_parameter: f64,
    },
}

/// Everything the derivation engine computes for one asset.
///
/// Degenerate inputs (zero price, zero stake, empty pool) show up here as
/// NaN or infinity rather than as errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDerived {
    pub reward_pool_weight_share: f64,
    pub reward_pool_makeup: f64,
    #[serde(rename = "valueExcludingLSD")]
    pub value_excluding_lsd: f64,
    #[serde(rename = "valueIncludingLSD")]
    pub value_including_lsd: f64,
    pub percentage_of_pool_value: f64,
    pub principal_excluding_rewards: f64,
    #[serde(rename = "principalIncludingLSD")]
    pub principal_including_lsd: f64,
    pub staking_reward_value: f64,
    #[serde(rename = "stakingAPR")]
    pub staking_apr: f64,
    #[serde(flatten)]
    pub role: RoleDerived,
}

impl AssetDerived {
    pub fn native_value(&self, field: NativeOutput) -> f64 {
        let (on_chain, pool_total) = match self.role {
            RoleDerived::Native {
                reward_pool_on_chain,
                pool_total_value,
            } => (reward_pool_on_chain, pool_total_value),
            RoleDerived::Alliance { .. } => (f64::NAN, f64::NAN),
        };
        match field {
            NativeOutput::RewardPoolOnChain => on_chain,
            NativeOutput::RewardPoolWeightShare => self.reward_pool_weight_share,
            NativeOutput::RewardPoolMakeup => self.reward_pool_makeup,
            NativeOutput::ValueExcludingLsd => self.value_excluding_lsd,
            NativeOutput::ValueIncludingLsd => self.value_including_lsd,
            NativeOutput::PercentageOfPoolValue => self.percentage_of_pool_value,
            NativeOutput::PrincipalExcludingRewards => self.principal_excluding_rewards,
            NativeOutput::PrincipalIncludingLsd => self.principal_including_lsd,
            NativeOutput::StakingRewardValue => self.staking_reward_value,
            NativeOutput::StakingApr => self.staking_apr,
            NativeOutput::PoolTotalValue => pool_total,
        }
    }

    pub fn alliance_value(&self, field: AllianceOutput) -> f64 {
        let (interval, parameter) = match self.role {
            RoleDerived::Alliance {
                take_rate_interval_minutes,
                take_rate_parameter,
            } => (take_rate_interval_minutes, take_rate_parameter),
            RoleDerived::Native { .. } => (f64::NAN, f64::NAN),
        };
        match field {
            AllianceOutput::RewardPoolWeightShare => self.reward_pool_weight_share,
            AllianceOutput::RewardPoolMakeup => self.reward_pool_makeup,
            AllianceOutput::ValueExcludingLsd => self.value_excluding_lsd,
            AllianceOutput::ValueIncludingLsd => self.value_including_lsd,
            AllianceOutput::PercentageOfPoolValue => self.percentage_of_pool_value,
            AllianceOutput::PrincipalExcludingRewards => self.principal_excluding_rewards,
            AllianceOutput::PrincipalIncludingLsd => self.principal_including_lsd,
            AllianceOutput::StakingRewardValue => self.staking_reward_value,
            AllianceOutput::StakingApr => self.staking_apr,
            AllianceOutput::TakeRateIntervalMinutes => interval,
            AllianceOutput::TakeRateParameter => parameter,
        }
    }

    pub fn value(&self, field: OutputField) -> f64 {
        match field {
            OutputField::Native(f) => self.native_value(f),
            OutputField::Alliance(f) => self.alliance_value(f),
        }
    }
}

/// One asset's inputs, identity and last derived values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRecord {
    id: AssetId,
    label: String,
    inputs: AssetInputs,
    derived: AssetDerived,
}

impl AssetRecord {
    /// Create a record and register its contribution with the pool.
    pub fn new(
        id: AssetId,
        label: impl Into<String>,
        inputs: AssetInputs,
        pool: &mut PoolRegistry,
        schedule: &TakeRateSchedule,
    ) -> Self {
        let contribution = DerivationEngine::contribution(&inputs);
        pool.register(id, contribution.weight, contribution.value);
        let derived = DerivationEngine::derive(&inputs, &pool.aggregate(), schedule);

        Self {
            id,
            label: label.into(),
            inputs,
            derived,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn role(&self) -> AssetRole {
        self.inputs.role()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn inputs(&self) -> &AssetInputs {
        &self.inputs
    }

    pub fn derived(&self) -> &AssetDerived {
        &self.derived
    }

    /// Current inputs as (name, value) pairs in field order
    pub fn input_values(&self) -> Vec<(&'static str, f64)> {
        match &self.inputs {
            AssetInputs::Native(native) => NativeInput::iter()
                .map(|field| {
                    let name: &'static str = field.into();
                    (name, native.get(field))
                })
                .collect(),
            AssetInputs::Alliance(alliance) => AllianceInput::iter()
                .map(|field| {
                    let name: &'static str = field.into();
                    (name, alliance.get(field))
                })
                .collect(),
        }
    }

    /// Derived values as (name, value) pairs in field order
    pub fn derived_values(&self) -> Vec<(&'static str, f64)> {
        match self.role() {
            AssetRole::Native => NativeOutput::iter()
                .map(|field| {
                    let name: &'static str = field.into();
                    (name, self.derived.native_value(field))
                })
                .collect(),
            AssetRole::Alliance => AllianceOutput::iter()
                .map(|field| {
                    let name: &'static str = field.into();
                    (name, self.derived.alliance_value(field))
                })
                .collect(),
        }
    }

    /// What this asset currently adds to the pool totals
    pub fn contribution(&self) -> PoolContribution {
        DerivationEngine::contribution(&self.inputs)
    }

    /// Set an input by name, report the new contribution and re-derive.
    pub fn set_input(
        &mut self,
        name: &str,
        value: f64,
        pool: &mut PoolRegistry,
        schedule: &TakeRateSchedule,
    ) -> Result<AssetDerived> {
        let field = self.inputs.parse_field(name)?;
        self.set_field(field, value, pool, schedule)
    }

    /// Typed variant of `set_input`.
    pub fn set_field(
        &mut self,
        field: InputField,
        value: f64,
        pool: &mut PoolRegistry,
        schedule: &TakeRateSchedule,
    ) -> Result<AssetDerived> {
        self.inputs.set(field, value)?;
        log::debug!("asset {} ({}): {} = {}", self.id, self.role(), field.name(), value);

        let contribution = self.contribution();
        pool.register(self.id, contribution.weight, contribution.value);
        self.refresh(pool, schedule);

        Ok(self.derived)
    }

    /// Look up a derived value by name.
    pub fn get_derived(&self, name: &str) -> Result<f64> {
        let field = self.inputs.parse_output(name)?;
        Ok(self.derived.value(field))
    }

    /// Re-derive against the pool's current aggregate without re-registering.
    pub fn refresh(&mut self, pool: &PoolRegistry, schedule: &TakeRateSchedule) {
        self.derived = DerivationEngine::derive(&self.inputs, &pool.aggregate(), schedule);

        if !self.derived.staking_apr.is_finite() {
            log::warn!(
                "asset {} ({}) has a non-finite staking APR: {}",
                self.id,
                self.label,
                self.derived.staking_apr
            );
        }
    }
}
