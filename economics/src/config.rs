//! Scenario file support
//!
//! A scenario is a TOML file describing the native asset, any number of
//! alliance assets and the take rate schedule:
//!
//! ```toml
//! [take_rate]
//! interval_minutes = 5
//!
//! [native]
//! label = "LUNA"
//! inflation_rate = 0.07
//! total_token_supply = 1000000000
//! asset_price = 1.30
//!
//! [[alliance]]
//! label = "ampLUNA"
//! lsd_annual_estimate = 0.08
//! annualized_take_rate = 0.02
//! asset_staked_in_alliance = 10000000
//! ```
//!
//! Every section and field is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::asset::{AllianceInputs, NativeInputs};
use crate::calculator::{AllianceCalculator, DEFAULT_NATIVE_LABEL};
use crate::take_rate::{TakeRateSchedule, DEFAULT_TAKE_RATE_INTERVAL_MINUTES, MINUTES_PER_YEAR};

#[derive(Error, Debug)]
pub enum ScenarioConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TakeRateSection {
    pub interval_minutes: f64,
    pub minutes_per_year: f64,
}

impl Default for TakeRateSection {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_TAKE_RATE_INTERVAL_MINUTES,
            minutes_per_year: MINUTES_PER_YEAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeSection {
    pub label: String,
    pub inflation_rate: f64,
    pub lsd_annual_estimate: f64,
    pub total_token_supply: f64,
    pub asset_price: f64,
    pub alliance_reward_weight: f64,
    /// Defaults to the total token supply
    pub asset_staked_in_alliance: Option<f64>,
}

impl Default for NativeSection {
    fn default() -> Self {
        let inputs = NativeInputs::default();
        Self {
            label: DEFAULT_NATIVE_LABEL.to_string(),
            inflation_rate: inputs.inflation_rate,
            lsd_annual_estimate: inputs.lsd_annual_estimate,
            total_token_supply: inputs.total_token_supply,
            asset_price: inputs.asset_price,
            alliance_reward_weight: inputs.alliance_reward_weight,
            asset_staked_in_alliance: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllianceSection {
    pub label: String,
    pub lsd_annual_estimate: f64,
    pub asset_price: f64,
    pub alliance_reward_weight: f64,
    pub annualized_take_rate: f64,
    pub asset_staked_in_alliance: f64,
}

impl Default for AllianceSection {
    fn default() -> Self {
        let inputs = AllianceInputs::default();
        Self {
            label: "Alliance".to_string(),
            lsd_annual_estimate: inputs.lsd_annual_estimate,
            asset_price: inputs.asset_price,
            alliance_reward_weight: inputs.alliance_reward_weight,
            annualized_take_rate: inputs.annualized_take_rate,
            asset_staked_in_alliance: inputs.asset_staked_in_alliance,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub take_rate: TakeRateSection,
    pub native: NativeSection,
    pub alliance: Vec<AllianceSection>,
}

impl NativeSection {
    pub fn inputs(&self) -> NativeInputs {
        NativeInputs {
            inflation_rate: self.inflation_rate,
            lsd_annual_estimate: self.lsd_annual_estimate,
            total_token_supply: self.total_token_supply,
            asset_price: self.asset_price,
            alliance_reward_weight: self.alliance_reward_weight,
            asset_staked_in_alliance: self
                .asset_staked_in_alliance
                .unwrap_or(self.total_token_supply),
        }
    }
}

impl AllianceSection {
    pub fn inputs(&self) -> AllianceInputs {
        AllianceInputs {
            lsd_annual_estimate: self.lsd_annual_estimate,
            asset_price: self.asset_price,
            alliance_reward_weight: self.alliance_reward_weight,
            annualized_take_rate: self.annualized_take_rate,
            asset_staked_in_alliance: self.asset_staked_in_alliance,
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a scenario from string
    pub fn parse(content: &str) -> Result<Self, ScenarioConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn schedule(&self) -> TakeRateSchedule {
        TakeRateSchedule::new(self.take_rate.interval_minutes, self.take_rate.minutes_per_year)
    }

    /// Build a calculator with the native asset and every alliance asset registered.
    pub fn build_calculator(&self) -> AllianceCalculator {
        let mut calc = AllianceCalculator::new(self.native.inputs(), self.schedule())
            .with_native_label(self.native.label.clone());

        for asset in &self.alliance {
            calc.add_alliance_asset(asset.label.clone(), asset.inputs());
        }
        calc
    }
}
