//! Derived value calculation
//!
//! All formulas are plain floating point arithmetic over one asset's inputs
//! and the current pool totals. Nothing is clamped: a zero divisor produces
//! NaN or infinity in the output instead of an error.

use crate::asset::{AssetDerived, AssetInputs, RoleDerived};
use crate::pool::{PoolAggregate, PoolContribution};
use crate::take_rate::TakeRateSchedule;

pub struct DerivationEngine;

impl DerivationEngine {
    /// Amount of the asset that flows into the reward pool over one year
    pub fn reward_pool_makeup(inputs: &AssetInputs) -> f64 {
        inputs.asset_staked_in_alliance() * inputs.pool_inflow_rate()
    }

    /// Value of the reward pool inflow, including one year of LSD growth
    pub fn value_including_lsd(inputs: &AssetInputs) -> f64 {
        let makeup = Self::reward_pool_makeup(inputs);
        let price = inputs.asset_price();
        makeup * price + makeup * inputs.lsd_annual_estimate() * price
    }

    /// What an asset adds to the pool totals. Does not depend on the pool.
    pub fn contribution(inputs: &AssetInputs) -> PoolContribution {
        PoolContribution {
            weight: inputs.alliance_reward_weight(),
            value: Self::value_including_lsd(inputs),
        }
    }

    /// Compute every derived value of one asset against the given pool totals.
    pub fn derive(
        inputs: &AssetInputs,
        aggregate: &PoolAggregate,
        schedule: &TakeRateSchedule,
    ) -> AssetDerived {
        let price = inputs.asset_price();
        let staked = inputs.asset_staked_in_alliance();

        let reward_pool_makeup = Self::reward_pool_makeup(inputs);
        let value_excluding_lsd = reward_pool_makeup * price;
        let value_including_lsd =
            value_excluding_lsd + reward_pool_makeup * inputs.lsd_annual_estimate() * price;

        let reward_pool_weight_share = inputs.alliance_reward_weight() / aggregate.total_weight;
        let percentage_of_pool_value = value_including_lsd / aggregate.total_pool_value;

        let principal_excluding_rewards = staked;
        let principal_including_lsd = staked * price;

        // Share of the whole pool, not only of this asset's own inflow
        let staking_reward_value = reward_pool_weight_share * aggregate.total_pool_value;

        let entry_value = principal_excluding_rewards * price;
        let staking_apr = (principal_including_lsd + staking_reward_value - entry_value) / entry_value;

        let role = match inputs {
            AssetInputs::Native(native) => RoleDerived::Native {
                reward_pool_on_chain: native.inflation_rate * native.total_token_supply,
                pool_total_value: aggregate.total_pool_value,
            },
            AssetInputs::Alliance(alliance) => RoleDerived::Alliance {
                take_rate_interval_minutes: schedule.interval_minutes,
                take_rate_parameter: schedule.parameter_for(alliance.annualized_take_rate),
            },
        };

        AssetDerived {
            reward_pool_weight_share,
            reward_pool_makeup,
            value_excluding_lsd,
            value_including_lsd,
            percentage_of_pool_value,
            principal_excluding_rewards,
            principal_including_lsd,
            staking_reward_value,
            staking_apr,
            role,
        }
    }
}
