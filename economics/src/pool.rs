//! Reward pool registry
//!
//! Tracks what every registered asset contributes to the shared reward pool
//! (reward weight and value including LSD growth) and keeps the pool-wide
//! totals. Totals are recomputed from the full registered set on every
//! change, so they never hold a stale contribution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::asset::AssetId;

/// One asset's share of the pool totals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoolContribution {
    pub weight: f64,
    pub value: f64,
}

/// Pool-wide totals over the registered set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolAggregate {
    pub total_weight: f64,
    pub total_pool_value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    contributions: BTreeMap<AssetId, PoolContribution>,
    aggregate: PoolAggregate,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an asset's contribution and return the new totals.
    pub fn register(&mut self, id: AssetId, weight: f64, value: f64) -> PoolAggregate {
        self.contributions.insert(id, PoolContribution { weight, value });
        self.recompute();
        log::debug!(
            "pool: registered asset {} (weight {}, value {}); total weight {}, total value {}",
            id,
            weight,
            value,
            self.aggregate.total_weight,
            self.aggregate.total_pool_value
        );
        self.aggregate
    }

    /// Remove an asset's contribution. Returns what it contributed, if it was registered.
    pub fn unregister(&mut self, id: AssetId) -> Option<PoolContribution> {
        let removed = self.contributions.remove(&id);
        if removed.is_some() {
            self.recompute();
            log::debug!(
                "pool: unregistered asset {}; total weight {}, total value {}",
                id,
                self.aggregate.total_weight,
                self.aggregate.total_pool_value
            );
        }
        removed
    }

    pub fn aggregate(&self) -> PoolAggregate {
        self.aggregate
    }

    pub fn contribution(&self, id: AssetId) -> Option<PoolContribution> {
        self.contributions.get(&id).copied()
    }

    pub fn is_registered(&self, id: AssetId) -> bool {
        self.contributions.contains_key(&id)
    }

    /// Contributions in id order
    pub fn contributions(&self) -> impl Iterator<Item = (AssetId, PoolContribution)> + '_ {
        self.contributions.iter().map(|(id, c)| (*id, *c))
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    // Sums run over sorted values so the totals do not depend on which ids
    // the assets were registered under.
    fn recompute(&mut self) {
        let mut weights: Vec<f64> = self.contributions.values().map(|c| c.weight).collect();
        let mut values: Vec<f64> = self.contributions.values().map(|c| c.value).collect();
        weights.sort_by(f64::total_cmp);
        values.sort_by(f64::total_cmp);

        self.aggregate = PoolAggregate {
            total_weight: weights.into_iter().fold(0.0, |acc, w| acc + w),
            total_pool_value: values.into_iter().fold(0.0, |acc, v| acc + v),
        };
    }
}
