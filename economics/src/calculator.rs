//! Alliance calculator
//!
//! Owns the native asset, the alliance assets and the pool registry they
//! share. Every mutation registers the changed contribution first and then
//! re-derives all records against the new totals, so every record is
//! consistent with the pool when a call returns.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::asset::{
    AllianceInputs, AssetDerived, AssetId, AssetInputs, AssetRecord, InputField, NativeInputs,
};
use crate::error::{CalculatorError, Result};
use crate::fields::{AllianceInput, NativeInput};
use crate::pool::{PoolAggregate, PoolRegistry};
use crate::take_rate::TakeRateSchedule;

/// Label given to the native asset when none is supplied
pub const DEFAULT_NATIVE_LABEL: &str = "Native";

#[derive(Debug, Clone)]
pub struct AllianceCalculator {
    native: AssetRecord,
    alliance: BTreeMap<AssetId, AssetRecord>,
    pool: PoolRegistry,
    schedule: TakeRateSchedule,
    next_id: u32,
}

/// Serializable view of the whole calculator
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSnapshot {
    pub aggregate: PoolAggregate,
    pub take_rate_schedule: TakeRateSchedule,
    pub assets: Vec<AssetRecord>,
}

impl CalculatorSnapshot {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl AllianceCalculator {
    /// Create a calculator holding only the native asset.
    pub fn new(native: NativeInputs, schedule: TakeRateSchedule) -> Self {
        let mut pool = PoolRegistry::new();
        let native = AssetRecord::new(
            AssetId::NATIVE,
            DEFAULT_NATIVE_LABEL,
            AssetInputs::Native(native),
            &mut pool,
            &schedule,
        );

        Self {
            native,
            alliance: BTreeMap::new(),
            pool,
            schedule,
            next_id: 1,
        }
    }

    pub fn with_native_label(mut self, label: impl Into<String>) -> Self {
        self.native.set_label(label);
        self
    }

    /// Set an input by name on any asset and return that asset's new derived values.
    pub fn set_input(&mut self, id: AssetId, name: &str, value: f64) -> Result<AssetDerived> {
        let field = self.record(id)?.inputs().parse_field(name)?;
        self.apply(id, field, value)
    }

    pub fn set_native_input(&mut self, field: NativeInput, value: f64) -> Result<AssetDerived> {
        self.apply(AssetId::NATIVE, InputField::Native(field), value)
    }

    pub fn set_alliance_input(
        &mut self,
        id: AssetId,
        field: AllianceInput,
        value: f64,
    ) -> Result<AssetDerived> {
        if id.is_native() {
            return Err(CalculatorError::UnknownField {
                role: self.native.role(),
                field: field.to_string(),
            });
        }
        self.apply(id, InputField::Alliance(field), value)
    }

    /// Read a derived value by name.
    pub fn get_derived(&self, id: AssetId, name: &str) -> Result<f64> {
        self.record(id)?.get_derived(name)
    }

    /// Add an alliance asset, register it with the pool and return its id.
    pub fn add_alliance_asset(&mut self, label: impl Into<String>, inputs: AllianceInputs) -> AssetId {
        let id = AssetId(self.next_id);
        self.next_id += 1;

        let record = AssetRecord::new(
            id,
            label,
            AssetInputs::Alliance(inputs),
            &mut self.pool,
            &self.schedule,
        );
        log::info!("added alliance asset {} ({})", id, record.label());
        self.alliance.insert(id, record);
        self.refresh_all();
        id
    }

    /// Remove an alliance asset and drop its contribution from the pool.
    pub fn remove_alliance_asset(&mut self, id: AssetId) -> Result<AssetRecord> {
        if id.is_native() {
            return Err(CalculatorError::NativeAssetRemoval);
        }
        let record = self
            .alliance
            .remove(&id)
            .ok_or(CalculatorError::AssetNotFound(id))?;

        self.pool.unregister(id);
        log::info!("removed alliance asset {} ({})", id, record.label());
        self.refresh_all();
        Ok(record)
    }

    pub fn rename_asset(&mut self, id: AssetId, label: impl Into<String>) -> Result<()> {
        self.record_mut(id)?.set_label(label);
        Ok(())
    }

    /// Replace the take rate schedule and re-derive every asset.
    pub fn set_take_rate_schedule(&mut self, schedule: TakeRateSchedule) {
        self.schedule = schedule;
        self.refresh_all();
    }

    pub fn take_rate_schedule(&self) -> TakeRateSchedule {
        self.schedule
    }

    pub fn pool_aggregate(&self) -> PoolAggregate {
        self.pool.aggregate()
    }

    pub fn pool(&self) -> &PoolRegistry {
        &self.pool
    }

    pub fn native(&self) -> &AssetRecord {
        &self.native
    }

    /// Alliance assets in id order
    pub fn alliance_assets(&self) -> impl Iterator<Item = &AssetRecord> + '_ {
        self.alliance.values()
    }

    /// Every asset, native first
    pub fn assets(&self) -> impl Iterator<Item = &AssetRecord> + '_ {
        std::iter::once(&self.native).chain(self.alliance.values())
    }

    pub fn record(&self, id: AssetId) -> Result<&AssetRecord> {
        if id.is_native() {
            return Ok(&self.native);
        }
        self.alliance.get(&id).ok_or(CalculatorError::AssetNotFound(id))
    }

    pub fn snapshot(&self) -> CalculatorSnapshot {
        CalculatorSnapshot {
            aggregate: self.pool.aggregate(),
            take_rate_schedule: self.schedule,
            assets: self.assets().cloned().collect(),
        }
    }

    fn record_mut(&mut self, id: AssetId) -> Result<&mut AssetRecord> {
        if id.is_native() {
            return Ok(&mut self.native);
        }
        self.alliance
            .get_mut(&id)
            .ok_or(CalculatorError::AssetNotFound(id))
    }

    fn apply(&mut self, id: AssetId, field: InputField, value: f64) -> Result<AssetDerived> {
        let schedule = self.schedule;
        let record = if id.is_native() {
            &mut self.native
        } else {
            self.alliance
                .get_mut(&id)
                .ok_or(CalculatorError::AssetNotFound(id))?
        };
        record.set_field(field, value, &mut self.pool, &schedule)?;

        self.refresh_all();
        Ok(*self.record(id)?.derived())
    }

    fn refresh_all(&mut self) {
        self.native.refresh(&self.pool, &self.schedule);
        for record in self.alliance.values_mut() {
            record.refresh(&self.pool, &self.schedule);
        }
    }
}

impl Default for AllianceCalculator {
    fn default() -> Self {
        Self::new(NativeInputs::default(), TakeRateSchedule::default())
    }
}
