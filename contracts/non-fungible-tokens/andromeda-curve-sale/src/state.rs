use andromeda_sales::{
    curve_sale::{Config, SalesConfig},
    distribution::Allocation,
    error::ContractError,
};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Storage, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<Config> = Item::new("config");

/// Keyed by (tenant, item id).
pub const SALES: Map<(&Addr, u64), SaleRecord> = Map::new("sales");

/// Withdrawal waiting for the distribution factory to reply with its target.
pub const PENDING_WITHDRAWAL: Item<PendingWithdrawal> = Item::new("pending_withdrawal");

#[cw_serde]
#[derive(Default)]
pub struct SaleRecord {
    pub config: SalesConfig,
    /// Last accepted price.
    pub price: Uint128,
    /// Gross payments credited since the last withdrawal.
    pub escrow: Uint128,
    /// Part of `escrow` paid into this contract. Only this is forwarded on withdrawal.
    #[serde(default)]
    pub held: Uint128,
}

#[cw_serde]
pub struct PendingWithdrawal {
    pub tenant: Addr,
    pub item_id: u64,
    pub recipient: Addr,
    pub amount: Uint128,
    pub recipients: Vec<Allocation>,
}

pub(crate) fn load_record(
    storage: &dyn Storage,
    tenant: &Addr,
    item_id: u64,
) -> Result<SaleRecord, ContractError> {
    Ok(SALES
        .may_load(storage, (tenant, item_id))?
        .unwrap_or_default())
}

/// Replaces the config of a record, leaving its price and escrow untouched.
pub(crate) fn store_config(
    storage: &mut dyn Storage,
    tenant: &Addr,
    item_id: u64,
    config: SalesConfig,
) -> Result<(), ContractError> {
    let mut record = load_record(storage, tenant, item_id)?;
    record.config = config;
    SALES.save(storage, (tenant, item_id), &record)?;
    Ok(())
}

impl SaleRecord {
    pub(crate) fn credit_escrow(&mut self, amount: Uint128) -> Result<(), ContractError> {
        self.escrow = self.escrow.checked_add(amount)?;
        Ok(())
    }

    pub(crate) fn credit_held(&mut self, amount: Uint128) -> Result<(), ContractError> {
        self.held = self.held.checked_add(amount)?;
        Ok(())
    }

    /// Zeroes the escrow and the held funds, returning `(escrow, held)`.
    pub(crate) fn drain_escrow(&mut self) -> (Uint128, Uint128) {
        (
            std::mem::take(&mut self.escrow),
            std::mem::take(&mut self.held),
        )
    }
}
