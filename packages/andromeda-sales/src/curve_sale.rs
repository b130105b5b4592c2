use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::distribution::DistributionSpec;

/// Neutral value of `scaling_factor`: the price stays flat at the base price.
pub const SCALING_DENOMINATOR: u64 = 100;

#[cw_serde]
pub struct InstantiateMsg {
    /// Factory that creates distribution targets and performs the proportional payout on withdrawal.
    pub distribution_factory: String,
    /// Native denom forwarded to the distribution target on withdrawal.
    pub denom: String,
    pub owner: Option<String>,
}

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub distribution_factory: Addr,
    pub denom: String,
}

/// Sale window and curve parameters for one item of one tenant.
///
/// Every field defaults to its zero value, so a message that omits a field resets it.
/// The all-zero config is also what an unconfigured item reads as.
#[cw_serde]
#[derive(Default)]
#[serde(default)]
pub struct SalesConfig {
    /// First second (inclusive) at which purchases are accepted.
    pub sale_start: u64,
    /// Last second (inclusive) at which purchases are accepted.
    pub sale_end: u64,
    pub base_price_per_item: Uint128,
    /// Percentage applied to the last price on every purchase. `100` keeps the price flat.
    pub scaling_factor: u64,
    /// Identity allowed to withdraw. When set, every purchase also routes its payment here.
    pub funds_recipient: Option<String>,
}

/// Decoded form of the `args` blob a host attaches to `RequestPurchase`.
#[cw_serde]
pub struct PurchaseArgs {
    pub recipient: String,
    pub comment: Option<String>,
}

#[cw_serde]
pub enum SaleAction {
    /// Issue `quantity` units of `item_id` to `recipient`.
    IssueItem {
        recipient: String,
        item_id: u64,
        quantity: u64,
    },
    /// Send `amount` of the payment to `recipient`.
    RoutePayment { recipient: String, amount: Uint128 },
}

/// Post-purchase instructions for the host, returned as the `RequestPurchase` response data.
/// `size` always equals `actions.len()`.
#[cw_serde]
pub struct ActionList {
    pub size: u32,
    pub actions: Vec<SaleAction>,
}

#[cw_serde]
pub enum Capability {
    SaleRegistry,
    PricedPurchase,
    EscrowWithdrawal,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Replaces the sale config of `item_id` for the sending tenant.
    SetSale { item_id: u64, config: SalesConfig },
    /// Clears the sale config of `item_id` for the sending tenant.
    ResetSale { item_id: u64 },
    /// Called by the host collection. Prices the purchase and returns an `ActionList` as data.
    ///
    /// The host may attach the whole payment in the configured denom, in which case the engine
    /// holds it for withdrawal and no `RoutePayment` is returned.
    RequestPurchase {
        item_id: u64,
        /// Ignored, a purchase always issues a single unit.
        quantity: u64,
        payment_amount: Uint128,
        /// JSON encoded `PurchaseArgs`.
        args: Binary,
    },
    /// Drains the escrow of `item_id` and forwards the funds held for it to a new
    /// distribution target. Only callable by the configured funds recipient after the sale
    /// has ended.
    WithdrawFunds {
        tenant: String,
        item_id: u64,
        distribution: DistributionSpec,
    },
    UpdateDistributionFactory { address: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(SaleResponse)]
    Sale { tenant: String, item_id: u64 },
    /// The last accepted price.
    #[returns(PriceResponse)]
    LatestPrice { tenant: String, item_id: u64 },
    /// The payment the next purchase must carry.
    #[returns(PriceResponse)]
    NextPrice { tenant: String, item_id: u64 },
    #[returns(EscrowBalanceResponse)]
    EscrowBalance { tenant: String, item_id: u64 },
    #[returns(Config)]
    Config {},
    #[returns(CapabilitiesResponse)]
    Capabilities {},
}

#[cw_serde]
pub struct SaleResponse {
    pub config: SalesConfig,
}

#[cw_serde]
pub struct PriceResponse {
    pub price: Uint128,
}

#[cw_serde]
pub struct EscrowBalanceResponse {
    /// Gross payments credited since the last withdrawal.
    pub balance: Uint128,
    /// Part of `balance` held by the engine, which is what a withdrawal forwards.
    pub held: Uint128,
}

#[cw_serde]
pub struct CapabilitiesResponse {
    pub capabilities: Vec<Capability>,
}

#[cw_serde]
pub struct WithdrawResponse {
    /// Address of the distribution target that received the funds.
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::from_json;

    #[test]
    fn test_omitted_fields_decode_to_zero() {
        let config: SalesConfig = from_json(br#"{"sale_end":50}"#).unwrap();
        assert_eq!(
            config,
            SalesConfig {
                sale_end: 50,
                ..SalesConfig::default()
            }
        );
    }

    #[test]
    fn test_purchase_args_without_comment() {
        let args: PurchaseArgs = from_json(br#"{"recipient":"buyer"}"#).unwrap();
        assert_eq!(args.recipient, "buyer");
        assert!(args.comment.is_none());
    }
}
