#![cfg(all(not(target_arch = "wasm32"), feature = "testing"))]

use crate::contract::{execute, instantiate, query, reply};
use andromeda_sales::{
    curve_sale::{
        EscrowBalanceResponse, ExecuteMsg, InstantiateMsg, PriceResponse, QueryMsg, SalesConfig,
    },
    distribution::DistributionSpec,
};
use andromeda_testing::{
    mock::MockApp, mock_contract, mock_contract::ExecuteResult, MockContract,
};
use cosmwasm_std::{Addr, Empty, Uint128};
use cw_multi_test::{Contract, ContractWrapper, Executor};

pub struct MockCurveSale(Addr);
mock_contract!(MockCurveSale, ExecuteMsg, QueryMsg);

impl MockCurveSale {
    pub fn instantiate(
        app: &mut MockApp,
        code_id: u64,
        sender: Addr,
        distribution_factory: &Addr,
        denom: impl Into<String>,
        owner: Option<String>,
    ) -> Self {
        let msg = mock_curve_sale_instantiate_msg(distribution_factory, denom, owner);
        let res = app.instantiate_contract(
            code_id,
            sender.clone(),
            &msg,
            &[],
            "Andromeda Curve Sale",
            None,
        );

        Self(res.unwrap())
    }

    pub fn execute_set_sale(
        &self,
        app: &mut MockApp,
        sender: Addr,
        item_id: u64,
        config: SalesConfig,
    ) -> ExecuteResult {
        let msg = mock_set_sale_msg(item_id, config);
        self.execute(app, &msg, sender, &[])
    }

    pub fn execute_withdraw_funds(
        &self,
        app: &mut MockApp,
        sender: Addr,
        tenant: &Addr,
        item_id: u64,
        distribution: DistributionSpec,
    ) -> ExecuteResult {
        let msg = mock_withdraw_funds_msg(tenant, item_id, distribution);
        self.execute(app, &msg, sender, &[])
    }

    pub fn execute_update_distribution_factory(
        &self,
        app: &mut MockApp,
        sender: Addr,
        address: &Addr,
    ) -> ExecuteResult {
        let msg = ExecuteMsg::UpdateDistributionFactory {
            address: address.to_string(),
        };
        self.execute(app, &msg, sender, &[])
    }

    pub fn query_latest_price(&self, app: &MockApp, tenant: &Addr, item_id: u64) -> Uint128 {
        let msg = QueryMsg::LatestPrice {
            tenant: tenant.to_string(),
            item_id,
        };
        self.query::<PriceResponse>(app, msg).price
    }

    pub fn query_next_price(&self, app: &MockApp, tenant: &Addr, item_id: u64) -> Uint128 {
        let msg = QueryMsg::NextPrice {
            tenant: tenant.to_string(),
            item_id,
        };
        self.query::<PriceResponse>(app, msg).price
    }

    pub fn query_escrow_balance(&self, app: &MockApp, tenant: &Addr, item_id: u64) -> Uint128 {
        self.query_escrow(app, tenant, item_id).balance
    }

    pub fn query_held(&self, app: &MockApp, tenant: &Addr, item_id: u64) -> Uint128 {
        self.query_escrow(app, tenant, item_id).held
    }

    fn query_escrow(&self, app: &MockApp, tenant: &Addr, item_id: u64) -> EscrowBalanceResponse {
        let msg = QueryMsg::EscrowBalance {
            tenant: tenant.to_string(),
            item_id,
        };
        self.query::<EscrowBalanceResponse>(app, msg)
    }
}

pub fn mock_andromeda_curve_sale() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(execute, instantiate, query).with_reply(reply);
    Box::new(contract)
}

pub fn mock_curve_sale_instantiate_msg(
    distribution_factory: &Addr,
    denom: impl Into<String>,
    owner: Option<String>,
) -> InstantiateMsg {
    InstantiateMsg {
        distribution_factory: distribution_factory.to_string(),
        denom: denom.into(),
        owner,
    }
}

pub fn mock_set_sale_msg(item_id: u64, config: SalesConfig) -> ExecuteMsg {
    ExecuteMsg::SetSale { item_id, config }
}

pub fn mock_withdraw_funds_msg(
    tenant: &Addr,
    item_id: u64,
    distribution: DistributionSpec,
) -> ExecuteMsg {
    ExecuteMsg::WithdrawFunds {
        tenant: tenant.to_string(),
        item_id,
        distribution,
    }
}
