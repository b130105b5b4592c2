use andromeda_sales::{
    curve_sale::{
        EscrowBalanceResponse, ExecuteMsg, InstantiateMsg, PriceResponse, PurchaseArgs, QueryMsg,
        SaleResponse, SalesConfig,
    },
    distribution::{Allocation, DistributionSpec, DistributionTargetResponse},
    error::ContractError,
};
use cosmwasm_std::{
    from_json,
    testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage},
    to_json_binary, Addr, Binary, Coin, Deps, DepsMut, Env, OwnedDeps, Reply, Response,
    SubMsgResponse, SubMsgResult, Timestamp, Uint128,
};

use crate::{
    contract::{execute, instantiate, query, reply},
    withdraw::REPLY_CREATE_DISTRIBUTION_TARGET,
};

pub type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

pub const DENOM: &str = "uandr";
pub const SALE_START: u64 = 1_000;
pub const SALE_END: u64 = 2_000;

pub fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env
}

pub fn addr(deps: &MockDeps, name: &str) -> Addr {
    deps.api.addr_make(name)
}

pub fn proper_initialization() -> MockDeps {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make("owner");
    let msg = InstantiateMsg {
        distribution_factory: deps.api.addr_make("factory").to_string(),
        denom: DENOM.to_string(),
        owner: None,
    };
    let res = instantiate(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap();
    assert_eq!(0, res.messages.len());
    deps
}

pub fn sale_config(
    base_price_per_item: u128,
    scaling_factor: u64,
    funds_recipient: Option<&Addr>,
) -> SalesConfig {
    SalesConfig {
        sale_start: SALE_START,
        sale_end: SALE_END,
        base_price_per_item: Uint128::new(base_price_per_item),
        scaling_factor,
        funds_recipient: funds_recipient.map(Addr::to_string),
    }
}

pub fn set_sale(
    deps: DepsMut<'_>,
    tenant: &Addr,
    item_id: u64,
    config: SalesConfig,
) -> Result<Response, ContractError> {
    let msg = ExecuteMsg::SetSale { item_id, config };
    execute(deps, mock_env(), message_info(tenant, &[]), msg)
}

pub fn reset_sale(
    deps: DepsMut<'_>,
    tenant: &Addr,
    item_id: u64,
) -> Result<Response, ContractError> {
    let msg = ExecuteMsg::ResetSale { item_id };
    execute(deps, mock_env(), message_info(tenant, &[]), msg)
}

pub fn purchase_args(recipient: &Addr, comment: Option<&str>) -> Binary {
    to_json_binary(&PurchaseArgs {
        recipient: recipient.to_string(),
        comment: comment.map(str::to_string),
    })
    .unwrap()
}

pub fn request_purchase(
    deps: DepsMut<'_>,
    env: Env,
    tenant: &Addr,
    item_id: u64,
    payment_amount: u128,
    args: Binary,
) -> Result<Response, ContractError> {
    request_purchase_with_funds(deps, env, tenant, item_id, payment_amount, args, &[])
}

/// Purchase where the tenant attaches `funds` for the engine to hold.
pub fn request_purchase_with_funds(
    deps: DepsMut<'_>,
    env: Env,
    tenant: &Addr,
    item_id: u64,
    payment_amount: u128,
    args: Binary,
    funds: &[Coin],
) -> Result<Response, ContractError> {
    let msg = ExecuteMsg::RequestPurchase {
        item_id,
        quantity: 1,
        payment_amount: Uint128::new(payment_amount),
        args,
    };
    execute(deps, env, message_info(tenant, funds), msg)
}

pub fn distribution(deps: &MockDeps) -> DistributionSpec {
    DistributionSpec {
        recipients: vec![
            Allocation::new(deps.api.addr_make("payee1"), 70),
            Allocation::new(deps.api.addr_make("payee2"), 30),
        ],
    }
}

pub fn withdraw_funds(
    deps: DepsMut<'_>,
    env: Env,
    sender: &Addr,
    tenant: &Addr,
    item_id: u64,
    distribution: DistributionSpec,
) -> Result<Response, ContractError> {
    let msg = ExecuteMsg::WithdrawFunds {
        tenant: tenant.to_string(),
        item_id,
        distribution,
    };
    execute(deps, env, message_info(sender, &[]), msg)
}

pub fn fund_contract(deps: &mut MockDeps, amount: u128) {
    let contract = mock_env().contract.address;
    deps.querier
        .bank
        .update_balance(contract, cosmwasm_std::coins(amount, DENOM));
}

/// Protobuf encoding of `MsgExecuteContractResponse { data }`: field 1 as a length-delimited
/// bytes value, the framing `cw_utils::parse_execute_response_data` reads.
pub fn encode_execute_response(data: &[u8]) -> Binary {
    let mut encoded = vec![0x0a];
    let mut len = data.len();
    while len >= 0x80 {
        encoded.push((len as u8 & 0x7f) | 0x80);
        len >>= 7;
    }
    encoded.push(len as u8);
    encoded.extend_from_slice(data);
    Binary::from(encoded)
}

#[allow(deprecated)]
pub fn target_created_reply(target: &Addr) -> Reply {
    let data = to_json_binary(&DistributionTargetResponse {
        target: target.to_string(),
    })
    .unwrap();
    Reply {
        id: REPLY_CREATE_DISTRIBUTION_TARGET,
        payload: Binary::default(),
        gas_used: 0,
        result: SubMsgResult::Ok(SubMsgResponse {
            events: vec![],
            data: Some(encode_execute_response(data.as_slice())),
            msg_responses: vec![],
        }),
    }
}

pub fn failed_reply(err: &str) -> Reply {
    Reply {
        id: REPLY_CREATE_DISTRIBUTION_TARGET,
        payload: Binary::default(),
        gas_used: 0,
        result: SubMsgResult::Err(err.to_string()),
    }
}

pub fn handle_reply(deps: DepsMut<'_>, msg: Reply) -> Result<Response, ContractError> {
    reply(deps, mock_env(), msg)
}

pub fn query_sale(deps: Deps, tenant: &Addr, item_id: u64) -> SaleResponse {
    let msg = QueryMsg::Sale {
        tenant: tenant.to_string(),
        item_id,
    };
    from_json(query(deps, mock_env(), msg).unwrap()).unwrap()
}

pub fn query_latest_price(deps: Deps, tenant: &Addr, item_id: u64) -> Uint128 {
    let msg = QueryMsg::LatestPrice {
        tenant: tenant.to_string(),
        item_id,
    };
    let res: PriceResponse = from_json(query(deps, mock_env(), msg).unwrap()).unwrap();
    res.price
}

pub fn query_next_price(deps: Deps, tenant: &Addr, item_id: u64) -> Uint128 {
    let msg = QueryMsg::NextPrice {
        tenant: tenant.to_string(),
        item_id,
    };
    let res: PriceResponse = from_json(query(deps, mock_env(), msg).unwrap()).unwrap();
    res.price
}

pub fn query_escrow(deps: Deps, tenant: &Addr, item_id: u64) -> Uint128 {
    query_escrow_balance(deps, tenant, item_id).balance
}

pub fn query_held(deps: Deps, tenant: &Addr, item_id: u64) -> Uint128 {
    query_escrow_balance(deps, tenant, item_id).held
}

fn query_escrow_balance(deps: Deps, tenant: &Addr, item_id: u64) -> EscrowBalanceResponse {
    let msg = QueryMsg::EscrowBalance {
        tenant: tenant.to_string(),
        item_id,
    };
    from_json(query(deps, mock_env(), msg).unwrap()).unwrap()
}
