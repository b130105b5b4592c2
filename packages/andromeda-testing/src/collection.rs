//! Mock host collection that sells its items through a curve sale engine.
//!
//! Buyers pay the collection, which asks the engine for the purchase actions and then carries
//! them out: issued items are recorded as holdings and routed payments are sent on. With
//! `hold_with_engine` set the payment is passed to the engine instead, to be withdrawn later.
use andromeda_sales::curve_sale::{
    ActionList, ExecuteMsg as SaleExecuteMsg, PurchaseArgs, SaleAction, SalesConfig,
};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    coin, ensure, from_json, to_json_binary, wasm_execute, Addr, BankMsg, Binary, Coin, Deps,
    DepsMut, Empty, Env, MessageInfo, Reply, Response, StdError, StdResult, SubMsg,
};
use cw_multi_test::{Contract, ContractWrapper, Executor};
use cw_storage_plus::{Item, Map};
use cw_utils::{must_pay, parse_execute_response_data, ParseReplyError};

use crate::{
    mock::MockApp,
    mock_contract,
    mock_contract::{ExecuteResult, MockContract},
};

pub const REPLY_PURCHASE: u64 = 1;

const CONFIG: Item<CollectionInstantiateMsg> = Item::new("config");
const HOLDINGS: Map<(&Addr, u64), u64> = Map::new("holdings");

#[cw_serde]
pub struct CollectionInstantiateMsg {
    pub engine: String,
    pub denom: String,
    pub hold_with_engine: bool,
}

#[cw_serde]
pub enum CollectionExecuteMsg {
    SetSale {
        item_id: u64,
        config: SalesConfig,
    },
    Purchase {
        item_id: u64,
        recipient: Option<String>,
        comment: Option<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum CollectionQueryMsg {
    #[returns(HoldingsResponse)]
    Holdings { owner: String, item_id: u64 },
}

#[cw_serde]
pub struct HoldingsResponse {
    pub amount: u64,
}

fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: CollectionInstantiateMsg,
) -> StdResult<Response> {
    deps.api.addr_validate(&msg.engine)?;
    CONFIG.save(deps.storage, &msg)?;
    Ok(Response::new().add_attribute("method", "instantiate"))
}

fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: CollectionExecuteMsg,
) -> StdResult<Response> {
    let config = CONFIG.load(deps.storage)?;
    match msg {
        CollectionExecuteMsg::SetSale {
            item_id,
            config: sale,
        } => {
            let set_sale = wasm_execute(
                config.engine,
                &SaleExecuteMsg::SetSale {
                    item_id,
                    config: sale,
                },
                vec![],
            )?;
            Ok(Response::new()
                .add_message(set_sale)
                .add_attribute("action", "set_sale"))
        }
        CollectionExecuteMsg::Purchase {
            item_id,
            recipient,
            comment,
        } => {
            let payment_amount = must_pay(&info, &config.denom)
                .map_err(|err| StdError::generic_err(err.to_string()))?;
            let args = PurchaseArgs {
                recipient: recipient.unwrap_or_else(|| info.sender.to_string()),
                comment,
            };
            let funds = if config.hold_with_engine {
                vec![coin(payment_amount.u128(), &config.denom)]
            } else {
                vec![]
            };
            let request = wasm_execute(
                config.engine,
                &SaleExecuteMsg::RequestPurchase {
                    item_id,
                    quantity: 1,
                    payment_amount,
                    args: to_json_binary(&args)?,
                },
                funds,
            )?;
            Ok(Response::new()
                .add_submessage(SubMsg::reply_on_success(request, REPLY_PURCHASE))
                .add_attribute("action", "purchase")
                .add_attribute("buyer", info.sender))
        }
    }
}

fn reply(deps: DepsMut, _env: Env, msg: Reply) -> StdResult<Response> {
    ensure!(
        msg.id == REPLY_PURCHASE,
        StdError::generic_err("Invalid reply id")
    );
    #[allow(deprecated)]
    let reply_data = msg
        .result
        .into_result()
        .map_err(|err| StdError::generic_err(ParseReplyError::SubMsgFailure(err).to_string()))?
        .data
        .ok_or_else(|| {
            StdError::generic_err(
                ParseReplyError::ParseFailure("Missing reply data".to_owned()).to_string(),
            )
        })?;
    let res = parse_execute_response_data(reply_data.as_slice())
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    let data = res
        .data
        .ok_or_else(|| StdError::generic_err("Sale engine returned no actions"))?;
    let ActionList { size, actions } = from_json(&data)?;
    ensure!(
        size as usize == actions.len(),
        StdError::generic_err("Action list size mismatch")
    );

    let denom = CONFIG.load(deps.storage)?.denom;
    let mut resp = Response::new();
    for action in actions {
        match action {
            SaleAction::IssueItem {
                recipient,
                item_id,
                quantity,
            } => {
                let owner = deps.api.addr_validate(&recipient)?;
                HOLDINGS.update(deps.storage, (&owner, item_id), |held| -> StdResult<_> {
                    Ok(held.unwrap_or_default() + quantity)
                })?;
                resp = resp.add_attribute("issued", format!("{item_id}:{recipient}"));
            }
            SaleAction::RoutePayment { recipient, amount } => {
                resp = resp.add_message(BankMsg::Send {
                    to_address: recipient,
                    amount: vec![coin(amount.u128(), &denom)],
                });
            }
        }
    }

    Ok(resp)
}

fn query(deps: Deps, _env: Env, msg: CollectionQueryMsg) -> StdResult<Binary> {
    match msg {
        CollectionQueryMsg::Holdings { owner, item_id } => {
            let owner = deps.api.addr_validate(&owner)?;
            let amount = HOLDINGS
                .may_load(deps.storage, (&owner, item_id))?
                .unwrap_or_default();
            to_json_binary(&HoldingsResponse { amount })
        }
    }
}

pub struct MockCollection(Addr);
mock_contract!(MockCollection, CollectionExecuteMsg, CollectionQueryMsg);

impl MockCollection {
    pub fn instantiate(
        app: &mut MockApp,
        code_id: u64,
        sender: Addr,
        engine: &Addr,
        denom: impl Into<String>,
        hold_with_engine: bool,
    ) -> Self {
        let msg = CollectionInstantiateMsg {
            engine: engine.to_string(),
            denom: denom.into(),
            hold_with_engine,
        };
        let res = app.instantiate_contract(code_id, sender, &msg, &[], "Host Collection", None);

        Self(res.unwrap())
    }

    pub fn execute_set_sale(
        &self,
        app: &mut MockApp,
        sender: Addr,
        item_id: u64,
        config: SalesConfig,
    ) -> ExecuteResult {
        let msg = CollectionExecuteMsg::SetSale { item_id, config };
        self.execute(app, &msg, sender, &[])
    }

    pub fn execute_purchase(
        &self,
        app: &mut MockApp,
        sender: Addr,
        item_id: u64,
        comment: Option<&str>,
        funds: &[Coin],
    ) -> ExecuteResult {
        let msg = CollectionExecuteMsg::Purchase {
            item_id,
            recipient: None,
            comment: comment.map(str::to_string),
        };
        self.execute(app, &msg, sender, funds)
    }

    pub fn query_holdings(&self, app: &MockApp, owner: &Addr, item_id: u64) -> u64 {
        self.query::<HoldingsResponse>(
            app,
            CollectionQueryMsg::Holdings {
                owner: owner.to_string(),
                item_id,
            },
        )
        .amount
    }
}

pub fn mock_collection() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(execute, instantiate, query).with_reply(reply);
    Box::new(contract)
}
