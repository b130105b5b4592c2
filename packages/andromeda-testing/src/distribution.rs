//! Mock distribution factory and the targets it creates.
//!
//! A target is a contract holding forwarded funds until the factory tells it to pay out.
use andromeda_sales::distribution::{
    Allocation, DistributionExecuteMsg, DistributionTargetResponse,
};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    coin, ensure, to_json_binary, wasm_execute, Addr, BankMsg, Binary, Deps, DepsMut, Empty, Env,
    MessageInfo, Reply, Response, StdError, StdResult, SubMsg, WasmMsg,
};
use cw_multi_test::{Contract, ContractWrapper, Executor};
use cw_storage_plus::Item;
use cw_utils::{parse_instantiate_response_data, ParseReplyError};

use crate::{mock::MockApp, mock_contract, MockContract};

pub const REPLY_INSTANTIATE_TARGET: u64 = 1;

const FACTORY_CONFIG: Item<FactoryInstantiateMsg> = Item::new("factory_config");
const TARGETS: Item<Vec<Addr>> = Item::new("targets");
const TARGET_FACTORY: Item<Addr> = Item::new("target_factory");

#[cw_serde]
pub struct FactoryInstantiateMsg {
    pub target_code_id: u64,
    /// Makes every `CreateDistributionTarget` fail.
    pub reject_targets: bool,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum FactoryQueryMsg {
    #[returns(TargetsResponse)]
    Targets {},
}

#[cw_serde]
pub struct TargetsResponse {
    pub targets: Vec<Addr>,
}

#[cw_serde]
pub struct TargetInstantiateMsg {}

#[cw_serde]
pub enum TargetExecuteMsg {
    Payout {
        recipients: Vec<Allocation>,
        denom: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum TargetQueryMsg {
    #[returns(Addr)]
    Factory {},
}

fn factory_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: FactoryInstantiateMsg,
) -> StdResult<Response> {
    FACTORY_CONFIG.save(deps.storage, &msg)?;
    TARGETS.save(deps.storage, &vec![])?;
    Ok(Response::new().add_attribute("method", "instantiate"))
}

fn factory_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: DistributionExecuteMsg,
) -> StdResult<Response> {
    let config = FACTORY_CONFIG.load(deps.storage)?;
    match msg {
        DistributionExecuteMsg::CreateDistributionTarget { recipients } => {
            ensure!(
                !config.reject_targets,
                StdError::generic_err("Distribution target creation rejected")
            );
            ensure!(
                !recipients.is_empty(),
                StdError::generic_err("No recipients")
            );
            let instantiate = WasmMsg::Instantiate {
                admin: None,
                code_id: config.target_code_id,
                msg: to_json_binary(&TargetInstantiateMsg {})?,
                funds: vec![],
                label: "distribution-target".to_string(),
            };
            Ok(Response::new()
                .add_submessage(SubMsg::reply_on_success(
                    instantiate,
                    REPLY_INSTANTIATE_TARGET,
                ))
                .add_attribute("action", "create_distribution_target"))
        }
        DistributionExecuteMsg::Distribute {
            target,
            recipients,
            amount,
        } => {
            let target = deps.api.addr_validate(&target)?;
            let targets = TARGETS.load(deps.storage)?;
            ensure!(
                targets.contains(&target),
                StdError::generic_err("Unknown distribution target")
            );
            let payout = wasm_execute(
                target.clone(),
                &TargetExecuteMsg::Payout {
                    recipients,
                    denom: amount.denom,
                },
                vec![],
            )?;
            Ok(Response::new()
                .add_message(payout)
                .add_attribute("action", "distribute")
                .add_attribute("target", target)
                .add_attribute("amount", amount.amount))
        }
    }
}

fn factory_reply(deps: DepsMut, _env: Env, msg: Reply) -> StdResult<Response> {
    ensure!(
        msg.id == REPLY_INSTANTIATE_TARGET,
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
    let res = parse_instantiate_response_data(reply_data.as_slice())
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    let target = deps.api.addr_validate(&res.contract_address)?;
    TARGETS.update(deps.storage, |mut targets| -> StdResult<_> {
        targets.push(target.clone());
        Ok(targets)
    })?;

    Ok(Response::new()
        .set_data(to_json_binary(&DistributionTargetResponse {
            target: target.to_string(),
        })?)
        .add_attribute("distribution_target", target))
}

fn factory_query(deps: Deps, _env: Env, msg: FactoryQueryMsg) -> StdResult<Binary> {
    match msg {
        FactoryQueryMsg::Targets {} => to_json_binary(&TargetsResponse {
            targets: TARGETS.load(deps.storage)?,
        }),
    }
}

fn target_instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: TargetInstantiateMsg,
) -> StdResult<Response> {
    TARGET_FACTORY.save(deps.storage, &info.sender)?;
    Ok(Response::new().add_attribute("method", "instantiate"))
}

fn target_execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: TargetExecuteMsg,
) -> StdResult<Response> {
    match msg {
        TargetExecuteMsg::Payout { recipients, denom } => {
            ensure!(
                info.sender == TARGET_FACTORY.load(deps.storage)?,
                StdError::generic_err("Unauthorized")
            );
            let balance = deps
                .querier
                .query_balance(&env.contract.address, &denom)?
                .amount;

            let mut resp = Response::new().add_attribute("action", "payout");
            for Allocation { address, percent } in recipients {
                let share = balance.multiply_ratio(percent, 100u128);
                if share.is_zero() {
                    continue;
                }
                resp = resp.add_message(BankMsg::Send {
                    to_address: address,
                    amount: vec![coin(share.u128(), &denom)],
                });
            }
            Ok(resp)
        }
    }
}

fn target_query(deps: Deps, _env: Env, msg: TargetQueryMsg) -> StdResult<Binary> {
    match msg {
        TargetQueryMsg::Factory {} => to_json_binary(&TARGET_FACTORY.load(deps.storage)?),
    }
}

pub struct MockDistributionFactory(Addr);
mock_contract!(
    MockDistributionFactory,
    DistributionExecuteMsg,
    FactoryQueryMsg
);

impl MockDistributionFactory {
    pub fn instantiate(
        app: &mut MockApp,
        code_id: u64,
        sender: Addr,
        target_code_id: u64,
        reject_targets: bool,
    ) -> Self {
        let msg = FactoryInstantiateMsg {
            target_code_id,
            reject_targets,
        };
        let res =
            app.instantiate_contract(code_id, sender, &msg, &[], "Distribution Factory", None);

        Self(res.unwrap())
    }

    pub fn query_targets(&self, app: &MockApp) -> Vec<Addr> {
        self.query::<TargetsResponse>(app, FactoryQueryMsg::Targets {})
            .targets
    }
}

pub fn mock_distribution_factory() -> Box<dyn Contract<Empty>> {
    let contract =
        ContractWrapper::new_with_empty(factory_execute, factory_instantiate, factory_query)
            .with_reply(factory_reply);
    Box::new(contract)
}

pub fn mock_distribution_target() -> Box<dyn Contract<Empty>> {
    let contract =
        ContractWrapper::new_with_empty(target_execute, target_instantiate, target_query);
    Box::new(contract)
}
