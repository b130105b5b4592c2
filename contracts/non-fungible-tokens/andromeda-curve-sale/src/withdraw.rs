use andromeda_sales::{
    context::ExecuteContext,
    curve_sale::WithdrawResponse,
    distribution::{DistributionExecuteMsg, DistributionSpec, DistributionTargetResponse},
    error::ContractError,
};
use cosmwasm_std::{
    coin, ensure, from_json, to_json_binary, wasm_execute, BankMsg, DepsMut, Event, Reply,
    Response, SubMsg, SubMsgResponse, SubMsgResult,
};
use cw_utils::{nonpayable, parse_execute_response_data, MsgExecuteContractResponse};

use crate::state::{load_record, PendingWithdrawal, CONFIG, PENDING_WITHDRAWAL, SALES};

pub const REPLY_CREATE_DISTRIBUTION_TARGET: u64 = 1;

/// Attribute a distribution factory may emit instead of response data.
pub const DISTRIBUTION_TARGET_ATTRIBUTE: &str = "distribution_target";

pub(crate) fn execute_withdraw_funds(
    ctx: ExecuteContext,
    tenant: String,
    item_id: u64,
    distribution: DistributionSpec,
) -> Result<Response, ContractError> {
    let ExecuteContext {
        deps, info, env, ..
    } = ctx;
    nonpayable(&info)?;

    let tenant = deps.api.addr_validate(&tenant)?;
    let mut record = load_record(deps.storage, &tenant, item_id)?;

    ensure!(
        record.config.funds_recipient.as_deref() == Some(info.sender.as_str()),
        ContractError::Unauthorized {}
    );
    ensure!(
        env.block.time.seconds() >= record.config.sale_end,
        ContractError::SaleNotEnded {}
    );
    ensure!(
        !PENDING_WITHDRAWAL.exists(deps.storage),
        ContractError::WithdrawalInProgress {}
    );
    distribution.validate(deps.api)?;

    let config = CONFIG.load(deps.storage)?;
    let available = deps
        .querier
        .query_balance(&env.contract.address, &config.denom)?
        .amount;
    ensure!(
        available >= record.held,
        ContractError::InsufficientFunds {
            required: record.held,
            available,
        }
    );

    // The ledger is zeroed before the factory gets control. Only funds paid in for this
    // record are forwarded, never the rest of the contract balance.
    let (escrow, amount) = record.drain_escrow();
    SALES.save(deps.storage, (&tenant, item_id), &record)?;
    PENDING_WITHDRAWAL.save(
        deps.storage,
        &PendingWithdrawal {
            tenant: tenant.clone(),
            item_id,
            recipient: info.sender.clone(),
            amount,
            recipients: distribution.recipients.clone(),
        },
    )?;

    let create_msg = wasm_execute(
        config.distribution_factory,
        &DistributionExecuteMsg::CreateDistributionTarget {
            recipients: distribution.recipients,
        },
        vec![],
    )?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(
            create_msg,
            REPLY_CREATE_DISTRIBUTION_TARGET,
        ))
        .add_attribute("action", "withdraw_funds")
        .add_attribute("tenant", tenant)
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("escrow", escrow)
        .add_attribute("amount", amount))
}

/// Forwards the drained amount to the freshly created target and asks the factory to pay it out.
///
/// A failed sub-message is returned as an error so the whole withdrawal, drain included, is
/// reverted.
pub(crate) fn on_distribution_target_reply(
    deps: DepsMut,
    msg: Reply,
) -> Result<Response, ContractError> {
    let PendingWithdrawal {
        tenant,
        item_id,
        recipient,
        amount,
        recipients,
    } = PENDING_WITHDRAWAL.load(deps.storage)?;
    PENDING_WITHDRAWAL.remove(deps.storage);

    let response = match msg.result {
        SubMsgResult::Ok(response) => response,
        SubMsgResult::Err(err) => return Err(ContractError::CollaboratorFailure { msg: err }),
    };
    let target = deps.api.addr_validate(&distribution_target(response)?)?;
    let config = CONFIG.load(deps.storage)?;

    let mut resp = Response::new();
    if !amount.is_zero() {
        resp = resp.add_message(BankMsg::Send {
            to_address: target.to_string(),
            amount: vec![coin(amount.u128(), &config.denom)],
        });
    }
    resp = resp.add_message(wasm_execute(
        config.distribution_factory,
        &DistributionExecuteMsg::Distribute {
            target: target.to_string(),
            recipients,
            amount: coin(amount.u128(), &config.denom),
        },
        vec![],
    )?);

    Ok(resp
        .set_data(to_json_binary(&WithdrawResponse {
            target: target.to_string(),
        })?)
        .add_event(
            Event::new("funds_withdrawn")
                .add_attribute("recipient", recipient)
                .add_attribute("tenant", tenant)
                .add_attribute("item_id", item_id.to_string())
                .add_attribute("amount", amount)
                .add_attribute("target", target),
        ))
}

/// Reads the target address from the factory's execute response data, falling back to the
/// `distribution_target` attribute of its wasm events.
#[allow(deprecated)]
fn distribution_target(response: SubMsgResponse) -> Result<String, ContractError> {
    if let Some(data) = response.data {
        let MsgExecuteContractResponse { data } = parse_execute_response_data(&data)?;
        if let Some(data) = data {
            let DistributionTargetResponse { target } = from_json(&data)?;
            return Ok(target);
        }
    }

    response
        .events
        .iter()
        .filter(|event| event.ty == "wasm")
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == DISTRIBUTION_TARGET_ATTRIBUTE)
        .map(|attr| attr.value.clone())
        .ok_or(ContractError::CollaboratorFailure {
            msg: "Distribution factory did not report a target".to_string(),
        })
}
