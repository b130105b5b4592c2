use andromeda_sales::{
    context::ExecuteContext,
    curve_sale::PurchaseArgs,
    error::ContractError,
};
use cosmwasm_std::{ensure, from_json, to_json_binary, Binary, Event, Response, Uint128};
use cw_utils::may_pay;

use crate::{
    commands::compile,
    price::next_price,
    state::{load_record, CONFIG, SALES},
};

pub(crate) fn execute_request_purchase(
    ctx: ExecuteContext,
    item_id: u64,
    payment_amount: Uint128,
    args: Binary,
) -> Result<Response, ContractError> {
    let ExecuteContext {
        deps, info, env, ..
    } = ctx;
    let denom = CONFIG.load(deps.storage)?.denom;
    let attached = may_pay(&info, &denom)?;

    let tenant = info.sender;
    let PurchaseArgs { recipient, comment } =
        from_json(&args).map_err(|err| ContractError::InvalidPurchaseArgs {
            msg: err.to_string(),
        })?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let mut record = load_record(deps.storage, &tenant, item_id)?;
    let now = env.block.time.seconds();

    // An unconfigured item has a zero end, so it can never be bought
    ensure!(now <= record.config.sale_end, ContractError::SaleEnded {});
    ensure!(
        now >= record.config.sale_start,
        ContractError::SaleNotStarted {}
    );

    let price = next_price(
        record.price,
        record.config.base_price_per_item,
        record.config.scaling_factor,
    )?;
    ensure!(
        payment_amount == price,
        ContractError::WrongPaymentAmount { expected: price }
    );

    // Attached funds must be the whole payment. The engine then holds it until withdrawal,
    // otherwise the host keeps it and may be told to route it.
    let held = !attached.is_zero();
    ensure!(
        !held || attached == payment_amount,
        ContractError::WrongPaymentAmount { expected: price }
    );
    let route_to = if held {
        None
    } else {
        record.config.funds_recipient.as_deref()
    };
    let actions = compile(recipient.as_str(), item_id, route_to, payment_amount);

    record.price = price;
    // Credited in full even when the same payment is routed out by `actions`
    record.credit_escrow(payment_amount)?;
    if held {
        record.credit_held(payment_amount)?;
    }
    SALES.save(deps.storage, (&tenant, item_id), &record)?;

    let mut resp = Response::new()
        .set_data(to_json_binary(&actions)?)
        .add_attribute("action", "request_purchase")
        .add_attribute("tenant", tenant.as_str())
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("recipient", recipient.as_str())
        .add_attribute("price", price)
        .add_attribute("held", held.to_string());

    if let Some(comment) = comment.filter(|comment| !comment.is_empty()) {
        resp = resp.add_event(
            Event::new("purchase_commented")
                .add_attribute("recipient", recipient)
                .add_attribute("tenant", tenant)
                .add_attribute("item_id", item_id.to_string())
                .add_attribute("quantity", "1")
                .add_attribute("comment", comment),
        );
    }

    Ok(resp)
}
