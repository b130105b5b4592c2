use andromeda_sales::{
    context::ExecuteContext,
    curve_sale::{
        CapabilitiesResponse, Capability, Config, EscrowBalanceResponse, ExecuteMsg,
        InstantiateMsg, MigrateMsg, PriceResponse, QueryMsg, SaleResponse, SalesConfig,
    },
    error::{from_semver, ContractError},
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response,
};
use cw2::{get_contract_version, set_contract_version};
use cw_utils::nonpayable;
use semver::Version;

use crate::{
    price::next_price,
    purchase::execute_request_purchase,
    state::{load_record, store_config, CONFIG},
    withdraw::{
        execute_withdraw_funds, on_distribution_target_reply, REPLY_CREATE_DISTRIBUTION_TARGET,
    },
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:andromeda-curve-sale";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    let distribution_factory = deps.api.addr_validate(&msg.distribution_factory)?;
    CONFIG.save(
        deps.storage,
        &Config {
            owner: owner.clone(),
            distribution_factory: distribution_factory.clone(),
            denom: msg.denom.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("type", "curve-sale")
        .add_attribute("owner", owner)
        .add_attribute("distribution_factory", distribution_factory)
        .add_attribute("denom", msg.denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let ctx = ExecuteContext::new(deps, info, env);

    match msg {
        ExecuteMsg::SetSale { item_id, config } => execute_set_sale(ctx, item_id, config),
        ExecuteMsg::ResetSale { item_id } => execute_reset_sale(ctx, item_id),
        ExecuteMsg::RequestPurchase {
            item_id,
            quantity: _,
            payment_amount,
            args,
        } => execute_request_purchase(ctx, item_id, payment_amount, args),
        ExecuteMsg::WithdrawFunds {
            tenant,
            item_id,
            distribution,
        } => execute_withdraw_funds(ctx, tenant, item_id, distribution),
        ExecuteMsg::UpdateDistributionFactory { address } => {
            execute_update_distribution_factory(ctx, address)
        }
    }
}

fn execute_set_sale(
    ctx: ExecuteContext,
    item_id: u64,
    config: SalesConfig,
) -> Result<Response, ContractError> {
    let ExecuteContext { deps, info, .. } = ctx;
    nonpayable(&info)?;

    let funds_recipient = match config.funds_recipient.as_deref() {
        None | Some("") => None,
        Some(recipient) => Some(deps.api.addr_validate(recipient)?.to_string()),
    };
    let config = SalesConfig {
        funds_recipient,
        ..config
    };
    store_config(deps.storage, &info.sender, item_id, config.clone())?;

    Ok(Response::new()
        .add_attribute("action", "set_sale")
        .add_event(sale_set_event(&info.sender.to_string(), item_id, &config)))
}

fn execute_reset_sale(ctx: ExecuteContext, item_id: u64) -> Result<Response, ContractError> {
    let ExecuteContext { deps, info, .. } = ctx;
    nonpayable(&info)?;

    let config = SalesConfig::default();
    store_config(deps.storage, &info.sender, item_id, config.clone())?;

    Ok(Response::new()
        .add_attribute("action", "reset_sale")
        .add_event(sale_set_event(&info.sender.to_string(), item_id, &config)))
}

fn sale_set_event(tenant: &str, item_id: u64, config: &SalesConfig) -> Event {
    Event::new("sale_set")
        .add_attribute("tenant", tenant)
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("sale_start", config.sale_start.to_string())
        .add_attribute("sale_end", config.sale_end.to_string())
        .add_attribute("base_price_per_item", config.base_price_per_item)
        .add_attribute("scaling_factor", config.scaling_factor.to_string())
        .add_attribute(
            "funds_recipient",
            config.funds_recipient.clone().unwrap_or_default(),
        )
}

fn execute_update_distribution_factory(
    ctx: ExecuteContext,
    address: String,
) -> Result<Response, ContractError> {
    let ExecuteContext { deps, info, .. } = ctx;
    nonpayable(&info)?;

    let mut config = CONFIG.load(deps.storage)?;
    ensure!(info.sender == config.owner, ContractError::Unauthorized {});

    config.distribution_factory = deps.api.addr_validate(&address)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_distribution_factory")
        .add_attribute("distribution_factory", address))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        REPLY_CREATE_DISTRIBUTION_TARGET => on_distribution_target_reply(deps, msg),
        _ => Err(ContractError::InvalidReplyId {}),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Sale { tenant, item_id } => {
            Ok(to_json_binary(&query_sale(deps, tenant, item_id)?)?)
        }
        QueryMsg::LatestPrice { tenant, item_id } => {
            Ok(to_json_binary(&query_latest_price(deps, tenant, item_id)?)?)
        }
        QueryMsg::NextPrice { tenant, item_id } => {
            Ok(to_json_binary(&query_next_price(deps, tenant, item_id)?)?)
        }
        QueryMsg::EscrowBalance { tenant, item_id } => {
            Ok(to_json_binary(&query_escrow_balance(deps, tenant, item_id)?)?)
        }
        QueryMsg::Config {} => Ok(to_json_binary(&CONFIG.load(deps.storage)?)?),
        QueryMsg::Capabilities {} => Ok(to_json_binary(&query_capabilities())?),
    }
}

fn query_sale(deps: Deps, tenant: String, item_id: u64) -> Result<SaleResponse, ContractError> {
    let tenant = deps.api.addr_validate(&tenant)?;
    let record = load_record(deps.storage, &tenant, item_id)?;
    Ok(SaleResponse {
        config: record.config,
    })
}

fn query_latest_price(
    deps: Deps,
    tenant: String,
    item_id: u64,
) -> Result<PriceResponse, ContractError> {
    let tenant = deps.api.addr_validate(&tenant)?;
    let record = load_record(deps.storage, &tenant, item_id)?;
    Ok(PriceResponse {
        price: record.price,
    })
}

fn query_next_price(
    deps: Deps,
    tenant: String,
    item_id: u64,
) -> Result<PriceResponse, ContractError> {
    let tenant = deps.api.addr_validate(&tenant)?;
    let record = load_record(deps.storage, &tenant, item_id)?;
    let price = next_price(
        record.price,
        record.config.base_price_per_item,
        record.config.scaling_factor,
    )?;
    Ok(PriceResponse { price })
}

fn query_escrow_balance(
    deps: Deps,
    tenant: String,
    item_id: u64,
) -> Result<EscrowBalanceResponse, ContractError> {
    let tenant = deps.api.addr_validate(&tenant)?;
    let record = load_record(deps.storage, &tenant, item_id)?;
    Ok(EscrowBalanceResponse {
        balance: record.escrow,
        held: record.held,
    })
}

/// Operations a consumer of this contract may rely on. There is no per-address purchase cap.
pub fn query_capabilities() -> CapabilitiesResponse {
    CapabilitiesResponse {
        capabilities: vec![
            Capability::SaleRegistry,
            Capability::PricedPurchase,
            Capability::EscrowWithdrawal,
        ],
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    // New version
    let version: Version = CONTRACT_VERSION.parse().map_err(from_semver)?;

    // Old version
    let stored = get_contract_version(deps.storage)?;
    let storage_version: Version = stored.version.parse().map_err(from_semver)?;

    ensure!(
        stored.contract == CONTRACT_NAME,
        ContractError::CannotMigrate {
            previous_contract: stored.contract,
        }
    );

    // New version has to be newer/greater than the old version
    ensure!(
        storage_version < version,
        ContractError::CannotMigrate {
            previous_contract: stored.version,
        }
    );

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::default())
}
