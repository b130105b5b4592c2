use andromeda_sales::{curve_sale::SCALING_DENOMINATOR, error::ContractError};
use cosmwasm_std::{Uint128, Uint256};

/// Price required by the purchase that follows a purchase at `current_price`:
/// `floor(current_price * scaling_factor / 100) + base_price_per_item`.
///
/// The product is taken in 256 bits; a result that does not fit in `Uint128` is an overflow.
pub fn next_price(
    current_price: Uint128,
    base_price_per_item: Uint128,
    scaling_factor: u64,
) -> Result<Uint128, ContractError> {
    let scaled = Uint256::from(current_price)
        .checked_mul(Uint256::from(scaling_factor))?
        .checked_div(Uint256::from(SCALING_DENOMINATOR))
        .map_err(|_| ContractError::Overflow {})?;
    let scaled = Uint128::try_from(scaled)?;

    Ok(scaled.checked_add(base_price_per_item)?)
}
