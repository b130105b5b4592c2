use andromeda_sales::curve_sale::{ActionList, SaleAction};
use cosmwasm_std::Uint128;

/// Builds the actions a host executes after a successful purchase.
///
/// The item is always issued first. The payment route follows only when a funds recipient is
/// configured, and the list is sized for exactly that shape before it is filled.
pub fn compile(
    recipient: &str,
    item_id: u64,
    funds_recipient: Option<&str>,
    payment_amount: Uint128,
) -> ActionList {
    let size: u32 = if funds_recipient.is_some() { 2 } else { 1 };
    let mut actions = Vec::with_capacity(size as usize);

    actions.push(SaleAction::IssueItem {
        recipient: recipient.to_string(),
        item_id,
        quantity: 1,
    });
    if let Some(funds_recipient) = funds_recipient {
        actions.push(SaleAction::RoutePayment {
            recipient: funds_recipient.to_string(),
            amount: payment_amount,
        });
    }

    debug_assert_eq!(actions.len(), size as usize);
    ActionList { size, actions }
}
