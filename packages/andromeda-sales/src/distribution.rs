use std::collections::HashSet;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{ensure, Api, Coin};

use crate::error::ContractError;

/// Upper bound on payees in one distribution.
pub const MAX_PAYEES: usize = 100;

#[cw_serde]
pub struct Allocation {
    pub address: String,
    /// Whole percent of the withdrawn amount.
    pub percent: u64,
}

impl Allocation {
    pub fn new(address: impl Into<String>, percent: u64) -> Self {
        Self {
            address: address.into(),
            percent,
        }
    }
}

#[cw_serde]
pub struct DistributionSpec {
    pub recipients: Vec<Allocation>,
}

impl DistributionSpec {
    /// Ensures that the allocation table can be paid out in full:
    ///
    /// * Must include at least one payee
    /// * The number of payees must not exceed `MAX_PAYEES`
    /// * Payee addresses must be valid and unique
    /// * Percentages must sum to exactly 100
    pub fn validate(&self, api: &dyn Api) -> Result<(), ContractError> {
        ensure!(
            !self.recipients.is_empty(),
            ContractError::InvalidDistribution {
                msg: "At least one payee is required".to_string()
            }
        );
        ensure!(
            self.recipients.len() <= MAX_PAYEES,
            ContractError::InvalidDistribution {
                msg: format!("At most {MAX_PAYEES} payees are allowed")
            }
        );

        let mut seen = HashSet::new();
        let mut percent_sum: u64 = 0;
        for allocation in &self.recipients {
            let addr = api.addr_validate(&allocation.address)?;
            ensure!(
                seen.insert(addr),
                ContractError::InvalidDistribution {
                    msg: format!("Duplicate payee {}", allocation.address)
                }
            );
            percent_sum = percent_sum
                .checked_add(allocation.percent)
                .ok_or(ContractError::Overflow {})?;
        }

        ensure!(
            percent_sum == 100,
            ContractError::InvalidDistribution {
                msg: format!("Allocations must sum to 100, got {percent_sum}")
            }
        );
        Ok(())
    }
}

/// Messages the curve sale sends to its distribution factory.
#[cw_serde]
pub enum DistributionExecuteMsg {
    /// Creates a new payee-split target. Responds with `DistributionTargetResponse` as data.
    CreateDistributionTarget { recipients: Vec<Allocation> },
    /// Pays `amount`, already held by `target`, out to `recipients` in proportion to their percent.
    Distribute {
        target: String,
        recipients: Vec<Allocation>,
        amount: Coin,
    },
}

#[cw_serde]
pub struct DistributionTargetResponse {
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;

    #[test]
    fn test_validate_valid() {
        let api = MockApi::default();
        let spec = DistributionSpec {
            recipients: vec![
                Allocation::new(api.addr_make("alice"), 60),
                Allocation::new(api.addr_make("bob"), 40),
            ],
        };
        assert!(spec.validate(&api).is_ok());
    }

    #[test]
    fn test_validate_empty() {
        let api = MockApi::default();
        let spec = DistributionSpec { recipients: vec![] };
        assert!(matches!(
            spec.validate(&api).unwrap_err(),
            ContractError::InvalidDistribution { .. }
        ));
    }

    #[test]
    fn test_validate_duplicate() {
        let api = MockApi::default();
        let alice = api.addr_make("alice");
        let spec = DistributionSpec {
            recipients: vec![Allocation::new(&alice, 50), Allocation::new(&alice, 50)],
        };
        assert!(matches!(
            spec.validate(&api).unwrap_err(),
            ContractError::InvalidDistribution { .. }
        ));
    }

    #[test]
    fn test_validate_percent_sum() {
        let api = MockApi::default();
        let spec = DistributionSpec {
            recipients: vec![
                Allocation::new(api.addr_make("alice"), 60),
                Allocation::new(api.addr_make("bob"), 30),
            ],
        };
        assert_eq!(
            spec.validate(&api).unwrap_err(),
            ContractError::InvalidDistribution {
                msg: "Allocations must sum to 100, got 90".to_string()
            }
        );
    }
}
