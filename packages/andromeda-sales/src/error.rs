use cosmwasm_std::{ConversionOverflowError, OverflowError, StdError, Uint128};
use cw_utils::{ParseReplyError, PaymentError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    ParseReplyError(#[from] ParseReplyError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("SaleNotStarted")]
    SaleNotStarted {},

    #[error("SaleEnded")]
    SaleEnded {},

    #[error("SaleNotEnded")]
    SaleNotEnded {},

    #[error("WrongPaymentAmount: expected {expected}")]
    WrongPaymentAmount { expected: Uint128 },

    #[error("Overflow")]
    Overflow {},

    #[error("InvalidPurchaseArgs: {msg}")]
    InvalidPurchaseArgs { msg: String },

    #[error("InvalidDistribution: {msg}")]
    InvalidDistribution { msg: String },

    #[error("InsufficientFunds: required {required}, available {available}")]
    InsufficientFunds {
        required: Uint128,
        available: Uint128,
    },

    #[error("WithdrawalInProgress")]
    WithdrawalInProgress {},

    /// The distribution collaborator failed after the escrow was drained. The
    /// error aborts the transaction so the drain is rolled back with it.
    #[error("CollaboratorFailure: {msg}")]
    CollaboratorFailure { msg: String },

    #[error("InvalidReplyId")]
    InvalidReplyId {},

    #[error("Cannot migrate from different contract type: {previous_contract}")]
    CannotMigrate { previous_contract: String },
}

impl From<OverflowError> for ContractError {
    fn from(_err: OverflowError) -> Self {
        ContractError::Overflow {}
    }
}

impl From<ConversionOverflowError> for ContractError {
    fn from(_err: ConversionOverflowError) -> Self {
        ContractError::Overflow {}
    }
}

pub fn from_semver(err: semver::Error) -> StdError {
    StdError::generic_err(format!("Semver: {err}"))
}
