//! Protocol error definitions.

use odra::prelude::*;

/// DSC protocol errors
#[odra::odra_error]
pub enum DscError {
    // Input errors (1xx)
    ZeroAmount = 100,
    CollateralNotPermitted = 101,
    InvalidConstructorArgs = 102,

    // Accounting errors (2xx)
    InsufficientCollateral = 200,
    InsufficientDebt = 201,

    // Solvency errors (3xx)
    HealthFactorTooLow = 300,
    PositionNotLiquidatable = 301,
    LiquidationDidNotImprove = 302,

    // External collaborator errors (4xx)
    CollateralTransferFailed = 400,
    TransferFailed = 401,
    MintFailed = 402,
    StalePrice = 403,
    InvalidPrice = 404,

    // Token errors (5xx)
    InsufficientTokenBalance = 500,
    InsufficientAllowance = 501,
    Unauthorized = 502,
}

impl DscError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Input
            DscError::ZeroAmount => "Amount must be greater than zero",
            DscError::CollateralNotPermitted => "Collateral token is not permitted",
            DscError::InvalidConstructorArgs => "Token and price feed lists are invalid",

            // Accounting
            DscError::InsufficientCollateral => "Insufficient collateral",
            DscError::InsufficientDebt => "Insufficient debt to burn",

            // Solvency
            DscError::HealthFactorTooLow => "Health factor below minimum",
            DscError::PositionNotLiquidatable => "Position is not liquidatable",
            DscError::LiquidationDidNotImprove => "Liquidation did not improve health factor",

            // External collaborators
            DscError::CollateralTransferFailed => "Collateral token transfer failed",
            DscError::TransferFailed => "Token transfer failed",
            DscError::MintFailed => "Debt token mint failed",
            DscError::StalePrice => "Oracle price is stale",
            DscError::InvalidPrice => "Oracle price is zero or negative",

            // Token
            DscError::InsufficientTokenBalance => "Insufficient token balance",
            DscError::InsufficientAllowance => "Insufficient token allowance",
            DscError::Unauthorized => "Unauthorized: caller is not the owner",
        }
    }
}

impl core::fmt::Display for DscError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
