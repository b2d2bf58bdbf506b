//! Protocol error definitions.

use odra::prelude::*;

/// DSC protocol errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DscError {
    // Input and configuration errors (1xx)
    ZeroAmount = 100,
    UnsupportedCollateral = 101,
    LengthMismatch = 102,
    DuplicateCollateral = 103,

    // Ledger errors (2xx)
    InsufficientCollateral = 200,
    BurnExceedsDebt = 201,

    // Token errors (3xx)
    TransferFailed = 300,
    MintFailed = 301,
    InsufficientTokenBalance = 302,
    InsufficientAllowance = 303,
    BurnExceedsBalance = 304,
    InvalidRecipient = 305,

    // Health factor errors (4xx)
    HealthFactorBroken = 400,
    HealthFactorOk = 401,
    HealthFactorNotImproved = 402,

    // Oracle errors (5xx)
    StalePrice = 500,
    InvalidPrice = 501,

    // Access control and arithmetic errors (6xx)
    Unauthorized = 600,
    ArithmeticOverflow = 601,
}

impl DscError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Input and configuration
            DscError::ZeroAmount => "Amount must be more than zero",
            DscError::UnsupportedCollateral => "Collateral not supported",
            DscError::LengthMismatch => "Token and price feed lists differ in length",
            DscError::DuplicateCollateral => "Collateral token listed more than once",

            // Ledger
            DscError::InsufficientCollateral => "Insufficient collateral",
            DscError::BurnExceedsDebt => "Burn amount exceeds minted debt",

            // Token
            DscError::TransferFailed => "Token transfer failed",
            DscError::MintFailed => "Stablecoin mint failed",
            DscError::InsufficientTokenBalance => "Insufficient token balance",
            DscError::InsufficientAllowance => "Insufficient token allowance",
            DscError::BurnExceedsBalance => "Burn amount exceeds balance",
            DscError::InvalidRecipient => "Recipient is the zero address",

            // Health factor
            DscError::HealthFactorBroken => "Health factor below minimum",
            DscError::HealthFactorOk => "Health factor is ok, position not liquidatable",
            DscError::HealthFactorNotImproved => "Liquidation did not improve health factor",

            // Oracle
            DscError::StalePrice => "Oracle price stale",
            DscError::InvalidPrice => "Oracle price is zero",

            // Access control and arithmetic
            DscError::Unauthorized => "Unauthorized: caller is not owner",
            DscError::ArithmeticOverflow => "Arithmetic overflow",
        }
    }
}

impl core::fmt::Display for DscError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<DscError> for OdraError {
    fn from(error: DscError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
