//! Pure conversion between human-readable token amounts and raw base units.
//!
//! Mint, account, and supply amounts on chain are integers already scaled by
//! the mint's decimal precision: minting "100 tokens" on a 9-decimal mint
//! means submitting `100 * 10^9` base units. Callers that skip this step end
//! up off by nine orders of magnitude, so the conversion lives here behind
//! checked math instead of being repeated at call sites.
//!
//! All math uses `rust_decimal::Decimal` for exact integer arithmetic.
//! No async, no network calls.

use std::fmt;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Errors that can occur while scaling a token amount.
#[derive(Debug, Clone)]
pub enum ScalingError {
    NonPositiveAmount(String),
    Overflow { context: String },
    ZeroAmount,
    FractionalBaseUnits { value: String },
    InvalidDecimal { input: String, reason: String },
}

impl fmt::Display for ScalingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingError::NonPositiveAmount(v) => {
                write!(f, "Amount must be positive, got {}", v)
            }
            ScalingError::Overflow { context } => write!(f, "Overflow: {}", context),
            ScalingError::ZeroAmount => write!(f, "Computed amount is zero"),
            ScalingError::FractionalBaseUnits { value } => {
                write!(f, "Fractional base units not allowed: {}", value)
            }
            ScalingError::InvalidDecimal { input, reason } => {
                write!(f, "Invalid decimal '{}': {}", input, reason)
            }
        }
    }
}

impl std::error::Error for ScalingError {}

/// Convert a human-readable token amount into raw u64 base units.
///
/// # Conversion math
///
/// ```text
/// base_units = amount * 10^decimals
/// ```
pub fn scale_token_amount(amount: Decimal, decimals: u8) -> Result<u64, ScalingError> {
    // 1. Validate input
    if amount <= Decimal::ZERO {
        return Err(ScalingError::NonPositiveAmount(amount.to_string()));
    }

    // 2. Compute base units
    let multiplier = Decimal::from(10u64.checked_pow(decimals as u32).ok_or_else(|| {
        ScalingError::Overflow {
            context: format!("10^{} overflow", decimals),
        }
    })?);

    let base_units = amount
        .checked_mul(multiplier)
        .ok_or_else(|| ScalingError::Overflow {
            context: "amount * 10^decimals".to_string(),
        })?;

    // 3. Validate whole number (no fractional base units)
    if base_units.fract() != Decimal::ZERO {
        return Err(ScalingError::FractionalBaseUnits {
            value: format!("base_units = {}", base_units),
        });
    }

    // 4. Convert to u64
    let base_u64 = base_units.to_u64().ok_or_else(|| ScalingError::Overflow {
        context: format!("base_units {} does not fit in u64", base_units),
    })?;

    // 5. Validate non-zero
    if base_u64 == 0 {
        return Err(ScalingError::ZeroAmount);
    }

    Ok(base_u64)
}

/// Parse a decimal string and scale it to base units.
pub fn scale_token_amount_str(amount: &str, decimals: u8) -> Result<u64, ScalingError> {
    let parsed = Decimal::from_str(amount).map_err(|e| ScalingError::InvalidDecimal {
        input: amount.to_string(),
        reason: e.to_string(),
    })?;
    scale_token_amount(parsed, decimals)
}

/// Render raw base units as a human-readable token amount, for log output.
pub fn format_token_amount(base_units: u64, decimals: u8) -> Decimal {
    let mut value = Decimal::from(base_units);
    if value.set_scale(decimals as u32).is_err() {
        return value;
    }
    value.normalize()
}
