//! Input checks run before a transfer is prepared

use crate::error::{AddressRejection, AmountRejection, SendError};
use crate::types::TokenSendConfig;
use crate::units::to_base_units;

/// Longest hex body of a Starknet address (felt252 rendered with leading zeros)
pub const MAX_ADDRESS_HEX_DIGITS: usize = 64;

/// Plain decimal split into sign, integer digits and fraction digits
struct ParsedDecimal<'a> {
    negative: bool,
    unsigned: &'a str,
    fraction_len: usize,
}

fn parse_decimal(s: &str) -> Option<ParsedDecimal<'_>> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !all_digits(integer) || !all_digits(fraction) {
        return None;
    }

    Some(ParsedDecimal {
        negative,
        unsigned,
        fraction_len: fraction.len(),
    })
}

/// Check a user-entered amount against the token's minimum
///
/// Comparison is exact: both sides are scaled to a common number of
/// fractional digits and compared as integers. There is no upper bound here;
/// balance checks belong to the caller.
pub fn validate_amount(amount_human: &str, config: &TokenSendConfig) -> Result<(), SendError> {
    if amount_human.is_empty() || amount_human == "0" {
        return Err(SendError::InvalidAmount(AmountRejection::Required));
    }

    let amount = parse_decimal(amount_human)
        .ok_or(SendError::InvalidAmount(AmountRejection::NotANumber))?;
    let below_minimum = SendError::InvalidAmount(AmountRejection::BelowMinimum {
        min: config.min_amount.to_string(),
    });

    if amount.negative {
        return Err(below_minimum);
    }

    let min = parse_decimal(config.min_amount)
        .ok_or_else(|| SendError::TransactionFailed(format!("Invalid minimum amount {}", config.min_amount)))?;
    let scale = amount.fraction_len.max(min.fraction_len) as u32;

    let scaled_amount = to_base_units(amount.unsigned, scale)?;
    let scaled_min = to_base_units(min.unsigned, scale)?;

    if scaled_amount < scaled_min {
        return Err(below_minimum);
    }

    Ok(())
}

/// Check a destination address: `0x` followed by 1 to 64 hex digits
///
/// Leading zeros may be omitted. Checksums, field range and deployment are
/// not checked.
pub fn validate_address(address: &str) -> Result<(), SendError> {
    if address.is_empty() {
        return Err(SendError::InvalidAddress(AddressRejection::Required));
    }

    let valid = address
        .strip_prefix("0x")
        .map(|hex| {
            (1..=MAX_ADDRESS_HEX_DIGITS).contains(&hex.len()) && hex.bytes().all(|b| b.is_ascii_hexdigit())
        })
        .unwrap_or(false);

    if !valid {
        return Err(SendError::InvalidAddress(AddressRejection::Malformed));
    }

    Ok(())
}
