//! Exact conversion of human-readable token amounts into on-chain integers
//!
//! Amounts never touch floating point on their way into calldata. A decimal
//! string is scaled to base units as a `BigUint`, then split into the two
//! 128-bit limbs that Cairo uses to represent a `u256`.

use num_bigint::BigUint;

use crate::error::{Result, WalletError};

/// Convert a decimal string into base units (`amount * 10^decimals`)
///
/// Fractional digits beyond `decimals` are truncated, not rounded:
/// `to_base_units("1.2345678", 6) == 1234567`.
pub fn to_base_units(amount_human: &str, decimals: u32) -> Result<BigUint> {
    let (integer, fraction) = amount_human.split_once('.').unwrap_or((amount_human, ""));

    let decimals = decimals as usize;
    let mut frac: String = fraction.chars().take(decimals).collect();
    while frac.len() < decimals {
        frac.push('0');
    }

    let combined = format!("{}{}", integer, frac);
    let digits = combined.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WalletError::InvalidDecimal(amount_human.to_string()));
    }

    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| WalletError::InvalidDecimal(amount_human.to_string()))
}

/// Cairo `u256` as `(low, high)` 128-bit limbs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct U256Limbs {
    pub low: BigUint,
    pub high: BigUint,
}

impl U256Limbs {
    pub fn low_hex(&self) -> String {
        to_hex(&self.low)
    }

    pub fn high_hex(&self) -> String {
        to_hex(&self.high)
    }

    /// Recombine into the original integer (`high * 2^128 + low`)
    pub fn value(&self) -> BigUint {
        (&self.high << 128u32) + &self.low
    }
}

/// Split an integer into `u256` limbs
///
/// Values of 2^256 or more still split (high grows past 128 bits); keeping
/// amounts inside u256 is the caller's responsibility.
pub fn to_limbs(amount: &BigUint) -> U256Limbs {
    let mask = BigUint::from(u128::MAX);
    U256Limbs {
        low: amount & &mask,
        high: amount >> 128u32,
    }
}

/// Lower-case `0x` hex without padding; zero renders as `0x0`
pub fn to_hex(value: &BigUint) -> String {
    format!("0x{:x}", value)
}

/// Validated transfer ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransfer {
    pub amount_base_units: BigUint,
    pub amount_limbs: U256Limbs,
    /// `[recipient, amount_low, amount_high]`
    pub calldata: Vec<String>,
}

/// Build the ERC20 `transfer` calldata for an already validated request
pub fn prepare_transfer(to_address: &str, amount_human: &str, decimals: u32) -> Result<PreparedTransfer> {
    let amount_base_units = to_base_units(amount_human, decimals)?;
    let amount_limbs = to_limbs(&amount_base_units);
    let calldata = vec![
        to_address.to_string(),
        amount_limbs.low_hex(),
        amount_limbs.high_hex(),
    ];

    tracing::debug!(
        "Prepared transfer - amount: {} -> {} base units (low={}, high={})",
        amount_human,
        amount_base_units,
        calldata[1],
        calldata[2]
    );

    Ok(PreparedTransfer {
        amount_base_units,
        amount_limbs,
        calldata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 10).unwrap()
    }

    #[test]
    fn test_whole_and_fractional_amounts() {
        assert_eq!(to_base_units("0", 6).unwrap(), big("0"));
        assert_eq!(to_base_units("1", 6).unwrap(), big("1000000"));
        assert_eq!(to_base_units("25.5", 6).unwrap(), big("25500000"));
        assert_eq!(to_base_units("0.001", 18).unwrap(), big("1000000000000000"));
        assert_eq!(to_base_units(".5", 6).unwrap(), big("500000"));
        assert_eq!(to_base_units("7.", 2).unwrap(), big("700"));
    }

    #[test]
    fn test_trailing_zeros_are_idempotent() {
        assert_eq!(to_base_units("1.000000", 6).unwrap(), to_base_units("1", 6).unwrap());
        assert_eq!(to_base_units("1", 6).unwrap(), big("1000000"));
    }

    #[test]
    fn test_excess_fraction_is_truncated() {
        assert_eq!(to_base_units("1.2345678", 6).unwrap(), big("1234567"));
        assert_eq!(to_base_units("1.999999999", 6).unwrap(), big("1999999"));
        assert_eq!(to_base_units("0.0000009", 6).unwrap(), big("0"));
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(to_base_units("42.9", 0).unwrap(), big("42"));
    }

    #[test]
    fn test_no_float_artifacts() {
        // 0.1 + 0.2 style values must come out exact
        assert_eq!(to_base_units("0.3", 18).unwrap(), big("300000000000000000"));
        assert_eq!(
            to_base_units("123456789.123456789123456789", 18).unwrap(),
            big("123456789123456789123456789")
        );
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(matches!(to_base_units("1e5", 6), Err(WalletError::InvalidDecimal(_))));
        assert!(to_base_units("-1", 6).is_err());
        assert!(to_base_units("1.2.3", 6).is_err());
    }

    #[test]
    fn test_limb_boundaries() {
        let max_low = BigUint::from(u128::MAX);
        let limbs = to_limbs(&max_low);
        assert_eq!(limbs.low_hex(), format!("0x{}", "f".repeat(32)));
        assert_eq!(limbs.high_hex(), "0x0");

        let two_pow_128 = BigUint::from(1u8) << 128u32;
        let limbs = to_limbs(&two_pow_128);
        assert_eq!(limbs.low_hex(), "0x0");
        assert_eq!(limbs.high_hex(), "0x1");
    }

    #[test]
    fn test_limbs_recombine() {
        let samples = [
            big("0"),
            big("25500000"),
            BigUint::from(u128::MAX),
            (BigUint::from(1u8) << 200u32) + big("12345"),
            (BigUint::from(1u8) << 256u32) - 1u8,
        ];

        for n in samples {
            let limbs = to_limbs(&n);
            assert!(limbs.low <= BigUint::from(u128::MAX));
            assert_eq!(limbs.value(), n);
        }
    }

    #[test]
    fn test_small_values_have_zero_high() {
        let limbs = to_limbs(&big("340282366920938463463374607431768211455"));
        assert_eq!(limbs.high, big("0"));
    }

    #[test]
    fn test_usdc_transfer_calldata() {
        let prepared = prepare_transfer("0x1234", "25.5", 6).unwrap();
        assert_eq!(prepared.amount_base_units, big("25500000"));
        assert_eq!(prepared.calldata, vec!["0x1234", "0x1851960", "0x0"]);
    }
}
