/// Advisory fee estimate shown before the user confirms a send
///
/// The fee grows with the natural log of the amount and never drops below the
/// base fee. These numbers are for display only and never reach calldata, so
/// `f64` is fine here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimatedCost {
    pub estimated_fee: f64,
    pub total_cost: f64,
}

fn parse_display_amount(amount_human: &str) -> Option<f64> {
    amount_human
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

fn fee_for(amount: f64, base_fee: f64) -> f64 {
    // f64::max ignores NaN, so ln of a negative argument falls back to the base fee
    base_fee.max(base_fee * (amount + 1.0).ln())
}

/// `max(base_fee, base_fee * ln(amount + 1))`, or 0 when the amount does not parse
pub fn estimate_fee(amount_human: &str, base_fee: f64) -> f64 {
    parse_display_amount(amount_human)
        .map(|amount| fee_for(amount, base_fee))
        .unwrap_or(0.0)
}

/// `amount + estimated fee`, or 0 when the amount does not parse
pub fn estimate_total_cost(amount_human: &str, base_fee: f64) -> f64 {
    estimate_cost(amount_human, base_fee).total_cost
}

pub fn estimate_cost(amount_human: &str, base_fee: f64) -> EstimatedCost {
    match parse_display_amount(amount_human) {
        Some(amount) => {
            let estimated_fee = fee_for(amount, base_fee);
            EstimatedCost {
                estimated_fee,
                total_cost: amount + estimated_fee,
            }
        }
        None => EstimatedCost::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_floor_is_base_fee() {
        // ln(1.5) < 1, so the floor applies
        assert_eq!(estimate_fee("0.5", 0.5), 0.5);
        assert_eq!(estimate_fee("0", 0.1), 0.1);
    }

    #[test]
    fn test_fee_grows_logarithmically() {
        let fee = estimate_fee("99", 0.5);
        assert!((fee - 0.5 * 100f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_fee_is_monotonic() {
        let amounts = ["0", "0.1", "1", "1.71", "2", "10", "250.5", "1000000"];
        let fees: Vec<f64> = amounts.iter().map(|a| estimate_fee(a, 0.1)).collect();
        for pair in fees.windows(2) {
            assert!(pair[0] <= pair[1], "{:?}", fees);
        }
        assert!(fees.iter().all(|fee| *fee >= 0.1));
    }

    #[test]
    fn test_total_cost() {
        let cost = estimate_cost("10", 0.5);
        assert!((cost.total_cost - (10.0 + cost.estimated_fee)).abs() < 1e-12);
        assert_eq!(estimate_total_cost("10", 0.5), cost.total_cost);
    }

    #[test]
    fn test_unparsable_amount_is_zero() {
        assert_eq!(estimate_fee("abc", 0.5), 0.0);
        assert_eq!(estimate_total_cost("", 0.5), 0.0);
        assert_eq!(estimate_cost("inf", 0.5), EstimatedCost::default());
        assert_eq!(estimate_cost("NaN", 0.5), EstimatedCost::default());
    }

    #[test]
    fn test_negative_amount_never_panics() {
        assert_eq!(estimate_fee("-5", 0.5), 0.5);
    }
}
