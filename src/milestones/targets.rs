//! Enough (full independence) and security (Coast) targets

use crate::assumptions::GlobalInputs;

/// Portfolio that funds `retirement_spending` indefinitely at the safe withdrawal rate
///
/// Infinite when the safe withdrawal rate is zero; milestone searches then
/// never match and resolve to `None`.
pub fn enough_number(inputs: &GlobalInputs) -> f64 {
    if inputs.safe_withdrawal_rate <= 0.0 {
        return f64::INFINITY;
    }
    inputs.retirement_spending / inputs.safe_withdrawal_rate
}

/// Coast target for projection year `year`
///
/// The enough number discounted at the real return over the years left
/// until retirement, counting `year` itself. From the retirement year
/// onward the full enough number applies.
pub fn security_number_at_year(inputs: &GlobalInputs, year: u32) -> f64 {
    let target = enough_number(inputs);
    let years_remaining = inputs.years_until_retirement as i64 - year as i64 + 1;
    if years_remaining <= 0 {
        return target;
    }
    target / (1.0 + inputs.real_return()).powi(years_remaining as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs() -> GlobalInputs {
        GlobalInputs {
            retirement_spending: 40_000.0,
            safe_withdrawal_rate: 0.04,
            nominal_return: 0.07,
            inflation: 0.02,
            fees: 0.0,
            years_until_retirement: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_enough_number_is_exact() {
        assert_eq!(enough_number(&inputs()), 1_000_000.0);
    }

    #[test]
    fn test_enough_number_with_zero_rate_is_unreachable() {
        let mut inputs = inputs();
        inputs.safe_withdrawal_rate = 0.0;
        assert!(enough_number(&inputs).is_infinite());
    }

    #[test]
    fn test_security_number_discounts_remaining_years() {
        let inputs = inputs();
        // year 1 has 10 years to go
        assert_relative_eq!(
            security_number_at_year(&inputs, 1),
            1_000_000.0 / 1.05f64.powi(10),
            max_relative = 1e-12
        );
        // final pre-retirement year still discounts once
        assert_relative_eq!(
            security_number_at_year(&inputs, 10),
            1_000_000.0 / 1.05,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_security_number_clamps_after_retirement() {
        let inputs = inputs();
        assert_eq!(security_number_at_year(&inputs, 11), 1_000_000.0);
        assert_eq!(security_number_at_year(&inputs, 30), 1_000_000.0);
    }

    #[test]
    fn test_security_number_rises_toward_target() {
        let inputs = inputs();
        let mut previous = 0.0;
        for year in 1..=11 {
            let value = security_number_at_year(&inputs, year);
            assert!(value > previous);
            previous = value;
        }
    }
}
