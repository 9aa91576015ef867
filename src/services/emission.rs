// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Baseline CO2e estimation from the static per-mode factor table.

use rust_decimal::Decimal;

/// kg CO2e per km for a travel mode. Case-insensitive; unrecognized modes use
/// the 0.2 fallback (kept as-is from the original factor table, even though it
/// exceeds the car factor).
fn emission_factor(mode: &str) -> Decimal {
    match mode.to_ascii_lowercase().as_str() {
        "car" => Decimal::new(192, 3),
        "bus" => Decimal::new(89, 3),
        "train" => Decimal::new(41, 3),
        "bike" | "walk" => Decimal::ZERO,
        _ => Decimal::new(2, 1),
    }
}

/// Baseline emission estimate: factor * distance, rounded to 4 decimal digits.
///
/// Never fails: arithmetic overflow or a negative distance yields zero rather
/// than blocking ingestion.
pub fn estimate(distance_km: Decimal, mode: &str) -> Decimal {
    emission_factor(mode)
        .checked_mul(distance_km)
        .map(|kg| kg.round_dp(4))
        .filter(|kg| !kg.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_factors_for_known_modes() {
        assert_eq!(estimate(dec("10"), "car"), dec("1.92"));
        assert_eq!(estimate(dec("10"), "bus"), dec("0.89"));
        assert_eq!(estimate(dec("10"), "train"), dec("0.41"));
        assert_eq!(estimate(dec("10"), "bike"), Decimal::ZERO);
        assert_eq!(estimate(dec("10"), "walk"), Decimal::ZERO);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(estimate(dec("10"), "CAR"), dec("1.92"));
        assert_eq!(estimate(dec("10"), "Bus"), dec("0.89"));
    }

    #[test]
    fn test_unknown_mode_uses_fallback_factor() {
        assert_eq!(estimate(dec("10"), "scooter"), dec("2.0"));
        assert_eq!(estimate(dec("1"), ""), dec("0.2"));
    }

    #[test]
    fn test_result_rounds_to_four_decimals() {
        // 0.192 * 1.23456 = 0.23703552 -> 0.237
        assert_eq!(estimate(dec("1.23456"), "car"), dec("0.2370"));
        // 0.041 * 3.333 = 0.136653 -> 0.1367
        assert_eq!(estimate(dec("3.333"), "train"), dec("0.1367"));
    }

    #[test]
    fn test_zero_distance_yields_zero() {
        assert_eq!(estimate(Decimal::ZERO, "car"), Decimal::ZERO);
    }

    #[test]
    fn test_negative_distance_clamps_to_zero() {
        assert_eq!(estimate(dec("-5"), "car"), Decimal::ZERO);
    }
}
