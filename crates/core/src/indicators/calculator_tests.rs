//! Calculator tests: safe division, averaged denominators, bucket
//! aggregation, and the zero-denominator fallback.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::balances::{BalanceMapping, Period};
use crate::entities::{Entity, EntityClass};
use crate::indicators::{safe_divide, ChartVariant, IndicatorCalculator};

fn coop_a() -> Entity {
    Entity {
        nit: "900123456".to_string(),
        check_digit: 7,
        legal_name: "Cooperativa A".to_string(),
        short_name: "Coop A".to_string(),
        class: EntityClass::Solidaria,
        supervisory_code: None,
    }
}

const KEY: &str = "900-123-456-7";

fn period() -> Period {
    Period::new(2023, 6).unwrap()
}

fn calculator() -> IndicatorCalculator {
    IndicatorCalculator::new(ChartVariant::Solidaria)
}

#[test]
fn test_safe_divide_matches_plain_division_for_nonzero() {
    assert_eq!(safe_divide(dec!(10), dec!(4)), dec!(2.5));
    assert_eq!(safe_divide(dec!(-9), dec!(3)), dec!(-3));
}

#[test]
fn test_safe_divide_zero_denominator_is_zero() {
    assert_eq!(safe_divide(dec!(10), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(safe_divide(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn test_liquidity_and_solvency_are_fractions() {
    let mut current = BalanceMapping::new();
    current.add(KEY, "110000", dec!(50));
    current.add(KEY, "210000", dec!(200));
    current.add(KEY, "300000", dec!(120));
    current.add(KEY, "100000", dec!(400));

    let result = calculator().compute(&coop_a(), period(), &current, &BalanceMapping::new());
    assert_eq!(result.liquidity, dec!(0.25));
    assert_eq!(result.solvency, dec!(0.3));
}

#[test]
fn test_return_on_equity_uses_two_point_average() {
    let mut current = BalanceMapping::new();
    current.add(KEY, "350000", dec!(30));
    current.add(KEY, "300000", dec!(250));
    let mut prior = BalanceMapping::new();
    prior.add(KEY, "300000", dec!(150));

    // Denominator is (150 + 250) / 2 = 200, not the raw 250.
    let result = calculator().compute(&coop_a(), period(), &current, &prior);
    assert_eq!(result.profitability.return_on_equity, dec!(15));
}

#[test]
fn test_averaged_denominator_zero_in_both_periods_yields_zero() {
    let mut current = BalanceMapping::new();
    current.add(KEY, "350000", dec!(30));

    let result = calculator().compute(&coop_a(), period(), &current, &BalanceMapping::new());
    assert_eq!(result.profitability.return_on_equity, Decimal::ZERO);
    assert_eq!(result.profitability.return_on_assets, Decimal::ZERO);
}

#[test]
fn test_segment_quality_ratios() {
    let mut current = BalanceMapping::new();
    // Consumer segment, principal sub-accounts only.
    current.add(KEY, "140405", dec!(600)); // A
    current.add(KEY, "140410", dec!(200)); // B
    current.add(KEY, "140415", dec!(100)); // C
    current.add(KEY, "140420", dec!(60)); // D
    current.add(KEY, "140425", dec!(40)); // E
    current.add(KEY, "144505", dec!(200)); // allowance

    let result = calculator().compute(&coop_a(), period(), &current, &BalanceMapping::new());
    // past due = 400, total = 1000, non-performing = 200
    assert_eq!(result.portfolio.consumer.delinquency, dec!(40));
    assert_eq!(result.portfolio.consumer.non_performing, dec!(20));
    assert_eq!(result.portfolio.consumer.coverage, dec!(50));
}

#[test]
fn test_interest_subaccounts_roll_into_same_bucket() {
    let mut current = BalanceMapping::new();
    current.add(KEY, "140405", dec!(300)); // A principal
    current.add(KEY, "160505", dec!(100)); // A interest
    current.add(KEY, "140410", dec!(100)); // B principal

    let result = calculator().compute(&coop_a(), period(), &current, &BalanceMapping::new());
    // total = 500, past due = 100
    assert_eq!(result.portfolio.consumer.delinquency, dec!(20));
}

#[test]
fn test_grand_total_aggregates_all_segments() {
    let mut current = BalanceMapping::new();
    current.add(KEY, "140405", dec!(100)); // consumer A
    current.add(KEY, "140610", dec!(100)); // microcredit B
    current.add(KEY, "144800", dec!(50)); // chart-level allowance

    let result = calculator().compute(&coop_a(), period(), &current, &BalanceMapping::new());
    // total = 200, past due = 100
    assert_eq!(result.portfolio.total.delinquency, dec!(50));
    assert_eq!(result.portfolio.total.coverage, dec!(50));
}

#[test]
fn test_empty_portfolio_yields_zero_ratios_not_errors() {
    let mut current = BalanceMapping::new();
    current.add(KEY, "100000", dec!(400));

    let result = calculator().compute(&coop_a(), period(), &current, &BalanceMapping::new());
    assert_eq!(result.portfolio.total.delinquency, Decimal::ZERO);
    assert_eq!(result.portfolio.total.coverage, Decimal::ZERO);
}

#[test]
fn test_deposit_mix_shares_and_check_value() {
    let mut current = BalanceMapping::new();
    current.add(KEY, "210000", dec!(1000));
    current.add(KEY, "211000", dec!(400)); // savings
    current.add(KEY, "212000", dec!(300)); // term
    current.add(KEY, "213000", dec!(200)); // contractual
    current.add(KEY, "219000", dec!(90)); // permanent

    let result = calculator().compute(&coop_a(), period(), &current, &BalanceMapping::new());
    assert_eq!(result.deposits.savings_share, dec!(40));
    assert_eq!(result.deposits.term_share, dec!(30));
    assert_eq!(result.deposits.contractual_share, dec!(20));
    assert_eq!(result.deposits.permanent_share, dec!(9));
    // Approaches, but need not equal, one hundred.
    assert_eq!(result.deposits.total_share, dec!(99));
}

#[test]
fn test_entity_missing_from_mapping_yields_zeroed_set() {
    let result = calculator().compute(
        &coop_a(),
        period(),
        &BalanceMapping::new(),
        &BalanceMapping::new(),
    );
    assert_eq!(result.entity_key, KEY);
    assert_eq!(result.liquidity, Decimal::ZERO);
    assert_eq!(result.profitability.return_on_equity, Decimal::ZERO);
    assert_eq!(result.year, 2023);
    assert_eq!(result.month, 6);
}

#[test]
fn test_zero_denominator_entity_still_has_other_ratios() {
    let mut current = BalanceMapping::new();
    current.add(KEY, "110000", dec!(50));
    // No deposits: liquidity denominator is zero.
    current.add(KEY, "300000", dec!(120));
    current.add(KEY, "100000", dec!(400));

    let result = calculator().compute(&coop_a(), period(), &current, &BalanceMapping::new());
    assert_eq!(result.liquidity, Decimal::ZERO);
    assert_eq!(result.solvency, dec!(0.3));
}

#[test]
fn test_segment_totals_consistent_within_tolerance() {
    let mut mapping = BalanceMapping::new();
    mapping.add(KEY, "140405", dec!(600.00)); // A
    mapping.add(KEY, "140410", dec!(400.01)); // B
    mapping.add(KEY, "140400", dec!(1000.00)); // reported total

    assert!(calculator().verify_segment_totals(KEY, &mapping));
}

#[test]
fn test_segment_totals_drift_detected() {
    let mut mapping = BalanceMapping::new();
    mapping.add(KEY, "140405", dec!(600)); // A
    mapping.add(KEY, "140400", dec!(1000)); // reported total disagrees

    assert!(!calculator().verify_segment_totals(KEY, &mapping));
}

#[test]
fn test_segment_totals_skip_unreported_segments() {
    let mut mapping = BalanceMapping::new();
    mapping.add(KEY, "140405", dec!(600)); // buckets without a total field

    assert!(calculator().verify_segment_totals(KEY, &mapping));
}

#[test]
fn test_required_accounts_sorted_and_deduplicated() {
    let codes = calculator().required_accounts();
    let mut sorted = codes.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(codes, sorted);
    assert!(codes.iter().any(|c| c == "100000"));
    assert!(codes.iter().any(|c| c == "144800"));
    assert!(codes.iter().any(|c| c == "140405"));
}

#[test]
fn test_chart_variants_use_their_own_allowance_account() {
    let mut current = BalanceMapping::new();
    current.add(KEY, "141010", dec!(100)); // financiera consumer B
    current.add(KEY, "148900", dec!(80)); // financiera chart allowance

    let result = IndicatorCalculator::new(ChartVariant::Financiera).compute(
        &coop_a(),
        period(),
        &current,
        &BalanceMapping::new(),
    );
    assert_eq!(result.portfolio.total.coverage, dec!(80));
}
