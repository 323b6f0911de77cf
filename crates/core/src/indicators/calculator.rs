//! Pure indicator computation over resolved balance mappings.
//!
//! The calculator is parameterized by chart variant; the formulas are
//! identical across populations, only the account catalogue changes.
//! Several denominators use the two-point average of the prior and
//! current period balances.

use rust_decimal::Decimal;

use crate::balances::{BalanceMapping, Period};
use crate::entities::Entity;
use crate::indicators::chart::{ChartAccounts, ChartVariant, SegmentAccounts};
use crate::indicators::indicators_model::{
    DepositMixIndicators, IndicatorResult, PortfolioQualityIndicators, ProfitabilityIndicators,
    SegmentQuality,
};

/// `a / b`, with division by zero evaluating to zero. Never raises,
/// never produces a non-finite value.
pub fn safe_divide(a: Decimal, b: Decimal) -> Decimal {
    if b.is_zero() {
        Decimal::ZERO
    } else {
        a / b
    }
}

/// Two-point average `(prior + current) / 2`, approximating the average
/// balance over the period. Deliberately the simple average; the
/// annualized variant was rejected (see DESIGN.md).
fn two_point_average(prior: Decimal, current: Decimal) -> Decimal {
    (prior + current) / Decimal::TWO
}

fn as_percent(fraction: Decimal) -> Decimal {
    fraction * Decimal::ONE_HUNDRED
}

/// Bucket sums for one segment: `[A, B, C, D, E]`.
fn bucket_sums(mapping: &BalanceMapping, entity_key: &str, segment: &SegmentAccounts) -> [Decimal; 5] {
    [
        mapping.sum(entity_key, segment.bucket_a),
        mapping.sum(entity_key, segment.bucket_b),
        mapping.sum(entity_key, segment.bucket_c),
        mapping.sum(entity_key, segment.bucket_d),
        mapping.sum(entity_key, segment.bucket_e),
    ]
}

/// The three quality ratios over a bucket vector and its allowance.
fn segment_quality(buckets: [Decimal; 5], allowance: Decimal) -> SegmentQuality {
    let [a, b, c, d, e] = buckets;
    let total = a + b + c + d + e;
    let past_due = b + c + d + e;
    let non_performing = c + d + e;
    SegmentQuality {
        delinquency: as_percent(safe_divide(past_due, total)),
        non_performing: as_percent(safe_divide(non_performing, total)),
        coverage: as_percent(safe_divide(allowance, past_due)),
    }
}

/// Indicator calculator for one chart variant.
pub struct IndicatorCalculator {
    chart: ChartVariant,
}

impl IndicatorCalculator {
    pub fn new(chart: ChartVariant) -> Self {
        Self { chart }
    }

    pub fn chart(&self) -> ChartVariant {
        self.chart
    }

    /// Every account code the formulas touch, deduplicated and sorted.
    /// The scheduler fetches exactly this set for indicator batches.
    pub fn required_accounts(&self) -> Vec<String> {
        let accounts = self.chart.accounts();
        let mut codes: Vec<&str> = vec![
            accounts.total_assets,
            accounts.available,
            accounts.investments,
            accounts.gross_portfolio,
            accounts.portfolio_allowance,
            accounts.total_liabilities,
            accounts.total_deposits,
            accounts.savings_deposits,
            accounts.term_deposits,
            accounts.contractual_deposits,
            accounts.permanent_deposits,
            accounts.bank_credits,
            accounts.equity,
            accounts.surplus,
            accounts.interest_income,
            accounts.deposit_interest_expense,
            accounts.bank_credit_interest_expense,
            accounts.operating_expenses,
        ];
        for segment in &accounts.segments {
            codes.extend_from_slice(segment.total);
            codes.extend_from_slice(segment.bucket_a);
            codes.extend_from_slice(segment.bucket_b);
            codes.extend_from_slice(segment.bucket_c);
            codes.extend_from_slice(segment.bucket_d);
            codes.extend_from_slice(segment.bucket_e);
            codes.extend_from_slice(segment.allowance);
        }
        codes.sort_unstable();
        codes.dedup();
        codes.into_iter().map(str::to_string).collect()
    }

    /// Computes the full indicator set for one entity.
    ///
    /// An entity absent from the current mapping (resolved under neither
    /// key) yields the all-zero set rather than an error; a zero
    /// denominator zeroes only the ratios that use it.
    pub fn compute(
        &self,
        entity: &Entity,
        period: Period,
        current: &BalanceMapping,
        prior: &BalanceMapping,
    ) -> IndicatorResult {
        let key = entity.formatted_nit();
        if !current.contains_entity(&key) {
            log::warn!(
                "Entity {} ({}) resolved under neither key for {}; emitting zero indicators",
                entity.short_name,
                key,
                period
            );
            return IndicatorResult::zeroed(entity, period);
        }

        let accounts = self.chart.accounts();
        let cur = |code: &str| current.amount(&key, code);
        let avg = |code: &str| two_point_average(prior.amount(&key, code), current.amount(&key, code));

        let liquidity = safe_divide(cur(accounts.available), cur(accounts.total_deposits));
        let solvency = safe_divide(cur(accounts.equity), cur(accounts.total_assets));

        let profitability = ProfitabilityIndicators {
            return_on_equity: as_percent(safe_divide(cur(accounts.surplus), avg(accounts.equity))),
            return_on_assets: as_percent(safe_divide(
                cur(accounts.surplus),
                avg(accounts.total_assets),
            )),
            portfolio_yield: as_percent(safe_divide(
                cur(accounts.interest_income),
                avg(accounts.gross_portfolio),
            )),
            deposit_cost: as_percent(safe_divide(
                cur(accounts.deposit_interest_expense),
                avg(accounts.total_deposits),
            )),
            bank_credit_cost: as_percent(safe_divide(
                cur(accounts.bank_credit_interest_expense),
                avg(accounts.bank_credits),
            )),
            operating_expense_ratio: as_percent(safe_divide(
                cur(accounts.operating_expenses),
                avg(accounts.total_assets),
            )),
        };

        self.verify_segment_totals(&key, current);
        let portfolio = self.portfolio_quality(&key, current, accounts);
        let deposits = deposit_mix(&key, current, accounts);

        IndicatorResult {
            entity_key: key,
            entity_name: entity.short_name.clone(),
            year: period.year,
            month: period.month,
            liquidity,
            solvency,
            profitability,
            portfolio,
            deposits,
        }
    }

    /// Checks each segment's reported total against its bucket sum.
    /// A drift beyond the smallest currency unit means the filed rows
    /// are internally inconsistent; it is logged, never fatal.
    pub fn verify_segment_totals(&self, entity_key: &str, mapping: &BalanceMapping) -> bool {
        let tolerance = Decimal::new(1, crate::constants::MONEY_SCALE);
        let mut consistent = true;
        for segment in &self.chart.accounts().segments {
            let reported = mapping.sum(entity_key, segment.total);
            if reported.is_zero() {
                continue;
            }
            let summed: Decimal = bucket_sums(mapping, entity_key, segment).iter().sum();
            if (reported - summed).abs() > tolerance {
                log::warn!(
                    "Segment {:?} of {} reports total {} but buckets sum to {}",
                    segment.segment,
                    entity_key,
                    reported,
                    summed
                );
                consistent = false;
            }
        }
        consistent
    }

    fn portfolio_quality(
        &self,
        key: &str,
        current: &BalanceMapping,
        accounts: &ChartAccounts,
    ) -> PortfolioQualityIndicators {
        let mut grand_total = [Decimal::ZERO; 5];
        let mut per_segment = Vec::with_capacity(accounts.segments.len());

        for segment in &accounts.segments {
            let buckets = bucket_sums(current, key, segment);
            for (acc, bucket) in grand_total.iter_mut().zip(buckets.iter()) {
                *acc += *bucket;
            }
            let allowance = current.sum(key, segment.allowance);
            per_segment.push(segment_quality(buckets, allowance));
        }

        // The grand total covers the chart-level allowance account.
        let total = segment_quality(grand_total, current.amount(key, accounts.portfolio_allowance));

        let mut iter = per_segment.into_iter();
        PortfolioQualityIndicators {
            consumer: iter.next().unwrap_or_default(),
            microcredit: iter.next().unwrap_or_default(),
            commercial: iter.next().unwrap_or_default(),
            housing: iter.next().unwrap_or_default(),
            payroll: iter.next().unwrap_or_default(),
            total,
        }
    }
}

fn deposit_mix(key: &str, current: &BalanceMapping, accounts: &ChartAccounts) -> DepositMixIndicators {
    let total = current.amount(key, accounts.total_deposits);
    let share = |code: &str| as_percent(safe_divide(current.amount(key, code), total));

    let savings_share = share(accounts.savings_deposits);
    let term_share = share(accounts.term_deposits);
    let contractual_share = share(accounts.contractual_deposits);
    let permanent_share = share(accounts.permanent_deposits);

    DepositMixIndicators {
        savings_share,
        term_share,
        contractual_share,
        permanent_share,
        total_share: savings_share + term_share + contractual_share + permanent_share,
    }
}
