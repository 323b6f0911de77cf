//! Indicator result models.
//!
//! Every ratio is a finite decimal or exactly zero; division errors do
//! not exist in this layer. Units are fixed per indicator family:
//! liquidity and solvency are plain fractions, the profitability family
//! and everything portfolio/deposit related are percentages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balances::Period;
use crate::entities::Entity;

/// Profitability family. All percentages, all computed over two-point
/// average denominators `(prior + current) / 2`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityIndicators {
    pub return_on_equity: Decimal,
    pub return_on_assets: Decimal,
    pub portfolio_yield: Decimal,
    pub deposit_cost: Decimal,
    pub bank_credit_cost: Decimal,
    pub operating_expense_ratio: Decimal,
}

/// Quality ratios for one portfolio segment, as percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentQuality {
    /// (B+C+D+E) / (A+B+C+D+E)
    pub delinquency: Decimal,
    /// (C+D+E) / (A+B+C+D+E)
    pub non_performing: Decimal,
    /// allowance / (B+C+D+E)
    pub coverage: Decimal,
}

/// Per-segment portfolio quality plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioQualityIndicators {
    pub consumer: SegmentQuality,
    pub microcredit: SegmentQuality,
    pub commercial: SegmentQuality,
    pub housing: SegmentQuality,
    pub payroll: SegmentQuality,
    pub total: SegmentQuality,
}

/// Deposit-mix shares, as percentages of total deposits. The four shares
/// sum into `total_share`, expected to approach (not necessarily equal)
/// one hundred.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositMixIndicators {
    pub savings_share: Decimal,
    pub term_share: Decimal,
    pub contractual_share: Decimal,
    pub permanent_share: Decimal,
    pub total_share: Decimal,
}

/// Full indicator set for one entity and reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorResult {
    /// Formatted tax id, `NNN-NNN-NNN-D`.
    pub entity_key: String,
    /// Display name.
    pub entity_name: String,
    pub year: i32,
    pub month: u32,
    /// available / deposits, plain fraction.
    pub liquidity: Decimal,
    /// equity / assets, plain fraction.
    pub solvency: Decimal,
    pub profitability: ProfitabilityIndicators,
    pub portfolio: PortfolioQualityIndicators,
    pub deposits: DepositMixIndicators,
}

impl IndicatorResult {
    /// The all-zero set: emitted when an entity resolves under neither
    /// key, so the entity still appears in the batch output.
    pub fn zeroed(entity: &Entity, period: Period) -> Self {
        Self {
            entity_key: entity.formatted_nit(),
            entity_name: entity.short_name.clone(),
            year: period.year,
            month: period.month,
            liquidity: Decimal::ZERO,
            solvency: Decimal::ZERO,
            profitability: ProfitabilityIndicators::default(),
            portfolio: PortfolioQualityIndicators::default(),
            deposits: DepositMixIndicators::default(),
        }
    }

    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }
}
