//! Indicator catalogue: chart-of-accounts tables per population and the
//! pure calculation layer over resolved balance mappings.

pub mod calculator;
pub mod chart;
pub mod indicators_model;

#[cfg(test)]
mod calculator_tests;

pub use calculator::{safe_divide, IndicatorCalculator};
pub use chart::{account_code, account_label, AccountCategory, ChartAccounts, ChartVariant, PortfolioSegment};
pub use indicators_model::{
    DepositMixIndicators, IndicatorResult, PortfolioQualityIndicators, ProfitabilityIndicators,
    SegmentQuality,
};
