//! Chart-of-accounts catalogues.
//!
//! The two regulated populations report under disjoint charts of
//! accounts: a code in one chart has no meaning in the other, and
//! economically equivalent concepts sit under different numbers (the
//! loan-loss allowance and the period-surplus accounts are the classic
//! examples). Every concept the indicator formulas touch is named here
//! once per chart, as typed tables; formulas never mention raw code
//! strings.

use serde::{Deserialize, Serialize};

use crate::entities::EntityClass;

/// Which chart of accounts an entity reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartVariant {
    /// Solidarity-sector (cooperative) chart.
    Solidaria,
    /// Supervised-financial-institution chart.
    Financiera,
}

impl ChartVariant {
    pub fn for_class(class: EntityClass) -> Self {
        match class {
            EntityClass::Solidaria => Self::Solidaria,
            EntityClass::Financiera => Self::Financiera,
        }
    }

    /// The static account catalogue for this chart.
    pub fn accounts(&self) -> &'static ChartAccounts {
        match self {
            Self::Solidaria => &SOLIDARIA_ACCOUNTS,
            Self::Financiera => &FINANCIERA_ACCOUNTS,
        }
    }
}

/// Past-due portfolio segments. Each aggregates the five standard aging
/// buckets A (current) through E (most severely overdue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortfolioSegment {
    Consumer,
    Microcredit,
    Commercial,
    Housing,
    Payroll,
}

impl PortfolioSegment {
    pub const ALL: [PortfolioSegment; 5] = [
        Self::Consumer,
        Self::Microcredit,
        Self::Commercial,
        Self::Housing,
        Self::Payroll,
    ];
}

/// Account codes for one portfolio segment. Principal and interest
/// sub-accounts roll into the same bucket.
#[derive(Debug)]
pub struct SegmentAccounts {
    pub segment: PortfolioSegment,
    /// Segment-total codes as reported (the aggregation check target).
    pub total: &'static [&'static str],
    pub bucket_a: &'static [&'static str],
    pub bucket_b: &'static [&'static str],
    pub bucket_c: &'static [&'static str],
    pub bucket_d: &'static [&'static str],
    pub bucket_e: &'static [&'static str],
    /// Segment impairment allowance.
    pub allowance: &'static [&'static str],
}

/// Every account concept the indicator formulas reference, for one chart.
#[derive(Debug)]
pub struct ChartAccounts {
    pub total_assets: &'static str,
    pub available: &'static str,
    pub investments: &'static str,
    pub gross_portfolio: &'static str,
    /// Chart-level loan-loss allowance; differs per chart.
    pub portfolio_allowance: &'static str,
    pub total_liabilities: &'static str,
    pub total_deposits: &'static str,
    pub savings_deposits: &'static str,
    pub term_deposits: &'static str,
    pub contractual_deposits: &'static str,
    pub permanent_deposits: &'static str,
    pub bank_credits: &'static str,
    pub equity: &'static str,
    /// Period surplus (net income); differs per chart.
    pub surplus: &'static str,
    pub interest_income: &'static str,
    pub deposit_interest_expense: &'static str,
    pub bank_credit_interest_expense: &'static str,
    pub operating_expenses: &'static str,
    pub segments: [SegmentAccounts; 5],
}

pub static SOLIDARIA_ACCOUNTS: ChartAccounts = ChartAccounts {
    total_assets: "100000",
    available: "110000",
    investments: "120000",
    gross_portfolio: "140000",
    portfolio_allowance: "144800",
    total_liabilities: "200000",
    total_deposits: "210000",
    savings_deposits: "211000",
    term_deposits: "212000",
    contractual_deposits: "213000",
    permanent_deposits: "219000",
    bank_credits: "230000",
    equity: "300000",
    surplus: "350000",
    interest_income: "411000",
    deposit_interest_expense: "611005",
    bank_credit_interest_expense: "611010",
    operating_expenses: "510000",
    segments: [
        SegmentAccounts {
            segment: PortfolioSegment::Consumer,
            total: &["140400", "160500"],
            bucket_a: &["140405", "160505"],
            bucket_b: &["140410", "160510"],
            bucket_c: &["140415", "160515"],
            bucket_d: &["140420", "160520"],
            bucket_e: &["140425", "160525"],
            allowance: &["144505"],
        },
        SegmentAccounts {
            segment: PortfolioSegment::Microcredit,
            total: &["140600", "160600"],
            bucket_a: &["140605", "160605"],
            bucket_b: &["140610", "160610"],
            bucket_c: &["140615", "160615"],
            bucket_d: &["140620", "160620"],
            bucket_e: &["140625", "160625"],
            allowance: &["144510"],
        },
        SegmentAccounts {
            segment: PortfolioSegment::Commercial,
            total: &["140800", "160800"],
            bucket_a: &["140805", "160805"],
            bucket_b: &["140810", "160810"],
            bucket_c: &["140815", "160815"],
            bucket_d: &["140820", "160820"],
            bucket_e: &["140825", "160825"],
            allowance: &["144515"],
        },
        SegmentAccounts {
            segment: PortfolioSegment::Housing,
            total: &["141600", "161600"],
            bucket_a: &["141605", "161605"],
            bucket_b: &["141610", "161610"],
            bucket_c: &["141615", "161615"],
            bucket_d: &["141620", "161620"],
            bucket_e: &["141625", "161625"],
            allowance: &["144520"],
        },
        SegmentAccounts {
            segment: PortfolioSegment::Payroll,
            total: &["141200", "161200"],
            bucket_a: &["141205", "161205"],
            bucket_b: &["141210", "161210"],
            bucket_c: &["141215", "161215"],
            bucket_d: &["141220", "161220"],
            bucket_e: &["141225", "161225"],
            allowance: &["144525"],
        },
    ],
};

pub static FINANCIERA_ACCOUNTS: ChartAccounts = ChartAccounts {
    total_assets: "100000",
    available: "110000",
    investments: "130000",
    gross_portfolio: "140000",
    portfolio_allowance: "148900",
    total_liabilities: "200000",
    total_deposits: "210000",
    savings_deposits: "212000",
    term_deposits: "213000",
    contractual_deposits: "214000",
    permanent_deposits: "219500",
    bank_credits: "240000",
    equity: "300000",
    surplus: "359000",
    interest_income: "410200",
    deposit_interest_expense: "510200",
    bank_credit_interest_expense: "510400",
    operating_expenses: "517000",
    segments: [
        SegmentAccounts {
            segment: PortfolioSegment::Consumer,
            total: &["141000", "160400"],
            bucket_a: &["141005", "160405"],
            bucket_b: &["141010", "160410"],
            bucket_c: &["141015", "160415"],
            bucket_d: &["141020", "160420"],
            bucket_e: &["141025", "160425"],
            allowance: &["148905"],
        },
        SegmentAccounts {
            segment: PortfolioSegment::Microcredit,
            total: &["141400", "160600"],
            bucket_a: &["141405", "160605"],
            bucket_b: &["141410", "160610"],
            bucket_c: &["141415", "160615"],
            bucket_d: &["141420", "160620"],
            bucket_e: &["141425", "160625"],
            allowance: &["148910"],
        },
        SegmentAccounts {
            segment: PortfolioSegment::Commercial,
            total: &["141200", "160800"],
            bucket_a: &["141205", "160805"],
            bucket_b: &["141210", "160810"],
            bucket_c: &["141215", "160815"],
            bucket_d: &["141220", "160820"],
            bucket_e: &["141225", "160825"],
            allowance: &["148915"],
        },
        SegmentAccounts {
            segment: PortfolioSegment::Housing,
            total: &["141800", "161000"],
            bucket_a: &["141805", "161005"],
            bucket_b: &["141810", "161010"],
            bucket_c: &["141815", "161015"],
            bucket_d: &["141820", "161020"],
            bucket_e: &["141825", "161025"],
            allowance: &["148920"],
        },
        SegmentAccounts {
            segment: PortfolioSegment::Payroll,
            total: &["142000", "161200"],
            bucket_a: &["142005", "161205"],
            bucket_b: &["142010", "161210"],
            bucket_c: &["142015", "161215"],
            bucket_d: &["142020", "161220"],
            bucket_e: &["142025", "161225"],
            allowance: &["148925"],
        },
    ],
};

/// Symbolic account categories used by the "total accounts" batch
/// variant; each resolves to the chart-specific code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountCategory {
    TotalAssets,
    Available,
    GrossPortfolio,
    TotalLiabilities,
    TotalDeposits,
    Equity,
    Surplus,
}

impl AccountCategory {
    pub fn code_for(&self, chart: ChartVariant) -> &'static str {
        let accounts = chart.accounts();
        match self {
            Self::TotalAssets => accounts.total_assets,
            Self::Available => accounts.available,
            Self::GrossPortfolio => accounts.gross_portfolio,
            Self::TotalLiabilities => accounts.total_liabilities,
            Self::TotalDeposits => accounts.total_deposits,
            Self::Equity => accounts.equity,
            Self::Surplus => accounts.surplus,
        }
    }
}

/// Fixed bijective code ↔ display-label tables, one per chart. These
/// replace the old any-direction normalization helper: each direction is
/// a separately named conversion over the same table.
static SOLIDARIA_LABELS: [(&str, &str); 9] = [
    ("100000", "ACTIVO TOTAL"),
    ("110000", "DISPONIBLE"),
    ("120000", "INVERSIONES"),
    ("140000", "CARTERA BRUTA"),
    ("200000", "PASIVO TOTAL"),
    ("210000", "DEPOSITOS"),
    ("230000", "CREDITOS BANCOS"),
    ("300000", "PATRIMONIO"),
    ("350000", "EXCEDENTES"),
];

static FINANCIERA_LABELS: [(&str, &str); 9] = [
    ("100000", "ACTIVO TOTAL"),
    ("110000", "DISPONIBLE"),
    ("130000", "INVERSIONES"),
    ("140000", "CARTERA BRUTA"),
    ("200000", "PASIVO TOTAL"),
    ("210000", "DEPOSITOS"),
    ("240000", "CREDITOS BANCOS"),
    ("300000", "PATRIMONIO"),
    ("359000", "EXCEDENTES"),
];

fn label_table(chart: ChartVariant) -> &'static [(&'static str, &'static str)] {
    match chart {
        ChartVariant::Solidaria => &SOLIDARIA_LABELS,
        ChartVariant::Financiera => &FINANCIERA_LABELS,
    }
}

/// Display label for an account code, when the chart names it.
pub fn account_label(chart: ChartVariant, code: &str) -> Option<&'static str> {
    label_table(chart)
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// Account code for a display label, when the chart names it.
pub fn account_code(chart: ChartVariant, label: &str) -> Option<&'static str> {
    label_table(chart)
        .iter()
        .find(|(_, l)| *l == label)
        .map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_for_class() {
        assert_eq!(
            ChartVariant::for_class(EntityClass::Solidaria),
            ChartVariant::Solidaria
        );
        assert_eq!(
            ChartVariant::for_class(EntityClass::Financiera),
            ChartVariant::Financiera
        );
    }

    #[test]
    fn test_allowance_and_surplus_differ_per_chart() {
        assert_ne!(
            ChartVariant::Solidaria.accounts().portfolio_allowance,
            ChartVariant::Financiera.accounts().portfolio_allowance
        );
        assert_ne!(
            ChartVariant::Solidaria.accounts().surplus,
            ChartVariant::Financiera.accounts().surplus
        );
    }

    #[test]
    fn test_account_category_resolves_per_chart() {
        assert_eq!(
            AccountCategory::Surplus.code_for(ChartVariant::Solidaria),
            "350000"
        );
        assert_eq!(
            AccountCategory::Surplus.code_for(ChartVariant::Financiera),
            "359000"
        );
    }

    #[test]
    fn test_label_tables_are_bijective() {
        for chart in [ChartVariant::Solidaria, ChartVariant::Financiera] {
            for (code, label) in label_table(chart) {
                assert_eq!(account_label(chart, code), Some(*label));
                assert_eq!(account_code(chart, label), Some(*code));
            }
        }
    }

    #[test]
    fn test_every_segment_has_five_buckets_and_allowance() {
        for chart in [ChartVariant::Solidaria, ChartVariant::Financiera] {
            for segment in &chart.accounts().segments {
                for bucket in [
                    segment.bucket_a,
                    segment.bucket_b,
                    segment.bucket_c,
                    segment.bucket_d,
                    segment.bucket_e,
                ] {
                    assert!(!bucket.is_empty());
                }
                assert!(!segment.allowance.is_empty());
                assert!(!segment.total.is_empty());
            }
        }
    }
}
