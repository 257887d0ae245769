use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInput {
    pub initial_amount: f64,
    pub periodic_deposit: f64,
    pub annual_return_percent: f64,
    pub annual_fee_percent: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTerms {
    pub annual_return_percent: f64,
    pub annual_fee_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonInput {
    pub initial_amount: f64,
    pub periodic_deposit: f64,
    pub fund_a: FundTerms,
    pub fund_b: FundTerms,
    pub years: u32,
}

impl ComparisonInput {
    pub fn projection_input(&self, terms: FundTerms) -> ProjectionInput {
        ProjectionInput {
            initial_amount: self.initial_amount,
            periodic_deposit: self.periodic_deposit,
            annual_return_percent: terms.annual_return_percent,
            annual_fee_percent: terms.annual_fee_percent,
            years: self.years,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub period: u32,
    pub starting_amount: f64,
    pub deposit: f64,
    pub return_amount: f64,
    pub fee_amount: f64,
    pub ending_amount: f64,
    pub cumulative_deposits: f64,
    pub cumulative_fees: f64,
    pub cumulative_gain: f64,
}

/// Month-by-month ledger of one fund. Only built by [`super::project`], read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Projection {
    entries: Vec<LedgerEntry>,
}

impl Projection {
    pub(super) fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn final_entry(&self) -> Option<&LedgerEntry> {
        self.entries.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSummary {
    pub final_value: f64,
    pub total_deposits: f64,
    pub total_gain: f64,
    pub total_fees: f64,
    pub return_on_investment_percent: Option<f64>,
    pub fees_as_percent_of_deposits: Option<f64>,
    pub fees_as_percent_of_gain: Option<f64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outperforms,
    Underperforms,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Outperforms => "outperforms",
            Direction::Underperforms => "underperforms",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub difference_in_final_value: f64,
    pub relative_outperformance_percent: Option<f64>,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FundComparison {
    pub fund_a: Projection,
    pub fund_b: Projection,
    pub summary_a: FundSummary,
    pub summary_b: FundSummary,
    pub comparison: ComparisonSummary,
}
