mod engine;
mod error;
mod types;
mod view;

pub use engine::{compare, compare_funds, project, summarize};
pub use error::{ProjectionError, Result};
pub use types::{
    ComparisonInput, ComparisonSummary, Direction, FundComparison, FundSummary, FundTerms,
    LedgerEntry, Projection, ProjectionInput,
};
pub use view::{FundSelector, PeriodFilter};
