use super::types::LedgerEntry;

const EDGE_PERIODS: usize = 6;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PeriodFilter {
    #[default]
    All,
    First6,
    Last6,
    Quarterly,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum FundSelector {
    #[default]
    Both,
    FundA,
    FundB,
}

impl PeriodFilter {
    pub fn select(self, entries: &[LedgerEntry]) -> &[LedgerEntry] {
        match self {
            PeriodFilter::All | PeriodFilter::Quarterly => entries,
            PeriodFilter::First6 => &entries[..entries.len().min(EDGE_PERIODS)],
            PeriodFilter::Last6 => &entries[entries.len().saturating_sub(EDGE_PERIODS)..],
        }
    }

    pub fn keeps(self, entry: &LedgerEntry) -> bool {
        match self {
            PeriodFilter::Quarterly => entry.period == 1 || entry.period % 3 == 0,
            _ => true,
        }
    }

    pub fn apply(self, entries: &[LedgerEntry]) -> Vec<LedgerEntry> {
        self.select(entries)
            .iter()
            .filter(|entry| self.keeps(entry))
            .copied()
            .collect()
    }
}

impl FundSelector {
    pub fn shows_fund_a(self) -> bool {
        matches!(self, FundSelector::Both | FundSelector::FundA)
    }

    pub fn shows_fund_b(self) -> bool {
        matches!(self, FundSelector::Both | FundSelector::FundB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProjectionInput, project};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn ledger(years: u32) -> Vec<LedgerEntry> {
        project(&ProjectionInput {
            initial_amount: 5_000.0,
            periodic_deposit: 250.0,
            annual_return_percent: 7.0,
            annual_fee_percent: 0.5,
            years,
        })
        .expect("valid input")
        .entries()
        .to_vec()
    }

    fn periods(rows: &[LedgerEntry]) -> Vec<u32> {
        rows.iter().map(|row| row.period).collect()
    }

    #[test]
    fn first_and_last_six_slice_the_edges() {
        let rows = ledger(2);
        assert_eq!(periods(&PeriodFilter::First6.apply(&rows)), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            periods(&PeriodFilter::Last6.apply(&rows)),
            vec![19, 20, 21, 22, 23, 24]
        );
    }

    #[test]
    fn quarterly_keeps_first_period_and_every_third() {
        let rows = ledger(1);
        assert_eq!(
            periods(&PeriodFilter::Quarterly.apply(&rows)),
            vec![1, 3, 6, 9, 12]
        );
    }

    #[test]
    fn all_returns_every_row_unchanged() {
        let rows = ledger(3);
        assert_eq!(PeriodFilter::All.apply(&rows), rows);
    }

    #[test]
    fn filters_are_total_over_short_and_empty_ledgers() {
        let rows = ledger(1);
        let short = &rows[..4];
        assert_eq!(periods(&PeriodFilter::First6.apply(short)), vec![1, 2, 3, 4]);
        assert_eq!(periods(&PeriodFilter::Last6.apply(short)), vec![1, 2, 3, 4]);

        for filter in [
            PeriodFilter::All,
            PeriodFilter::First6,
            PeriodFilter::Last6,
            PeriodFilter::Quarterly,
        ] {
            assert!(filter.apply(&[]).is_empty());
        }
    }

    #[test]
    fn fund_selector_controls_visible_tables() {
        assert!(FundSelector::Both.shows_fund_a() && FundSelector::Both.shows_fund_b());
        assert!(FundSelector::FundA.shows_fund_a() && !FundSelector::FundA.shows_fund_b());
        assert!(!FundSelector::FundB.shows_fund_a() && FundSelector::FundB.shows_fund_b());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(30))]

        #[test]
        fn prop_filtered_rows_are_an_ordered_subset(years in 1u32..=30) {
            let rows = ledger(years);
            for filter in [
                PeriodFilter::All,
                PeriodFilter::First6,
                PeriodFilter::Last6,
                PeriodFilter::Quarterly,
            ] {
                let shown = filter.apply(&rows);
                prop_assert!(!shown.is_empty());
                prop_assert!(shown.len() <= rows.len());
                for pair in shown.windows(2) {
                    prop_assert!(pair[0].period < pair[1].period);
                }
                for row in &shown {
                    prop_assert_eq!(*row, rows[row.period as usize - 1]);
                }
            }
            prop_assert_eq!(PeriodFilter::Quarterly.apply(&rows).len(), (years * 4 + 1) as usize);
        }
    }
}
