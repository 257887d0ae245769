use crate::core::{
    ComparisonInput, FundComparison, FundSelector, FundSummary, FundTerms, LedgerEntry,
    PeriodFilter,
};

const COLUMNS: [&str; 9] = [
    "Month",
    "Starting Amount",
    "Monthly Deposit",
    "Monthly Return",
    "Monthly Fee",
    "Ending Amount",
    "Total Deposits",
    "Total Gain",
    "Total Fees",
];

pub fn render_report(
    input: &ComparisonInput,
    comparison: &FundComparison,
    fund: FundSelector,
    periods: PeriodFilter,
) -> String {
    let mut out = String::new();

    if fund.shows_fund_a() {
        render_fund_table(
            &mut out,
            "Fund A",
            input.fund_a,
            input.years,
            &periods.apply(comparison.fund_a.entries()),
        );
    }
    if fund.shows_fund_b() {
        render_fund_table(
            &mut out,
            "Fund B",
            input.fund_b,
            input.years,
            &periods.apply(comparison.fund_b.entries()),
        );
    }

    render_summary(&mut out, input.years, comparison);
    out
}

fn render_fund_table(
    out: &mut String,
    name: &str,
    terms: FundTerms,
    years: u32,
    rows: &[LedgerEntry],
) {
    push_line(out, format!(
        "{name} ({}% Annual Fee, {}% Return over {years} years)",
        terms.annual_fee_percent, terms.annual_return_percent
    ));

    let header = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| if i == 0 { format!("{col:>5}") } else { format!("{col:>16}") })
        .collect::<Vec<_>>()
        .join(" ");
    let rule = "-".repeat(header.len());
    push_line(out, header);
    push_line(out, rule);

    for row in rows {
        push_line(out, format!(
            "{:>5} {:>16.2} {:>16.2} {:>16.2} {:>16.2} {:>16.2} {:>16.2} {:>16.2} {:>16.2}",
            row.period,
            row.starting_amount,
            row.deposit,
            row.return_amount,
            row.fee_amount,
            row.ending_amount,
            row.cumulative_deposits,
            row.cumulative_gain,
            row.cumulative_fees,
        ));
    }
    out.push('\n');
}

fn render_summary(out: &mut String, years: u32, comparison: &FundComparison) {
    let a = &comparison.summary_a;
    let b = &comparison.summary_b;

    push_line(out, format!("Summary After {years} Years"));
    push_line(out, format!("{:<24} {:>16} {:>16}", "Metric", "Fund A", "Fund B"));

    let money_rows: [(&str, fn(&FundSummary) -> f64); 4] = [
        ("Final Value", |s: &FundSummary| s.final_value),
        ("Total Deposits", |s: &FundSummary| s.total_deposits),
        ("Total Gain", |s: &FundSummary| s.total_gain),
        ("Total Fees Paid", |s: &FundSummary| s.total_fees),
    ];
    for (label, value) in money_rows {
        push_line(out, format!("{label:<24} {:>16.2} {:>16.2}", value(a), value(b)));
    }

    let ratio_rows: [(&str, fn(&FundSummary) -> Option<f64>); 3] = [
        ("Return on Investment %", |s: &FundSummary| s.return_on_investment_percent),
        ("Fees as % of Deposits", |s: &FundSummary| s.fees_as_percent_of_deposits),
        ("Fees as % of Gain", |s: &FundSummary| s.fees_as_percent_of_gain),
    ];
    for (label, value) in ratio_rows {
        push_line(out, format!(
            "{label:<24} {:>16} {:>16}",
            format_percent(value(a)),
            format_percent(value(b))
        ));
    }

    let summary = &comparison.comparison;
    out.push('\n');
    push_line(out, format!(
        "Difference in Final Value: {:.2}",
        summary.difference_in_final_value
    ));
    push_line(out, format!(
        "Fund A {} Fund B by {}",
        summary.direction.as_str(),
        format_percent(summary.relative_outperformance_percent)
    ));
}

fn push_line(out: &mut String, line: String) {
    out.push_str(&line);
    out.push('\n');
}

fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "n/a".to_string(),
    }
}
