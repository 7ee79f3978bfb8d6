//! Terminal rendering of a [`SummaryReport`].

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Cell, CellAlignment, Color, Table, presets::UTF8_FULL};
use netprofit_finance::SummaryReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn print_report(report: &SummaryReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_tables(report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn amount_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn sales_table(report: &SummaryReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["항목", "금액", "설명"]);

    for row in &report.sales_summary {
        let label = if row.label == "거래액" {
            Cell::new(row.label).fg(Color::Cyan)
        } else {
            Cell::new(row.label)
        };
        table.add_row(vec![label, amount_cell(&row.formatted), Cell::new(row.tooltip)]);
    }
    table
}

fn expense_table(report: &SummaryReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["항목", "금액", "비율(%)", "분류"]);

    for row in &report.expense_detail {
        table.add_row(vec![
            Cell::new(&row.name),
            amount_cell(&row.formatted),
            amount_cell(&row.ratio),
            Cell::new(row.class.label()),
        ]);
    }
    table
}

fn print_tables(report: &SummaryReport) {
    println!("{}\n", report.headline());

    println!("① 매출 요약");
    println!("{}\n", sales_table(report));

    println!("② 지출내역");
    println!("{}\n", expense_table(report));

    println!(
        "고정비 {}원 | 변동비 {}원 | 기타지출 {}원 | 총지출 {}원",
        netprofit_core::format_won(report.fixed_total),
        netprofit_core::format_won(report.variable_total),
        netprofit_core::format_won(report.other_total),
        netprofit_core::format_won(report.total_expense),
    );
    println!(
        "순수익: {} ({})",
        report.net_profit_display(),
        report.profit_ratio_display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use netprofit_core::{CostItemLists, Period};
    use netprofit_finance::compute;

    fn report() -> SummaryReport {
        compute(Period::new(2025, 1).unwrap(), 0.0, &[], &[], &[], &CostItemLists::default())
    }

    #[test]
    fn test_tables_have_every_row() {
        let report = report();
        assert_eq!(sales_table(&report).row_iter().count(), 9);
        assert_eq!(expense_table(&report).row_iter().count(), 3);
    }

    #[test]
    fn test_tables_render_labels() {
        let text = expense_table(&report()).to_string();
        assert!(text.contains("판매자부담프로모션"));
        assert!(text.contains("0.00%"));
        assert!(text.contains("변동비"));
    }
}
