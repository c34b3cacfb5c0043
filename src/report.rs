//! Summary statistics and terminal report rendering.

use crate::types::{CashflowRecord, CashflowSummary};
use colored::Colorize;

/// Aggregate a record sequence into headline totals.
///
/// Net flow includes the OUTROS component, so the headline always equals
/// the sum of the per-month balances.
pub fn summarize(records: &[CashflowRecord]) -> CashflowSummary {
    let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();
    let total_expense: f64 = records.iter().map(|r| r.expense).sum();
    let total_other: f64 = records.iter().map(|r| r.other).sum();

    CashflowSummary {
        months: records.len(),
        total_revenue,
        total_expense,
        total_other,
        net_flow: total_revenue - total_expense + total_other,
    }
}

/// Format a value as Brazilian currency: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// Print the summary cards and the per-month table.
pub fn print_report(records: &[CashflowRecord], summary: &CashflowSummary) {
    println!("{}", "📊 Resumo".bold().cyan());
    println!(
        "   Receitas totais:  {}",
        format_brl(summary.total_revenue).green()
    );
    println!(
        "   Despesas totais:  {}",
        format_brl(summary.total_expense).red()
    );
    println!("   Outros (tesouraria): {}", format_brl(summary.total_other));

    let net = format_brl(summary.net_flow).bold();
    if summary.net_flow >= 0.0 {
        println!("   Fluxo líquido:    {}", net.green());
    } else {
        println!("   Fluxo líquido:    {}", net.red());
    }

    println!();
    println!(
        "   {:<12} {:>16} {:>16} {:>16} {:>16}",
        "Mês".bold(),
        "Receitas".bold(),
        "Despesas".bold(),
        "Outros".bold(),
        "Saldo".bold()
    );
    for r in records {
        println!(
            "   {:<12} {:>16} {:>16} {:>16} {:>16}",
            r.month,
            format_brl(r.revenue),
            format_brl(r.expense),
            format_brl(r.other),
            format_brl(r.balance)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(month: &str, revenue: f64, expense: f64, other: f64) -> CashflowRecord {
        CashflowRecord::new(month.to_string(), revenue, expense, other)
    }

    #[test]
    fn test_summarize_totals() {
        let records = vec![
            rec("JAN/2025", 1000.0, 400.0, -50.0),
            rec("FEV/2025", 1200.0, 600.0, 0.0),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.months, 2);
        assert_eq!(summary.total_revenue, 2200.0);
        assert_eq!(summary.total_expense, 1000.0);
        assert_eq!(summary.total_other, -50.0);
        assert_eq!(summary.net_flow, 1150.0);
    }

    #[test]
    fn test_net_flow_equals_sum_of_balances() {
        let records = vec![
            rec("JAN/2025", 10.0, 3.0, 1.0),
            rec("FEV/2025", 20.0, 7.0, -2.0),
        ];
        let summary = summarize(&records);
        let balances: f64 = records.iter().map(|r| r.balance).sum();
        assert_eq!(summary.net_flow, balances);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.months, 0);
        assert_eq!(summary.net_flow, 0.0);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(500.0), "R$ 500,00");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(-300.25), "-R$ 300,25");
    }

    #[test]
    fn test_format_brl_rounds_to_cents() {
        assert_eq!(format_brl(0.005), "R$ 0,01");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
    }
}
