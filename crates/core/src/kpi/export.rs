//! CSV export of KPI and cash-flow view models.
//!
//! Values are written as locale-free decimals rounded to display precision.

use csv::{Terminator, Writer, WriterBuilder};
use rust_decimal::Decimal;

use super::KpiBundle;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::ledger::{FlowTotals, MonthlyBucket};

fn writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn format_decimal(value: Decimal) -> String {
    value.round_dp(DISPLAY_DECIMAL_PRECISION).to_string()
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}

/// `metric,value` header followed by one row per KPI.
pub fn kpi_bundle_to_csv(bundle: &KpiBundle) -> Result<String> {
    let mut wtr = writer();
    wtr.write_record(["metric", "value"])?;
    for (key, value) in bundle.rounded().entries() {
        wtr.write_record([key, value.to_string().as_str()])?;
    }
    finish(wtr)
}

/// `category,value` header followed by one row per cash-flow total.
pub fn flow_totals_to_csv(totals: &FlowTotals) -> Result<String> {
    let rows = [
        ("totalInflows", totals.total_inflows),
        ("totalOutflows", totals.total_outflows),
        ("totalContributions", totals.total_contributions),
        ("totalDistributions", totals.total_distributions),
        ("totalFees", totals.total_fees),
        ("taxesWithheld", totals.taxes_withheld),
        ("netCashFlow", totals.net_cash_flow),
    ];
    let mut wtr = writer();
    wtr.write_record(["category", "value"])?;
    for (key, value) in rows {
        wtr.write_record([key, format_decimal(value).as_str()])?;
    }
    finish(wtr)
}

/// One row per month with the running balance.
pub fn monthly_buckets_to_csv(buckets: &[MonthlyBucket]) -> Result<String> {
    let mut wtr = writer();
    wtr.write_record(["month", "inflow", "outflow", "netFlow", "runningBalance"])?;
    for bucket in buckets {
        wtr.write_record([
            bucket.label.clone(),
            format_decimal(bucket.inflow),
            format_decimal(bucket.outflow),
            format_decimal(bucket.net_flow),
            format_decimal(bucket.running_balance),
        ])?;
    }
    finish(wtr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kpi_bundle_csv() {
        let bundle = KpiBundle {
            net_cash_flow: dec!(-455),
            total_contributions: dec!(1500),
            total_distributions: dec!(200),
            total_fees: dec!(25),
            realized_gains: dec!(100),
            taxes_withheld: dec!(30),
            moic: dec!(0.533333),
            dpi: dec!(0.133333),
            tvpi: dec!(0.533333),
            net_return_pct: dec!(-46.666667),
        };
        let csv = kpi_bundle_to_csv(&bundle).unwrap();
        let expected = "metric,value\n\
            netCashFlow,-455\n\
            totalContributions,1500\n\
            totalDistributions,200\n\
            totalFees,25\n\
            realizedGains,100\n\
            taxesWithheld,30\n\
            moic,0.53\n\
            dpi,0.13\n\
            tvpi,0.53\n\
            netReturnPct,-46.67\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_monthly_buckets_csv() {
        let buckets = vec![MonthlyBucket {
            month: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            label: "2024-01".to_string(),
            inflow: dec!(100.5),
            outflow: dec!(0),
            net_flow: dec!(100.5),
            running_balance: dec!(100.5),
            event_count: 1,
        }];
        let csv = monthly_buckets_to_csv(&buckets).unwrap();
        assert_eq!(
            csv,
            "month,inflow,outflow,netFlow,runningBalance\n2024-01,100.5,0,100.5,100.5\n"
        );
    }

    #[test]
    fn test_flow_totals_csv_has_header_and_seven_rows() {
        let csv = flow_totals_to_csv(&FlowTotals::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "category,value");
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[7], "netCashFlow,0");
    }
}
