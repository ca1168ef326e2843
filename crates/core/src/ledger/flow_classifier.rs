//! Flow classification for cash-flow reporting.
//!
//! Every [`EventType`] maps to a direction and an optional reporting
//! category through exhaustive matches, so a new event type cannot be added
//! without deciding how it is classified.
//!
//! Inflows: distribution income, return of capital, dividend, interest,
//! sale proceeds, tax refund.
//! Outflows: contribution, capital call, withdrawal, fees, tax withholding.
//! Adjustments follow the sign of their amount.

use rust_decimal::Decimal;

use super::{EventStatus, EventType, FinancialEvent, FlowCategory, FlowDirection, FlowTotals};

/// Direction of an event. Adjustments follow their sign; zero counts as inflow.
pub fn flow_direction(event: &FinancialEvent) -> FlowDirection {
    match event.event_type {
        EventType::DistributionIncome
        | EventType::ReturnOfCapital
        | EventType::Dividend
        | EventType::Interest
        | EventType::SaleProceeds
        | EventType::TaxRefund => FlowDirection::Inflow,
        EventType::Contribution
        | EventType::CapitalCall
        | EventType::Withdrawal
        | EventType::FeeMgmt
        | EventType::FeeTxn
        | EventType::TaxWithholding => FlowDirection::Outflow,
        EventType::Adjustment => {
            if event.amount < Decimal::ZERO {
                FlowDirection::Outflow
            } else {
                FlowDirection::Inflow
            }
        }
    }
}

/// Reporting category of an event type, if any.
pub fn flow_category(event_type: EventType) -> Option<FlowCategory> {
    match event_type {
        EventType::Contribution | EventType::CapitalCall => Some(FlowCategory::Contribution),
        EventType::DistributionIncome | EventType::ReturnOfCapital => {
            Some(FlowCategory::Distribution)
        }
        EventType::FeeMgmt | EventType::FeeTxn => Some(FlowCategory::Fee),
        EventType::TaxWithholding | EventType::TaxRefund => Some(FlowCategory::Tax),
        EventType::Withdrawal
        | EventType::Dividend
        | EventType::Interest
        | EventType::SaleProceeds
        | EventType::Adjustment => None,
    }
}

/// Whether an event's status lets it into calculations.
pub fn is_counted(status: EventStatus, include_pending: bool) -> bool {
    match status {
        EventStatus::Posted => true,
        EventStatus::Pending => include_pending,
        EventStatus::Failed | EventStatus::Reversed => false,
    }
}

/// Keeps the events whose status counts toward calculations.
pub fn counted_events(events: &[FinancialEvent], include_pending: bool) -> Vec<FinancialEvent> {
    events
        .iter()
        .filter(|event| is_counted(event.status, include_pending))
        .cloned()
        .collect()
}

/// Events partitioned by direction and by reporting category.
///
/// `inflows` and `outflows` together hold every input event exactly once;
/// the category buckets are views over the same events.
#[derive(Debug, Default)]
pub struct FlowPartition<'a> {
    pub inflows: Vec<&'a FinancialEvent>,
    pub outflows: Vec<&'a FinancialEvent>,
    pub contributions: Vec<&'a FinancialEvent>,
    pub distributions: Vec<&'a FinancialEvent>,
    pub fees: Vec<&'a FinancialEvent>,
    pub taxes: Vec<&'a FinancialEvent>,
}

impl FlowPartition<'_> {
    pub fn totals(&self) -> FlowTotals {
        let total_inflows = sum_abs(&self.inflows);
        let total_outflows = sum_abs(&self.outflows);

        let (withheld, refunded) =
            self.taxes
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(w, r), event| {
                    match event.event_type {
                        EventType::TaxRefund => (w, r.saturating_add(event.abs_amount())),
                        _ => (w.saturating_add(event.abs_amount()), r),
                    }
                });

        FlowTotals {
            total_inflows,
            total_outflows,
            total_contributions: sum_abs(&self.contributions),
            total_distributions: sum_abs(&self.distributions),
            total_fees: sum_abs(&self.fees),
            taxes_withheld: withheld - refunded,
            net_cash_flow: total_inflows - total_outflows,
        }
    }
}

/// Sum of magnitudes, saturating at the `Decimal` range.
fn sum_abs(events: &[&FinancialEvent]) -> Decimal {
    events
        .iter()
        .fold(Decimal::ZERO, |sum, event| sum.saturating_add(event.abs_amount()))
}

/// Partitions events by direction and category. Status is not inspected;
/// use [`counted_events`] first when only settled events should count.
pub fn classify(events: &[FinancialEvent]) -> FlowPartition<'_> {
    let mut partition = FlowPartition::default();
    for event in events {
        match flow_direction(event) {
            FlowDirection::Inflow => partition.inflows.push(event),
            FlowDirection::Outflow => partition.outflows.push(event),
        }
        match flow_category(event.event_type) {
            Some(FlowCategory::Contribution) => partition.contributions.push(event),
            Some(FlowCategory::Distribution) => partition.distributions.push(event),
            Some(FlowCategory::Fee) => partition.fees.push(event),
            Some(FlowCategory::Tax) => partition.taxes.push(event),
            None => {}
        }
    }
    partition
}
