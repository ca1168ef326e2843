//! Ledger domain models.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ContractViolation;

/// Kind of money movement recorded against an investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Contribution,
    CapitalCall,
    DistributionIncome,
    ReturnOfCapital,
    Withdrawal,
    FeeMgmt,
    FeeTxn,
    Dividend,
    Interest,
    SaleProceeds,
    TaxWithholding,
    TaxRefund,
    Adjustment,
}

impl EventType {
    pub const ALL_TYPES: [EventType; 13] = [
        EventType::Contribution,
        EventType::CapitalCall,
        EventType::DistributionIncome,
        EventType::ReturnOfCapital,
        EventType::Withdrawal,
        EventType::FeeMgmt,
        EventType::FeeTxn,
        EventType::Dividend,
        EventType::Interest,
        EventType::SaleProceeds,
        EventType::TaxWithholding,
        EventType::TaxRefund,
        EventType::Adjustment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Contribution => "contribution",
            EventType::CapitalCall => "capital_call",
            EventType::DistributionIncome => "distribution_income",
            EventType::ReturnOfCapital => "return_of_capital",
            EventType::Withdrawal => "withdrawal",
            EventType::FeeMgmt => "fee_mgmt",
            EventType::FeeTxn => "fee_txn",
            EventType::Dividend => "dividend",
            EventType::Interest => "interest",
            EventType::SaleProceeds => "sale_proceeds",
            EventType::TaxWithholding => "tax_withholding",
            EventType::TaxRefund => "tax_refund",
            EventType::Adjustment => "adjustment",
        }
    }
}

impl FromStr for EventType {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL_TYPES
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ContractViolation::UnknownEventType(s.to_string()))
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ledger lifecycle of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Posted, // Settled, always counted
    Pending, // Awaiting settlement, counted only when configured
    Failed,
    Reversed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Posted => "posted",
            EventStatus::Pending => "pending",
            EventStatus::Failed => "failed",
            EventStatus::Reversed => "reversed",
        }
    }
}

impl FromStr for EventStatus {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posted" => Ok(EventStatus::Posted),
            "pending" => Ok(EventStatus::Pending),
            "failed" => Ok(EventStatus::Failed),
            "reversed" => Ok(EventStatus::Reversed),
            other => Err(ContractViolation::UnknownEventStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time-stamped money movement. Immutable once posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEvent {
    pub id: String,
    pub investment_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Signed as delivered by the source; classification uses the magnitude.
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub status: EventStatus,
}

impl FinancialEvent {
    pub fn new(
        id: impl Into<String>,
        investment_id: impl Into<String>,
        event_type: EventType,
        amount: Decimal,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            investment_id: investment_id.into(),
            event_type,
            amount,
            occurred_at,
            status: EventStatus::Posted,
        }
    }

    /// Magnitude used by every aggregation.
    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }
}

/// Direction of a money movement from the investor's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowDirection {
    Inflow,
    Outflow,
}

/// Reporting sub-category. Not every event type has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowCategory {
    Contribution,
    Distribution,
    Fee,
    Tax,
}

/// Totals over a set of classified events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowTotals {
    pub total_inflows: Decimal,
    pub total_outflows: Decimal,
    pub total_contributions: Decimal,
    pub total_distributions: Decimal,
    pub total_fees: Decimal,
    /// Withholding minus refunds; the only signed combination.
    pub taxes_withheld: Decimal,
    pub net_cash_flow: Decimal,
}

/// One calendar month of cash flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    /// First day of the month
    pub month: NaiveDate,
    /// "YYYY-MM"
    pub label: String,
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub net_flow: Decimal,
    pub running_balance: Decimal,
    pub event_count: u32,
}

/// Realized result of one exited position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionGain {
    pub investment_id: String,
    pub contributions: Decimal,
    pub distributions: Decimal,
    pub sale_proceeds: Decimal,
    pub gain: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedGains {
    pub total: Decimal,
    /// Exited positions ordered by investment id
    pub positions: Vec<PositionGain>,
}
