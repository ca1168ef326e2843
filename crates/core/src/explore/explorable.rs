//! Field access for the collections shown on explore screens.

use rust_decimal::Decimal;

use super::{FieldValue, InvestmentPosition, PropertyListing};
use crate::funding::funding_progress;
use crate::ledger::FinancialEvent;

/// An item that can be filtered, sorted, and grouped.
pub trait Explorable {
    /// Texts matched by free-text search (name, location, sponsor).
    fn search_texts(&self) -> Vec<&str>;

    fn category(&self) -> Option<&str>;

    fn status_label(&self) -> Option<&str>;

    /// Named field lookup; `None` when the item has no such value.
    fn field(&self, name: &str) -> Option<FieldValue>;

    fn risk_score(&self) -> Option<Decimal> {
        None
    }
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_string()))
}

impl Explorable for PropertyListing {
    fn search_texts(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.location.as_str(), self.sponsor.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.property_type.as_str())
    }

    fn status_label(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.as_str())
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => text(&self.id),
            "name" => text(&self.name),
            "location" => text(&self.location),
            "sponsor" => text(&self.sponsor),
            "propertyType" => text(&self.property_type),
            "status" => self.status_label().and_then(text),
            "riskScore" => self.risk_score.map(FieldValue::Number),
            "targetReturnPct" => self.target_return_pct.map(FieldValue::Number),
            "minimumInvestment" => self.minimum_investment.map(FieldValue::Number),
            "currentFunding" => Some(FieldValue::Number(self.funding.current_funding)),
            "targetFunding" => Some(FieldValue::Number(self.funding.target_funding)),
            "fundingProgress" => Some(FieldValue::Number(funding_progress(&self.funding))),
            "fundingDeadline" => self.funding.funding_deadline.map(FieldValue::Date),
            _ => None,
        }
    }

    fn risk_score(&self) -> Option<Decimal> {
        self.risk_score
    }
}

impl Explorable for InvestmentPosition {
    fn search_texts(&self) -> Vec<&str> {
        vec![
            self.property_name.as_str(),
            self.location.as_str(),
            self.sponsor.as_str(),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.property_type.as_str())
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => text(&self.id),
            "propertyName" | "name" => text(&self.property_name),
            "location" => text(&self.location),
            "sponsor" => text(&self.sponsor),
            "propertyType" => text(&self.property_type),
            "status" => text(&self.status),
            "riskScore" => self.risk_score.map(FieldValue::Number),
            "amountInvested" => Some(FieldValue::Number(self.amount_invested)),
            "currentValue" => Some(FieldValue::Number(self.current_value)),
            "gain" => Some(FieldValue::Number(self.current_value - self.amount_invested)),
            "investedAt" => Some(FieldValue::Date(self.invested_at)),
            _ => None,
        }
    }

    fn risk_score(&self) -> Option<Decimal> {
        self.risk_score
    }
}

impl Explorable for FinancialEvent {
    fn search_texts(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.investment_id.as_str(),
            self.event_type.as_str(),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.event_type.as_str())
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => text(&self.id),
            "investmentId" => text(&self.investment_id),
            "type" => text(self.event_type.as_str()),
            "status" => text(self.status.as_str()),
            "amount" => Some(FieldValue::Number(self.amount)),
            "absAmount" => Some(FieldValue::Number(self.abs_amount())),
            "occurredAt" => Some(FieldValue::Date(self.occurred_at)),
            _ => None,
        }
    }
}
