use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::flow_classifier::flow_category;
use super::{EventType, FinancialEvent, FlowCategory, PositionGain, RealizedGains};

#[derive(Default)]
struct PositionTotals {
    contributions: Decimal,
    distributions: Decimal,
    sale_proceeds: Decimal,
    has_sale: bool,
}

/// Realized gains over exited positions.
///
/// A position is exited once it has at least one sale-proceeds event. Its
/// gain is distributions plus sale proceeds minus contributions, using only
/// its own events. Open positions contribute nothing.
pub fn realized_gains(events: &[FinancialEvent]) -> RealizedGains {
    let mut by_investment: BTreeMap<&str, PositionTotals> = BTreeMap::new();

    for event in events {
        let totals = by_investment.entry(event.investment_id.as_str()).or_default();
        if event.event_type == EventType::SaleProceeds {
            totals.sale_proceeds = totals.sale_proceeds.saturating_add(event.abs_amount());
            totals.has_sale = true;
            continue;
        }
        match flow_category(event.event_type) {
            Some(FlowCategory::Contribution) => {
                totals.contributions = totals.contributions.saturating_add(event.abs_amount())
            }
            Some(FlowCategory::Distribution) => {
                totals.distributions = totals.distributions.saturating_add(event.abs_amount())
            }
            Some(FlowCategory::Fee) | Some(FlowCategory::Tax) | None => {}
        }
    }

    let positions: Vec<PositionGain> = by_investment
        .into_iter()
        .filter(|(_, totals)| totals.has_sale)
        .map(|(investment_id, totals)| PositionGain {
            investment_id: investment_id.to_string(),
            contributions: totals.contributions,
            distributions: totals.distributions,
            sale_proceeds: totals.sale_proceeds,
            gain: totals
                .distributions
                .saturating_add(totals.sale_proceeds)
                .saturating_sub(totals.contributions),
        })
        .collect();

    RealizedGains {
        total: positions
            .iter()
            .fold(Decimal::ZERO, |sum, p| sum.saturating_add(p.gain)),
        positions,
    }
}
