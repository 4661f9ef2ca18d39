use crate::offer::{Offer, PricingModel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use veranda_shared::date_key;

/// Snapshot of the selection fields that feed a quote.
///
/// Pricing only needs the counts and the date span, so callers hand over
/// this trimmed view instead of the full mutable selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteContext {
    pub quantity: u32,
    pub persons: u32,
    pub nights: u32,
    pub date_span: Option<(NaiveDate, NaiveDate)>,
}

impl QuoteContext {
    /// Nights to bill for a per-night offer: the whole-day span of the
    /// selected range when both ends are set, else the stored night
    /// count, else a single night. A degenerate range bills zero nights.
    pub fn billable_nights(&self) -> i64 {
        if let Some((start, end)) = self.date_span {
            return date_key::days_between(start, end).max(0);
        }
        if self.nights > 0 {
            return i64::from(self.nights);
        }
        1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Commission share shown to the agent, informational only.
    pub commission_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            commission_rate: 0.10,
        }
    }
}

/// A priced-out offer under its current selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// Translation key for the unit label ("per night", ...).
    pub unit_key: String,
    pub total: f64,
    /// Display commission, rounded to two decimals. Not part of the
    /// committed total.
    pub commission: f64,
}

/// Computes totals and display commission for offers
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Quote an offer under the given selection snapshot.
    pub fn quote(&self, offer: &Offer, context: &QuoteContext) -> Quote {
        let total = self.total(offer, context);
        Quote {
            unit_key: offer.pricing_model.unit_key().to_string(),
            total,
            commission: self.commission(total),
        }
    }

    /// Total price for the offer; never negative.
    pub fn total(&self, offer: &Offer, context: &QuoteContext) -> f64 {
        match offer.pricing_model {
            PricingModel::PerStay => offer.base_price * f64::from(context.quantity.max(1)),
            PricingModel::PerPerson => {
                offer.base_price * f64::from(context.persons) * f64::from(context.quantity.max(1))
            }
            PricingModel::PerNight => offer.base_price * context.billable_nights() as f64,
        }
    }

    /// Display commission on a total, rounded to two decimals.
    pub fn commission(&self, total: f64) -> f64 {
        round_to_cents(total * self.config.commission_rate)
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
