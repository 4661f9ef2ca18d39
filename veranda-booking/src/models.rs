use crate::selection::Selection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use veranda_catalog::{Offer, PricingModel};
use veranda_shared::OfferId;

/// The immutable record emitted for every commit.
///
/// A booking carries the computed total and the selection fields that
/// apply to the offer's pricing model; a cancellation carries the same
/// shape with zero price and zero quantity as the removal signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferData {
    pub id: OfferId,
    pub name: String,
    pub price: f64,
    pub base_price: f64,
    pub quantity: u32,
    pub pricing_model: PricingModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persons: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nights: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_dates: Vec<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl OfferData {
    /// Snapshot a committed selection.
    ///
    /// Quantity is overridden by the date inputs: the multi-date count
    /// when dates are picked, one when a single date is picked, the raw
    /// quantity otherwise.
    pub fn booked(offer: &Offer, selection: &Selection, price: f64) -> Self {
        let quantity = if !selection.selected_dates.is_empty() {
            selection.selected_dates.len() as u32
        } else if selection.selected_date.is_some() {
            1
        } else {
            selection.quantity
        };
        Self::from_parts(offer, selection, price, quantity)
    }

    /// The zero-quantity, zero-price removal signal.
    pub fn cancelled(offer: &Offer, selection: &Selection) -> Self {
        Self::from_parts(offer, selection, 0.0, 0)
    }

    fn from_parts(offer: &Offer, selection: &Selection, price: f64, quantity: u32) -> Self {
        let per_person = offer.pricing_model == PricingModel::PerPerson;
        let per_night = offer.pricing_model == PricingModel::PerNight;
        Self {
            id: offer.id.clone(),
            name: offer.title.clone(),
            price,
            base_price: offer.base_price,
            quantity,
            pricing_model: offer.pricing_model,
            persons: per_person.then_some(selection.persons),
            nights: per_night.then(|| selection.quote_context().billable_nights() as u32),
            selected_date: selection.selected_date,
            selected_dates: selection.selected_dates.clone(),
            start_date: selection.start_date,
            end_date: selection.end_date,
            metadata: offer.metadata.clone(),
        }
    }
}
