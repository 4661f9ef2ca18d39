use serde::{Deserialize, Serialize};
use veranda_shared::OfferId;

/// How an offer's total price is derived from the guest's selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingModel {
    PerStay,
    PerPerson,
    PerNight,
}

impl PricingModel {
    /// Translation key for the displayed unit label.
    ///
    /// Label text lives in the caller's translation tables; the engine
    /// only hands out stable keys.
    pub fn unit_key(&self) -> &'static str {
        match self {
            PricingModel::PerStay => "offers.unit.per_stay",
            PricingModel::PerPerson => "offers.unit.per_person",
            PricingModel::PerNight => "offers.unit.per_night",
        }
    }
}

/// A bookable add-on service with a fixed pricing model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub base_price: f64,
    pub pricing_model: PricingModel,
    pub requires_date_selection: bool,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Offer {
    pub fn new(
        id: impl Into<OfferId>,
        title: impl Into<String>,
        base_price: f64,
        pricing_model: PricingModel,
        requires_date_selection: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            base_price,
            pricing_model,
            requires_date_selection,
            metadata: serde_json::json!({}),
        }
    }

    /// Whether the title marks this as an all-inclusive package.
    ///
    /// All-inclusive offers start active for the whole stay and can only
    /// be removed, not incremented up from zero.
    pub fn is_all_inclusive(&self) -> bool {
        self.title.to_lowercase().replace('-', " ").contains("all inclusive")
    }

    /// `PerNight` offers always need a concrete start/end pair, whatever
    /// `requires_date_selection` says.
    pub fn needs_date_range(&self) -> bool {
        self.pricing_model == PricingModel::PerNight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_inclusive_is_detected_from_title() {
        let offer = Offer::new(1, "All Inclusive Package", 120.0, PricingModel::PerPerson, false);
        assert!(offer.is_all_inclusive());

        let hyphenated = Offer::new(2, "Summer all-inclusive deal", 99.0, PricingModel::PerStay, false);
        assert!(hyphenated.is_all_inclusive());

        let plain = Offer::new(3, "Airport Shuttle", 30.0, PricingModel::PerStay, false);
        assert!(!plain.is_all_inclusive());
    }

    #[test]
    fn test_per_night_always_needs_a_range() {
        let offer = Offer::new(4, "Crib Rental", 15.0, PricingModel::PerNight, false);
        assert!(offer.needs_date_range());
    }

    #[test]
    fn test_pricing_model_serde_tags() {
        assert_eq!(
            serde_json::to_string(&PricingModel::PerNight).unwrap(),
            "\"PER_NIGHT\""
        );
        let model: PricingModel = serde_json::from_str("\"PER_PERSON\"").unwrap();
        assert_eq!(model, PricingModel::PerPerson);
    }
}
