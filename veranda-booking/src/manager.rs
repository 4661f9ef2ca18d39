use crate::ledger::BookingLedger;
use crate::models::OfferData;
use crate::selection::{Selection, SelectionStore};
use tracing::debug;
use veranda_catalog::{Offer, PricingEngine, PricingModel};
use veranda_shared::{OfferId, ReservationContext};

/// Why a selection cannot be committed yet.
///
/// These are recoverable, UI-visible states, not failures: the surface
/// renders a hint and the agent completes the selection and retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("quantity must be greater than zero")]
    QuantityRequired,

    #[error("date selection required")]
    DateSelectionRequired,

    #[error("date range selection required")]
    DateRangeRequired,
}

/// Outcome of a book attempt
#[derive(Debug, Clone, PartialEq)]
pub enum BookOutcome {
    Booked(OfferData),
    Rejected(ValidationError),
}

/// Outcome of the book/cancel toggle
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    Booked(OfferData),
    Cancelled(OfferData),
    Rejected(ValidationError),
}

/// Check a selection against the offer's required inputs.
///
/// Rules, in order: offers priced by count need a non-zero quantity,
/// date-gated offers need at least one picked day, per-night offers need
/// both ends of the range.
pub fn validate(offer: &Offer, selection: &Selection) -> Result<(), ValidationError> {
    if offer.pricing_model != PricingModel::PerNight
        && !offer.requires_date_selection
        && selection.quantity == 0
    {
        return Err(ValidationError::QuantityRequired);
    }

    if offer.requires_date_selection
        && selection.selected_date.is_none()
        && selection.selected_dates.is_empty()
    {
        return Err(ValidationError::DateSelectionRequired);
    }

    if offer.needs_date_range() && (selection.start_date.is_none() || selection.end_date.is_none())
    {
        return Err(ValidationError::DateRangeRequired);
    }

    Ok(())
}

/// Drives each offer between proposed and booked.
///
/// Transitions: `Proposed -> (validate) -> Booked`, and
/// `Booked -> (cancel) -> Proposed` with the selection restored to its
/// type-appropriate default. Emitted records are returned to the caller,
/// which owns any side effects.
pub struct BookingManager {
    pricing: PricingEngine,
    ledger: BookingLedger,
}

impl BookingManager {
    pub fn new(pricing: PricingEngine) -> Self {
        Self {
            pricing,
            ledger: BookingLedger::new(),
        }
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    pub fn pricing(&self) -> &PricingEngine {
        &self.pricing
    }

    /// Validate and commit the offer's current selection.
    ///
    /// A rejection records the id in the attempted set and reports the
    /// rule that failed; nothing is committed.
    pub fn book(
        &mut self,
        offer: &Offer,
        selections: &SelectionStore,
        context: &ReservationContext,
    ) -> BookOutcome {
        let fallback;
        let selection = match selections.get(&offer.id) {
            Some(selection) => selection,
            None => {
                fallback = Selection::default_for(offer, context);
                &fallback
            }
        };

        if let Err(error) = validate(offer, selection) {
            self.ledger.mark_attempted(offer.id.clone());
            debug!(offer_id = %offer.id, %error, "book attempt rejected");
            return BookOutcome::Rejected(error);
        }

        let price = self.pricing.total(offer, &selection.quote_context());
        let data = OfferData::booked(offer, selection, price);
        self.ledger.mark_booked(offer.id.clone());
        debug!(offer_id = %offer.id, price, "offer booked");
        BookOutcome::Booked(data)
    }

    /// Return the offer to proposed: drop it from both ledger sets, reset
    /// its selection to defaults, and emit the removal record.
    ///
    /// Safe to call on an offer that is not booked; the ledger is
    /// untouched and the selection still resets.
    pub fn cancel(
        &mut self,
        offer: &Offer,
        selections: &mut SelectionStore,
        context: &ReservationContext,
    ) -> OfferData {
        self.ledger.clear(&offer.id);
        selections.reset(offer, context);

        let restored = selections
            .get(&offer.id)
            .cloned()
            .unwrap_or_else(|| Selection::default_for(offer, context));
        debug!(offer_id = %offer.id, "offer cancelled");
        OfferData::cancelled(offer, &restored)
    }

    /// The single operation behind the surface's book/cancel button.
    pub fn toggle(
        &mut self,
        offer: &Offer,
        selections: &mut SelectionStore,
        context: &ReservationContext,
    ) -> ToggleOutcome {
        if self.ledger.is_booked(&offer.id) {
            ToggleOutcome::Cancelled(self.cancel(offer, selections, context))
        } else {
            match self.book(offer, selections, context) {
                BookOutcome::Booked(data) => ToggleOutcome::Booked(data),
                BookOutcome::Rejected(error) => ToggleOutcome::Rejected(error),
            }
        }
    }

    /// Drop ledger entries for an offer that left the list, without
    /// emitting anything.
    pub fn forget(&mut self, id: &OfferId) {
        self.ledger.clear(id);
    }
}

impl Default for BookingManager {
    fn default() -> Self {
        Self::new(PricingEngine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn context() -> ReservationContext {
        ReservationContext::new(day(2025, 7, 10), day(2025, 7, 14), 3)
    }

    fn store_for(offers: &[Offer]) -> SelectionStore {
        let mut store = SelectionStore::new(None);
        store.seed(offers, &context(), None);
        store
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let offer = Offer::new(1, "Parking", 12.0, PricingModel::PerStay, false);
        let selection = Selection::default_for(&offer, &context());
        assert_eq!(
            validate(&offer, &selection),
            Err(ValidationError::QuantityRequired)
        );
    }

    #[test]
    fn test_date_gated_offer_needs_a_day() {
        let offer = Offer::new(1, "Spa Day", 80.0, PricingModel::PerStay, true);
        let mut selection = Selection::default_for(&offer, &context());
        selection.quantity = 1;
        assert_eq!(
            validate(&offer, &selection),
            Err(ValidationError::DateSelectionRequired)
        );

        selection.selected_date = Some(day(2025, 7, 11));
        assert_eq!(validate(&offer, &selection), Ok(()));
    }

    #[test]
    fn test_per_night_offer_needs_both_range_ends() {
        let offer = Offer::new(1, "Crib Rental", 15.0, PricingModel::PerNight, false);
        let mut selection = Selection::default_for(&offer, &context());
        assert_eq!(
            validate(&offer, &selection),
            Err(ValidationError::DateRangeRequired)
        );

        selection.start_date = Some(day(2025, 7, 10));
        assert_eq!(
            validate(&offer, &selection),
            Err(ValidationError::DateRangeRequired)
        );

        selection.end_date = Some(day(2025, 7, 13));
        assert_eq!(validate(&offer, &selection), Ok(()));
    }

    #[test]
    fn test_rejected_book_lands_in_attempted_not_booked() {
        let offer = Offer::new(1, "Spa Day", 80.0, PricingModel::PerStay, true);
        let offers = vec![offer.clone()];
        let mut store = store_for(&offers);
        store.adjust_quantity(&offer.id, 1);

        let mut manager = BookingManager::default();
        let outcome = manager.book(&offer, &store, &context());

        assert!(matches!(outcome, BookOutcome::Rejected(ValidationError::DateSelectionRequired)));
        assert!(!manager.ledger().is_booked(&offer.id));
        assert!(manager.ledger().is_attempted(&offer.id));
    }

    #[test]
    fn test_successful_book_clears_attempted_and_prices_the_record() {
        let offer = Offer::new(1, "Spa Day", 80.0, PricingModel::PerStay, true);
        let offers = vec![offer.clone()];
        let mut store = store_for(&offers);
        let mut manager = BookingManager::default();

        // First attempt fails, second succeeds after picking a day.
        manager.book(&offer, &store, &context());
        store.set_selected_date(&offer.id, Some(day(2025, 7, 11)));

        match manager.book(&offer, &store, &context()) {
            BookOutcome::Booked(data) => {
                assert_eq!(data.quantity, 1);
                assert_eq!(data.price, 80.0);
            }
            BookOutcome::Rejected(error) => panic!("unexpected rejection: {error}"),
        }
        assert!(manager.ledger().is_booked(&offer.id));
        assert!(!manager.ledger().is_attempted(&offer.id));
    }

    #[test]
    fn test_cancel_resets_selection_and_emits_zero_signal() {
        let offer = Offer::new(1, "Breakfast", 20.0, PricingModel::PerPerson, false);
        let offers = vec![offer.clone()];
        let mut store = store_for(&offers);
        store.adjust_quantity(&offer.id, 2);

        let mut manager = BookingManager::default();
        assert!(matches!(
            manager.book(&offer, &store, &context()),
            BookOutcome::Booked(_)
        ));

        let removal = manager.cancel(&offer, &mut store, &context());
        assert_eq!(removal.quantity, 0);
        assert_eq!(removal.price, 0.0);
        assert!(!manager.ledger().is_booked(&offer.id));
        assert_eq!(store.get(&offer.id).unwrap().quantity, 0);
    }

    #[test]
    fn test_cancel_is_idempotent_on_unbooked_offers() {
        let offer = Offer::new(1, "Parking", 12.0, PricingModel::PerStay, false);
        let offers = vec![offer.clone()];
        let mut store = store_for(&offers);
        store.adjust_quantity(&offer.id, 3);

        let mut manager = BookingManager::default();
        let before = manager.ledger().clone();
        manager.cancel(&offer, &mut store, &context());

        assert_eq!(manager.ledger(), &before);
        // The selection still resets to its default.
        assert_eq!(store.get(&offer.id).unwrap().quantity, 0);
    }

    #[test]
    fn test_toggle_twice_restores_defaults_not_prior_selection() {
        let offer = Offer::new(1, "Breakfast", 20.0, PricingModel::PerPerson, false);
        let offers = vec![offer.clone()];
        let mut store = store_for(&offers);
        store.adjust_quantity(&offer.id, 4);

        let mut manager = BookingManager::default();
        assert!(matches!(
            manager.toggle(&offer, &mut store, &context()),
            ToggleOutcome::Booked(_)
        ));
        assert!(matches!(
            manager.toggle(&offer, &mut store, &context()),
            ToggleOutcome::Cancelled(_)
        ));

        assert!(!manager.ledger().is_booked(&offer.id));
        let restored = store.get(&offer.id).unwrap();
        assert_eq!(restored, &Selection::default_for(&offer, &context()));
    }

    #[test]
    fn test_multi_date_booking_prices_and_counts_per_day() {
        let offer = Offer::new(1, "Spa Day", 80.0, PricingModel::PerStay, true);
        let offers = vec![offer.clone()];
        let mut store = store_for(&offers);
        store.set_selected_dates(&offer.id, vec![day(2025, 7, 11), day(2025, 7, 12)]);

        let mut manager = BookingManager::default();
        match manager.book(&offer, &store, &context()) {
            BookOutcome::Booked(data) => {
                // Quantity comes from the picked-day count; the stay-level
                // price still follows the pricing model.
                assert_eq!(data.quantity, 2);
                assert_eq!(data.selected_dates, vec![day(2025, 7, 11), day(2025, 7, 12)]);
            }
            BookOutcome::Rejected(error) => panic!("unexpected rejection: {error}"),
        }
    }

    #[test]
    fn test_unknown_selection_falls_back_to_defaults() {
        let offer = Offer::new(1, "Parking", 12.0, PricingModel::PerStay, false);
        let store = SelectionStore::new(None); // never seeded
        let mut manager = BookingManager::default();

        let outcome = manager.book(&offer, &store, &context());
        assert!(matches!(
            outcome,
            BookOutcome::Rejected(ValidationError::QuantityRequired)
        ));
        assert!(manager.ledger().is_attempted(&OfferId::from(1)));
    }
}
