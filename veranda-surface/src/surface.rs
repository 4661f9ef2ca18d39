use crate::app_config::SurfaceConfig;
use crate::carousel::Carousel;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;
use veranda_booking::{
    BookingManager, OfferData, Selection, SelectionStore, ToggleOutcome,
};
use veranda_catalog::{Offer, PricingConfig, PricingEngine, Quote};
use veranda_shared::{date_key, OfferId, ReservationContext};

/// Caller-supplied sink for every committed record.
///
/// Invoked synchronously; persistence and any async follow-up are the
/// caller's concern.
pub type CommitSink = Box<dyn FnMut(OfferData)>;

/// Coordinates one selection store and one booking manager across an
/// ordered offer list for a single rendering session.
///
/// The surface owns only the presentational carousel index on top of the
/// engine state; every domain mutation is delegated. Operations on ids
/// that are not in the offer list are warn-logged no-ops.
pub struct OfferSurface {
    session_id: Uuid,
    offers: Vec<Offer>,
    context: ReservationContext,
    config: SurfaceConfig,
    selections: SelectionStore,
    manager: BookingManager,
    carousel: Carousel,
    sink: CommitSink,
}

impl OfferSurface {
    pub fn new(
        offers: Vec<Offer>,
        context: ReservationContext,
        config: SurfaceConfig,
        sink: CommitSink,
    ) -> Self {
        Self::with_initial_selections(offers, context, config, HashMap::new(), sink)
    }

    /// Mount with caller-supplied initial selections (e.g. a draft the
    /// agent left half-finished).
    pub fn with_initial_selections(
        offers: Vec<Offer>,
        context: ReservationContext,
        config: SurfaceConfig,
        initial: HashMap<OfferId, Selection>,
        sink: CommitSink,
    ) -> Self {
        let mut selections = SelectionStore::new(config.max_selected_dates);
        selections.seed(&offers, &context, Some(&initial));

        let session_id = Uuid::new_v4();
        info!(%session_id, offers = offers.len(), "offer surface mounted");

        Self {
            session_id,
            carousel: Carousel::new(offers.len()),
            manager: BookingManager::new(PricingEngine::new(PricingConfig {
                commission_rate: config.commission_rate,
            })),
            selections,
            offers,
            context,
            config,
            sink,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn context(&self) -> &ReservationContext {
        &self.context
    }

    pub fn selection(&self, id: &OfferId) -> Option<&Selection> {
        self.selections.get(id)
    }

    pub fn is_booked(&self, id: &OfferId) -> bool {
        self.manager.ledger().is_booked(id)
    }

    /// Whether the offer's last book attempt failed validation; drives
    /// the inline hint next to the book button.
    pub fn is_attempted(&self, id: &OfferId) -> bool {
        self.manager.ledger().is_attempted(id)
    }

    /// The days of the stay, check-out excluded; what the date picker
    /// renders as selectable.
    pub fn stay_days(&self) -> Vec<NaiveDate> {
        date_key::days_in_range(self.context.check_in, self.context.check_out)
    }

    /// Price the offer's current selection for display.
    pub fn quote(&self, id: &OfferId) -> Option<Quote> {
        let offer = self.offers.iter().find(|offer| &offer.id == id)?;
        let selection = self.selections.get(id)?;
        Some(
            self.manager
                .pricing()
                .quote(offer, &selection.quote_context()),
        )
    }

    /// Sum of the totals of every booked offer, for the running-total
    /// widget.
    pub fn booked_total(&self) -> f64 {
        self.manager
            .ledger()
            .booked_ids()
            .filter_map(|id| self.quote(id))
            .map(|quote| quote.total)
            .sum()
    }

    /// The book/cancel button. Forwards every emitted record to the
    /// commit sink and reports the outcome; `None` for unknown ids.
    pub fn toggle(&mut self, id: &OfferId) -> Option<ToggleOutcome> {
        let offer = self.lookup(id)?.clone();
        let outcome = self
            .manager
            .toggle(&offer, &mut self.selections, &self.context);

        match &outcome {
            ToggleOutcome::Booked(data) => {
                info!(session_id = %self.session_id, offer_id = %id, price = data.price, "offer booked");
                (self.sink)(data.clone());
            }
            ToggleOutcome::Cancelled(data) => {
                info!(session_id = %self.session_id, offer_id = %id, "offer cancelled");
                (self.sink)(data.clone());
            }
            ToggleOutcome::Rejected(error) => {
                info!(session_id = %self.session_id, offer_id = %id, %error, "booking rejected");
            }
        }
        Some(outcome)
    }

    /// Quantity +/- control.
    pub fn adjust_quantity(&mut self, id: &OfferId, delta: i32) {
        if self.lookup(id).is_some() {
            self.selections.adjust_quantity(id, delta);
        }
    }

    /// Single-date picker callback.
    pub fn set_selected_date(&mut self, id: &OfferId, date: Option<NaiveDate>) {
        if self.lookup(id).is_some() {
            self.selections.set_selected_date(id, date);
        }
    }

    /// Multi-date picker bulk replace.
    pub fn set_selected_dates(&mut self, id: &OfferId, dates: Vec<NaiveDate>) {
        if self.lookup(id).is_some() {
            self.selections.set_selected_dates(id, dates);
        }
    }

    /// Multi-date picker day toggle.
    pub fn toggle_selected_date(&mut self, id: &OfferId, day: NaiveDate) {
        if self.lookup(id).is_some() {
            self.selections.toggle_selected_date(id, day);
        }
    }

    /// Range picker callback for per-night offers.
    pub fn set_date_range(
        &mut self,
        id: &OfferId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) {
        if self.lookup(id).is_some() {
            self.selections.set_date_range(id, start, end);
        }
    }

    /// Swap in a changed offer list: selections for surviving offers are
    /// kept, new offers get defaults, and ledger entries for removed
    /// offers are dropped without emitting.
    pub fn replace_offers(&mut self, offers: Vec<Offer>) {
        for old in &self.offers {
            if !offers.iter().any(|offer| offer.id == old.id) {
                self.manager.forget(&old.id);
            }
        }
        self.selections.reseed(&offers, &self.context);
        self.carousel.resize(offers.len());
        self.offers = offers;
    }

    /// Re-mount for a changed reservation: defaults are derived anew and
    /// the booking ledger starts fresh.
    pub fn set_context(&mut self, context: ReservationContext) {
        self.context = context;
        self.selections.seed(&self.offers, &self.context, None);
        self.manager = BookingManager::new(PricingEngine::new(PricingConfig {
            commission_rate: self.config.commission_rate,
        }));
    }

    // Carousel: purely presentational, wraps at both ends.

    pub fn current_offer(&self) -> Option<&Offer> {
        self.offers.get(self.carousel.current())
    }

    pub fn next_offer(&mut self) -> Option<&Offer> {
        let index = self.carousel.next();
        self.offers.get(index)
    }

    pub fn previous_offer(&mut self) -> Option<&Offer> {
        let index = self.carousel.previous();
        self.offers.get(index)
    }

    pub fn go_to_offer(&mut self, index: usize) -> Option<&Offer> {
        let index = self.carousel.go_to(index);
        self.offers.get(index)
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    fn lookup(&self, id: &OfferId) -> Option<&Offer> {
        let found = self.offers.iter().find(|offer| &offer.id == id);
        if found.is_none() {
            warn!(session_id = %self.session_id, offer_id = %id, "operation on unknown offer id ignored");
        }
        found
    }
}
