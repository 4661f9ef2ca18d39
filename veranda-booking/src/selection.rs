use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use veranda_catalog::{Offer, PricingModel, QuoteContext};
use veranda_shared::{OfferId, ReservationContext};

/// The guest's mutable input state for one offer, prior to commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub quantity: u32,
    #[serde(default = "one")]
    pub persons: u32,
    #[serde(default = "one")]
    pub nights: u32,
    #[serde(default)]
    pub selected_date: Option<NaiveDate>,
    /// Kept sorted ascending by calendar day.
    #[serde(default)]
    pub selected_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

fn one() -> u32 {
    1
}

impl Selection {
    /// Type-appropriate defaults for an offer under a reservation.
    ///
    /// All-inclusive offers start active for the full stay; everything
    /// else starts at quantity zero with single-unit counts.
    pub fn default_for(offer: &Offer, context: &ReservationContext) -> Self {
        let all_inclusive = offer.is_all_inclusive();
        Self {
            quantity: if all_inclusive { 1 } else { 0 },
            persons: if offer.pricing_model == PricingModel::PerPerson {
                context.person_count.max(1)
            } else {
                1
            },
            nights: if offer.pricing_model == PricingModel::PerNight || all_inclusive {
                context.nights()
            } else {
                1
            },
            selected_date: None,
            selected_dates: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }

    /// Snapshot for the pricing engine.
    pub fn quote_context(&self) -> QuoteContext {
        QuoteContext {
            quantity: self.quantity,
            persons: self.persons,
            nights: self.nights,
            date_span: match (self.start_date, self.end_date) {
                (Some(start), Some(end)) => Some((start, end)),
                _ => None,
            },
        }
    }
}

/// Owns the per-offer selection map for one rendering of the offer surface.
///
/// All mutations are keyed by offer id with no cross-offer side effects;
/// operations on ids that were never seeded are defensive no-ops.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selections: HashMap<OfferId, Selection>,
    /// Caller-provided cap on multi-date picks; additions beyond it are
    /// silently ignored.
    max_selected_dates: Option<usize>,
}

impl SelectionStore {
    pub fn new(max_selected_dates: Option<usize>) -> Self {
        Self {
            selections: HashMap::new(),
            max_selected_dates,
        }
    }

    /// Seed one selection per offer, preferring caller-supplied initial
    /// values over the derived defaults. Replaces any prior state.
    pub fn seed(
        &mut self,
        offers: &[Offer],
        context: &ReservationContext,
        initial: Option<&HashMap<OfferId, Selection>>,
    ) {
        self.selections = offers
            .iter()
            .map(|offer| {
                let selection = initial
                    .and_then(|map| map.get(&offer.id).cloned())
                    .unwrap_or_else(|| Selection::default_for(offer, context));
                (offer.id.clone(), selection)
            })
            .collect();
    }

    /// Re-seed for a changed offer list: selections for surviving ids are
    /// kept, new ids get defaults, removed ids are dropped.
    pub fn reseed(&mut self, offers: &[Offer], context: &ReservationContext) {
        let previous = std::mem::take(&mut self.selections);
        self.selections = offers
            .iter()
            .map(|offer| {
                let selection = previous
                    .get(&offer.id)
                    .cloned()
                    .unwrap_or_else(|| Selection::default_for(offer, context));
                (offer.id.clone(), selection)
            })
            .collect();
    }

    pub fn get(&self, id: &OfferId) -> Option<&Selection> {
        self.selections.get(id)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Bump quantity by a signed delta, saturating at zero. No upper clamp.
    pub fn adjust_quantity(&mut self, id: &OfferId, delta: i32) {
        let Some(selection) = self.selections.get_mut(id) else {
            return;
        };
        let next = i64::from(selection.quantity) + i64::from(delta);
        selection.quantity = next.max(0) as u32;
    }

    /// Replace the single selected date; clears the multi-date list.
    pub fn set_selected_date(&mut self, id: &OfferId, date: Option<NaiveDate>) {
        let Some(selection) = self.selections.get_mut(id) else {
            return;
        };
        selection.selected_date = date;
        selection.selected_dates.clear();
    }

    /// Replace the multi-date list: sorted ascending, deduplicated, and
    /// silently truncated to the cap.
    pub fn set_selected_dates(&mut self, id: &OfferId, mut dates: Vec<NaiveDate>) {
        let Some(selection) = self.selections.get_mut(id) else {
            return;
        };
        dates.sort_unstable();
        dates.dedup();
        if let Some(cap) = self.max_selected_dates {
            dates.truncate(cap);
        }
        selection.selected_dates = dates;
    }

    /// Set-membership toggle for the date picker: a picked day is removed,
    /// an unpicked day is inserted in order unless the cap is reached.
    pub fn toggle_selected_date(&mut self, id: &OfferId, day: NaiveDate) {
        let cap = self.max_selected_dates;
        let Some(selection) = self.selections.get_mut(id) else {
            return;
        };
        match selection.selected_dates.binary_search(&day) {
            Ok(position) => {
                selection.selected_dates.remove(position);
            }
            Err(position) => {
                if cap.is_some_and(|cap| selection.selected_dates.len() >= cap) {
                    return;
                }
                selection.selected_dates.insert(position, day);
            }
        }
    }

    /// Set either end of the per-night date range.
    pub fn set_date_range(
        &mut self,
        id: &OfferId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) {
        let Some(selection) = self.selections.get_mut(id) else {
            return;
        };
        selection.start_date = start;
        selection.end_date = end;
    }

    /// Restore the type-appropriate defaults for one offer.
    pub fn reset(&mut self, offer: &Offer, context: &ReservationContext) {
        if let Some(selection) = self.selections.get_mut(&offer.id) {
            *selection = Selection::default_for(offer, context);
        }
    }
}
