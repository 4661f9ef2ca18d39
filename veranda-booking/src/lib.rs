pub mod ledger;
pub mod manager;
pub mod models;
pub mod selection;

pub use ledger::BookingLedger;
pub use manager::{validate, BookOutcome, BookingManager, ToggleOutcome, ValidationError};
pub use models::OfferData;
pub use selection::{Selection, SelectionStore};
