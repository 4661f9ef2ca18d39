//! Walks one agent session through the offer surface: a rejected book
//! attempt, a completed selection, a per-night range, and a cancel.
//!
//! Run with `RUST_LOG=debug cargo run --example checkout_flow`.

use chrono::NaiveDate;
use veranda_booking::ToggleOutcome;
use veranda_catalog::{Offer, PricingModel};
use veranda_shared::{date_key, OfferId, ReservationContext};
use veranda_surface::{OfferSurface, SurfaceConfig};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar day")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let context = ReservationContext::new(day(2025, 7, 10), day(2025, 7, 14), 2);
    let offers = vec![
        Offer::new(101, "Spa Day", 80.0, PricingModel::PerStay, true),
        Offer::new(102, "Crib Rental", 15.0, PricingModel::PerNight, false),
        Offer::new(103, "All Inclusive Package", 120.0, PricingModel::PerPerson, false),
    ];

    let config = SurfaceConfig::load().unwrap_or_default();
    let mut surface = OfferSurface::new(
        offers,
        context,
        config,
        Box::new(|data| {
            // Stand-in for the caller's persistence layer.
            let record = serde_json::to_string(&data).expect("offer data serializes");
            println!("  -> committed: {record}");
        }),
    );

    println!(
        "selectable days: {:?}",
        surface
            .stay_days()
            .iter()
            .map(|d| date_key::to_key(*d))
            .collect::<Vec<_>>()
    );

    let spa = OfferId::from(101);
    println!("booking the spa with no date picked:");
    if let Some(ToggleOutcome::Rejected(error)) = surface.toggle(&spa) {
        println!("  rejected: {error}");
    }

    println!("picking a day and retrying:");
    surface.set_selected_date(&spa, Some(day(2025, 7, 11)));
    surface.toggle(&spa);

    let crib = OfferId::from(102);
    println!("booking the crib for three nights:");
    surface.set_date_range(&crib, Some(day(2025, 7, 11)), Some(day(2025, 7, 14)));
    surface.toggle(&crib);

    let package = OfferId::from(103);
    println!("the all-inclusive package is on by default; booking it:");
    surface.toggle(&package);

    if let Some(quote) = surface.quote(&package) {
        println!(
            "  package quote: total {:.2}, commission {:.2} ({})",
            quote.total, quote.commission, quote.unit_key
        );
    }

    println!("running total: {:.2}", surface.booked_total());

    println!("cancelling the package:");
    surface.toggle(&package);
    println!("running total: {:.2}", surface.booked_total());
}
