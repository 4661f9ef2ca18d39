pub mod offer;
pub mod pricing;

pub use offer::{Offer, PricingModel};
pub use pricing::{PricingConfig, PricingEngine, Quote, QuoteContext};
