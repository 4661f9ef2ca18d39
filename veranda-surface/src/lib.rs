pub mod app_config;
pub mod carousel;
pub mod surface;

pub use app_config::SurfaceConfig;
pub use carousel::Carousel;
pub use surface::{CommitSink, OfferSurface};
