//! Data models shared between the CLI layer, the quote service and the
//! provider boundary.

pub mod price;
pub mod request;

pub use price::PricePoint;
pub use request::QuoteRequest;
