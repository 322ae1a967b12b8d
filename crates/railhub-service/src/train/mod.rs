//! Train administration and availability listing.

pub mod service;

pub use service::TrainService;
