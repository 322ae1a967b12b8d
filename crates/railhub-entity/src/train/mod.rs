//! Train entity.

pub mod model;

pub use model::{CreateTrain, Train};
