//! User accounts — registration and login.

pub mod service;

pub use service::{LoginOutcome, UserService};
