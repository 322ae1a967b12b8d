//! HTTP middleware.

pub mod logging;
pub mod rbac;
