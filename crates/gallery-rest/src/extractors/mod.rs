//! Custom Axum extractors.

mod session;
mod validated;

pub use session::*;
pub use validated::*;
