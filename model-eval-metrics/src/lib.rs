//! Statistical comparison of model evaluation metrics.
//!
//! Everything here is a pure computation over `f64` samples. The only side
//! effects are `tracing` events, which are no-ops without a subscriber.

pub mod comparison;
pub mod descriptive;
pub mod distributions;
pub mod hypothesis;
pub mod interpretation;
pub mod intervals;
pub mod reporting;

pub use comparison::*;
pub use descriptive::summarize;
pub use distributions::*;
pub use hypothesis::*;
pub use interpretation::*;
pub use intervals::*;
pub use reporting::*;
