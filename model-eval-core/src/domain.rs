pub mod samples;
pub mod hypothesis;
pub mod interval;
pub mod comparison;
pub mod config;

pub use samples::*;
pub use hypothesis::*;
pub use interval::*;
pub use comparison::*;
pub use config::*;
