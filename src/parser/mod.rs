//! Free-text itinerary parsing.
//!
//! Both entry points are total: malformed or empty narratives produce
//! placeholder days and default summary values instead of errors.

pub mod extract;
pub mod summary;
pub mod text;

pub use extract::extract_days;
pub use summary::synthesize_summary;

pub const DEFAULT_DAY_COUNT: u32 = 7;
pub const MAX_DAY_COUNT: u32 = 60;
