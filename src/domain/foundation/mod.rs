//! Foundation module - shared value objects.

mod ids;
mod percentage;
mod timestamp;

pub use ids::SessionId;
pub use percentage::Percentage;
pub use timestamp::Timestamp;
