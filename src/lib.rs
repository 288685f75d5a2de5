// Library exports for the CLI and integration tests
pub mod annotation;
pub mod config;
pub mod constants;
pub mod error;
pub mod feedback;
pub mod html;
pub mod markup;
pub mod omission;
pub mod reinsert;
pub mod separators;
pub mod span_diff;
pub mod substitution;
pub mod transcript;

pub use error::FeedbackError;
pub use feedback::{Feedback, compare};
