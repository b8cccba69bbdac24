//! Small pure helpers used by the models and stores.

pub mod format;
pub mod ids;
pub mod sync;

// Re-export commonly used functions at module level
pub use format::{capitalize, contains_ignore_case, join_type_names};
pub use ids::{add_ids, id_from_resource_url};
