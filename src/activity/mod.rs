pub mod types;
pub mod validate;

pub use types::{ActivityEntry, ActivityLog, UserActivity};
pub use validate::validate_entry;
