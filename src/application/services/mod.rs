pub mod clone_target;
pub mod error_categorizer;

pub use clone_target::{repository_name, CloneTargetResolver};
pub use error_categorizer::{categorize, categorize_error};
