pub mod basic_auth;
pub mod file_status;

pub use basic_auth::BasicAuth;
pub use file_status::{ChangeState, FileStatus};
