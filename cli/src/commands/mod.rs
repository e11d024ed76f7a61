//! Command implementations for the admin CLI.
//!
//! Each subcommand is implemented in its own module.

pub mod completions;
pub mod dashboard;
pub mod requests;
pub mod session;
pub mod table;
pub mod users;

pub use completions::generate_completions;
pub use dashboard::run_dashboard;
pub use requests::run_requests;
pub use session::{run_login, run_logout, run_whoami};
pub use users::run_users;
