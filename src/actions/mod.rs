//! Framework-agnostic gateway operations.
//!
//! Each action wraps one backend call and resolves every path to a
//! structured result; the HTTP adapters only translate those results.

mod check_status;
mod login;
mod logout;

pub use check_status::CheckStatusAction;
pub use login::{LoginAction, LoginSuccess};
pub use logout::LogoutAction;
