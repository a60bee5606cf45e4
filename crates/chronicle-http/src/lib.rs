//! chronicle-http - Discord REST remote.
//!
//! [`HttpRemote`] speaks the bot REST API: it authenticates with a bot token,
//! pages through channel histories oldest first and through audit logs
//! newest first, and resolves audit entry targets from the data each page
//! ships with.

mod client;
mod convert;
mod endpoints;
mod remote;
mod session;

pub use remote::HttpRemote;
pub use session::HttpSession;
