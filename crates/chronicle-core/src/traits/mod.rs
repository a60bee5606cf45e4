//! Core traits for remotes, sessions and progress reporting.

mod community;
mod pages;
mod progress;
mod remote;
mod session;

pub use community::{Channel, Community};
pub use pages::{Order, Pages};
pub use progress::{NoProgress, Phase, Progress, Unit};
pub use remote::Remote;
pub use session::Session;
