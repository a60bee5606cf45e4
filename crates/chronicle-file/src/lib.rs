//! chronicle-file - Snapshot-directory remote.
//!
//! A snapshot is a directory of raw guild data:
//!
//! ```text
//! <root>/guild.json                  {id, name, channels}
//! <root>/messages/<channelId>.json   raw messages
//! <root>/audit_logs/<action>.json    raw audit entries
//! <root>/token                       optional expected credential
//! ```
//!
//! Missing history files read as empty histories.

mod remote;
mod session;
mod store;

pub use remote::FileRemote;
pub use session::FileSession;
pub use store::{SnapshotGuild, SnapshotStore};
