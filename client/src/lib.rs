pub mod config;
pub mod context;
pub mod send;
pub mod transport;

pub use config::ClientConfig;
pub use context::{AsyncTgClient, SyncClientGuard, SyncTgClient};
pub use send::{AsyncSend, SyncSend};
