use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::ProxyConfig;
use crate::session::SessionMessage;

/// What every translator gets alongside `(session, packet)`: immutable table
/// references, the frozen config, and a handle back into this session's own
/// mailbox so background work (a skin fetch, for example) can re-enter with
/// a completion message instead of blocking the pipeline loop.
#[derive(Clone)]
pub struct Context {
    pub tables: palebridge_mapping::MappingTables,
    pub config: Arc<ProxyConfig>,
    pub mailbox: mpsc::Sender<SessionMessage>,
}

impl Context {
    pub fn new(config: Arc<ProxyConfig>, mailbox: mpsc::Sender<SessionMessage>) -> Self {
        Context {
            tables: palebridge_mapping::MappingTables::default(),
            config,
            mailbox,
        }
    }

    /// Dispatches blocking or long-running work to the shared worker pool
    /// and returns a handle; translators must not await this inline, only
    /// hand it off and let the result re-enter via a completion message.
    pub fn spawn_blocking<F, T>(&self, f: F) -> tokio::task::JoinHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(f)
    }
}
