use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::auth::TokenSigner;
use crate::blogs::BlogStore;
use crate::config::Config;
use crate::core::db::KvStore;
use crate::users::UserStore;

/// Everything a handler needs, built once at startup and shared by reference.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<dyn KvStore>,
    pub tokens: TokenSigner,
    writes: Arc<Mutex<()>>,
}

impl AppContext {
    pub fn new(config: Config, store: Arc<dyn KvStore>) -> Self {
        let tokens = TokenSigner::new(config.secret.as_bytes());
        Self {
            config: Arc::new(config),
            store,
            tokens,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub fn blogs(&self) -> BlogStore<'_> {
        BlogStore::new(self.store.as_ref())
    }

    pub fn users(&self) -> UserStore<'_> {
        UserStore::new(self.store.as_ref())
    }

    /// Serializes read-modify-write sequences over the id indexes and the
    /// owner's blog list. Not reentrant: take it once per operation.
    pub fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.writes.lock()
    }
}
