use std::sync::Arc;

use qm_auth::{AccessGuard, AuthProvider, TokenCodec};
use qm_ledger::{IssueLedger, PurchaseLedger, QueryService};
use qm_store::InventoryStore;

/// Shared state handed to every request handler.
///
/// All fields are cheap clones over the same `Arc`'d store, so the
/// ledgers, the query service, and the guard always observe one
/// consistent world.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub purchases: PurchaseLedger,
    pub issues: IssueLedger,
    pub query: QueryService,
    pub guard: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(store: Arc<dyn InventoryStore>, codec: TokenCodec) -> Self {
        Self {
            purchases: PurchaseLedger::new(store.clone()),
            issues: IssueLedger::new(store.clone()),
            query: QueryService::new(store.clone()),
            guard: Arc::new(AccessGuard::new(codec, store.clone())),
            store,
        }
    }
}
