use skibidict_core::{AuditService, AuthService, Store, WordService};

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Every service holds a clone of the same `Store`, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub words: WordService,
    pub auth: AuthService,
    pub audit: AuditService,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            words: WordService::new(store.clone()),
            auth: AuthService::new(store.clone()),
            audit: AuditService::new(store),
        }
    }
}
