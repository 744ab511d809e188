use std::sync::Arc;

use crate::assistant::Assistant;
use crate::exam::store::BankStore;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BankStore>,
    pub assistant: Assistant,
}

impl FromRef<AppState> for Arc<BankStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Assistant {
    fn from_ref(state: &AppState) -> Self {
        state.assistant.clone()
    }
}
