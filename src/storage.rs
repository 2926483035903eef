//! Browser Token Storage

use taskflow_client::TokenStore;
use tracing::warn;

/// Access token persisted in `window.localStorage`
///
/// Holds no JS handles, so it is `Send + Sync`; storage is looked up per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, token: &str) {
        let Some(storage) = local_storage() else {
            warn!("localStorage unavailable, token not persisted");
            return;
        };
        if let Err(e) = storage.set_item(key, token) {
            warn!(error = ?e, "failed to persist token");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(key) {
                warn!(error = ?e, "failed to remove token");
            }
        }
    }
}
