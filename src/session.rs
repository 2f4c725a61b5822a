//! The one piece of state that survives a page load: a hint that the next
//! load was started by clicking a link inside the site.

use log::debug;
use web_sys::Storage;

use crate::config::CLIENT_NAVIGATION_KEY;
use crate::motion::dom::{self, DomError};

pub trait FlagStore {
    fn is_set(&self) -> bool;
    fn set(&self);
    fn clear(&self);
}

/// Reads the flag and clears it, so it applies to exactly one load.
pub fn take_flag(store: &impl FlagStore) -> bool {
    let present = store.is_set();
    if present {
        store.clear();
    }
    present
}

/// `sessionStorage`-backed flag. Storage failures read as "not set".
pub struct SessionFlag {
    storage: Option<Storage>,
    key: &'static str,
}

impl SessionFlag {
    pub fn client_navigation() -> Self {
        let storage = dom::window()
            .and_then(|w| w.session_storage().map_err(|e| DomError::js("sessionStorage", e)))
            .map_err(|e| debug!("session storage unavailable: {}", e))
            .ok()
            .flatten();
        Self {
            storage,
            key: CLIENT_NAVIGATION_KEY,
        }
    }
}

impl FlagStore for SessionFlag {
    fn is_set(&self) -> bool {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(self.key).ok().flatten())
            .is_some()
    }

    fn set(&self) {
        if let Some(storage) = &self.storage {
            dom::log_failure(
                storage
                    .set_item(self.key, "true")
                    .map_err(|e| DomError::js("sessionStorage.setItem", e)),
            );
        }
    }

    fn clear(&self) {
        if let Some(storage) = &self.storage {
            dom::log_failure(
                storage
                    .remove_item(self.key)
                    .map_err(|e| DomError::js("sessionStorage.removeItem", e)),
            );
        }
    }
}

/// Marks the load about to happen as in-app navigation.
pub fn mark_client_navigation() {
    SessionFlag::client_navigation().set();
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryFlag;
    use super::*;

    #[test]
    fn flag_applies_to_one_load_only() {
        let flag = MemoryFlag::default();
        assert!(!take_flag(&flag));

        flag.set();
        assert!(take_flag(&flag));
        assert!(!take_flag(&flag));
    }
}
