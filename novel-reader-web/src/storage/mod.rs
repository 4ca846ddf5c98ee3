//! Browser storage backends.
//!
//! localStorage is preferred; when the browser has none (or blocks it) the
//! history falls back to cookies. The choice is made once per page.

use std::rc::Rc;

use gloo_storage::Storage;
use novel_reader::cookie;
use novel_reader::settings::{ReaderSettings, SETTINGS_KEY};
use novel_reader::storage::{CookieBackend, CookieSource, MemoryStorage};
use novel_reader::{BackendKind, HistoryStore, StorageBackend};
use once_cell::sync::OnceCell;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;

use crate::config;

static BACKEND_KIND: OnceCell<Option<BackendKind>> = OnceCell::new();

/// `window.localStorage` through gloo's raw handle.
pub struct WebStorage;

impl WebStorage {
    /// Feature-detect localStorage without panicking when it is missing.
    pub fn available() -> bool {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .is_some()
    }
}

impl StorageBackend for WebStorage {
    fn kind(&self) -> BackendKind {
        BackendKind::Persistent
    }

    fn get(&self, key: &str) -> String {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = gloo_storage::LocalStorage::raw().set_item(key, value) {
            warn!(key, error = ?e, "localStorage write failed");
        }
    }

    fn remove(&self, key: &str) {
        gloo_storage::LocalStorage::delete(key);
    }

    fn clear(&self) {
        gloo_storage::LocalStorage::clear();
    }
}

/// `document.cookie` of the current page.
pub struct DocumentCookies {
    document: web_sys::HtmlDocument,
}

impl DocumentCookies {
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?
            .document()?
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()?;
        Some(Self { document })
    }
}

impl CookieSource for DocumentCookies {
    fn read(&self) -> String {
        self.document.cookie().unwrap_or_default()
    }

    fn write(&self, assignment: &str) {
        if let Err(e) = self.document.set_cookie(assignment) {
            warn!(error = ?e, "Cookie write failed");
        }
    }
}

fn backend_kind() -> Option<BackendKind> {
    *BACKEND_KIND.get_or_init(|| {
        if WebStorage::available() {
            Some(BackendKind::Persistent)
        } else if DocumentCookies::new().is_some() {
            debug!("localStorage unavailable, storing history in cookies");
            Some(BackendKind::Cookie)
        } else {
            None
        }
    })
}

/// The storage backend chosen for this page.
pub fn backend() -> Rc<dyn StorageBackend> {
    let lifetime = config::site().cookie_lifetime();
    match backend_kind() {
        Some(BackendKind::Persistent) => Rc::new(WebStorage),
        Some(BackendKind::Cookie) => match DocumentCookies::new() {
            Some(cookies) => Rc::new(CookieBackend::new(cookies, lifetime)),
            None => Rc::new(MemoryStorage::new()),
        },
        None => {
            warn!("No browser storage available, history will not persist");
            Rc::new(MemoryStorage::new())
        }
    }
}

/// Reading history on the selected backend.
pub fn open_history() -> HistoryStore<Rc<dyn StorageBackend>> {
    HistoryStore::from_config(backend(), config::site())
}

pub fn load_settings() -> ReaderSettings {
    ReaderSettings::load(Some(&backend().get(SETTINGS_KEY)))
}

pub fn save_settings(settings: &ReaderSettings) {
    backend().set(SETTINGS_KEY, &settings.to_json());
}

/// Whether the visitor holds a session cookie.
pub fn is_signed_in() -> bool {
    DocumentCookies::new()
        .map(|cookies| cookie::is_signed_in(&cookies.read(), &config::site().session_cookie))
        .unwrap_or(false)
}
