//! Cookie-encoded storage backend.

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::{BackendKind, StorageBackend};
use crate::cookie::{self, CookieOptions};

/// Access to a `document.cookie`-style string.
pub trait CookieSource {
    /// The visible cookies as `k1=v1; k2=v2`.
    fn read(&self) -> String;
    /// Apply one cookie assignment.
    fn write(&self, assignment: &str);
}

/// Storage backend that keeps each key in its own root-scoped cookie.
pub struct CookieBackend<S> {
    source: S,
    options: CookieOptions,
}

impl<S: CookieSource> CookieBackend<S> {
    pub fn new(source: S, lifetime: Duration) -> Self {
        Self {
            source,
            options: CookieOptions::persistent(lifetime),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn path(&self) -> &str {
        self.options.path.as_deref().unwrap_or("/")
    }
}

impl<S: CookieSource> StorageBackend for CookieBackend<S> {
    fn kind(&self) -> BackendKind {
        BackendKind::Cookie
    }

    fn get(&self, key: &str) -> String {
        cookie::get_cookie(&self.source.read(), key).unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        let assignment = cookie::build_assignment(key, value, &self.options, Utc::now());
        if assignment.len() > MAX_COOKIE_BYTES {
            warn!(key, bytes = assignment.len(), "Cookie exceeds browser size limit");
        }
        self.source.write(&assignment);
    }

    fn remove(&self, key: &str) {
        self.source
            .write(&cookie::expired_assignment(key, self.path(), Utc::now()));
    }

    fn clear(&self) {
        let cookies = cookie::parse_cookies(&self.source.read());
        debug!(count = cookies.len(), "Clearing all visible cookies");
        for key in cookies.keys() {
            self.remove(key);
        }
    }
}

/// Browsers commonly cap a single cookie at 4096 bytes.
const MAX_COOKIE_BYTES: usize = 4096;

/// A [`CookieSource`] that behaves like a browser cookie jar in memory.
///
/// Assignments with an `expires` date in the past (or `max-age<=0`) delete
/// the cookie; anything else stores the raw, still-encoded pair.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RefCell<BTreeMap<String, String>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cookies.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.borrow().is_empty()
    }
}

fn is_expired(attribute: &str, now: DateTime<Utc>) -> bool {
    let (name, value) = match attribute.split_once('=') {
        Some((name, value)) => (name.trim().to_ascii_lowercase(), value.trim()),
        None => return false,
    };
    match name.as_str() {
        "expires" => DateTime::parse_from_rfc2822(value)
            .map(|at| at.with_timezone(&Utc) <= now)
            .unwrap_or(false),
        "max-age" => value.parse::<i64>().map(|age| age <= 0).unwrap_or(false),
        _ => false,
    }
}

impl CookieSource for MemoryCookieJar {
    fn read(&self) -> String {
        self.cookies
            .borrow()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, assignment: &str) {
        let mut parts = assignment.split(';');
        let Some((key, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let key = key.trim().to_string();
        let now = Utc::now();
        if parts.any(|attribute| is_expired(attribute, now)) {
            self.cookies.borrow_mut().remove(&key);
        } else {
            self.cookies
                .borrow_mut()
                .insert(key, value.trim().to_string());
        }
    }
}

impl<S: CookieSource + ?Sized> CookieSource for &S {
    fn read(&self) -> String {
        (**self).read()
    }
    fn write(&self, assignment: &str) {
        (**self).write(assignment)
    }
}
