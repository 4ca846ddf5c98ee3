//! Bounded reading history.
//!
//! The history lives in a [`StorageBackend`] as plain string records:
//!
//! - the index key (`bookList` by default) holds the `#`-joined identifiers
//!   in insertion order, oldest first;
//! - each identifier is itself a key holding
//!   `bid#uri#bookname#chaptername#author#img_url`.
//!
//! The index and the per-book records are always written together, so every
//! indexed identifier resolves to a record and every record is indexed.
//! Cross-tab writers are not coordinated: the last write wins.

use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::error::{ReaderError, Result};
use crate::storage::{BackendKind, StorageBackend};

/// Separator between fields of a record and between identifiers in the index.
pub const FIELD_DELIMITER: char = '#';

/// Default maximum number of books kept.
pub const DEFAULT_CAPACITY: usize = 200;

/// Default key of the identifier index.
pub const DEFAULT_INDEX_KEY: &str = "bookList";

const FIELD_COUNT: usize = 6;

/// Records with this many fields or fewer are treated as corrupt.
const MIN_VALID_FIELDS: usize = 3;

/// One book in the reading history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub bid: String,
    pub uri: String,
    pub book_name: String,
    pub chapter_name: String,
    pub author: String,
    pub img_url: String,
}

impl HistoryEntry {
    pub fn new(
        bid: impl Into<String>,
        uri: impl Into<String>,
        book_name: impl Into<String>,
        chapter_name: impl Into<String>,
        author: impl Into<String>,
        img_url: impl Into<String>,
    ) -> Self {
        Self {
            bid: bid.into(),
            uri: uri.into(),
            book_name: book_name.into(),
            chapter_name: chapter_name.into(),
            author: author.into(),
            img_url: img_url.into(),
        }
    }

    /// Fields in stored order.
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.bid,
            &self.uri,
            &self.book_name,
            &self.chapter_name,
            &self.author,
            &self.img_url,
        ]
    }

    /// Reject entries with an empty field or an identifier that would split
    /// the index.
    pub fn validate(&self) -> Result<()> {
        const NAMES: [&str; FIELD_COUNT] =
            ["bid", "uri", "bookname", "chaptername", "author", "img_url"];
        for (name, value) in NAMES.iter().zip(self.fields()) {
            if value.is_empty() {
                return Err(ReaderError::MissingField(*name));
            }
        }
        if self.bid.contains(FIELD_DELIMITER) {
            return Err(ReaderError::DelimitedIdentifier(self.bid.clone()));
        }
        Ok(())
    }

    /// Encode as a `#`-joined record.
    ///
    /// Values are not escaped. A `#` inside any field other than the last
    /// shifts the following fields when decoded.
    pub fn encode(&self) -> String {
        self.fields().join(&FIELD_DELIMITER.to_string())
    }

    /// Decode a stored record.
    ///
    /// At most six fields are split off, so a `#` inside the cover URL stays
    /// in that field. Records with three or fewer fields are corrupt and
    /// yield `None`; missing trailing fields of longer records decode empty.
    pub fn decode(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let mut fields: Vec<String> = raw
            .splitn(FIELD_COUNT, FIELD_DELIMITER)
            .map(str::to_string)
            .collect();
        if fields.len() <= MIN_VALID_FIELDS {
            return None;
        }
        fields.resize(FIELD_COUNT, String::new());
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Some(Self {
            bid: next(),
            uri: next(),
            book_name: next(),
            chapter_name: next(),
            author: next(),
            img_url: next(),
        })
    }
}

fn parse_index(raw: &str) -> Vec<String> {
    raw.split(FIELD_DELIMITER)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_index(ids: &[String]) -> String {
    ids.join(&FIELD_DELIMITER.to_string())
}

/// Most-recently-read books, bounded to a fixed capacity.
pub struct HistoryStore<B> {
    backend: B,
    index_key: String,
    capacity: usize,
}

impl<B: StorageBackend> HistoryStore<B> {
    /// Store with the default index key and capacity.
    pub fn new(backend: B) -> Self {
        Self::with_capacity(backend, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(backend: B, capacity: usize) -> Self {
        Self {
            backend,
            index_key: DEFAULT_INDEX_KEY.to_string(),
            capacity: capacity.max(1),
        }
    }

    pub fn from_config(backend: B, config: &SiteConfig) -> Self {
        Self {
            backend,
            index_key: config.history_index_key.clone(),
            capacity: config.history_capacity.max(1),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Identifiers in the index, oldest first.
    pub fn identifiers(&self) -> Vec<String> {
        parse_index(&self.backend.get(&self.index_key))
    }

    /// Number of indexed identifiers.
    pub fn len(&self) -> usize {
        self.identifiers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record a book, moving it to the most recent position.
    ///
    /// Invalid entries are ignored. Use [`HistoryStore::try_upsert`] to see
    /// why an entry was rejected.
    pub fn upsert(&self, entry: &HistoryEntry) {
        if let Err(e) = self.try_upsert(entry) {
            debug!(bid = %entry.bid, error = %e, "Ignoring history entry");
        }
    }

    /// Record a book, or report why it was rejected.
    pub fn try_upsert(&self, entry: &HistoryEntry) -> Result<()> {
        entry.validate()?;
        if entry.bid == self.index_key {
            return Err(ReaderError::ReservedIdentifier(entry.bid.clone()));
        }

        let mut ids = self.identifiers();
        if ids.iter().any(|id| *id == entry.bid) {
            self.remove(&entry.bid);
            ids = self.identifiers();
        }
        // An index written under a larger capacity is trimmed here too.
        while ids.len() >= self.capacity {
            let before = ids.len();
            let oldest = ids[0].clone();
            debug!(bid = %oldest, "Evicting oldest history entry");
            self.remove(&oldest);
            ids = self.identifiers();
            if ids.len() >= before {
                warn!(bid = %oldest, "History eviction made no progress");
                break;
            }
        }

        self.backend.set(&entry.bid, &entry.encode());
        self.index_insert(&entry.bid);
        debug!(bid = %entry.bid, "Recorded history entry");
        Ok(())
    }

    /// Append `bid` to the index, or rewrite it in place if it is still there.
    fn index_insert(&self, bid: &str) {
        let mut ids = self.identifiers();
        match ids.iter().position(|id| id == bid) {
            Some(pos) => ids[pos] = bid.to_string(),
            None => ids.push(bid.to_string()),
        }
        self.backend.set(&self.index_key, &join_index(&ids));
    }

    /// Fetch one entry.
    pub fn get(&self, bid: &str) -> Option<HistoryEntry> {
        if bid.is_empty() || bid == self.index_key || bid.contains(FIELD_DELIMITER) {
            return None;
        }
        HistoryEntry::decode(&self.backend.get(bid))
    }

    /// Drop one entry and its index reference.
    pub fn remove(&self, bid: &str) {
        if bid.is_empty() || bid == self.index_key {
            return;
        }
        self.backend.remove(bid);
        let mut ids = self.identifiers();
        let before = ids.len();
        ids.retain(|id| id != bid);
        if ids.len() != before {
            self.backend.set(&self.index_key, &join_index(&ids));
        }
    }

    /// All readable entries, oldest first. Corrupt records are skipped.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.identifiers()
            .iter()
            .filter_map(|id| {
                let entry = HistoryEntry::decode(&self.backend.get(id));
                if entry.is_none() {
                    warn!(bid = %id, "Skipping unreadable history record");
                }
                entry
            })
            .collect()
    }

    /// Forget the whole history.
    ///
    /// On a persistent backend this wipes the entire store, including keys
    /// the history does not own. On the cookie backend only indexed entries
    /// and the index itself are removed.
    pub fn clear(&self) {
        match self.backend.kind() {
            BackendKind::Persistent => {
                debug!("Clearing persistent storage");
                self.backend.clear();
            }
            BackendKind::Cookie => {
                let ids = self.identifiers();
                debug!(count = ids.len(), "Clearing cookie history");
                for id in &ids {
                    self.backend.remove(id);
                }
                self.backend.remove(&self.index_key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CookieBackend, CookieSource, MemoryCookieJar, MemoryStorage};

    fn entry(bid: &str) -> HistoryEntry {
        HistoryEntry::new(
            bid,
            format!("/book/{}/1.html", bid),
            format!("Book {}", bid),
            "Chapter 1",
            "Author",
            format!("/cover/{}.jpg", bid),
        )
    }

    #[test]
    fn test_encode_layout() {
        assert_eq!(
            entry("7").encode(),
            "7#/book/7/1.html#Book 7#Chapter 1#Author#/cover/7.jpg"
        );
    }

    #[test]
    fn test_decode_rejects_short_records() {
        assert_eq!(HistoryEntry::decode(""), None);
        assert_eq!(HistoryEntry::decode("1#2#3"), None);
        let partial = HistoryEntry::decode("1#2#3#4").unwrap();
        assert_eq!(partial.chapter_name, "4");
        assert_eq!(partial.img_url, "");
    }

    #[test]
    fn test_decode_keeps_delimiter_in_cover_url() {
        let raw = "1#/b/1#Name#Ch#Au#/c.jpg#v2";
        assert_eq!(HistoryEntry::decode(raw).unwrap().img_url, "/c.jpg#v2");
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut e = entry("1");
        e.author.clear();
        assert_eq!(e.validate(), Err(ReaderError::MissingField("author")));
        e = entry("1#2");
        assert!(matches!(
            e.validate(),
            Err(ReaderError::DelimitedIdentifier(_))
        ));
    }

    #[test]
    fn test_upsert_writes_entry_and_index() {
        let storage = MemoryStorage::new();
        let store = HistoryStore::new(&storage);
        store.upsert(&entry("1"));
        store.upsert(&entry("2"));
        assert_eq!(storage.get("bookList"), "1#2");
        assert_eq!(store.get("1"), Some(entry("1")));
    }

    #[test]
    fn test_upsert_ignores_incomplete_entry() {
        let storage = MemoryStorage::new();
        let store = HistoryStore::new(&storage);
        let mut e = entry("1");
        e.img_url.clear();
        store.upsert(&e);
        assert!(storage.is_empty());
        assert_eq!(store.try_upsert(&e), Err(ReaderError::MissingField("img_url")));
    }

    #[test]
    fn test_reupsert_moves_to_latest_and_refreshes() {
        let storage = MemoryStorage::new();
        let store = HistoryStore::new(&storage);
        store.upsert(&entry("1"));
        store.upsert(&entry("2"));
        let mut newer = entry("1");
        newer.chapter_name = "Chapter 9".to_string();
        store.upsert(&newer);
        assert_eq!(store.identifiers(), vec!["2", "1"]);
        assert_eq!(store.get("1").unwrap().chapter_name, "Chapter 9");
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let storage = MemoryStorage::new();
        let store = HistoryStore::with_capacity(&storage, 3);
        for bid in ["a", "b", "c", "d"] {
            store.upsert(&entry(bid));
        }
        assert_eq!(store.identifiers(), vec!["b", "c", "d"]);
        assert!(!storage.contains_key("a"));
    }

    #[test]
    fn test_eviction_trims_oversized_index() {
        let storage = MemoryStorage::new();
        for bid in ["a", "b", "c", "d"] {
            storage.set(bid, &entry(bid).encode());
        }
        storage.set("bookList", "a#b#c#d");
        let store = HistoryStore::with_capacity(&storage, 2);
        store.upsert(&entry("e"));
        assert_eq!(store.identifiers(), vec!["d", "e"]);
        assert_eq!(storage.len(), 3);
    }

    #[test]
    fn test_reupsert_trims_oversized_index() {
        let storage = MemoryStorage::new();
        for bid in ["0", "1", "2", "3", "4"] {
            storage.set(bid, &entry(bid).encode());
        }
        storage.set("bookList", "0#1#2#3#4");
        let store = HistoryStore::with_capacity(&storage, 3);
        store.upsert(&entry("2"));
        assert_eq!(store.identifiers(), vec!["3", "4", "2"]);
        assert!(!storage.contains_key("0"));
        assert!(!storage.contains_key("1"));
        assert_eq!(storage.len(), 4);
    }

    #[test]
    fn test_remove_matches_whole_identifier() {
        let storage = MemoryStorage::new();
        let store = HistoryStore::new(&storage);
        store.upsert(&entry("12"));
        store.upsert(&entry("123"));
        store.remove("12");
        assert_eq!(store.identifiers(), vec!["123"]);
        assert_eq!(store.get("12"), None);
        assert!(store.get("123").is_some());
    }

    #[test]
    fn test_list_skips_corrupt_records() {
        let storage = MemoryStorage::new();
        let store = HistoryStore::new(&storage);
        store.upsert(&entry("1"));
        storage.set("2", "2#broken");
        storage.set("bookList", "1#2##3");
        let listed = store.list();
        assert_eq!(listed, vec![entry("1")]);
    }

    #[test]
    fn test_clear_persistent_wipes_everything() {
        let storage = MemoryStorage::new();
        storage.set("read_settings", "{}");
        let store = HistoryStore::new(&storage);
        store.upsert(&entry("1"));
        store.clear();
        assert!(storage.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_clear_cookie_is_scoped() {
        let jar = MemoryCookieJar::new();
        jar.write("ss_userid=5; path=/");
        let store = HistoryStore::new(CookieBackend::new(&jar, chrono::Duration::days(360)));
        store.upsert(&entry("1"));
        store.upsert(&entry("2"));
        store.clear();
        assert!(store.list().is_empty());
        assert_eq!(jar.read(), "ss_userid=5");
    }

    #[test]
    fn test_index_key_is_not_an_identifier() {
        let storage = MemoryStorage::new();
        let store = HistoryStore::new(&storage);
        store.upsert(&entry("1"));
        assert!(matches!(
            store.try_upsert(&entry("bookList")),
            Err(ReaderError::ReservedIdentifier(_))
        ));
        store.remove("bookList");
        assert_eq!(store.identifiers(), vec!["1"]);
    }

    #[test]
    fn test_get_ignores_index_key_and_delimited_ids() {
        let storage = MemoryStorage::new();
        let store = HistoryStore::new(&storage);
        for bid in ["1", "2", "3", "4"] {
            store.upsert(&entry(bid));
        }
        assert_eq!(store.get("bookList"), None);
        assert_eq!(store.get("1#2"), None);
        assert_eq!(store.get("1"), Some(entry("1")));
    }

    #[test]
    fn test_custom_index_key_from_config() {
        let storage = MemoryStorage::new();
        let config = SiteConfig {
            history_index_key: "recent".to_string(),
            history_capacity: 1,
            ..SiteConfig::default()
        };
        let store = HistoryStore::from_config(&storage, &config);
        store.upsert(&entry("1"));
        store.upsert(&entry("2"));
        assert_eq!(storage.get("recent"), "2");
        assert_eq!(store.capacity(), 1);
    }
}
