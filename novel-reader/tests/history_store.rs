use chrono::Duration;
use novel_reader::history::{HistoryEntry, HistoryStore, DEFAULT_CAPACITY};
use novel_reader::storage::{CookieBackend, MemoryCookieJar, MemoryStorage, StorageBackend};
use novel_reader::SiteConfig;

fn book(n: usize) -> HistoryEntry {
    HistoryEntry::new(
        n.to_string(),
        format!("/read/{}/100.html", n),
        format!("Novel {}", n),
        format!("Chapter {}", n % 7 + 1),
        "Liu Cixin",
        format!("/files/article/image/{}/{}s.jpg", n / 1000, n),
    )
}

fn check_round_trip<B: StorageBackend>(store: &HistoryStore<B>) {
    let entry = book(1);
    store.upsert(&entry);
    assert_eq!(store.get("1"), Some(entry.clone()));
    assert_eq!(store.get("1").unwrap().fields(), entry.fields());
    assert!(store.list().contains(&entry));
}

#[test]
fn round_trip_on_persistent_backend() {
    check_round_trip(&HistoryStore::new(MemoryStorage::new()));
}

#[test]
fn round_trip_on_cookie_backend() {
    let jar = MemoryCookieJar::new();
    check_round_trip(&HistoryStore::new(CookieBackend::new(&jar, Duration::days(360))));
}

#[test]
fn reupsert_never_grows_the_index() {
    let store = HistoryStore::new(MemoryStorage::new());
    for n in 0..5 {
        store.upsert(&book(n));
    }
    store.upsert(&book(2));
    store.upsert(&book(2));
    assert_eq!(store.len(), 5);
    assert_eq!(store.identifiers().last().map(String::as_str), Some("2"));
}

#[test]
fn capacity_evicts_in_insertion_order() {
    let store = HistoryStore::new(MemoryStorage::new());
    for n in 0..DEFAULT_CAPACITY + 25 {
        store.upsert(&book(n));
        assert!(store.len() <= DEFAULT_CAPACITY);
    }
    let ids = store.identifiers();
    assert_eq!(ids.len(), DEFAULT_CAPACITY);
    assert_eq!(ids[0], "25");
    assert_eq!(store.get("24"), None);
    assert!(store.get("25").is_some());
}

#[test]
fn refreshing_old_entry_protects_it_from_eviction() {
    let store = HistoryStore::with_capacity(MemoryStorage::new(), 3);
    store.upsert(&book(1));
    store.upsert(&book(2));
    store.upsert(&book(3));
    store.upsert(&book(1));
    store.upsert(&book(4));
    assert_eq!(store.identifiers(), vec!["3", "1", "4"]);
}

#[test]
fn lowered_capacity_is_enforced_on_reupsert() {
    let storage = MemoryStorage::new();
    let roomy = HistoryStore::with_capacity(&storage, 10);
    for n in 0..8 {
        roomy.upsert(&book(n));
    }

    let config = SiteConfig {
        history_capacity: 5,
        ..SiteConfig::default()
    };
    let tight = HistoryStore::from_config(&storage, &config);
    tight.upsert(&book(6));
    assert_eq!(tight.identifiers(), vec!["3", "4", "5", "7", "6"]);
    assert_eq!(tight.get("0"), None);
    assert_eq!(tight.get("bookList"), None);
}

#[test]
fn remove_then_get_is_empty() {
    let store = HistoryStore::new(MemoryStorage::new());
    store.upsert(&book(1));
    store.upsert(&book(2));
    store.remove("1");
    assert_eq!(store.get("1"), None);
    assert!(store.list().iter().all(|e| e.bid != "1"));
    assert_eq!(store.len(), 1);
}

#[test]
fn clear_then_list_is_empty() {
    let persistent = HistoryStore::new(MemoryStorage::new());
    persistent.upsert(&book(1));
    persistent.clear();
    assert!(persistent.list().is_empty());

    let jar = MemoryCookieJar::new();
    let cookies = HistoryStore::new(CookieBackend::new(&jar, Duration::days(360)));
    cookies.upsert(&book(1));
    cookies.upsert(&book(2));
    cookies.clear();
    assert!(cookies.list().is_empty());
    assert!(jar.is_empty());
}

#[test]
fn index_and_records_stay_consistent() {
    let storage = MemoryStorage::new();
    let store = HistoryStore::with_capacity(&storage, 4);
    for n in [1, 2, 3, 2, 4, 5, 6, 1] {
        store.upsert(&book(n));
    }
    store.remove("5");
    let ids = store.identifiers();
    let mut expected_keys: Vec<String> = ids.clone();
    expected_keys.push("bookList".to_string());
    expected_keys.sort();
    assert_eq!(storage.keys(), expected_keys);
    for id in ids {
        assert!(store.get(&id).is_some());
    }
}

#[test]
fn delimiter_inside_fields_is_out_of_contract() {
    let store = HistoryStore::new(MemoryStorage::new());

    // A '#' in the cover URL survives because it is the last field.
    let mut cover = book(1);
    cover.img_url = "/cover.jpg#v2".to_string();
    store.upsert(&cover);
    assert_eq!(store.get("1"), Some(cover));

    // A '#' earlier in the record shifts the later fields.
    let mut title = book(2);
    title.book_name = "C# in Depth".to_string();
    store.upsert(&title);
    let read_back = store.get("2").unwrap();
    assert_eq!(read_back.book_name, "C");
    assert_ne!(read_back, title);

    // A '#' in the identifier would split the index, so it is refused.
    let mut id = book(3);
    id.bid = "3#4".to_string();
    store.upsert(&id);
    assert_eq!(store.len(), 2);
}
