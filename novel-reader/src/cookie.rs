//! Cookie string helpers.
//!
//! Browsers expose cookies as a single `document.cookie` string that is read
//! as `k1=v1; k2=v2` and written one assignment at a time. These helpers build
//! and parse that format without touching any browser API.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

/// Date format used in `expires=` attributes.
pub const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes attached to a cookie assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct CookieOptions {
    /// Lifetime from now. `None` writes a session cookie.
    pub max_age: Option<Duration>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            max_age: None,
            path: Some("/".to_string()),
            domain: None,
            secure: false,
            same_site: Some(SameSite::Lax),
        }
    }
}

impl CookieOptions {
    /// Root-scoped cookie that lives for `lifetime`.
    pub fn persistent(lifetime: Duration) -> Self {
        Self {
            max_age: Some(lifetime),
            ..Self::default()
        }
    }
}

pub fn expires_at(now: DateTime<Utc>, lifetime: Duration) -> String {
    (now + lifetime).format(EXPIRES_FORMAT).to_string()
}

/// Build a `document.cookie` assignment. Key and value are percent-encoded.
pub fn build_assignment(
    key: &str,
    value: &str,
    options: &CookieOptions,
    now: DateTime<Utc>,
) -> String {
    let mut cookie = format!(
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(value)
    );
    if let Some(lifetime) = options.max_age {
        cookie.push_str("; expires=");
        cookie.push_str(&expires_at(now, lifetime));
    }
    if let Some(path) = &options.path {
        cookie.push_str("; path=");
        cookie.push_str(path);
    }
    if let Some(domain) = &options.domain {
        cookie.push_str("; domain=");
        cookie.push_str(domain);
    }
    if options.secure {
        cookie.push_str("; secure");
    }
    if let Some(same_site) = options.same_site {
        cookie.push_str("; SameSite=");
        cookie.push_str(same_site.as_str());
    }
    cookie
}

/// Assignment that makes the browser drop `key` under `path`.
pub fn expired_assignment(key: &str, path: &str, now: DateTime<Utc>) -> String {
    let options = CookieOptions {
        max_age: Some(Duration::days(-1)),
        path: Some(path.to_string()),
        ..CookieOptions::default()
    };
    build_assignment(key, "", &options, now)
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Parse a `k1=v1; k2=v2` cookie string into decoded pairs.
///
/// Segments without `=` are ignored. When a name repeats, the first
/// occurrence wins, as with `document.cookie` lookups.
pub fn parse_cookies(cookie_string: &str) -> BTreeMap<String, String> {
    let mut cookies = BTreeMap::new();
    for segment in cookie_string.split(';') {
        let segment = segment.trim();
        let Some((key, value)) = segment.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        cookies
            .entry(decode(key))
            .or_insert_with(|| decode(value.trim()));
    }
    cookies
}

/// Look up one cookie by name.
pub fn get_cookie(cookie_string: &str, key: &str) -> Option<String> {
    parse_cookies(cookie_string).remove(key)
}

/// True when the session cookie is present and non-empty.
pub fn is_signed_in(cookie_string: &str, session_cookie: &str) -> bool {
    get_cookie(cookie_string, session_cookie).is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_build_assignment_defaults() {
        let cookie = build_assignment("theme", "dark", &CookieOptions::default(), fixed_now());
        assert_eq!(cookie, "theme=dark; path=/; SameSite=Lax");
    }

    #[test]
    fn test_build_assignment_persistent() {
        let options = CookieOptions::persistent(Duration::days(360));
        let cookie = build_assignment("bookList", "1#2", &options, fixed_now());
        assert_eq!(
            cookie,
            "bookList=1%232; expires=Wed, 13 Oct 2027 12:00:00 GMT; path=/; SameSite=Lax"
        );
    }

    #[test]
    fn test_build_assignment_all_attributes() {
        let options = CookieOptions {
            max_age: None,
            path: None,
            domain: Some("example.com".to_string()),
            secure: true,
            same_site: Some(SameSite::Strict),
        };
        let cookie = build_assignment("k", "v", &options, fixed_now());
        assert_eq!(cookie, "k=v; domain=example.com; secure; SameSite=Strict");
    }

    #[test]
    fn test_expired_assignment_is_in_the_past() {
        let cookie = expired_assignment("k", "/", fixed_now());
        assert!(cookie.starts_with("k=; expires=Sat, 17 Oct 2026"));
        assert!(cookie.contains("path=/"));
    }

    #[test]
    fn test_parse_cookies_decodes() {
        let cookies = parse_cookies("a=1; name=%E4%B9%A6%23x; broken; =skip");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["a"], "1");
        assert_eq!(cookies["name"], "书#x");
    }

    #[test]
    fn test_parse_cookies_first_wins() {
        assert_eq!(get_cookie("k=first; k=second", "k").as_deref(), Some("first"));
    }

    #[test]
    fn test_get_cookie_exact_name() {
        let cookies = "ss_userid2=9; ss_userid=42";
        assert_eq!(get_cookie(cookies, "ss_userid").as_deref(), Some("42"));
        assert_eq!(get_cookie(cookies, "userid"), None);
    }

    #[test]
    fn test_malformed_escape_kept_raw() {
        assert_eq!(get_cookie("k=%E4%B9", "k").as_deref(), Some("%E4%B9"));
    }

    #[test]
    fn test_is_signed_in() {
        assert!(is_signed_in("ss_userid=42; ss_username=bob", "ss_userid"));
        assert!(!is_signed_in("ss_userid=", "ss_userid"));
        assert!(!is_signed_in("", "ss_userid"));
    }
}
