//! Mounts the interactive pieces into the server-rendered page.
//!
//! Pages are rendered by the server; each widget is mounted into the element
//! that asks for it, configured from that element's `data-*` attributes:
//!
//! | element                       | widget                  |
//! |-------------------------------|-------------------------|
//! | `header .login`               | account links           |
//! | `[data-menu-for]`             | mobile menu button      |
//! | `[data-sort-for]`             | category dropdown       |
//! | `#history-root`               | reading history         |
//! | `#login-root`                 | login form              |
//! | `#register-root`              | registration form       |
//! | `[data-bookshelf-add]`        | add-to-bookshelf button |
//! | `[data-bookshelf-remove]`     | remove-from-bookshelf   |
//! | `#reader-root`                | chapter page controls   |

use leptos::prelude::*;
use novel_reader::api::AddBookshelfRequest;
use novel_reader::HistoryEntry;
use tracing::{debug, warn};
use web_sys::HtmlElement;

use crate::components::{
    AccountLinks, AddBookshelfButton, HistoryList, LoginPanel, MobileMenu, ReaderControls,
    RegisterPanel, RemoveBookshelfButton, SortDropdown, ToastContainer, ToastMessage,
};
use crate::dom;
use crate::storage;

fn mount<F, N>(parent: HtmlElement, view: F)
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos::mount::mount_to(parent, view).forget();
}

/// Record the chapter being read, described by `#reader-root`.
fn record_reading(root: &HtmlElement) {
    let uri = dom::data(root, "uri").or_else(|| {
        web_sys::window().and_then(|w| w.location().pathname().ok())
    });
    let field = |key: &str| dom::data(root, key).unwrap_or_default();
    let entry = HistoryEntry::new(
        field("bid"),
        uri.unwrap_or_default(),
        field("bookName"),
        field("chapterName"),
        field("author"),
        field("cover"),
    );
    storage::open_history().upsert(&entry);
}

fn add_bookshelf_request(el: &HtmlElement) -> Option<AddBookshelfRequest> {
    let article_id = dom::data(el, "articleId")?.parse().ok()?;
    Some(AddBookshelfRequest {
        article_id,
        article_name: dom::data(el, "articleName").unwrap_or_default(),
        chapter_id: dom::data(el, "chapterId").and_then(|id| id.parse().ok()),
        chapter_name: dom::data(el, "chapterName").unwrap_or_default(),
    })
}

fn notify(el: &HtmlElement) -> bool {
    dom::data(el, "notify").as_deref() != Some("false")
}

pub fn mount_islands() {
    let toasts = RwSignal::new(Vec::<ToastMessage>::new());

    if let Some(body) = dom::document().and_then(|d| d.body()) {
        mount(body, move || view! { <ToastContainer toasts=toasts /> });
    }

    let signed_in = storage::is_signed_in();
    for el in dom::query_all("header .login") {
        el.set_inner_html("");
        mount(el, move || view! { <AccountLinks signed_in=signed_in /> });
    }

    for el in dom::query_all("[data-menu-for]") {
        if let Some(menu_id) = dom::data(&el, "menuFor") {
            mount(el, move || view! { <MobileMenu menu_id=menu_id /> });
        }
    }

    for el in dom::query_all("[data-sort-for]") {
        if let Some(content_id) = dom::data(&el, "sortFor") {
            let label = dom::data(&el, "sortLabel").unwrap_or_else(|| "Category".to_string());
            mount(el, move || view! { <SortDropdown label=label content_id=content_id /> });
        }
    }

    if let Some(el) = dom::element_by_id("history-root") {
        mount(el, move || view! { <HistoryList toasts=toasts /> });
    }

    if let Some(el) = dom::element_by_id("login-root") {
        let redirect_to = dom::data(&el, "redirect").unwrap_or_else(|| "/".to_string());
        mount(el, move || view! { <LoginPanel toasts=toasts redirect_to=redirect_to /> });
    }

    if let Some(el) = dom::element_by_id("register-root") {
        let redirect_to = dom::data(&el, "redirect").unwrap_or_else(|| "/".to_string());
        mount(el, move || view! { <RegisterPanel toasts=toasts redirect_to=redirect_to /> });
    }

    for el in dom::query_all("[data-bookshelf-add]") {
        let Some(request) = add_bookshelf_request(&el) else {
            warn!("Bookshelf button without a valid data-article-id");
            continue;
        };
        let notify = notify(&el);
        mount(el, move || {
            view! { <AddBookshelfButton request=request toasts=toasts notify=notify /> }
        });
    }

    for el in dom::query_all("[data-bookshelf-remove]") {
        let Some(case_id) = dom::data(&el, "bookshelfRemove").and_then(|id| id.parse().ok())
        else {
            warn!("Remove button without a valid case id");
            continue;
        };
        let notify = notify(&el);
        mount(el, move || {
            view! { <RemoveBookshelfButton case_id=case_id toasts=toasts notify=notify /> }
        });
    }

    if let Some(el) = dom::element_by_id("reader-root") {
        record_reading(&el);
        mount(el, ReaderControls);
    }

    debug!("Mounted page widgets");
}
