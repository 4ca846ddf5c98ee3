//! Reading history page.

use leptos::prelude::*;
use novel_reader::HistoryEntry;

use crate::components::toast::{show_toast, ToastMessage, ToastType};
use crate::storage;

/// History entries, most recent first.
fn load_entries() -> Vec<HistoryEntry> {
    let mut entries = storage::open_history().list();
    entries.reverse();
    entries
}

#[component]
pub fn HistoryList(toasts: RwSignal<Vec<ToastMessage>>) -> impl IntoView {
    let entries = RwSignal::new(load_entries());

    let on_remove = Callback::new(move |bid: String| {
        storage::open_history().remove(&bid);
        entries.set(load_entries());
    });

    let on_clear = move |_| {
        storage::open_history().clear();
        entries.set(Vec::new());
        show_toast(toasts, "Reading history cleared", ToastType::Info);
    };

    view! {
        <div class="history-section">
            <div class="history-header">
                <h3 class="section-title">"Reading history"</h3>
                <Show when=move || !entries.get().is_empty()>
                    <button class="history-btn clear-btn" on:click=on_clear>
                        "Clear all"
                    </button>
                </Show>
            </div>
            <div class="history-list">
                {move || {
                    let entries_vec = entries.get();
                    if entries_vec.is_empty() {
                        view! { <p class="history-empty">"No reading history yet"</p> }.into_any()
                    } else {
                        entries_vec.into_iter().map(|entry| {
                            view! { <HistoryItem entry=entry on_remove=on_remove /> }
                        }).collect_view().into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn HistoryItem(
    entry: HistoryEntry,
    #[prop(into)] on_remove: Callback<String>,
) -> impl IntoView {
    let bid = entry.bid.clone();

    view! {
        <div class="history-entry novel-card">
            <a href=entry.uri.clone() class="history-cover">
                <img src=entry.img_url.clone() alt=entry.book_name.clone() loading="lazy" />
            </a>
            <div class="history-entry-info">
                <a href=entry.uri.clone() class="history-title">{entry.book_name.clone()}</a>
                <div class="history-entry-meta">
                    <span class="history-author">{entry.author.clone()}</span>
                    " · "
                    <span class="history-chapter">{entry.chapter_name.clone()}</span>
                </div>
                <div class="history-entry-actions">
                    <a href=entry.uri class="history-btn continue-btn">"Continue reading"</a>
                    <button
                        class="history-btn delete-btn"
                        on:click=move |_| on_remove.run(bid.clone())
                        title="Remove from history"
                    >
                        "Remove"
                    </button>
                </div>
            </div>
        </div>
    }
}
