//! Bookshelf add/remove buttons.

use leptos::prelude::*;
use leptos::task::spawn_local;
use novel_reader::api::{AddBookshelfRequest, FormRequest, RemoveBookshelfRequest, SubmitError};

use crate::api::client::submit;
use crate::components::toast::{show_toast, ToastMessage, ToastType};
use crate::dom;

fn report(
    toasts: RwSignal<Vec<ToastMessage>>,
    notify: bool,
    success_message: &str,
    result: &Result<(), SubmitError>,
) {
    if !notify {
        return;
    }
    match result {
        Ok(()) => show_toast(toasts, success_message, ToastType::Success),
        Err(e) => show_toast(toasts, &e.to_string(), ToastType::Error),
    }
}

#[component]
pub fn AddBookshelfButton(
    request: AddBookshelfRequest,
    toasts: RwSignal<Vec<ToastMessage>>,
    /// Show a toast with the outcome.
    #[prop(default = true)]
    notify: bool,
) -> impl IntoView {
    let is_busy = RwSignal::new(false);
    let added = RwSignal::new(false);

    let on_click = move |_| {
        let request = request.clone();
        is_busy.set(true);
        spawn_local(async move {
            let result = submit(&request).await;
            added.set(result.is_ok());
            report(toasts, notify, AddBookshelfRequest::ACTION.success_message(), &result);
            is_busy.set(false);
        });
    };

    view! {
        <button
            class="bookshelf-btn"
            class:added=move || added.get()
            disabled=move || is_busy.get()
            on:click=on_click
        >
            {move || if added.get() { "On bookshelf" } else { "Add to bookshelf" }}
        </button>
    }
}

#[component]
pub fn RemoveBookshelfButton(
    case_id: u64,
    toasts: RwSignal<Vec<ToastMessage>>,
    #[prop(default = true)]
    notify: bool,
) -> impl IntoView {
    let is_busy = RwSignal::new(false);

    let on_click = move |_| {
        is_busy.set(true);
        spawn_local(async move {
            let result = submit(&RemoveBookshelfRequest { case_id }).await;
            report(toasts, notify, RemoveBookshelfRequest::ACTION.success_message(), &result);
            is_busy.set(false);
            if result.is_ok() {
                dom::reload();
            }
        });
    };

    view! {
        <button class="bookshelf-btn remove" disabled=move || is_busy.get() on:click=on_click>
            "Remove"
        </button>
    }
}
