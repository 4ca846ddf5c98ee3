//! Toast notifications.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastType {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct ToastMessage {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

static TOAST_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn next_toast_id() -> usize {
    TOAST_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Show a toast that dismisses itself after the configured duration.
pub fn show_toast(toasts: RwSignal<Vec<ToastMessage>>, message: &str, toast_type: ToastType) {
    let id = next_toast_id();

    toasts.update(|t| {
        t.push(ToastMessage {
            id,
            message: message.to_string(),
            toast_type,
        });
    });

    let duration = config::site().toast_duration_ms;
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(duration).await;
        toasts.update(|t| t.retain(|m| m.id != id));
    });
}

#[component]
pub fn ToastContainer(toasts: RwSignal<Vec<ToastMessage>>) -> impl IntoView {
    view! {
        <div class="toast-container" id="globalTip">
            {move || toasts.get().into_iter().map(|toast| {
                let id = toast.id;
                let class = match toast.toast_type {
                    ToastType::Success => "toast show success",
                    ToastType::Error => "toast show error",
                    ToastType::Info => "toast show info",
                };

                view! {
                    <div
                        class=class
                        on:click=move |_| toasts.update(|t| t.retain(|m| m.id != id))
                    >
                        {toast.message}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
