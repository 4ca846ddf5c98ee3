//! Header navigation: mobile menu, category dropdown and account links.

use leptos::ev;
use leptos::prelude::*;

use crate::dom;

#[component]
pub fn MobileMenu(
    /// Id of the server-rendered menu this button shows and hides.
    #[prop(into)]
    menu_id: String,
) -> impl IntoView {
    let is_open = RwSignal::new(false);

    Effect::new(move || {
        if let Some(menu) = dom::element_by_id(&menu_id) {
            dom::toggle_class(&menu, "show", is_open.get());
        }
    });

    let bar_style = move |index: usize| {
        move || match (is_open.get(), index) {
            (true, 0) => "transform: translateY(8px) rotate(45deg)",
            (true, 1) => "opacity: 0",
            (true, _) => "transform: translateY(-8px) rotate(-45deg)",
            (false, _) => "opacity: 1",
        }
    };

    view! {
        <button
            class="menu-btn"
            aria-label="Menu"
            on:click=move |e| {
                e.stop_propagation();
                is_open.update(|o| *o = !*o);
            }
        >
            <span class="icon-bar" style=bar_style(0)></span>
            <span class="icon-bar" style=bar_style(1)></span>
            <span class="icon-bar" style=bar_style(2)></span>
        </button>
    }
}

#[component]
pub fn SortDropdown(
    #[prop(into)] label: String,
    /// Id of the server-rendered category list.
    #[prop(into)]
    content_id: String,
) -> impl IntoView {
    let is_open = RwSignal::new(false);

    let content_id = StoredValue::new(content_id);

    Effect::new(move || {
        if let Some(content) = content_id.with_value(|id| dom::element_by_id(id)) {
            dom::toggle_class(&content, "show", is_open.get());
        }
    });

    // Clicks outside the list close it.
    let outside = window_event_listener(ev::click, move |e| {
        let inside = content_id
            .with_value(|id| dom::element_by_id(id))
            .is_some_and(|content| dom::contains_target(&content, e.target()));
        if !inside {
            is_open.set(false);
        }
    });
    on_cleanup(move || outside.remove());

    view! {
        <button
            class="sort-trigger"
            on:click=move |e| {
                e.stop_propagation();
                is_open.update(|o| *o = !*o);
            }
        >
            {move || format!("{} {}", label, if is_open.get() { "▴" } else { "▾" })}
        </button>
    }
}

#[component]
pub fn AccountLinks(signed_in: bool) -> impl IntoView {
    if signed_in {
        view! {
            <a href="/bookcase">"Bookshelf"</a>
            <a href="/logout">"Sign out"</a>
        }
        .into_any()
    } else {
        view! {
            <a href="/login">"Sign in"</a>
            <a href="/register">"Register"</a>
        }
        .into_any()
    }
}
