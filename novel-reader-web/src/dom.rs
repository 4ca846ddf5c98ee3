//! Small helpers over the server-rendered page.

use novel_reader::reader::ghost_cards;
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

pub fn element_by_id(id: &str) -> Option<HtmlElement> {
    document()?.get_element_by_id(id)?.dyn_into().ok()
}

pub fn query(selector: &str) -> Option<HtmlElement> {
    document()?.query_selector(selector).ok()??.dyn_into().ok()
}

pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn children_of(el: &HtmlElement, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = el.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Whether an event target lies inside `el`.
pub fn contains_target(el: &HtmlElement, target: Option<web_sys::EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|node| el.contains(Some(&node)))
}

/// `data-*` attribute of an element, `None` when absent or empty.
pub fn data(el: &HtmlElement, key: &str) -> Option<String> {
    el.dataset().get(key).filter(|v| !v.is_empty())
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn set_body_scroll_locked(locked: bool) {
    if let Some(body) = document().and_then(|d| d.body()) {
        let _ = body
            .style()
            .set_property("overflow", if locked { "hidden" } else { "" });
    }
}

pub fn set_colors(el: &HtmlElement, bg_color: &str, text_color: &str) {
    let style = el.style();
    let _ = style.set_property_with_priority("background-color", bg_color, "important");
    let _ = style.set_property_with_priority("color", text_color, "important");
}

/// Attach a click handler to a server-rendered element for the page's lifetime.
pub fn on_click(el: &HtmlElement, handler: impl Fn() + 'static) {
    let listener = Closure::<dyn Fn()>::new(handler);
    let _ = el.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
    listener.forget();
}

/// Swallow clicks on disabled navigation links.
pub fn prevent_default_clicks(selector: &str) {
    for el in query_all(selector) {
        let listener = Closure::<dyn Fn(web_sys::Event)>::new(|e: web_sys::Event| e.prevent_default());
        let _ = el.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        listener.forget();
    }
}

/// Submit the enclosing form when Enter is pressed in a matching input.
pub fn submit_on_enter(selector: &str) {
    for input in query_all(selector) {
        let field = input.clone();
        let listener = Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(
            move |e: web_sys::KeyboardEvent| {
                if e.key() != "Enter" {
                    return;
                }
                let form = field
                    .closest("form")
                    .ok()
                    .flatten()
                    .and_then(|f| f.dyn_into::<web_sys::HtmlFormElement>().ok());
                if let Some(form) = form {
                    let _ = form.submit();
                }
            },
        );
        let _ = input.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
        listener.forget();
    }
}

pub fn reload() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

pub fn navigate(href: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(href);
    }
}

/// Append invisible cards so the last row of `.novel-list` lines up.
pub fn pad_novel_grid(per_row: usize) {
    let Some(container) = query(".novel-list") else {
        return;
    };
    for ghost in children_of(&container, ".novel-card.ghost") {
        ghost.remove();
    }
    let items = children_of(&container, ".novel-card:not(.ghost)").len();
    let missing = ghost_cards(items, per_row);
    let Some(document) = document() else {
        return;
    };
    for _ in 0..missing {
        if let Ok(ghost) = document.create_element("div") {
            ghost.set_class_name("novel-card ghost");
            let _ = container.append_child(&ghost);
        }
    }
    debug!(items, missing, "Padded novel grid");
}
