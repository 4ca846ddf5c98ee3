//! Chapter list sidebar toggle.
//!
//! The chapter list itself is rendered by the server inside
//! `#chaptersSidebar`; this component owns the open button and the mask and
//! keeps the sidebar's `show` class in step with [`ReaderPanels`].

use leptos::prelude::*;
use novel_reader::reader::ReaderPanels;

use crate::dom;

const SIDEBAR_ID: &str = "chaptersSidebar";
const CLOSE_BUTTON_ID: &str = "closeSidebarBtn";

#[component]
pub fn ChapterSidebar(panels: RwSignal<ReaderPanels>) -> impl IntoView {
    Effect::new(move || {
        let state = panels.get();
        if let Some(sidebar) = dom::element_by_id(SIDEBAR_ID) {
            dom::toggle_class(&sidebar, "show", state.sidebar_open);
        }
        dom::set_body_scroll_locked(state.scroll_locked());
    });

    // The server-rendered close button lives inside the sidebar.
    if let Some(close) = dom::element_by_id(CLOSE_BUTTON_ID) {
        dom::on_click(&close, move || panels.update(|p| p.close_sidebar()));
    }

    view! {
        <button
            class="read-nav-btn"
            id="openSidebarBtn"
            on:click=move |_| panels.update(|p| p.open_sidebar())
        >
            "Chapters"
        </button>
        <Show when=move || panels.get().sidebar_open>
            <div class="mask show" on:click=move |_| panels.update(|p| p.dismiss())></div>
        </Show>
    }
}
