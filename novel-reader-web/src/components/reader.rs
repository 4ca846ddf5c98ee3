//! Chapter page controls.

use leptos::ev;
use leptos::prelude::*;
use novel_reader::reader::ReaderPanels;

use crate::components::settings::ReaderSettingsPanel;
use crate::components::sidebar::ChapterSidebar;
use crate::dom;

fn touched_inside(target: Option<web_sys::EventTarget>, selector: &str) -> bool {
    dom::query(selector).is_some_and(|panel| dom::contains_target(&panel, target))
}

#[component]
pub fn ReaderControls() -> impl IntoView {
    let panels = RwSignal::new(ReaderPanels::default());

    // Touching outside an open panel closes it on mobile.
    let touch = window_event_listener(ev::touchstart, move |e| {
        let state = panels.get_untracked();
        if state.sidebar_open && !touched_inside(e.target(), "#chaptersSidebar") {
            panels.update(|p| p.close_sidebar());
        }
        if state.settings_open && !touched_inside(e.target(), ".settings-modal") {
            panels.update(|p| p.close_settings());
        }
    });
    on_cleanup(move || touch.remove());

    dom::prevent_default_clicks(".nav-btn--disabled, .page-btn--disabled");

    view! {
        <div class="read-nav-controls">
            <ChapterSidebar panels=panels />
            <ReaderSettingsPanel panels=panels />
        </div>
    }
}
