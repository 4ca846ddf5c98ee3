//! Reader settings panel: font size and colour theme.

use leptos::prelude::*;
use novel_reader::reader::ReaderPanels;
use novel_reader::settings::{ReaderSettings, FONT_PRESETS, MAX_FONT_SIZE, MIN_FONT_SIZE, THEMES};

use crate::components::modal::Modal;
use crate::dom;
use crate::storage;

/// Page regions that follow the theme colours.
const THEMED_SELECTORS: &[&str] = &[
    "header",
    ".mobile-nav",
    ".chapter-content",
    ".read-nav",
    ".chapters-sidebar",
    ".settings-modal",
];

/// Push settings onto the server-rendered chapter page.
fn apply_settings(settings: &ReaderSettings) {
    if let Some(content) = dom::query(".chapter-content") {
        let _ = content
            .style()
            .set_property("font-size", &settings.font_size_css());
    }
    if let Some(body) = dom::document().and_then(|d| d.body()) {
        dom::set_colors(&body, &settings.bg_color, &settings.text_color);
    }
    for selector in THEMED_SELECTORS {
        if let Some(el) = dom::query(selector) {
            dom::set_colors(&el, &settings.bg_color, &settings.text_color);
        }
    }
    for item in dom::query_all(".chapter-item:not(.active)") {
        let _ = item
            .style()
            .set_property_with_priority("color", &settings.text_color, "important");
    }
}

/// Re-applies the theme once the panel's own elements are in the page.
#[component]
fn ThemeOnOpen(settings: RwSignal<ReaderSettings>) -> impl IntoView {
    Effect::new(move || settings.with(apply_settings));
}

#[component]
pub fn ReaderSettingsPanel(panels: RwSignal<ReaderPanels>) -> impl IntoView {
    let settings = RwSignal::new(storage::load_settings());

    Effect::new(move || settings.with(apply_settings));

    let update = move |f: &dyn Fn(ReaderSettings) -> ReaderSettings| {
        let next = f(settings.get_untracked());
        storage::save_settings(&next);
        settings.set(next);
    };

    let is_open = Signal::derive(move || panels.get().settings_open);
    let on_close = Callback::new(move |_: ()| panels.update(|p| p.close_settings()));

    view! {
        <button
            class="read-nav-btn"
            id="openReadSettingBtn"
            on:click=move |_| panels.update(|p| p.open_settings())
        >
            "Settings"
        </button>
        <Modal is_open=is_open on_close=on_close title="Reading settings">
            <ThemeOnOpen settings=settings />
            <div class="settings-section">
                <label class="settings-label" for="fontSizeSlider">
                    "Font size " {move || settings.get().font_size_css()}
                </label>
                <input
                    type="range"
                    id="fontSizeSlider"
                    min=MIN_FONT_SIZE.to_string()
                    max=MAX_FONT_SIZE.to_string()
                    prop:value=move || settings.get().font_size.to_string()
                    on:input=move |ev| {
                        if let Ok(px) = event_target_value(&ev).parse::<u32>() {
                            update(&|s| s.with_font_size(px));
                        }
                    }
                />
                <div class="font-btns">
                    {FONT_PRESETS.iter().map(|&px| view! {
                        <button
                            class="font-btn"
                            class:active=move || settings.get().font_size == px
                            on:click=move |_| update(&|s| s.with_font_size(px))
                        >
                            {format!("{}px", px)}
                        </button>
                    }).collect_view()}
                </div>
            </div>

            <div class="settings-section">
                <span class="settings-label">"Theme"</span>
                <div class="theme-btns">
                    {THEMES.iter().map(|theme| view! {
                        <button
                            class="theme-btn"
                            class:active=move || settings.get().is_theme(theme)
                            style:background-color=theme.bg_color
                            style:color=theme.text_color
                            on:click=move |_| update(&|s| s.with_theme(theme.bg_color, theme.text_color))
                        >
                            {theme.name}
                        </button>
                    }).collect_view()}
                </div>
            </div>

            <div class="settings-actions">
                <button
                    class="settings-reset-btn"
                    id="resetSettingsBtn"
                    on:click=move |_| update(&|_| ReaderSettings::default())
                >
                    "Reset"
                </button>
            </div>
        </Modal>
    }
}
