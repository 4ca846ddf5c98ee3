//! Overlay panel with a title bar.

use leptos::prelude::*;

#[component]
pub fn Modal(
    is_open: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] title: String,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || is_open.get()>
            <div class="mask show" on:click=move |_| on_close.run(())></div>
            <div class="settings-modal show" on:click=|e| e.stop_propagation()>
                <div class="modal-header">
                    <h3 class="modal-title">{title.clone()}</h3>
                    <button class="modal-close" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </Show>
    }
}
