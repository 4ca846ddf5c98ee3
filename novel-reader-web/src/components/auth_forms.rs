//! Login and registration forms.

use leptos::prelude::*;
use leptos::task::spawn_local;
use novel_reader::api::FormRequest;
use novel_reader::forms::{FormError, LoginForm, RegisterForm};

use crate::api::client::submit;
use crate::components::toast::{show_toast, ToastMessage, ToastType};
use crate::dom;

/// Validate locally, post once, then either redirect or surface the reason.
fn submit_form<R>(
    form: Result<R, FormError>,
    redirect_to: String,
    is_submitting: RwSignal<bool>,
    toasts: RwSignal<Vec<ToastMessage>>,
) where
    R: FormRequest + 'static,
{
    let form = match form {
        Ok(form) => form,
        Err(e) => {
            show_toast(toasts, &e.to_string(), ToastType::Error);
            return;
        }
    };

    is_submitting.set(true);
    spawn_local(async move {
        match submit(&form).await {
            Ok(()) => {
                show_toast(toasts, R::ACTION.success_message(), ToastType::Success);
                dom::navigate(&redirect_to);
            }
            Err(e) => show_toast(toasts, &e.to_string(), ToastType::Error),
        }
        is_submitting.set(false);
    });
}

#[component]
pub fn LoginPanel(
    toasts: RwSignal<Vec<ToastMessage>>,
    #[prop(into, default = "/".to_string())] redirect_to: String,
) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm::validate(&username.get_untracked(), &password.get_untracked());
        submit_form(form, redirect_to.clone(), is_submitting, toasts);
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <input
                type="text"
                name="username"
                placeholder="Username"
                autocomplete="username"
                prop:value=move || username.get()
                on:input=move |ev| username.set(event_target_value(&ev))
            />
            <input
                type="password"
                name="password"
                placeholder="Password"
                autocomplete="current-password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <button type="submit" class="auth-submit" disabled=move || is_submitting.get()>
                {move || if is_submitting.get() { "Signing in..." } else { "Sign in" }}
            </button>
            <a href="/register" class="auth-switch">"No account? Register"</a>
        </form>
    }
}

#[component]
pub fn RegisterPanel(
    toasts: RwSignal<Vec<ToastMessage>>,
    #[prop(into, default = "/".to_string())] redirect_to: String,
) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let is_submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm::validate(
            &username.get_untracked(),
            &password.get_untracked(),
            &email.get_untracked(),
        );
        submit_form(form, redirect_to.clone(), is_submitting, toasts);
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <input
                type="text"
                name="username"
                placeholder="Username (6-32 letters, digits, _ @ -)"
                autocomplete="username"
                prop:value=move || username.get()
                on:input=move |ev| username.set(event_target_value(&ev))
            />
            <input
                type="password"
                name="password"
                placeholder="Password (at least 6 characters)"
                autocomplete="new-password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <input
                type="email"
                name="email"
                placeholder="Email"
                autocomplete="email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <button type="submit" class="auth-submit" disabled=move || is_submitting.get()>
                {move || if is_submitting.get() { "Registering..." } else { "Register" }}
            </button>
            <a href="/login" class="auth-switch">"Already registered? Sign in"</a>
        </form>
    }
}
