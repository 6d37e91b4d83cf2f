use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_session, SessionStore};
use crate::error::AuthError;
use crate::models::AuthForm;

/// Login and registration screens, toggled by a link.
#[component]
pub fn UnauthenticatedApp() -> impl IntoView {
    let is_register = RwSignal::new(false);
    let error = RwSignal::new(None::<AuthError>);

    let toggle = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        error.set(None);
        is_register.update(|register| *register = !*register);
    };

    view! {
        <div class="unauthenticated-app">
            <div class="auth-card">
                <h2>{move || if is_register.get() { "Create an account" } else { "Log in" }}</h2>
                {move || error.get().map(|e| view! { <div class="form-error">{e.to_string()}</div> })}
                {move || {
                    if is_register.get() {
                        view! { <RegisterForm error=error /> }.into_any()
                    } else {
                        view! { <LoginForm error=error /> }.into_any()
                    }
                }}
                <a class="auth-toggle" href="#" on:click=toggle>
                    {move || {
                        if is_register.get() {
                            "Already have an account? Log in"
                        } else {
                            "No account yet? Register"
                        }
                    }}
                </a>
            </div>
        </div>
    }
}

#[component]
fn LoginForm(error: RwSignal<Option<AuthError>>) -> impl IntoView {
    let session = use_session();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = AuthForm::new(username.get(), password.get());
        submit(session, error, Operation::Login, form);
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="User name"
                prop:value=move || username.get()
                on:input=move |ev| username.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <button type="submit" prop:disabled=move || session.is_busy()>
                "Log in"
            </button>
        </form>
    }
}

#[component]
fn RegisterForm(error: RwSignal<Option<AuthError>>) -> impl IntoView {
    let session = use_session();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Err(e) = check_confirmation(&password.get(), &confirm.get()) {
            error.set(Some(e));
            return;
        }
        let form = AuthForm::new(username.get(), password.get());
        submit(session, error, Operation::Register, form);
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="User name"
                prop:value=move || username.get()
                on:input=move |ev| username.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Confirm password"
                prop:value=move || confirm.get()
                on:input=move |ev| confirm.set(event_target_value(&ev))
            />
            <button type="submit" prop:disabled=move || session.is_busy()>
                "Register"
            </button>
        </form>
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Login,
    Register,
}

/// Run a login/register and surface its failure in the form.
fn submit(
    session: SessionStore,
    error: RwSignal<Option<AuthError>>,
    operation: Operation,
    form: AuthForm,
) {
    if session.operation_untracked().is_loading() {
        return;
    }
    error.set(None);

    spawn_local(async move {
        let result = match operation {
            Operation::Login => session.login(form).await,
            Operation::Register => session.register(form).await,
        };
        if let Err(e) = result {
            error.set(Some(e));
        }
    });
}

fn check_confirmation(password: &str, confirm: &str) -> Result<(), AuthError> {
    if password == confirm {
        Ok(())
    } else {
        Err(AuthError::validation("The two passwords do not match"))
    }
}
