//! Confirm Button Component
//!
//! Inline two-step button for destructive actions.

use leptos::prelude::*;

/// Shows `label` first; a click swaps it for `prompt` with confirm/cancel.
///
/// # Arguments
/// * `label` - Text of the initial button (e.g. "Delete", "Purge")
/// * `prompt` - Question shown while confirming
/// * `disabled` - Greys out the initial button
/// * `on_confirm` - Runs when the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] label: String,
    #[prop(optional, into)] prompt: Option<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let prompt = prompt.unwrap_or_else(|| "Are you sure?".to_string());

    view! {
        <Show when=move || !confirming.get()>
            <button
                class="link-btn danger"
                disabled=move || disabled.get()
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirming.set(true);
                }
            >
                {label.clone()}
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        </Show>
    }
}
