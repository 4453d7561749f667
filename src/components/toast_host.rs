//! Toast Host
//!
//! Renders the toasts queued on `ToastService`.

use leptos::prelude::*;

use crate::toast::use_toast;

#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();

    view! {
        <div class="toast-host">
            <For
                each=move || toast.toasts.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    view! {
                        <div class=t.kind.css_class() on:click=move |_| toast.dismiss(id)>
                            {t.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
