//! Tree Context Menu
//!
//! Floating menu for a right-clicked category row.

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::categories::context_menu::{menu_entries, MenuAction, MenuInputs};
use crate::config::menu_debug_enabled;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TreeContextMenu<F>(on_action: F) -> impl IntoView
where
    F: Fn(MenuAction) + Clone + Send + Sync + 'static,
{
    let store = use_app_store();
    let ctx = use_app_context();
    let auth = use_auth();

    let entries = move || {
        let state = store.context_menu().get();
        let selection = store.selection().get();
        let clipboard = store.clipboard().get();
        let lookups = store.lookups().read();
        let permissions = auth.get().permissions();
        menu_entries(&MenuInputs {
            state: &state,
            selection: &selection,
            clipboard: clipboard.as_ref(),
            lookups: &lookups,
            is_mutating: ctx.is_mutating.get(),
            can_manage_tree: permissions.manage_tree,
            can_create_document: permissions.create_documents,
        })
    };

    let position = move || {
        let state = store.context_menu().get();
        format!("left: {}px; top: {}px;", state.x, state.y)
    };

    view! {
        <Show when=move || store.context_menu().get().open>
            <ul class="context-menu" style=position on:mousedown=|ev| ev.stop_propagation()>
                {
                    let on_action = on_action.clone();
                    move || {
                        let on_action = on_action.clone();
                        entries()
                            .into_iter()
                            .map(|entry| {
                                let on_action = on_action.clone();
                                let action = entry.action;
                                let disabled = entry.disabled;
                                view! {
                                    {entry.divider_before.then(|| view! { <li class="context-menu-divider"></li> })}
                                    <li
                                        class="context-menu-item"
                                        class:disabled=disabled
                                        on:click=move |_| {
                                            if disabled {
                                                return;
                                            }
                                            if menu_debug_enabled() {
                                                log::debug!("[MENU] {:?}", action);
                                            }
                                            on_action(action);
                                        }
                                    >
                                        {entry.label}
                                    </li>
                                }
                            })
                            .collect_view()
                    }
                }
            </ul>
        </Show>
    }
}
