//! Metadata Rows
//!
//! Editable key / type / value rows, shared by the document filter
//! form and the document editor.

use leptos::prelude::*;

use crate::documents::filter::{MetadataInput, MetadataValueType};

#[component]
pub fn MetadataRows(
    #[prop(into)] rows: Signal<Vec<MetadataInput>>,
    #[prop(into)] on_change: Callback<Vec<MetadataInput>>,
    add_label: &'static str,
) -> impl IntoView {
    let row_count = Memo::new(move |_| rows.with(|r| r.len()));

    let field = move |index: usize, pick: fn(&MetadataInput) -> String| {
        move || rows.with(|r| r.get(index).map(pick).unwrap_or_default())
    };
    let edit = move |index: usize, apply: &dyn Fn(&mut MetadataInput)| {
        let mut next = rows.get_untracked();
        if let Some(row) = next.get_mut(index) {
            apply(row);
            on_change.run(next);
        }
    };

    view! {
        <div class="metadata-rows">
            {move || {
                (0..row_count.get())
                    .map(|index| {
                        let is_flag = move || {
                            rows.with(|r| r.get(index).is_some_and(|row| row.value_type == MetadataValueType::Flag))
                        };
                        view! {
                            <div class="metadata-row">
                                <input
                                    class="form-input"
                                    placeholder="Key, e.g. source"
                                    prop:value=field(index, |r| r.key.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        edit(index, &|row| row.key = value.clone());
                                    }
                                />
                                <select
                                    class="form-select"
                                    prop:value=field(index, |r| r.value_type.as_str().to_string())
                                    on:change=move |ev| {
                                        let next = MetadataValueType::parse(&event_target_value(&ev));
                                        edit(index, &|row| row.change_type(next));
                                    }
                                >
                                    {MetadataValueType::ALL
                                        .iter()
                                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                        .collect_view()}
                                </select>
                                <Show
                                    when=is_flag
                                    fallback=move || {
                                        view! {
                                            <input
                                                class="form-input"
                                                placeholder="Value (lists are comma-separated)"
                                                prop:value=field(index, |r| r.value.clone())
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    edit(index, &|row| row.value = value.clone());
                                                }
                                            />
                                        }
                                    }
                                >
                                    <select
                                        class="form-select"
                                        prop:value=field(index, |r| r.value.clone())
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            edit(index, &|row| row.value = value.clone());
                                        }
                                    >
                                        <option value="true">"true"</option>
                                        <option value="false">"false"</option>
                                    </select>
                                </Show>
                                <button
                                    type="button"
                                    class="icon-btn"
                                    title="Remove"
                                    on:click=move |_| {
                                        let mut next = rows.get_untracked();
                                        if index < next.len() {
                                            next.remove(index);
                                            on_change.run(next);
                                        }
                                    }
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <button
                type="button"
                class="link-btn"
                on:click=move |_| {
                    let mut next = rows.get_untracked();
                    next.push(MetadataInput::default());
                    on_change.run(next);
                }
            >
                {add_label}
            </button>
        </div>
    }
}
