//! Preview View
//!
//! Renders a `PreviewResult` produced by the preview registry.

use leptos::prelude::*;

use crate::documents::preview::{PreviewDoc, PreviewItem, PreviewResult, Section, SectionBody};
use crate::markdown::{render_markdown, render_markdown_inline};

fn section_body(body: SectionBody) -> AnyView {
    match body {
        SectionBody::Text(text) => view! { <p class="preview-text">{text}</p> }.into_any(),
        SectionBody::Code(text) => view! { <pre class="preview-code">{text}</pre> }.into_any(),
        SectionBody::Markdown(text) => {
            view! { <div class="preview-markdown" inner_html=render_markdown(&text)></div> }.into_any()
        }
        SectionBody::Html(html) => view! { <div class="preview-html" inner_html=html></div> }.into_any(),
        SectionBody::Frame(html) => {
            view! { <iframe class="preview-frame" sandbox="allow-same-origin" srcdoc=html></iframe> }.into_any()
        }
        SectionBody::List(items) => view! {
            <ul class="preview-list">
                {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
            </ul>
        }
        .into_any(),
        SectionBody::Facts(facts) => view! {
            <dl class="preview-facts">
                {facts
                    .into_iter()
                    .map(|fact| view! {
                        <dt>{fact.label}</dt>
                        <dd>{fact.value}</dd>
                    })
                    .collect_view()}
            </dl>
        }
        .into_any(),
        SectionBody::Choices(rows) => view! {
            <ul class="preview-choices">
                {rows
                    .into_iter()
                    .map(|row| view! {
                        <li class:correct=row.correct>
                            <span class="choice-key">{row.key}</span>
                            <span class="choice-content" inner_html=render_markdown_inline(&row.content)></span>
                            {row.correct.then(|| view! { <span class="tag green">"Correct"</span> })}
                        </li>
                    })
                    .collect_view()}
            </ul>
        }
        .into_any(),
        SectionBody::Items(items) => view! {
            <div class="preview-items">{items.into_iter().map(preview_item).collect_view()}</div>
        }
        .into_any(),
    }
}

fn section(section: Section) -> impl IntoView {
    view! {
        <section class="preview-section">
            <h4>{section.title}</h4>
            {section_body(section.body)}
        </section>
    }
}

fn preview_item(item: PreviewItem) -> impl IntoView {
    view! {
        <div class="preview-item">
            <div class="preview-item-heading">
                <strong>{item.heading}</strong>
                {item.note.map(|note| view! { <span class="muted">{note}</span> })}
            </div>
            {item.sections.into_iter().map(section).collect_view()}
        </div>
    }
}

fn preview_doc(doc: PreviewDoc) -> impl IntoView {
    view! {
        <article class="preview-doc">
            <h3>{doc.title}</h3>
            <div class="preview-badges">
                {doc
                    .badges
                    .into_iter()
                    .map(|b| view! { <span class=format!("tag {}", b.color)>{b.label}</span> })
                    .collect_view()}
                {doc.tags.into_iter().map(|t| view! { <span class="tag">{t}</span> }).collect_view()}
            </div>
            {doc.sections.into_iter().map(section).collect_view()}
        </article>
    }
}

#[component]
pub fn PreviewView(result: PreviewResult) -> impl IntoView {
    match result {
        PreviewResult::Empty => view! { <div class="empty">"Nothing to preview"</div> }.into_any(),
        PreviewResult::Error(message) => view! {
            <div class="alert error">
                <strong>"Preview failed"</strong>
                <div>{message}</div>
            </div>
        }
        .into_any(),
        PreviewResult::Component(doc) => preview_doc(doc).into_any(),
        PreviewResult::Fallback(dump) => view! {
            <div class="preview-fallback">
                <div class="muted">"No dedicated preview for this type; parsed content:"</div>
                <pre>{dump}</pre>
            </div>
        }
        .into_any(),
    }
}
