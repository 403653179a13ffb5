use dioxus::prelude::*;
use gloo::timers::callback::Timeout;
use stage_runtime::content::{GALLERY, GalleryItem};
use stage_runtime::{GalleryModal, ModalMedia, StageConfig};
use tracing::debug;

use super::{hover_class, use_hover};
use crate::browser;

#[component]
pub fn Gallery() -> Element {
    let config = use_context::<StageConfig>();
    let mut modal = use_signal(|| GalleryModal::new(&config.gallery));

    let mut open = move |index: usize| {
        if modal.write().open(index) {
            browser::set_body_scroll_locked(true);
        }
    };

    let mut close = move || {
        let Some(ticket) = modal.write().close() else {
            return;
        };
        browser::set_body_scroll_locked(false);
        let delay = modal.peek().close_debounce_ms();
        // 淡出结束后才清掉选中项；期间重新打开会让这张票据作废
        Timeout::new(delay, move || {
            if !modal.write().finish_close(ticket) {
                debug!("弹窗已重新打开，保留选中项");
            }
        })
        .forget();
    };

    let is_open = modal.read().is_open();
    let selection = modal.read().selection();

    rsx! {
        section { id: "gallery", class: "section gallery",
            h2 { id: "title-gallery", class: "section-title", "Gallery" }
            div { class: "gallery-grid",
                for (i, item) in GALLERY.iter().enumerate() {
                    GalleryCard { key: "{item.id}", index: i, item: *item, on_open: move |index| open(index) }
                }
            }
        }
        if let Some(item) = selection {
            div {
                class: if is_open { "modal-backdrop open" } else { "modal-backdrop" },
                onclick: move |_| close(),
                div {
                    class: "modal",
                    onclick: move |evt: MouseEvent| evt.stop_propagation(),
                    button { class: "modal-close", "aria-label": "Close", onclick: move |_| close(), "✕" }
                    match ModalMedia::of(item) {
                        ModalMedia::Video(src) => rsx! {
                            video { src, controls: true, autoplay: true, playsinline: true }
                        },
                        ModalMedia::Image(src) => rsx! {
                            img { src, alt: item.title }
                        },
                    }
                    div { class: "modal-body",
                        span { class: "gallery-tag", "{item.tag}" }
                        h3 { "{item.title}" }
                        p { "{item.description}" }
                        a { href: item.link, target: "_blank", rel: "noopener noreferrer", "Watch more" }
                    }
                }
            }
        }
    }
}

#[component]
fn GalleryCard(index: usize, item: GalleryItem, on_open: EventHandler<usize>) -> Element {
    let mut hover = use_hover();
    let effect = hover_class(&hover);

    rsx! {
        article {
            id: "gallery-card-{index}",
            class: "gallery-card {effect}",
            onmouseenter: move |_| {
                hover.write().enter();
            },
            onmouseleave: move |_| hover.write().leave(),
            onclick: move |_| on_open.call(index),
            img { src: item.image, alt: item.title, loading: "lazy" }
            div { class: "gallery-card-overlay",
                span { class: "gallery-tag", "{item.tag}" }
                h3 { "{item.title}" }
            }
        }
    }
}
