use dioxus::prelude::*;
use stage_runtime::SectionId;
use stage_runtime::content::HERO;

use super::SectionLink;
use crate::browser;
use crate::stage::StageSignals;

const HERO_VIDEO_ID: &str = "hero-video";

#[component]
pub fn Hero() -> Element {
    let signals = use_context::<StageSignals>();
    let revealed = (signals.hero_revealed)();

    rsx! {
        section { id: "home", class: "hero",
            video {
                id: HERO_VIDEO_ID,
                class: "hero-video",
                src: HERO.video,
                autoplay: true,
                muted: true,
                r#loop: true,
                playsinline: true,
                onloadedmetadata: move |_| browser::set_playback_rate(HERO_VIDEO_ID, HERO.playback_rate),
            }
            div { class: "hero-overlay" }
            div { class: if revealed { "hero-content revealed" } else { "hero-content" },
                p { class: "hero-subtitle", "{HERO.subtitle}" }
                h1 { class: "hero-title", "{HERO.title}" }
                div { class: "hero-actions",
                    SectionLink { section: SectionId::Booking, class: "btn btn-primary", "Book Now" }
                    SectionLink { section: SectionId::Gallery, class: "btn btn-outline", "View Gallery" }
                }
            }
        }
    }
}
