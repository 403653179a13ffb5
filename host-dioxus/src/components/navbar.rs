use dioxus::prelude::*;
use stage_runtime::SectionId;
use stage_runtime::content::BRAND;

use super::SectionLink;
use crate::stage::{StageHandle, StageSignals};

#[component]
pub fn Navbar() -> Element {
    let signals = use_context::<StageSignals>();
    let stage = use_context::<Option<StageHandle>>();

    let scrolled = (signals.scrolled)();
    let menu_open = (signals.menu_open)();
    let active = (signals.active)();

    let link_class = move |section: SectionId| {
        if active == Some(section) {
            "nav-link active"
        } else {
            "nav-link"
        }
    };

    rsx! {
        nav { class: if scrolled { "navbar scrolled" } else { "navbar" },
            div { class: "navbar-inner",
                SectionLink { section: SectionId::Home, class: "brand", "{BRAND}" }
                div { class: "nav-links",
                    for section in SectionId::NAV_LINKS {
                        SectionLink { key: "{section}", section, class: link_class(section), "{section.label()}" }
                    }
                }
                button {
                    class: "menu-toggle",
                    "aria-label": "Toggle menu",
                    "aria-expanded": "{menu_open}",
                    onclick: move |_| {
                        if let Some(stage) = &stage {
                            stage.toggle_menu();
                        }
                    },
                    if menu_open { "✕" } else { "☰" }
                }
            }
            if menu_open {
                div { class: "mobile-menu",
                    for section in SectionId::NAV_LINKS {
                        SectionLink { key: "{section}", section, class: link_class(section), "{section.label()}" }
                    }
                }
            }
        }
    }
}
