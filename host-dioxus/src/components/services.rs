use dioxus::prelude::*;
use stage_runtime::SectionId;
use stage_runtime::content::{
    MINI_SERVICES, MiniService, SERVICES, SERVICES_CTA, SERVICES_CTA_BUTTON, Service,
};

use super::{SectionLink, hover_class, use_hover};

#[component]
pub fn Services() -> Element {
    rsx! {
        section { id: "services", class: "section services",
            h2 { id: "title-services", class: "section-title", "Services" }
            div { class: "services-grid",
                for (i, service) in SERVICES.iter().enumerate() {
                    ServiceCard { key: "{i}", index: i, service: *service }
                }
            }
            div { class: "services-mini-grid",
                for (i, mini) in MINI_SERVICES.iter().enumerate() {
                    MiniCard { key: "{i}", index: i, mini: *mini }
                }
            }
            div { class: "services-cta",
                h3 { "{SERVICES_CTA}" }
                SectionLink { section: SectionId::Booking, class: "btn btn-primary", "{SERVICES_CTA_BUTTON}" }
            }
        }
    }
}

#[component]
fn ServiceCard(index: usize, service: Service) -> Element {
    let mut hover = use_hover();
    let effect = hover_class(&hover);
    let accent = service.accent.as_str();

    rsx! {
        article {
            id: "service-card-{index}",
            class: "service-card accent-{accent} {effect}",
            onmouseenter: move |_| {
                hover.write().enter();
            },
            onmouseleave: move |_| hover.write().leave(),
            h3 { "{service.title}" }
            p { class: "service-price", "{service.price}" }
            p { class: "service-description", "{service.description}" }
            ul {
                for feature in service.features {
                    li { "{feature}" }
                }
            }
            SectionLink { section: SectionId::Booking, class: "btn btn-outline", "Book Now" }
        }
    }
}

#[component]
fn MiniCard(index: usize, mini: MiniService) -> Element {
    rsx! {
        div { id: "service-mini-{index}", class: "service-mini",
            h4 { "{mini.title}" }
            p { "{mini.description}" }
        }
    }
}
