use dioxus::prelude::*;
use stage_runtime::content::{
    BOOKING_FORM_TITLE, CONTACT_ROWS, CONTACT_SUBTITLE, CONTACT_TITLE, EVENT_TYPES, SOCIAL_LINKS,
};

#[component]
pub fn Contact() -> Element {
    rsx! {
        section { id: "contact", class: "section contact",
            div { id: "contact-title", class: "contact-heading",
                h2 { class: "section-title", "{CONTACT_TITLE}" }
                p { "{CONTACT_SUBTITLE}" }
            }
            div { id: "contact-panel-1", class: "contact-info",
                for row in CONTACT_ROWS {
                    div { key: "{row.label}", class: "contact-row",
                        span { class: "contact-label", "{row.label}" }
                        span { class: "contact-value", "{row.value}" }
                    }
                }
            }
            div { id: "contact-aside", class: "contact-aside",
                h3 { "Follow the Beat" }
                div { class: "social-links",
                    for link in SOCIAL_LINKS {
                        a { key: "{link.label}", href: link.href, target: "_blank", rel: "noopener noreferrer", "{link.label}" }
                    }
                }
                p { class: "promise", "Every event gets a custom set list and a full sound check before doors open." }
            }
        }
    }
}

/// 预订表单；没有后端，提交只阻止默认行为
#[component]
pub fn Booking() -> Element {
    rsx! {
        section { id: "booking", class: "section booking",
            form {
                id: "contact-panel-0",
                class: "booking-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    tracing::info!("预订表单未接入后端，忽略提交");
                },
                h3 { "{BOOKING_FORM_TITLE}" }
                input { r#type: "text", name: "name", placeholder: "Your Name", required: true }
                input { r#type: "email", name: "email", placeholder: "Email Address", required: true }
                input { r#type: "tel", name: "phone", placeholder: "Phone Number" }
                input { r#type: "date", name: "date" }
                select { name: "event-type",
                    for event_type in EVENT_TYPES {
                        option { key: "{event_type}", value: event_type, "{event_type}" }
                    }
                }
                textarea { name: "message", rows: 4, placeholder: "Tell us about your event" }
                button { r#type: "submit", class: "btn btn-primary", "Send Booking Request" }
            }
        }
    }
}
