use dioxus::prelude::*;
use stage_runtime::SectionId;
use stage_runtime::content::{BRAND, FOOTER_BLURB, FOOTER_CONTACT, FOOTER_SERVICES, SOCIAL_LINKS};

use super::SectionLink;

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "footer",
            div { class: "footer-grid",
                div { class: "footer-brand",
                    h3 { "{BRAND}" }
                    p { "{FOOTER_BLURB}" }
                    div { class: "social-links",
                        for link in SOCIAL_LINKS {
                            a { key: "{link.label}", href: link.href, target: "_blank", rel: "noopener noreferrer", "{link.label}" }
                        }
                    }
                }
                div { class: "footer-column",
                    h4 { "Quick Links" }
                    for section in SectionId::NAV_LINKS {
                        SectionLink { key: "{section}", section, "{section.label()}" }
                    }
                }
                div { class: "footer-column",
                    h4 { "Services" }
                    for service in FOOTER_SERVICES {
                        SectionLink { key: "{service}", section: SectionId::Services, "{service}" }
                    }
                }
                div { class: "footer-column",
                    h4 { "Contact" }
                    for row in FOOTER_CONTACT {
                        p { key: "{row.label}", "{row.value}" }
                    }
                }
            }
            p { class: "footer-copyright", "© {BRAND}. All rights reserved." }
        }
    }
}
