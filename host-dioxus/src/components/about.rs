use dioxus::prelude::*;
use stage_runtime::content::{
    ABOUT_FEATURES, ABOUT_HEADLINE, ABOUT_HOVER_VIDEO, ABOUT_IMAGE, ABOUT_PARAGRAPHS, STATS, Stat,
};

#[component]
pub fn About() -> Element {
    // 悬停在照片上时换成演出视频
    let mut show_video = use_signal(|| false);

    rsx! {
        section { id: "about", class: "section about",
            h2 { id: "title-about", class: "section-title", "About Me" }
            div { class: "about-grid",
                div {
                    id: "about-image",
                    class: "about-image",
                    onmouseenter: move |_| show_video.set(true),
                    onmouseleave: move |_| show_video.set(false),
                    if show_video() {
                        video {
                            src: ABOUT_HOVER_VIDEO,
                            autoplay: true,
                            muted: true,
                            r#loop: true,
                            playsinline: true,
                        }
                    } else {
                        img { src: ABOUT_IMAGE, alt: "DJ Suguna" }
                    }
                }
                div { id: "about-text", class: "about-text",
                    h3 { "{ABOUT_HEADLINE}" }
                    for paragraph in ABOUT_PARAGRAPHS {
                        p { "{paragraph}" }
                    }
                    ul { class: "about-features",
                        for (i, feature) in ABOUT_FEATURES.iter().enumerate() {
                            li { key: "{i}", id: "about-feature-{i}", class: "about-feature", "{feature}" }
                        }
                    }
                }
            }
            div { id: "about-stats", class: "stats-grid",
                for (i, stat) in STATS.iter().enumerate() {
                    StatCard { key: "{i}", index: i, stat: *stat }
                }
            }
        }
    }
}

#[component]
fn StatCard(index: usize, stat: Stat) -> Element {
    // 计数器由运行时逐帧写入文本，初始文本只在未绑定时可见
    let initial = match stat.counter() {
        Some(spec) => spec.display(0.0),
        None => stat.static_text(),
    };

    rsx! {
        div { id: "stat-card-{index}", class: "stat-card",
            div { id: "stat-value-{index}", class: "stat-value", "{initial}" }
            div { class: "stat-label", "{stat.label}" }
        }
    }
}
