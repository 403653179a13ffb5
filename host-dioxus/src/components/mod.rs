//! 页面分区组件。
//!
//! 需要入场动画的元素带固定的 DOM id，运行时按 id 绑定；组件本身不做动画。

mod about;
mod contact;
mod footer;
mod gallery;
mod hero;
mod navbar;
mod player;
mod services;

pub use about::About;
pub use contact::{Booking, Contact};
pub use footer::Footer;
pub use gallery::Gallery;
pub use hero::Hero;
pub use navbar::Navbar;
pub use player::FloatingPlayerWidget;
pub use services::Services;

use dioxus::prelude::*;
use stage_runtime::{HoverFlicker, SectionId};

use crate::stage::StageHandle;

/// 站内跳转链接：阻止默认跳转，交给运行时平滑滚动
#[component]
pub fn SectionLink(
    section: SectionId,
    #[props(into, default)] class: String,
    children: Element,
) -> Element {
    let stage = use_context::<Option<StageHandle>>();
    rsx! {
        a {
            class,
            href: section.fragment(),
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                if let Some(stage) = &stage {
                    stage.navigate(section);
                }
            },
            {children}
        }
    }
}

/// 卡片的悬停状态：首次闪烁，之后发光
pub fn use_hover() -> Signal<HoverFlicker> {
    use_signal(HoverFlicker::new)
}

/// 悬停状态对应的类名
pub fn hover_class(hover: &Signal<HoverFlicker>) -> &'static str {
    hover.read().effect().map(|effect| effect.class()).unwrap_or("")
}
