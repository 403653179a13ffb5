//! # Stage Runtime
//!
//! 单页演出站点的纯逻辑核心。
//!
//! ## 架构概述
//!
//! `stage-runtime` 不依赖 DOM 或任何 IO。浏览器相关的能力（地址栏、
//! 会话存储、滚动、布局查询、媒体元素）通过 trait 注入，宿主转发事件，
//! 运行时返回需要执行的指令：
//!
//! ```text
//! Host                              Runtime
//!   │── scroll / resize / frame ────►│
//!   │                                │ 追踪器采样 → 入场动画 / 分区同步
//!   │◄── Vec<StageCommand> ──────────│
//! ```
//!
//! ## 核心类型
//!
//! - [`Tracker`]：视口相交追踪，产出进入 / 离开事件
//! - [`EntranceController`]：把追踪事件映射为入场补间
//! - [`SectionSync`]：活动分区与地址片段、会话存储的同步
//! - [`Navigator`]：扣除固定头部的平滑滚动
//! - [`FloatingPlayer`]：悬浮播放器状态机
//! - [`StageRuntime`]：把以上组件组装在一起
//!
//! ## 模块结构
//!
//! - [`animation`]：补间与缓动
//! - [`entrance`]：入场动画与预设
//! - [`navigation`]：分区导航
//! - [`player`]：悬浮播放器
//! - [`content`]：静态内容
//! - [`config`]：站点配置
//! - [`error`]：错误类型

pub mod animation;
pub mod config;
pub mod content;
pub mod entrance;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod hero;
pub mod hover;
pub mod navigation;
pub mod player;
pub mod runtime;
pub mod section;
pub mod tracker;

// 重导出核心类型
pub use animation::{EasingFunction, VisualState};
pub use config::StageConfig;
pub use entrance::presets::RevealPreset;
pub use entrance::{
    AnimationSpec, BindingId, CounterSpec, ElementChange, EntranceController, EntranceState,
    StyleUpdate,
};
pub use error::{ConfigError, PlaybackError, SectionError, StageError, StageResult};
pub use gallery::{CloseTicket, GalleryModal, ModalMedia};
pub use geometry::{Rect, Viewport};
pub use hero::{HeroReveal, HideTicket};
pub use hover::{HoverEffect, HoverFlicker};
pub use navigation::{
    MemoryNavigation, NavbarState, NavigationContext, Navigator, ScrollBehavior, SectionSync,
};
pub use player::{
    FloatingPlayer, IdleWave, MediaElement, MediaEvent, PlayTicket, PlaybackState, PlayerPhase,
    format_time,
};
pub use runtime::{PlatformHints, StageCommand, StageRuntime};
pub use section::SectionId;
pub use tracker::{ElementHandle, LayoutProvider, Tracker, TrackerEvent, Transition, Trigger};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _runtime = StageRuntime::new(StageConfig::default(), PlatformHints::default());
        let _player = FloatingPlayer::default();
        let _modal = GalleryModal::default();
        let _section: SectionId = "gallery".parse().unwrap();
    }
}
