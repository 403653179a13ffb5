//! 页面上各类元素的入场参数。
//!
//! 宿主按 DOM id 表把元素绑定到预设，运行时只认 `ElementHandle`。

use std::fmt;

use super::{AnimationSpec, ExitSpec, GroupLayout};
use crate::animation::{EasingFunction, VisualState};
use crate::tracker::{ScrollLine, Trigger};

/// 入场预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealPreset {
    /// 各分区标题（上浮淡入）
    SectionTitle,
    /// 服务大卡片
    ServiceCard,
    /// 附加服务小卡片
    ServiceMini,
    /// 画廊卡片（左右交替）
    GalleryCard,
    AboutImage,
    AboutText,
    /// 关于页特性列表，共享文本列作为触发元素
    AboutFeature,
    /// 数据卡片，共享容器作为触发元素
    StatCard,
    /// 联系页标题
    ContactTitle,
    /// 联系页表单与信息卡
    ContactPanel,
    /// 联系页社交与承诺区块
    ContactAside,
}

impl RevealPreset {
    pub const ALL: [RevealPreset; 11] = [
        RevealPreset::SectionTitle,
        RevealPreset::ServiceCard,
        RevealPreset::ServiceMini,
        RevealPreset::GalleryCard,
        RevealPreset::AboutImage,
        RevealPreset::AboutText,
        RevealPreset::AboutFeature,
        RevealPreset::StatCard,
        RevealPreset::ContactTitle,
        RevealPreset::ContactPanel,
        RevealPreset::ContactAside,
    ];

    /// 日志里使用的名字
    pub fn as_str(&self) -> &'static str {
        match self {
            RevealPreset::SectionTitle => "section-title",
            RevealPreset::ServiceCard => "service-card",
            RevealPreset::ServiceMini => "service-mini",
            RevealPreset::GalleryCard => "gallery-card",
            RevealPreset::AboutImage => "about-image",
            RevealPreset::AboutText => "about-text",
            RevealPreset::AboutFeature => "about-feature",
            RevealPreset::StatCard => "stat-card",
            RevealPreset::ContactTitle => "contact-title",
            RevealPreset::ContactPanel => "contact-panel",
            RevealPreset::ContactAside => "contact-aside",
        }
    }

    pub fn trigger(&self) -> Trigger {
        match self {
            RevealPreset::SectionTitle => {
                Trigger::scroll(ScrollLine::top(0.75), ScrollLine::bottom(0.65))
            }
            RevealPreset::ServiceCard | RevealPreset::GalleryCard => {
                Trigger::scroll(ScrollLine::top(0.85), ScrollLine::bottom(0.60))
            }
            RevealPreset::ServiceMini => {
                Trigger::scroll(ScrollLine::top(0.90), ScrollLine::bottom(0.65))
            }
            RevealPreset::AboutImage | RevealPreset::AboutText => {
                Trigger::scroll_from(ScrollLine::top(0.70))
            }
            RevealPreset::AboutFeature => Trigger::scroll_from(ScrollLine::top(0.65)),
            RevealPreset::StatCard | RevealPreset::ContactPanel => {
                Trigger::scroll_from(ScrollLine::top(0.80))
            }
            RevealPreset::ContactTitle => Trigger::scroll_from(ScrollLine::top(0.75)),
            RevealPreset::ContactAside => Trigger::scroll_from(ScrollLine::top(0.85)),
        }
    }

    pub fn spec(&self) -> AnimationSpec {
        let hidden = VisualState::HIDDEN;
        match self {
            RevealPreset::SectionTitle => AnimationSpec::reveal(hidden.with_y(24.0)).with_duration(0.9),
            RevealPreset::ServiceCard => AnimationSpec::reveal(hidden.with_y(30.0).with_rotate_x(8.0))
                .with_duration(0.8)
                .with_stagger(0.06),
            RevealPreset::ServiceMini => AnimationSpec::reveal(hidden.with_y(18.0))
                .with_duration(0.7)
                .with_easing(EasingFunction::EaseOutCubic)
                .with_stagger(0.05),
            RevealPreset::GalleryCard => AnimationSpec::reveal(hidden.with_x(48.0))
                .with_duration(0.8)
                .with_stagger(0.04),
            RevealPreset::AboutImage => AnimationSpec::reveal(hidden.with_y(40.0)).with_duration(1.1),
            RevealPreset::AboutText => AnimationSpec::reveal(hidden.with_y(30.0))
                .with_duration(1.0)
                .with_delay(0.05),
            RevealPreset::AboutFeature => AnimationSpec::reveal(hidden.with_x(-16.0))
                .with_duration(0.6)
                .with_easing(EasingFunction::EaseOutCubic)
                .with_stagger(0.08),
            RevealPreset::StatCard => AnimationSpec::reveal(hidden.with_y(24.0).with_rotate_x(6.0))
                .with_duration(0.8)
                .with_stagger(0.1),
            RevealPreset::ContactTitle | RevealPreset::ContactPanel | RevealPreset::ContactAside => {
                contact_in_out()
            }
        }
    }

    pub fn group_layout(&self) -> GroupLayout {
        match self {
            RevealPreset::GalleryCard => GroupLayout::AlternateX,
            _ => GroupLayout::Uniform,
        }
    }

    /// 是否由父容器统一触发（否则每个元素各自触发）
    pub fn shares_anchor(&self) -> bool {
        matches!(self, RevealPreset::AboutFeature | RevealPreset::StatCard)
    }
}

/// 联系页的进出动画：向下滚出时下沉，向上滚出时上浮
fn contact_in_out() -> AnimationSpec {
    AnimationSpec::reveal(VisualState::HIDDEN.with_y(24.0).with_rotate_x(6.0))
        .with_duration(0.9)
        .with_exit(ExitSpec {
            leave: Some(VisualState::HIDDEN.with_y(16.0).with_rotate_x(4.0)),
            leave_back: Some(VisualState::HIDDEN.with_y(-16.0).with_rotate_x(-4.0)),
            leave_duration: Some(0.35),
            leave_back_duration: Some(0.3),
            easing: Some(EasingFunction::EaseInCubic),
            enter_back_duration: Some(0.8),
        })
}

impl fmt::Display for RevealPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
