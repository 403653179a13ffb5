//! 平滑滚动导航器。
//!
//! `go_to` 计算目标位置（扣除固定头部高度），滚动动画由 `tick` 逐帧推进。
//! 新的 `go_to` 会替换进行中的动画，从当前滚动位置重新出发。

use tracing::debug;

use super::{NavigationContext, ScrollBehavior};
use crate::animation::{Animation, AnimationId, EasingFunction};
use crate::config::NavigationConfig;
use crate::section::SectionId;

/// 视口宽度对应的固定头部高度
pub fn header_height(viewport_width: f64, config: &NavigationConfig) -> f64 {
    if viewport_width < config.breakpoint {
        config.narrow_header_height
    } else {
        config.wide_header_height
    }
}

#[derive(Debug, Clone)]
struct ScrollTween {
    destination: SectionId,
    start: f64,
    target: f64,
    /// 0 → 1 的进度
    progress: Animation,
}

impl ScrollTween {
    fn position(&self) -> f64 {
        self.start + (self.target - self.start) * f64::from(self.progress.current_value())
    }
}

/// 平滑滚动导航器
#[derive(Debug, Clone)]
pub struct Navigator {
    config: NavigationConfig,
    easing: EasingFunction,
    reduced_motion: bool,
    tween: Option<ScrollTween>,
    next_id: u64,
}

impl Navigator {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            config: config.clone(),
            easing: EasingFunction::EaseInOutCubic,
            reduced_motion: false,
            tween: None,
            next_id: 1,
        }
    }

    /// 减少动态效果时直接跳转
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    /// 分区的滚动目标
    ///
    /// 首屏固定为 0；其他分区为元素顶边减去头部高度，不小于 0。
    /// 元素不存在时返回 `None`。
    pub fn target_offset<C: NavigationContext + ?Sized>(
        &self,
        section: SectionId,
        ctx: &C,
    ) -> Option<f64> {
        if section == SectionId::Home {
            return Some(0.0);
        }
        let rect = ctx.section_rect(section)?;
        let viewport = ctx.viewport();
        let header = header_height(viewport.width, &self.config);
        Some((rect.document_top(&viewport) - header).max(0.0))
    }

    /// 滚动到分区，返回目标位置；元素不存在时什么也不做
    ///
    /// 动画时长为 0（或减少动态效果）时立即到达，`is_animating()` 为 `false`。
    pub fn go_to<C: NavigationContext + ?Sized>(
        &mut self,
        section: SectionId,
        ctx: &mut C,
    ) -> Option<f64> {
        let Some(target) = self.target_offset(section, ctx) else {
            debug!(section = %section, "导航目标不存在，忽略");
            return None;
        };

        let duration = if self.reduced_motion {
            0.0
        } else {
            self.config.scroll_duration
        };
        debug!(section = %section, target, "开始导航");

        if duration <= 0.0 {
            self.tween = None;
            ctx.scroll_to(target, ScrollBehavior::Instant);
            return Some(target);
        }

        let id = AnimationId::new(self.next_id);
        self.next_id += 1;
        self.tween = Some(ScrollTween {
            destination: section,
            start: ctx.scroll_y(),
            target,
            progress: Animation::new(id, 0.0, 1.0, duration).with_easing(self.easing),
        });
        Some(target)
    }

    /// 推进滚动动画，到达时返回目的分区
    pub fn tick<C: NavigationContext + ?Sized>(&mut self, dt: f32, ctx: &mut C) -> Option<SectionId> {
        let tween = self.tween.as_mut()?;
        let running = tween.progress.update(dt);
        ctx.scroll_to(tween.position(), ScrollBehavior::Instant);
        if running {
            return None;
        }
        let destination = tween.destination;
        self.tween = None;
        Some(destination)
    }

    /// 放弃进行中的动画（例如用户开始手动滚动）
    pub fn cancel(&mut self) -> Option<SectionId> {
        self.tween.take().map(|tween| tween.destination)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// 进行中动画的目的分区
    pub fn destination(&self) -> Option<SectionId> {
        self.tween.as_ref().map(|tween| tween.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;
    use crate::navigation::MemoryNavigation;

    fn page(width: f64) -> MemoryNavigation {
        MemoryNavigation::new(Viewport::new(0.0, width, 800.0)).with_sections(&[
            (SectionId::Home, 800.0),
            (SectionId::About, 1000.0),
            (SectionId::Services, 1400.0),
            (SectionId::Gallery, 1200.0),
        ])
    }

    #[test]
    fn test_header_offset_by_breakpoint() {
        let config = NavigationConfig::default();
        let navigator = Navigator::new(&config);

        assert_eq!(navigator.target_offset(SectionId::About, &page(1280.0)), Some(716.0));
        assert_eq!(navigator.target_offset(SectionId::About, &page(767.0)), Some(736.0));
        assert_eq!(navigator.target_offset(SectionId::Home, &page(1280.0)), Some(0.0));
        assert_eq!(navigator.target_offset(SectionId::Contact, &page(1280.0)), None);
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut nav = page(1280.0);
        let mut navigator = Navigator::new(&NavigationConfig::default());
        assert_eq!(navigator.go_to(SectionId::Booking, &mut nav), None);
        assert!(!navigator.is_animating());
        assert!(nav.scroll_log().is_empty());
    }

    #[test]
    fn test_animates_to_target() {
        let mut nav = page(1280.0);
        let mut navigator = Navigator::new(&NavigationConfig::default());

        navigator.go_to(SectionId::Services, &mut nav);
        assert!(navigator.is_animating());

        assert_eq!(navigator.tick(0.4, &mut nav), None);
        let mid = nav.scroll_y();
        assert!(mid > 0.0 && mid < 1716.0);

        assert_eq!(navigator.tick(0.5, &mut nav), Some(SectionId::Services));
        assert_eq!(nav.scroll_y(), 1716.0);
        assert!(!navigator.is_animating());
    }

    #[test]
    fn test_new_go_to_replaces_in_flight() {
        let mut nav = page(1280.0);
        let mut navigator = Navigator::new(&NavigationConfig::default());

        navigator.go_to(SectionId::Gallery, &mut nav);
        navigator.tick(0.3, &mut nav);
        let from = nav.scroll_y();

        navigator.go_to(SectionId::About, &mut nav);
        assert_eq!(navigator.destination(), Some(SectionId::About));

        // 从当前位置出发，而不是从 0
        navigator.tick(0.0, &mut nav);
        assert!((nav.scroll_y() - from).abs() < 1e-6);

        let mut arrived = None;
        for _ in 0..20 {
            if let Some(section) = navigator.tick(0.05, &mut nav) {
                arrived = Some(section);
                break;
            }
        }
        assert_eq!(arrived, Some(SectionId::About));
        assert!((nav.scroll_y() - 716.0).abs() < 1e-6);
    }

    #[test]
    fn test_reduced_motion_jumps() {
        let mut nav = page(1280.0);
        let mut navigator = Navigator::new(&NavigationConfig::default());
        navigator.set_reduced_motion(true);

        assert_eq!(navigator.go_to(SectionId::About, &mut nav), Some(716.0));
        assert!(!navigator.is_animating());
        assert_eq!(nav.scroll_log(), &[(716.0, ScrollBehavior::Instant)]);
    }
}
