//! 活动分区同步器。
//!
//! 用自己的追踪器观察所有分区；分区覆盖率越过阈值时成为活动分区，
//! 并同步到地址片段（替换历史记录）与会话存储。

use std::collections::HashMap;

use tracing::debug;

use super::{NavigationContext, ScrollBehavior, SectionLayout, section_handle};
use crate::config::NavigationConfig;
use crate::section::SectionId;
use crate::tracker::{Phase, SubscriptionId, Tracker, Trigger};

/// 活动分区同步器
#[derive(Debug)]
pub struct SectionSync {
    tracker: Tracker,
    routes: HashMap<SubscriptionId, SectionId>,
    active: Option<SectionId>,
    slot_key: String,
    /// 程序化滚动期间不写回
    suppressed: bool,
    /// 抑制期间最后一次越入的分区，滚动被打断时提交
    pending: Option<SectionId>,
}

impl SectionSync {
    pub fn new(config: &NavigationConfig) -> Self {
        Self::with_tracker(Tracker::new(), config)
    }

    /// 使用指定的追踪器（例如 `Tracker::unsupported()`）
    pub fn with_tracker(mut tracker: Tracker, config: &NavigationConfig) -> Self {
        let trigger = Trigger::Coverage {
            threshold: config.center_threshold,
        };
        let routes = SectionId::ALL
            .iter()
            .map(|&section| (tracker.observe(section_handle(section), trigger), section))
            .collect();
        Self {
            tracker,
            routes,
            active: None,
            slot_key: config.slot_key.clone(),
            suppressed: false,
            pending: None,
        }
    }

    /// 当前活动分区
    pub fn active(&self) -> Option<SectionId> {
        self.active
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// 页面加载时应恢复到的分区
    ///
    /// 地址片段优先：片段存在但无法识别时不做任何事，也不再查看会话存储。
    /// 没有片段时使用会话存储中记录的分区。
    pub fn restore_target<C: NavigationContext + ?Sized>(&self, ctx: &C) -> Option<SectionId> {
        if let Some(fragment) = ctx.fragment() {
            return match SectionId::from_fragment(&fragment) {
                Ok(section) => Some(section),
                Err(e) => {
                    debug!(error = %e, "地址片段无法识别，跳过恢复");
                    None
                }
            };
        }
        let slot = ctx.read_slot(&self.slot_key)?;
        SectionId::from_fragment(&slot).ok()
    }

    /// 立即跳转到恢复目标（分区顶部对齐视口顶部）
    ///
    /// 宿主应在首次布局完成后（延迟一帧）调用。
    pub fn restore<C: NavigationContext + ?Sized>(&mut self, ctx: &mut C) -> Option<SectionId> {
        let target = self.restore_target(ctx)?;
        let Some(rect) = ctx.section_rect(target) else {
            debug!(section = %target, "恢复目标元素不存在");
            return None;
        };
        let y = rect.document_top(&ctx.viewport()).max(0.0);
        debug!(section = %target, y, "恢复滚动位置");
        ctx.scroll_to(y, ScrollBehavior::Instant);
        Some(target)
    }

    /// 滚动或尺寸变化后调用
    ///
    /// 返回本次新激活的分区（多个分区同时越过阈值时以最后一个为准）。
    pub fn on_scroll<C: NavigationContext + ?Sized>(&mut self, ctx: &mut C) -> Option<SectionId> {
        let viewport = ctx.viewport();
        let events = self.tracker.sample(&viewport, &SectionLayout(&*ctx));

        let mut activated = None;
        for event in events {
            if !event.transition.is_entering() {
                continue;
            }
            let Some(&section) = self.routes.get(&event.subscription) else {
                continue;
            };
            // 一次跳过整个分区时只是穿过，不算停留
            if self.tracker.phase(event.subscription) != Some(Phase::Inside) {
                continue;
            }
            if self.suppressed {
                self.pending = Some(section);
                continue;
            }
            self.activate(section, ctx);
            activated = Some(section);
        }
        activated
    }

    /// 程序化滚动开始，暂停写回
    pub fn begin_programmatic(&mut self) {
        self.suppressed = true;
        self.pending = None;
    }

    /// 程序化滚动结束，恢复写回并提交
    ///
    /// 到达时提交目的地；被打断（`None`）时提交抑制期间最后越入且仍在
    /// 视口内的分区，没有则取当前处于视口内的分区。返回被提交的分区。
    pub fn finish_programmatic<C: NavigationContext + ?Sized>(
        &mut self,
        destination: Option<SectionId>,
        ctx: &mut C,
    ) -> Option<SectionId> {
        self.suppressed = false;
        let pending = self.pending.take();
        let section = destination.or_else(|| {
            pending
                .filter(|&section| self.is_inside(section))
                .or_else(|| self.inside_section())
        })?;
        self.activate(section, ctx);
        Some(section)
    }

    /// 分区当前是否处于视口内
    fn is_inside(&self, section: SectionId) -> bool {
        self.routes.iter().any(|(&subscription, &routed)| {
            routed == section && self.tracker.phase(subscription) == Some(Phase::Inside)
        })
    }

    /// 处于视口内的分区，多个时取文档中靠后的一个
    fn inside_section(&self) -> Option<SectionId> {
        SectionId::ALL
            .iter()
            .rev()
            .copied()
            .find(|&section| self.is_inside(section))
    }

    fn activate<C: NavigationContext + ?Sized>(&mut self, section: SectionId, ctx: &mut C) {
        if self.active != Some(section) {
            debug!(section = %section, "活动分区切换");
        }
        self.active = Some(section);
        ctx.write_slot(&self.slot_key, section.as_str());
        ctx.replace_fragment(section);
    }

    /// 释放所有分区订阅
    pub fn disconnect(&mut self) {
        self.tracker.disconnect();
        self.routes.clear();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MemoryNavigation;

    fn page() -> MemoryNavigation {
        MemoryNavigation::default().with_sections(&[
            (SectionId::Home, 800.0),
            (SectionId::About, 1000.0),
            (SectionId::Services, 1400.0),
            (SectionId::Gallery, 1200.0),
            (SectionId::Contact, 900.0),
            (SectionId::Booking, 600.0),
        ])
    }

    #[test]
    fn test_activates_majority_visible_section() {
        let mut nav = page();
        let mut sync = SectionSync::new(&NavigationConfig::default());

        assert_eq!(sync.on_scroll(&mut nav), Some(SectionId::Home));

        // About 顶边在 800，滚到 400 时露出 400/800 = 0.5，还不够
        nav.set_scroll(400.0);
        assert_eq!(sync.on_scroll(&mut nav), None);

        nav.set_scroll(500.0);
        assert_eq!(sync.on_scroll(&mut nav), Some(SectionId::About));
        assert_eq!(nav.current_fragment(), Some("about"));
        assert_eq!(nav.slot("lastSectionId"), Some("about"));
        assert_eq!(nav.history_length(), 1);
    }

    #[test]
    fn test_restore_prefers_fragment() {
        let nav = page()
            .with_fragment("#gallery")
            .with_slot("lastSectionId", "contact");
        let sync = SectionSync::new(&NavigationConfig::default());
        assert_eq!(sync.restore_target(&nav), Some(SectionId::Gallery));
    }

    #[test]
    fn test_restore_unknown_fragment_skips_slot() {
        let nav = page()
            .with_fragment("#lobby")
            .with_slot("lastSectionId", "contact");
        let sync = SectionSync::new(&NavigationConfig::default());
        assert_eq!(sync.restore_target(&nav), None);
    }

    #[test]
    fn test_restore_from_slot_jumps_instantly() {
        let mut nav = page().with_slot("lastSectionId", "contact");
        let mut sync = SectionSync::new(&NavigationConfig::default());

        assert_eq!(sync.restore(&mut nav), Some(SectionId::Contact));
        assert_eq!(nav.scroll_log(), &[(4400.0, ScrollBehavior::Instant)]);
    }

    #[test]
    fn test_suppressed_during_programmatic_scroll() {
        let mut nav = page();
        let mut sync = SectionSync::new(&NavigationConfig::default());
        sync.on_scroll(&mut nav);
        let writes = nav.replace_count();

        sync.begin_programmatic();
        nav.set_scroll(900.0);
        assert_eq!(sync.on_scroll(&mut nav), None);
        nav.set_scroll(1800.0);
        assert_eq!(sync.on_scroll(&mut nav), None);
        assert_eq!(nav.replace_count(), writes);

        assert_eq!(
            sync.finish_programmatic(Some(SectionId::Services), &mut nav),
            Some(SectionId::Services)
        );
        assert_eq!(sync.active(), Some(SectionId::Services));
        assert_eq!(nav.replace_count(), writes + 1);
    }

    #[test]
    fn test_interrupted_scroll_commits_section_in_view() {
        let mut nav = page();
        let mut sync = SectionSync::new(&NavigationConfig::default());
        sync.on_scroll(&mut nav);
        assert_eq!(sync.active(), Some(SectionId::Home));

        sync.begin_programmatic();
        nav.set_scroll(900.0);
        sync.on_scroll(&mut nav);
        nav.set_scroll(2050.0);
        assert_eq!(sync.on_scroll(&mut nav), None);
        assert_eq!(sync.active(), Some(SectionId::Home));

        // 停在 Services 中间，穿过的 About 不算
        assert_eq!(
            sync.finish_programmatic(None, &mut nav),
            Some(SectionId::Services)
        );
        assert_eq!(sync.active(), Some(SectionId::Services));
        assert_eq!(nav.current_fragment(), Some("services"));
        assert_eq!(nav.slot("lastSectionId"), Some("services"));

        nav.set_scroll(2100.0);
        assert_eq!(sync.on_scroll(&mut nav), None);
        assert_eq!(sync.active(), Some(SectionId::Services));
    }

    #[test]
    fn test_interrupt_without_crossing_keeps_section_in_view() {
        let mut nav = page();
        let mut sync = SectionSync::new(&NavigationConfig::default());
        sync.on_scroll(&mut nav);

        sync.begin_programmatic();
        nav.set_scroll(100.0);
        sync.on_scroll(&mut nav);
        assert_eq!(sync.finish_programmatic(None, &mut nav), Some(SectionId::Home));
        assert_eq!(nav.current_fragment(), Some("home"));
    }

    #[test]
    fn test_unsupported_tracker_never_activates() {
        let mut nav = page();
        let mut sync = SectionSync::with_tracker(Tracker::unsupported(), &NavigationConfig::default());
        assert_eq!(sync.on_scroll(&mut nav), None);
        assert_eq!(sync.active(), None);
    }
}
