//! 首屏标语展示。
//!
//! 首屏可见比例越过阈值时打开展示效果，`reveal_ms` 毫秒后自动关闭。
//! 每次新的进入都会换发票据，旧的定时回调因此失效。

use tracing::debug;

use crate::config::HeroConfig;
use crate::tracker::{ElementHandle, SubscriptionId, Tracker, TrackerEvent, Trigger};

/// 自动关闭票据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HideTicket(u64);

/// 首屏标语展示状态
#[derive(Debug, Clone)]
pub struct HeroReveal {
    threshold: f64,
    reveal_ms: u32,
    subscription: Option<SubscriptionId>,
    revealed: bool,
    pending: Option<HideTicket>,
    next_ticket: u64,
}

impl Default for HeroReveal {
    fn default() -> Self {
        Self::new(&HeroConfig::default())
    }
}

impl HeroReveal {
    pub fn new(config: &HeroConfig) -> Self {
        Self {
            threshold: config.reveal_threshold,
            reveal_ms: config.reveal_ms,
            subscription: None,
            revealed: false,
            pending: None,
            next_ticket: 1,
        }
    }

    /// 在追踪器上观察首屏元素，重复绑定会替换旧订阅
    pub fn bind(&mut self, tracker: &mut Tracker, element: ElementHandle) -> SubscriptionId {
        if let Some(old) = self.subscription.take() {
            tracker.unobserve(old);
        }
        let subscription = tracker.observe(
            element,
            Trigger::Ratio {
                threshold: self.threshold,
            },
        );
        self.subscription = Some(subscription);
        subscription
    }

    /// 处理追踪事件；打开展示时返回自动关闭票据
    pub fn handle(&mut self, events: &[TrackerEvent]) -> Option<HideTicket> {
        let mut issued = None;
        for event in events {
            if Some(event.subscription) != self.subscription || !event.transition.is_entering() {
                continue;
            }
            let ticket = HideTicket(self.next_ticket);
            self.next_ticket += 1;
            self.revealed = true;
            self.pending = Some(ticket);
            issued = Some(ticket);
        }
        if issued.is_some() {
            debug!(reveal_ms = self.reveal_ms, "首屏标语展示");
        }
        issued
    }

    /// 定时到期；票据已失效时返回 `false`
    pub fn hide(&mut self, ticket: HideTicket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.revealed = false;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// 展示时长（毫秒）
    pub fn reveal_ms(&self) -> u32 {
        self.reveal_ms
    }

    /// 释放订阅
    pub fn unbind(&mut self, tracker: &mut Tracker) {
        if let Some(subscription) = self.subscription.take() {
            tracker.unobserve(subscription);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::geometry::{Rect, Viewport};

    fn sample(tracker: &mut Tracker, hero: ElementHandle, scroll_y: f64) -> Vec<TrackerEvent> {
        let viewport = Viewport::new(scroll_y, 1280.0, 800.0);
        let layout = HashMap::from([(hero, Rect::new(-scroll_y, 800.0))]);
        tracker.sample(&viewport, &layout)
    }

    #[test]
    fn test_reveal_then_hide() {
        let mut tracker = Tracker::new();
        let hero = ElementHandle(1);
        let mut reveal = HeroReveal::default();
        reveal.bind(&mut tracker, hero);

        let events = sample(&mut tracker, hero, 0.0);
        let ticket = reveal.handle(&events).unwrap();
        assert!(reveal.is_revealed());
        assert!(reveal.hide(ticket));
        assert!(!reveal.is_revealed());
        assert_eq!(reveal.reveal_ms(), 3000);
    }

    #[test]
    fn test_new_crossing_restarts_timer() {
        let mut tracker = Tracker::new();
        let hero = ElementHandle(1);
        let mut reveal = HeroReveal::default();
        reveal.bind(&mut tracker, hero);

        let first = reveal.handle(&sample(&mut tracker, hero, 0.0)).unwrap();
        // 滚出再滚回
        assert_eq!(reveal.handle(&sample(&mut tracker, hero, 700.0)), None);
        let second = reveal.handle(&sample(&mut tracker, hero, 0.0)).unwrap();

        assert!(!reveal.hide(first));
        assert!(reveal.is_revealed());
        assert!(reveal.hide(second));
    }
}
