//! # Tracker 模块
//!
//! 视口相交追踪器。对每个注册元素按触发条件计算所处阶段
//! （`Before` / `Inside` / `After`），阶段变化时产出过渡事件：
//!
//! ```text
//!            Enter            Leave
//!   Before ─────────► Inside ─────────► After
//!          ◄─────────        ◄─────────
//!           LeaveBack         EnterBack
//! ```
//!
//! 多个追踪器可以用不同的条件观察同一个元素，互不干扰：
//! 订阅 ID 带有追踪器自身的编号，事件只会路由回发起订阅的一方。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Viewport};

static NEXT_TRACKER_ID: AtomicU32 = AtomicU32::new(1);

/// 元素句柄（由宿主分配，对追踪器不透明）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementHandle(pub u64);

/// 订阅 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    tracker: u32,
    seq: u32,
}

impl SubscriptionId {
    /// 发起订阅的追踪器编号
    pub fn tracker(&self) -> u32 {
        self.tracker
    }
}

/// 元素上的参考边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

/// 滚动线：元素的某条边与视口某个百分比位置对齐的时刻
///
/// `ScrollLine::top(0.8)` 即 "top 80%"：元素顶边到达视口 80% 高度处。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollLine {
    pub edge: Edge,
    /// 视口高度的比例，可以为负（线在视口上方）
    pub viewport_fraction: f64,
}

impl ScrollLine {
    pub fn new(edge: Edge, viewport_fraction: f64) -> Self {
        Self {
            edge,
            viewport_fraction,
        }
    }

    pub fn top(viewport_fraction: f64) -> Self {
        Self::new(Edge::Top, viewport_fraction)
    }

    pub fn bottom(viewport_fraction: f64) -> Self {
        Self::new(Edge::Bottom, viewport_fraction)
    }

    /// 元素是否已越过这条线（向下滚动方向）
    fn passed(&self, rect: &Rect, viewport: &Viewport) -> bool {
        let edge = match self.edge {
            Edge::Top => rect.top,
            Edge::Center => rect.top + rect.height / 2.0,
            Edge::Bottom => rect.bottom(),
        };
        edge <= viewport.line(self.viewport_fraction)
    }
}

/// 触发条件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Trigger {
    /// 可见比例 ≥ threshold 时处于 Inside（IntersectionObserver 语义）
    Ratio { threshold: f64 },
    /// 覆盖率（可见高度 / min(元素高, 视口高)）≥ threshold 时处于 Inside
    Coverage { threshold: f64 },
    /// start 线与 end 线之间处于 Inside；`end` 缺省为 "bottom 0%"
    Scroll {
        start: ScrollLine,
        end: Option<ScrollLine>,
    },
}

impl Trigger {
    /// 滚动线触发，带结束线
    pub fn scroll(start: ScrollLine, end: ScrollLine) -> Self {
        Trigger::Scroll {
            start,
            end: Some(end),
        }
    }

    /// 滚动线触发，只有开始线
    pub fn scroll_from(start: ScrollLine) -> Self {
        Trigger::Scroll { start, end: None }
    }

    fn is_visibility(&self) -> bool {
        matches!(self, Trigger::Ratio { .. } | Trigger::Coverage { .. })
    }

    /// 计算元素当前阶段，同时返回度量值（可见比例 / 覆盖率 / 0）
    fn evaluate(&self, rect: &Rect, viewport: &Viewport) -> (Phase, f64) {
        match self {
            Trigger::Ratio { threshold } => {
                let ratio = rect.visible_ratio(viewport);
                (visibility_phase(ratio, *threshold, rect, viewport), ratio)
            }
            Trigger::Coverage { threshold } => {
                let ratio = rect.coverage(viewport);
                (visibility_phase(ratio, *threshold, rect, viewport), ratio)
            }
            Trigger::Scroll { start, end } => {
                let end = end.unwrap_or(ScrollLine::bottom(0.0));
                let ratio = rect.visible_ratio(viewport);
                let phase = if !start.passed(rect, viewport) {
                    Phase::Before
                } else if end.passed(rect, viewport) {
                    Phase::After
                } else {
                    Phase::Inside
                };
                (phase, ratio)
            }
        }
    }
}

fn visibility_phase(ratio: f64, threshold: f64, rect: &Rect, viewport: &Viewport) -> Phase {
    if ratio > 0.0 && ratio >= threshold {
        return Phase::Inside;
    }
    // 元素中心仍在视口中心下方：尚未到达
    if rect.top + rect.height / 2.0 > viewport.height / 2.0 {
        Phase::Before
    } else {
        Phase::After
    }
}

/// 元素相对触发区间的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// 尚未进入（位于触发区间下方）
    Before,
    /// 处于触发区间内
    Inside,
    /// 已经离开（位于触发区间上方）
    After,
}

/// 过渡类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// 向下滚动时进入
    Enter,
    /// 向下滚动时离开
    Leave,
    /// 向上滚动时重新进入
    EnterBack,
    /// 向上滚动时离开
    LeaveBack,
}

impl Transition {
    /// 是否为进入类过渡
    pub fn is_entering(&self) -> bool {
        matches!(self, Transition::Enter | Transition::EnterBack)
    }

    /// 从阶段变化推导过渡序列（跨越两条边时按穿越顺序给出两个）
    pub fn between(from: Phase, to: Phase) -> &'static [Transition] {
        match (from, to) {
            (Phase::Before, Phase::Inside) => &[Transition::Enter],
            (Phase::Inside, Phase::After) => &[Transition::Leave],
            (Phase::After, Phase::Inside) => &[Transition::EnterBack],
            (Phase::Inside, Phase::Before) => &[Transition::LeaveBack],
            (Phase::Before, Phase::After) => &[Transition::Enter, Transition::Leave],
            (Phase::After, Phase::Before) => &[Transition::EnterBack, Transition::LeaveBack],
            _ => &[],
        }
    }
}

/// 追踪事件
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerEvent {
    pub subscription: SubscriptionId,
    pub element: ElementHandle,
    pub transition: Transition,
    /// 采样时的度量值（可见比例或覆盖率）
    pub ratio: f64,
}

/// 布局查询接口
///
/// 返回元素相对视口顶部的纵向范围；元素不存在（已卸载）时返回 `None`。
pub trait LayoutProvider {
    fn rect(&self, element: ElementHandle) -> Option<Rect>;
}

impl LayoutProvider for HashMap<ElementHandle, Rect> {
    fn rect(&self, element: ElementHandle) -> Option<Rect> {
        self.get(&element).copied()
    }
}

/// 被追踪的元素
#[derive(Debug, Clone)]
struct TrackedElement {
    id: SubscriptionId,
    element: ElementHandle,
    trigger: Trigger,
    /// `None` 表示还没有采样过
    phase: Option<Phase>,
}

/// 视口相交追踪器
#[derive(Debug)]
pub struct Tracker {
    id: u32,
    supported: bool,
    /// 按注册顺序保存
    entries: Vec<TrackedElement>,
    next_seq: u32,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    /// 创建追踪器
    pub fn new() -> Self {
        Self::with_support(true)
    }

    /// 平台不支持相交观察时使用：可以注册，但永远不会产出事件
    pub fn unsupported() -> Self {
        Self::with_support(false)
    }

    fn with_support(supported: bool) -> Self {
        Self {
            id: NEXT_TRACKER_ID.fetch_add(1, Ordering::Relaxed),
            supported,
            entries: Vec::new(),
            next_seq: 1,
        }
    }

    /// 追踪器编号
    pub fn id(&self) -> u32 {
        self.id
    }

    /// 平台是否支持相交观察
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// 开始观察元素
    pub fn observe(&mut self, element: ElementHandle, trigger: Trigger) -> SubscriptionId {
        let id = SubscriptionId {
            tracker: self.id,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.push(TrackedElement {
            id,
            element,
            trigger,
            phase: None,
        });
        id
    }

    /// 停止观察；订阅不存在时返回 `false`
    pub fn unobserve(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != subscription);
        before != self.entries.len()
    }

    /// 释放所有订阅
    pub fn disconnect(&mut self) {
        self.entries.clear();
    }

    /// 当前订阅数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 订阅是否属于本追踪器且仍然有效
    pub fn contains(&self, subscription: SubscriptionId) -> bool {
        self.entries.iter().any(|entry| entry.id == subscription)
    }

    /// 查询订阅最近一次采样的阶段
    pub fn phase(&self, subscription: SubscriptionId) -> Option<Phase> {
        self.entries
            .iter()
            .find(|entry| entry.id == subscription)
            .and_then(|entry| entry.phase)
    }

    /// 按当前视口与布局采样，返回本次产生的过渡事件
    ///
    /// 首次采样时，可见性触发的元素若已位于上方（After）只记录阶段，不补发事件；
    /// 滚动线触发的元素则按从 Before 出发处理。
    pub fn sample(&mut self, viewport: &Viewport, layout: &impl LayoutProvider) -> Vec<TrackerEvent> {
        if !self.supported {
            return Vec::new();
        }

        let mut events = Vec::new();
        for entry in &mut self.entries {
            let Some(rect) = layout.rect(entry.element) else {
                continue;
            };
            let (phase, ratio) = entry.trigger.evaluate(&rect, viewport);

            let previous = match entry.phase {
                Some(previous) => previous,
                None if phase == Phase::After && entry.trigger.is_visibility() => {
                    entry.phase = Some(phase);
                    continue;
                }
                None => Phase::Before,
            };
            entry.phase = Some(phase);

            for transition in Transition::between(previous, phase) {
                events.push(TrackerEvent {
                    subscription: entry.id,
                    element: entry.element,
                    transition: *transition,
                    ratio,
                });
            }
        }
        events
    }
}
