//! # Entrance 模块
//!
//! 入场动画控制器：把追踪器的过渡事件翻译成元素上的补间。
//!
//! ## 状态机
//!
//! 每个绑定的元素都是一个显式状态机：
//!
//! ```text
//!               enter / enter-back
//!  NotYetPlayed ──────────────────► PlayingForward ──完成──► Played
//!       ▲                                                      │
//!       └──完成── PlayingReverse ◄──────────────────────────────┘
//!                                 leave / leave-back
//! ```
//!
//! 任意状态下收到新的过渡都会取消元素上进行中的补间，从当前值重新出发。
//!
//! ## 降级
//!
//! - 减少动态效果：所有时长与延迟归零，`handle` 内直接写入终点状态
//! - 追踪器不可用：`bind` 直接写入 `to` 并标记为 `Played`，内容不会卡在隐藏状态

pub mod presets;

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::animation::{
    AnimationEvent, AnimationId, AnimationSystem, Animatable, EasingFunction, ObjectId,
    PropertyTween, Timing, VisualProperty, VisualState,
};
use crate::tracker::{ElementHandle, SubscriptionId, Tracker, TrackerEvent, Transition, Trigger};

/// 未指定离场时长时，离场时长为入场时长的比例
pub const EXIT_DURATION_RATIO: f32 = 0.5;

/// 计数器默认时长（秒）
pub const COUNTER_DURATION: f32 = 1.6;

/// 绑定 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u64);

/// 入场状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntranceState {
    #[default]
    NotYetPlayed,
    PlayingForward,
    Played,
    PlayingReverse,
}

/// 离场策略
///
/// 未指定的状态沿用入场的 `from`，这样离场方向与入场方向一致
/// （从右侧进入的卡片也从右侧离开）。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExitSpec {
    /// 向下滚出（leave）时的目标状态
    #[serde(default)]
    pub leave: Option<VisualState>,
    /// 向上滚出（leave-back）时的目标状态
    #[serde(default)]
    pub leave_back: Option<VisualState>,
    #[serde(default)]
    pub leave_duration: Option<f32>,
    #[serde(default)]
    pub leave_back_duration: Option<f32>,
    /// 缺省为入场曲线的反向
    #[serde(default)]
    pub easing: Option<EasingFunction>,
    /// 缺省与入场时长相同
    #[serde(default)]
    pub enter_back_duration: Option<f32>,
}

/// 动画规格（不可变）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub from: VisualState,
    pub to: VisualState,
    pub duration: f32,
    pub easing: EasingFunction,
    pub delay: f32,
    /// 分组内每个成员追加的延迟
    pub stagger: f32,
    #[serde(default)]
    pub exit: ExitSpec,
}

impl AnimationSpec {
    pub fn new(from: VisualState, to: VisualState) -> Self {
        Self {
            from,
            to,
            duration: 0.9,
            easing: EasingFunction::EaseOutQuart,
            delay: 0.0,
            stagger: 0.0,
            exit: ExitSpec::default(),
        }
    }

    /// 从 `from` 淡入到完全可见
    pub fn reveal(from: VisualState) -> Self {
        Self::new(from, VisualState::VISIBLE)
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_stagger(mut self, stagger: f32) -> Self {
        self.stagger = stagger.max(0.0);
        self
    }

    pub fn with_exit(mut self, exit: ExitSpec) -> Self {
        self.exit = exit;
        self
    }

    /// 减少动态效果版本：所有时长与延迟归零
    pub fn reduced(mut self) -> Self {
        self.duration = 0.0;
        self.delay = 0.0;
        self.stagger = 0.0;
        self.exit.leave_duration = Some(0.0);
        self.exit.leave_back_duration = Some(0.0);
        self.exit.enter_back_duration = Some(0.0);
        self
    }

    /// 是否所有阶段都是瞬时的
    pub fn is_instant(&self) -> bool {
        self.duration <= 0.0
            && self.delay <= 0.0
            && self.leave_duration() <= 0.0
            && self.leave_back_duration() <= 0.0
            && self.enter_back_duration() <= 0.0
    }

    pub fn leave_state(&self) -> VisualState {
        self.exit.leave.unwrap_or(self.from)
    }

    pub fn leave_back_state(&self) -> VisualState {
        self.exit.leave_back.unwrap_or(self.from)
    }

    pub fn leave_duration(&self) -> f32 {
        self.exit
            .leave_duration
            .unwrap_or(self.duration * EXIT_DURATION_RATIO)
    }

    pub fn leave_back_duration(&self) -> f32 {
        self.exit
            .leave_back_duration
            .unwrap_or(self.duration * EXIT_DURATION_RATIO)
    }

    pub fn exit_easing(&self) -> EasingFunction {
        self.exit.easing.unwrap_or_else(|| self.easing.reversed())
    }

    pub fn enter_back_duration(&self) -> f32 {
        self.exit.enter_back_duration.unwrap_or(self.duration)
    }

    /// 过渡对应的目标状态与时间参数
    pub fn plan(&self, transition: Transition) -> (VisualState, Timing) {
        match transition {
            Transition::Enter => (
                self.to,
                Timing::new(self.duration)
                    .with_delay(self.delay)
                    .with_easing(self.easing),
            ),
            Transition::EnterBack => (
                self.to,
                Timing::new(self.enter_back_duration())
                    .with_delay(self.delay)
                    .with_easing(self.easing),
            ),
            Transition::Leave => (
                self.leave_state(),
                Timing::new(self.leave_duration()).with_easing(self.exit_easing()),
            ),
            Transition::LeaveBack => (
                self.leave_back_state(),
                Timing::new(self.leave_back_duration()).with_easing(self.exit_easing()),
            ),
        }
    }

    /// 分组成员的规格：延迟按序号递增，`AlternateX` 时按奇偶翻转水平位移
    pub fn for_member(&self, index: usize, layout: GroupLayout) -> Self {
        let mut spec = *self;
        spec.delay = self.delay + self.stagger * index as f32;
        if layout == GroupLayout::AlternateX {
            let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
            spec.from.x = sign * self.from.x.abs();
            if let Some(leave) = spec.exit.leave.as_mut() {
                leave.x = sign * leave.x.abs();
            }
            if let Some(leave_back) = spec.exit.leave_back.as_mut() {
                leave_back.x = sign * leave_back.x.abs();
            }
        }
        spec
    }
}

/// 分组布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupLayout {
    /// 所有成员方向一致
    #[default]
    Uniform,
    /// 偶数序号从右侧进入（+|x|），奇数序号从左侧进入（-|x|）
    AlternateX,
}

/// 分组的触发方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAnchor {
    /// 每个成员各自作为触发元素
    PerElement,
    /// 所有成员共享一个触发元素（通常是容器）
    Shared(ElementHandle),
}

/// 计数器规格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub target: u64,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    pub duration: f32,
    pub easing: EasingFunction,
}

impl CounterSpec {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            prefix: String::new(),
            suffix: String::new(),
            duration: COUNTER_DURATION,
            easing: EasingFunction::EaseOutQuart,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// 显示文本：四舍五入、千分位分隔，加上前后缀
    pub fn display(&self, value: f32) -> String {
        let rounded = value.max(0.0).round() as u64;
        format!("{}{}{}", self.prefix, group_thousands(rounded), self.suffix)
    }
}

/// 千分位分隔
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 元素的变化
#[derive(Debug, Clone, PartialEq)]
pub enum ElementChange {
    /// 视觉状态（transform / opacity）
    Visual(VisualState),
    /// 文本内容（计数器）
    Text(String),
}

/// `tick` 返回的样式更新
#[derive(Debug, Clone, PartialEq)]
pub struct StyleUpdate {
    pub element: ElementHandle,
    pub change: ElementChange,
}

/// 被动画驱动的视觉节点
#[derive(Debug)]
struct VisualNode {
    state: Cell<VisualState>,
    dirty: Cell<bool>,
}

impl VisualNode {
    fn new(state: VisualState) -> Self {
        Self {
            state: Cell::new(state),
            dirty: Cell::new(true),
        }
    }

    fn write(&self, state: VisualState) {
        if self.state.get() != state {
            self.state.set(state);
            self.dirty.set(true);
        }
    }
}

impl Animatable for VisualNode {
    fn get_property(&self, property: VisualProperty) -> Option<f32> {
        self.state.get().get(property)
    }

    fn set_property(&self, property: VisualProperty, value: f32) -> bool {
        let mut state = self.state.get();
        if !state.set(property, value) {
            return false;
        }
        self.write(state);
        true
    }
}

/// 被动画驱动的计数器节点
///
/// 只有取整后的显示值变化才标记为脏。
#[derive(Debug)]
struct CounterNode {
    value: Cell<f32>,
    shown: Cell<u64>,
    dirty: Cell<bool>,
}

impl CounterNode {
    fn new(value: f32) -> Self {
        Self {
            value: Cell::new(value),
            shown: Cell::new(value.max(0.0).round() as u64),
            dirty: Cell::new(true),
        }
    }
}

impl Animatable for CounterNode {
    fn get_property(&self, property: VisualProperty) -> Option<f32> {
        (property == VisualProperty::Value).then(|| self.value.get())
    }

    fn set_property(&self, property: VisualProperty, value: f32) -> bool {
        if property != VisualProperty::Value {
            return false;
        }
        self.value.set(value);
        let shown = value.max(0.0).round() as u64;
        if shown != self.shown.get() {
            self.shown.set(shown);
            self.dirty.set(true);
        }
        true
    }
}

enum Target {
    Visual {
        node: Rc<VisualNode>,
        spec: AnimationSpec,
    },
    Counter {
        node: Rc<CounterNode>,
        spec: CounterSpec,
    },
}

struct Binding {
    element: ElementHandle,
    subscription: SubscriptionId,
    object: ObjectId,
    target: Target,
    state: EntranceState,
    /// 元素上唯一的进行中动画
    animation: Option<AnimationId>,
}

/// 入场动画控制器
pub struct EntranceController {
    system: AnimationSystem,
    bindings: BTreeMap<BindingId, Binding>,
    routes: HashMap<SubscriptionId, Vec<BindingId>>,
    reduced_motion: bool,
    next_binding: u64,
}

impl Default for EntranceController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EntranceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntranceController")
            .field("bindings", &self.bindings.len())
            .field("reduced_motion", &self.reduced_motion)
            .field("system", &self.system)
            .finish()
    }
}

impl EntranceController {
    pub fn new() -> Self {
        Self {
            system: AnimationSystem::new(),
            bindings: BTreeMap::new(),
            routes: HashMap::new(),
            reduced_motion: false,
            next_binding: 1,
        }
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// 切换减少动态效果，打开时立即完成所有进行中的补间
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
        if reduced_motion {
            let objects: Vec<ObjectId> = self.bindings.values().map(|b| b.object).collect();
            for object in objects {
                self.system.finish_object(object);
            }
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn next_id(&mut self) -> BindingId {
        let id = BindingId(self.next_binding);
        self.next_binding += 1;
        id
    }

    fn insert(&mut self, binding: Binding) -> BindingId {
        let id = self.next_id();
        self.routes.entry(binding.subscription).or_default().push(id);
        self.bindings.insert(id, binding);
        id
    }

    fn add_visual(
        &mut self,
        element: ElementHandle,
        subscription: SubscriptionId,
        spec: AnimationSpec,
        supported: bool,
    ) -> BindingId {
        let (initial, state) = if supported {
            (spec.from, EntranceState::NotYetPlayed)
        } else {
            (spec.to, EntranceState::Played)
        };
        let node = Rc::new(VisualNode::new(initial));
        let object = self.system.register(node.clone());
        self.insert(Binding {
            element,
            subscription,
            object,
            target: Target::Visual { node, spec },
            state,
            animation: None,
        })
    }

    /// 绑定单个元素，元素自身作为触发元素
    pub fn bind(
        &mut self,
        tracker: &mut Tracker,
        element: ElementHandle,
        trigger: Trigger,
        spec: AnimationSpec,
    ) -> BindingId {
        let subscription = tracker.observe(element, trigger);
        if !tracker.is_supported() {
            debug!(element = element.0, "追踪器不可用，元素直接显示");
        }
        self.add_visual(element, subscription, spec, tracker.is_supported())
    }

    /// 绑定一组元素
    ///
    /// 成员 `i` 的延迟为 `delay + stagger * i`；`GroupLayout::AlternateX`
    /// 按奇偶决定水平方向。
    pub fn bind_group(
        &mut self,
        tracker: &mut Tracker,
        elements: &[ElementHandle],
        anchor: GroupAnchor,
        trigger: Trigger,
        spec: AnimationSpec,
        layout: GroupLayout,
    ) -> Vec<BindingId> {
        let supported = tracker.is_supported();
        let shared = match anchor {
            GroupAnchor::Shared(container) => Some(tracker.observe(container, trigger)),
            GroupAnchor::PerElement => None,
        };

        elements
            .iter()
            .enumerate()
            .map(|(index, &element)| {
                let subscription = match shared {
                    Some(subscription) => subscription,
                    None => tracker.observe(element, trigger),
                };
                self.add_visual(element, subscription, spec.for_member(index, layout), supported)
            })
            .collect()
    }

    /// 绑定计数器：进入时从 0 数到目标值，离开时归零
    pub fn bind_counter(
        &mut self,
        tracker: &mut Tracker,
        element: ElementHandle,
        trigger: Trigger,
        spec: CounterSpec,
    ) -> BindingId {
        let subscription = tracker.observe(element, trigger);
        let (initial, state) = if tracker.is_supported() {
            (0.0, EntranceState::NotYetPlayed)
        } else {
            (spec.target as f32, EntranceState::Played)
        };
        let node = Rc::new(CounterNode::new(initial));
        let object = self.system.register(node.clone());
        self.insert(Binding {
            element,
            subscription,
            object,
            target: Target::Counter { node, spec },
            state,
            animation: None,
        })
    }

    /// 处理追踪器事件，不属于本控制器的订阅直接忽略
    pub fn handle(&mut self, events: &[TrackerEvent]) {
        for event in events {
            let Some(ids) = self.routes.get(&event.subscription).cloned() else {
                continue;
            };
            for id in ids {
                self.apply(id, event.transition);
            }
        }
    }

    fn apply(&mut self, id: BindingId, transition: Transition) {
        let Some(binding) = self.bindings.get_mut(&id) else {
            return;
        };
        let reduced = self.reduced_motion;

        let started = match &binding.target {
            Target::Visual { spec, .. } => {
                let spec = if reduced { spec.reduced() } else { *spec };
                let (goal, timing) = spec.plan(transition);
                let targets: Vec<(VisualProperty, f32)> = VisualProperty::TRANSFORM_SET
                    .iter()
                    .filter_map(|&p| goal.get(p).map(|v| (p, v)))
                    .collect();
                self.system
                    .animate_to(binding.object, &targets, timing)
                    .map(|anim| (anim, timing.is_instant()))
            }
            Target::Counter { node, spec } => {
                if transition.is_entering() {
                    let timing = if reduced {
                        Timing::new(0.0)
                    } else {
                        Timing::new(spec.duration).with_easing(spec.easing)
                    };
                    let tween = PropertyTween::new(VisualProperty::Value, 0.0, spec.target as f32);
                    self.system
                        .animate(binding.object, &[tween], timing)
                        .map(|anim| (anim, timing.is_instant()))
                } else {
                    self.system.cancel_object(binding.object);
                    node.set_property(VisualProperty::Value, 0.0);
                    binding.animation = None;
                    binding.state = EntranceState::NotYetPlayed;
                    return;
                }
            }
        };

        match started {
            Ok((anim, instant)) => {
                if instant {
                    binding.animation = None;
                    binding.state = if transition.is_entering() {
                        EntranceState::Played
                    } else {
                        EntranceState::NotYetPlayed
                    };
                } else {
                    binding.animation = Some(anim);
                    binding.state = if transition.is_entering() {
                        EntranceState::PlayingForward
                    } else {
                        EntranceState::PlayingReverse
                    };
                }
            }
            Err(err) => {
                warn!(element = binding.element.0, error = %err, "入场动画启动失败");
            }
        }
    }

    /// 推进所有补间，返回发生变化的元素
    ///
    /// `tick(0.0)` 可用于在绑定后立即取得初始状态。
    pub fn tick(&mut self, dt: f32) -> Vec<StyleUpdate> {
        for event in self.system.update(dt) {
            let AnimationEvent::Completed(anim) = event else {
                continue;
            };
            if let Some(binding) = self
                .bindings
                .values_mut()
                .find(|b| b.animation == Some(anim))
            {
                binding.animation = None;
                binding.state = match binding.state {
                    EntranceState::PlayingForward => EntranceState::Played,
                    EntranceState::PlayingReverse => EntranceState::NotYetPlayed,
                    other => other,
                };
            }
        }

        let mut updates = Vec::new();
        for binding in self.bindings.values() {
            let change = match &binding.target {
                Target::Visual { node, .. } => node
                    .dirty
                    .replace(false)
                    .then(|| ElementChange::Visual(node.state.get())),
                Target::Counter { node, spec } => node
                    .dirty
                    .replace(false)
                    .then(|| ElementChange::Text(spec.display(node.value.get()))),
            };
            if let Some(change) = change {
                updates.push(StyleUpdate {
                    element: binding.element,
                    change,
                });
            }
        }
        updates
    }

    /// 是否还有进行中的补间
    pub fn is_animating(&self) -> bool {
        self.system.has_active_animations()
    }

    pub fn state(&self, id: BindingId) -> Option<EntranceState> {
        self.bindings.get(&id).map(|b| b.state)
    }

    /// 元素当前的视觉状态（计数器绑定返回 `None`）
    pub fn visual(&self, id: BindingId) -> Option<VisualState> {
        match &self.bindings.get(&id)?.target {
            Target::Visual { node, .. } => Some(node.state.get()),
            Target::Counter { .. } => None,
        }
    }

    /// 计数器当前的显示文本（视觉绑定返回 `None`）
    pub fn counter_text(&self, id: BindingId) -> Option<String> {
        match &self.bindings.get(&id)?.target {
            Target::Counter { node, spec } => Some(spec.display(node.value.get())),
            Target::Visual { .. } => None,
        }
    }

    /// 绑定使用的规格（分组成员返回已展开的规格）
    pub fn spec(&self, id: BindingId) -> Option<AnimationSpec> {
        match &self.bindings.get(&id)?.target {
            Target::Visual { spec, .. } => Some(*spec),
            Target::Counter { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 解除绑定；共享订阅在最后一个成员解除时才释放
    pub fn unbind(&mut self, tracker: &mut Tracker, id: BindingId) -> bool {
        let Some(binding) = self.bindings.remove(&id) else {
            return false;
        };
        self.system.unregister(binding.object);
        if let Some(ids) = self.routes.get_mut(&binding.subscription) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.routes.remove(&binding.subscription);
                tracker.unobserve(binding.subscription);
            }
        }
        true
    }

    /// 释放所有绑定与订阅
    pub fn teardown(&mut self, tracker: &mut Tracker) {
        for subscription in self.routes.keys() {
            tracker.unobserve(*subscription);
        }
        self.routes.clear();
        for binding in self.bindings.values() {
            self.system.unregister(binding.object);
        }
        self.bindings.clear();
    }
}
