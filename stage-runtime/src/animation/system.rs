//! # System 模块
//!
//! 补间系统管理器。
//!
//! 对象实现 `Animatable` trait，系统直接设置属性值：
//! ```rust,ignore
//! let obj_id = system.register(my_object);
//! system.animate(obj_id, &[PropertyTween::new(VisualProperty::Opacity, 0.0, 1.0)], Timing::new(0.3))?;
//! // 值自动应用到对象，无需手动查询
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use super::traits::{AnimPropertyKey, Animatable, ObjectId};
use super::{Animation, AnimationEvent, AnimationId, EasingFunction, VisualProperty};
use crate::error::AnimationError;

/// 单个属性的起止值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyTween {
    pub property: VisualProperty,
    pub from: f32,
    pub to: f32,
}

impl PropertyTween {
    pub fn new(property: VisualProperty, from: f32, to: f32) -> Self {
        Self { property, from, to }
    }
}

/// 一次动画调用的时间参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// 时长（秒）
    pub duration: f32,
    /// 延迟（秒）
    pub delay: f32,
    pub easing: EasingFunction,
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Timing {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            delay: 0.0,
            easing: EasingFunction::default(),
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 无延迟的零时长动画，调用时立即落到终点
    pub fn is_instant(&self) -> bool {
        self.duration <= 0.0 && self.delay <= 0.0
    }
}

/// 补间系统
///
/// 管理所有补间实例，提供统一的更新和查询接口。
pub struct AnimationSystem {
    /// 已注册的对象（ObjectId -> 对象）
    objects: HashMap<ObjectId, Rc<dyn Animatable>>,
    /// 补间（AnimPropertyKey -> Animation）
    animations: HashMap<AnimPropertyKey, Animation>,
    next_anim_id: u64,
    next_object_id: u64,
    /// 待处理的事件队列
    events: Vec<AnimationEvent>,
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSystem")
            .field("objects", &self.objects.len())
            .field("animations", &self.animations.len())
            .finish()
    }
}

impl AnimationSystem {
    /// 创建新的补间系统
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            animations: HashMap::new(),
            next_anim_id: 1,
            next_object_id: 1,
            events: Vec::new(),
        }
    }

    fn next_animation_id(&mut self) -> AnimationId {
        let id = AnimationId::new(self.next_anim_id);
        self.next_anim_id += 1;
        id
    }

    fn next_object_id(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next_object_id);
        self.next_object_id += 1;
        id
    }

    // ========== 对象管理 ==========

    /// 注册可动画对象，返回系统分配的唯一 `ObjectId`
    pub fn register<T: Animatable>(&mut self, object: Rc<T>) -> ObjectId {
        let id = self.next_object_id();
        self.objects.insert(id, object as Rc<dyn Animatable>);
        id
    }

    /// 注销对象，同时丢弃其所有补间（不产生事件）
    pub fn unregister(&mut self, object_id: ObjectId) {
        self.objects.remove(&object_id);
        self.animations.retain(|key, _| key.object_id != object_id);
    }

    pub fn is_registered(&self, object_id: ObjectId) -> bool {
        self.objects.contains_key(&object_id)
    }

    pub fn registered_count(&self) -> usize {
        self.objects.len()
    }

    // ========== 动画控制 ==========

    /// 启动对象动画
    ///
    /// 同一次调用中的所有属性共享一个 `AnimationId`，最后一个属性结束时
    /// 产出 `Completed`。对象上进行中的补间会先被取消。
    /// `Timing::is_instant()` 时直接写入终点值并立即完成。
    pub fn animate(
        &mut self,
        object_id: ObjectId,
        tweens: &[PropertyTween],
        timing: Timing,
    ) -> Result<AnimationId, AnimationError> {
        if tweens.is_empty() {
            return Err(AnimationError::EmptyTween);
        }
        let object = self
            .objects
            .get(&object_id)
            .cloned()
            .ok_or(AnimationError::ObjectNotFound(object_id))?;

        for tween in tweens {
            if object.get_property(tween.property).is_none() {
                return Err(AnimationError::PropertyNotSupported {
                    object: object_id,
                    property: tween.property,
                });
            }
        }

        self.cancel_object(object_id);

        let anim_id = self.next_animation_id();
        self.events.push(AnimationEvent::Started(anim_id));

        if timing.is_instant() {
            for tween in tweens {
                object.set_property(tween.property, tween.to);
            }
            self.events.push(AnimationEvent::Completed(anim_id));
            return Ok(anim_id);
        }

        for tween in tweens {
            object.set_property(tween.property, tween.from);
            let animation = Animation::new(anim_id, tween.from, tween.to, timing.duration)
                .with_easing(timing.easing)
                .with_delay(timing.delay);
            self.animations
                .insert(AnimPropertyKey::new(object_id, tween.property), animation);
        }
        trace!(object = %object_id, animation = anim_id.0, "补间开始");

        Ok(anim_id)
    }

    /// 从属性的当前值出发动画到目标值
    pub fn animate_to(
        &mut self,
        object_id: ObjectId,
        targets: &[(VisualProperty, f32)],
        timing: Timing,
    ) -> Result<AnimationId, AnimationError> {
        let object = self
            .objects
            .get(&object_id)
            .ok_or(AnimationError::ObjectNotFound(object_id))?;

        let mut tweens = Vec::with_capacity(targets.len());
        for &(property, to) in targets {
            let from = object
                .get_property(property)
                .ok_or(AnimationError::PropertyNotSupported {
                    object: object_id,
                    property,
                })?;
            tweens.push(PropertyTween::new(property, from, to));
        }
        self.animate(object_id, &tweens, timing)
    }

    /// 取消对象上的所有补间，属性停在当前值
    ///
    /// 返回是否确实取消了什么。
    pub fn cancel_object(&mut self, object_id: ObjectId) -> bool {
        let mut cancelled: Vec<AnimationId> = Vec::new();
        self.animations.retain(|key, animation| {
            if key.object_id != object_id {
                return true;
            }
            if animation.is_active() && !cancelled.contains(&animation.id) {
                cancelled.push(animation.id);
            }
            false
        });
        cancelled.sort_by_key(|id| id.0);
        let any = !cancelled.is_empty();
        self.events
            .extend(cancelled.into_iter().map(AnimationEvent::Cancelled));
        any
    }

    /// 立即完成对象上的所有补间，属性跳到终点值
    pub fn finish_object(&mut self, object_id: ObjectId) {
        let Some(object) = self.objects.get(&object_id).cloned() else {
            return;
        };
        let mut finished: Vec<AnimationId> = Vec::new();
        self.animations.retain(|key, animation| {
            if key.object_id != object_id {
                return true;
            }
            animation.force_complete();
            object.set_property(key.property, animation.final_value());
            if !finished.contains(&animation.id) {
                finished.push(animation.id);
            }
            false
        });
        finished.sort_by_key(|id| id.0);
        self.events
            .extend(finished.into_iter().map(AnimationEvent::Completed));
    }

    /// 推进所有补间
    ///
    /// # 返回
    /// 本帧产生的事件（包括两次 `update` 之间由 `animate`/`cancel_object` 排入的事件）
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let mut touched: Vec<AnimationId> = Vec::new();

        for (key, animation) in &mut self.animations {
            if !animation.is_active() {
                continue;
            }
            animation.update(dt);
            // 延迟期间不写值，保持调用时设置的起点
            if animation.has_started() {
                if let Some(object) = self.objects.get(&key.object_id) {
                    object.set_property(key.property, animation.current_value());
                }
            }
            if animation.is_finished() && !touched.contains(&animation.id) {
                touched.push(animation.id);
            }
        }

        self.animations.retain(|_, animation| !animation.is_finished());

        // 只有同一 ID 的所有属性都结束，才算整个动画完成
        touched.retain(|id| !self.animations.values().any(|a| a.id == *id));
        touched.sort_by_key(|id| id.0);
        self.events
            .extend(touched.into_iter().map(AnimationEvent::Completed));

        std::mem::take(&mut self.events)
    }

    // ========== 查询方法 ==========

    pub fn has_active_animations(&self) -> bool {
        self.animations.values().any(|a| a.is_active())
    }

    pub fn has_object_animations(&self, object_id: ObjectId) -> bool {
        self.animations
            .iter()
            .any(|(key, anim)| key.object_id == object_id && anim.is_active())
    }

    /// 活跃的补间数（按属性计）
    pub fn active_count(&self) -> usize {
        self.animations.values().filter(|a| a.is_active()).count()
    }
}
