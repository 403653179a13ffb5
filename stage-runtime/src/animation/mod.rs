//! # Animation 模块
//!
//! 通用补间系统，入场动画与计数器都建立在它之上。
//!
//! ## 核心设计理念
//!
//! 动画系统只负责 **时间轴管理**：
//! - 知道某个属性从 A 到 B 需要在 duration 内变化
//! - 通过 `Animatable` 直接把当前值写回对象
//! - **不假设对象类型**，对象自己决定如何使用这些值
//!
//! 与一般的按属性覆盖不同，这里以对象为单位：对同一对象发起新的动画时，
//! 该对象所有进行中的补间都会先被取消（后写者胜）。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let mut system = AnimationSystem::new();
//! let card = Rc::new(MyElement::default());
//! let id = system.register(card.clone());
//!
//! system.animate_to(
//!     id,
//!     &[(VisualProperty::Opacity, 1.0), (VisualProperty::Y, 0.0)],
//!     Timing::new(0.8).with_easing(EasingFunction::EaseOutQuart),
//! )?;
//!
//! for event in system.update(dt) { /* ... */ }
//! ```

mod animation;
mod easing;
mod system;
mod traits;
mod visual;

pub use animation::{Animation, AnimationId, AnimationState};
pub use easing::EasingFunction;
pub use system::{AnimationSystem, PropertyTween, Timing};
pub use traits::{AnimPropertyKey, Animatable, ObjectId};
pub use visual::{VisualProperty, VisualState};

/// 动画事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// 动画开始
    Started(AnimationId),
    /// 动画的所有属性都已到达终点
    Completed(AnimationId),
    /// 被同一对象上的新动画或显式取消打断
    Cancelled(AnimationId),
}
