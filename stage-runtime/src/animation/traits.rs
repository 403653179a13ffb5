//! # Traits 模块
//!
//! 可动画对象的接口定义。
//!
//! ## 核心概念
//!
//! - `ObjectId`: 由 AnimationSystem 分配的唯一对象标识符
//! - `AnimPropertyKey`: 对象 + 属性，动画表的键
//! - `Animatable`: 可动画对象接口

use std::fmt;

use super::VisualProperty;

/// 对象唯一标识符
///
/// 由 `AnimationSystem` 在对象注册时分配，使用内部计数器生成，不会重复。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    /// 创建新的对象 ID（仅供 AnimationSystem 内部使用）
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

/// 属性键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimPropertyKey {
    /// 对象实例 ID
    pub object_id: ObjectId,
    /// 属性
    pub property: VisualProperty,
}

impl AnimPropertyKey {
    pub fn new(object_id: ObjectId, property: VisualProperty) -> Self {
        Self {
            object_id,
            property,
        }
    }
}

impl fmt::Display for AnimPropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.object_id, self.property)
    }
}

/// 可动画对象接口
///
/// 对象声明自己支持哪些属性；动画系统通过 `&self` 写入，
/// 因此实现方使用 `Cell`/`RefCell` 做内部可变性。
pub trait Animatable: 'static {
    /// 获取属性的当前值，属性不存在时返回 `None`
    fn get_property(&self, property: VisualProperty) -> Option<f32>;

    /// 设置属性的新值，属性不存在时返回 `false`
    fn set_property(&self, property: VisualProperty, value: f32) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        let id1 = ObjectId::new(1);
        let id2 = ObjectId::new(2);

        assert_ne!(id1, id2);
        assert_eq!(id1.value(), 1);
        assert_eq!(id1.to_string(), "ObjectId(1)");
    }

    #[test]
    fn test_anim_property_key() {
        let id = ObjectId::new(1);
        let key1 = AnimPropertyKey::new(id, VisualProperty::Opacity);
        let key2 = AnimPropertyKey::new(id, VisualProperty::Opacity);
        let key3 = AnimPropertyKey::new(id, VisualProperty::Y);

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
    }
}
