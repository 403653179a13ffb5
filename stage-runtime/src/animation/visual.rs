//! # Visual 模块
//!
//! 入场动画驱动的视觉属性集合。

use serde::{Deserialize, Serialize};

/// 可动画的视觉属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualProperty {
    /// 水平位移（px）
    X,
    /// 垂直位移（px）
    Y,
    /// 不透明度（0.0 - 1.0）
    Opacity,
    /// 绕 X 轴旋转（度）
    RotateX,
    /// 数值（计数器）
    Value,
}

impl VisualProperty {
    /// `VisualState` 覆盖的属性组
    pub const TRANSFORM_SET: [VisualProperty; 4] = [
        VisualProperty::X,
        VisualProperty::Y,
        VisualProperty::Opacity,
        VisualProperty::RotateX,
    ];
}

/// 一组视觉属性的取值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub rotate_x: f32,
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for VisualState {
    fn default() -> Self {
        Self::VISIBLE
    }
}

impl VisualState {
    /// 最终停留的可见状态
    pub const VISIBLE: VisualState = VisualState {
        x: 0.0,
        y: 0.0,
        opacity: 1.0,
        rotate_x: 0.0,
    };

    /// 完全透明、无位移
    pub const HIDDEN: VisualState = VisualState {
        x: 0.0,
        y: 0.0,
        opacity: 0.0,
        rotate_x: 0.0,
    };

    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_rotate_x(mut self, rotate_x: f32) -> Self {
        self.rotate_x = rotate_x;
        self
    }

    /// 读取单个属性
    pub fn get(&self, property: VisualProperty) -> Option<f32> {
        match property {
            VisualProperty::X => Some(self.x),
            VisualProperty::Y => Some(self.y),
            VisualProperty::Opacity => Some(self.opacity),
            VisualProperty::RotateX => Some(self.rotate_x),
            VisualProperty::Value => None,
        }
    }

    /// 写入单个属性
    pub fn set(&mut self, property: VisualProperty, value: f32) -> bool {
        match property {
            VisualProperty::X => self.x = value,
            VisualProperty::Y => self.y = value,
            VisualProperty::Opacity => self.opacity = value.clamp(0.0, 1.0),
            VisualProperty::RotateX => self.rotate_x = value,
            VisualProperty::Value => return false,
        }
        true
    }

    /// CSS `transform` 值
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, 0px) rotateX({:.2}deg)",
            self.x, self.y, self.rotate_x
        )
    }

    /// CSS `opacity` 值
    pub fn css_opacity(&self) -> String {
        format!("{:.3}", self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let state = VisualState::HIDDEN.with_x(48.0).with_rotate_x(8.0);
        assert_eq!(state.x, 48.0);
        assert_eq!(state.opacity, 0.0);
        assert_eq!(state.get(VisualProperty::RotateX), Some(8.0));
        assert_eq!(state.get(VisualProperty::Value), None);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut state = VisualState::VISIBLE;
        state.set(VisualProperty::Opacity, 1.4);
        assert_eq!(state.opacity, 1.0);
    }

    #[test]
    fn test_css_output() {
        let state = VisualState::HIDDEN.with_y(24.0);
        assert_eq!(
            state.css_transform(),
            "translate3d(0.00px, 24.00px, 0px) rotateX(0.00deg)"
        );
        assert_eq!(state.css_opacity(), "0.000");
    }
}
