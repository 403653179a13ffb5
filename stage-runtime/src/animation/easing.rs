//! # Easing 模块
//!
//! 缓动函数库，用于动画的时间插值。
//!
//! 命名沿用 `power` 系列的习惯对应关系：
//! `power1` = Quad，`power2` = Cubic，`power3` = Quart。

use std::f32::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 二次缓入
    EaseInQuad,
    /// 二次缓出
    EaseOutQuad,
    /// 二次缓入缓出
    EaseInOutQuad,
    /// 三次缓入（power2.in）
    EaseInCubic,
    /// 三次缓出（power2.out）
    EaseOutCubic,
    /// 三次缓入缓出
    EaseInOutCubic,
    /// 四次缓入（power3.in）
    EaseInQuart,
    /// 四次缓出（power3.out），入场动画的默认曲线
    #[default]
    EaseOutQuart,
    /// 四次缓入缓出
    EaseInOutQuart,
    /// 正弦缓入缓出
    EaseInOutSine,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseInCubic => t * t * t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseInQuart => t.powi(4),
            EasingFunction::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            EasingFunction::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            EasingFunction::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// 反向曲线：缓出 ↔ 缓入，对称曲线保持不变
    ///
    /// 离场动画用它得到“倒放”的手感。
    pub fn reversed(&self) -> Self {
        match self {
            EasingFunction::EaseInQuad => EasingFunction::EaseOutQuad,
            EasingFunction::EaseOutQuad => EasingFunction::EaseInQuad,
            EasingFunction::EaseInCubic => EasingFunction::EaseOutCubic,
            EasingFunction::EaseOutCubic => EasingFunction::EaseInCubic,
            EasingFunction::EaseInQuart => EasingFunction::EaseOutQuart,
            EasingFunction::EaseOutQuart => EasingFunction::EaseInQuart,
            other => *other,
        }
    }
}

impl FromStr for EasingFunction {
    type Err = String;

    /// 解析 `power3.out` 风格的名字
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let easing = match s.trim() {
            "none" | "linear" => EasingFunction::Linear,
            "power1.in" => EasingFunction::EaseInQuad,
            "power1.out" => EasingFunction::EaseOutQuad,
            "power1.inOut" => EasingFunction::EaseInOutQuad,
            "power2.in" => EasingFunction::EaseInCubic,
            "power2.out" => EasingFunction::EaseOutCubic,
            "power2.inOut" => EasingFunction::EaseInOutCubic,
            "power3.in" => EasingFunction::EaseInQuart,
            "power3.out" => EasingFunction::EaseOutQuart,
            "power3.inOut" => EasingFunction::EaseInOutQuart,
            "sine.inOut" => EasingFunction::EaseInOutSine,
            other => return Err(format!("未知的缓动曲线 '{}'", other)),
        };
        Ok(easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let easing = EasingFunction::Linear;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_endpoints() {
        for easing in [
            EasingFunction::EaseOutQuart,
            EasingFunction::EaseInCubic,
            EasingFunction::EaseInOutQuart,
            EasingFunction::EaseInOutSine,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-6);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_clamp() {
        let easing = EasingFunction::Linear;
        // 超出范围应该被限制
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }

    #[test]
    fn test_out_curve_leads() {
        // 缓出曲线前半段领先于线性
        assert!(EasingFunction::EaseOutQuart.apply(0.3) > 0.3);
        assert!(EasingFunction::EaseInQuart.apply(0.3) < 0.3);
    }

    #[test]
    fn test_reversed() {
        assert_eq!(
            EasingFunction::EaseOutQuart.reversed(),
            EasingFunction::EaseInQuart
        );
        assert_eq!(EasingFunction::Linear.reversed(), EasingFunction::Linear);
    }

    #[test]
    fn test_parse_power_names() {
        assert_eq!("power3.out".parse(), Ok(EasingFunction::EaseOutQuart));
        assert_eq!("power2.in".parse(), Ok(EasingFunction::EaseInCubic));
        assert!("elastic".parse::<EasingFunction>().is_err());
    }
}
