//! # Geometry 模块
//!
//! 视口与元素的几何描述。所有纵向坐标都以视口顶部为原点（与
//! `getBoundingClientRect()` 一致），单位为 CSS 像素。

use serde::{Deserialize, Serialize};

/// 元素在视口中的纵向范围
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// 顶边（相对视口顶部，可为负）
    pub top: f64,
    /// 高度
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    /// 底边
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// 在视口内可见部分占自身高度的比例（0.0 - 1.0）
    ///
    /// 零高度元素只要落在视口内就视为完全可见，与 IntersectionObserver 一致。
    pub fn visible_ratio(&self, viewport: &Viewport) -> f64 {
        let visible_top = self.top.max(0.0);
        let visible_bottom = self.bottom().min(viewport.height);
        if self.height <= 0.0 {
            return if self.top >= 0.0 && self.top <= viewport.height {
                1.0
            } else {
                0.0
            };
        }
        ((visible_bottom - visible_top) / self.height).clamp(0.0, 1.0)
    }

    /// 可见部分占 `min(自身高度, 视口高度)` 的比例
    ///
    /// 比视口高的分区永远达不到较高的 `visible_ratio`，用覆盖率判断“占据视口”。
    pub fn coverage(&self, viewport: &Viewport) -> f64 {
        let basis = self.height.min(viewport.height);
        if basis <= 0.0 {
            return self.visible_ratio(viewport);
        }
        let visible = self.bottom().min(viewport.height) - self.top.max(0.0);
        (visible / basis).clamp(0.0, 1.0)
    }

    /// 换算到文档坐标
    pub fn document_top(&self, viewport: &Viewport) -> f64 {
        self.top + viewport.scroll_y
    }
}

/// 视口快照
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// 当前滚动位置（文档坐标）
    pub scroll_y: f64,
    /// 视口宽度
    pub width: f64,
    /// 视口高度
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn new(scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    /// 视口高度的百分比位置（`80%` → 0.8）
    pub fn line(&self, fraction: f64) -> f64 {
        self.height * fraction
    }
}
