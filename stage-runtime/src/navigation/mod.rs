//! # Navigation 模块
//!
//! 分区导航：活动分区同步、平滑滚动、导航栏状态。
//!
//! 运行环境（地址栏、会话存储、滚动位置、布局）通过 `NavigationContext`
//! 注入。浏览器宿主基于 `window.location` / `history` / `sessionStorage`
//! 实现它，测试使用 `MemoryNavigation`。

mod navbar;
mod navigator;
mod sync;

pub use navbar::NavbarState;
pub use navigator::{Navigator, header_height};
pub use sync::SectionSync;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Viewport};
use crate::section::SectionId;
use crate::tracker::{ElementHandle, LayoutProvider};

/// 分区元素句柄的起始编号，避开宿主为普通元素分配的句柄
const SECTION_HANDLE_BASE: u64 = 1 << 32;

/// 分区对应的元素句柄
pub fn section_handle(section: SectionId) -> ElementHandle {
    let index = SectionId::ALL
        .iter()
        .position(|s| *s == section)
        .unwrap_or_default();
    ElementHandle(SECTION_HANDLE_BASE + index as u64)
}

/// 句柄对应的分区
pub fn section_of(handle: ElementHandle) -> Option<SectionId> {
    let index = handle.0.checked_sub(SECTION_HANDLE_BASE)?;
    SectionId::ALL.get(usize::try_from(index).ok()?).copied()
}

/// 滚动方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// 立即跳转
    Instant,
    /// 交给平台做平滑滚动
    Smooth,
}

/// 导航运行环境
pub trait NavigationContext {
    /// 当前地址片段（不含 `#`），没有时返回 `None`
    fn fragment(&self) -> Option<String>;

    /// 以替换历史记录的方式写入片段，不触发滚动
    fn replace_fragment(&mut self, section: SectionId);

    /// 读取会话存储
    fn read_slot(&self, key: &str) -> Option<String>;

    /// 写入会话存储
    fn write_slot(&mut self, key: &str, value: &str);

    /// 当前视口
    fn viewport(&self) -> Viewport;

    /// 当前滚动位置
    fn scroll_y(&self) -> f64 {
        self.viewport().scroll_y
    }

    /// 滚动窗口
    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior);

    /// 分区元素相对视口的位置，元素不存在时返回 `None`
    fn section_rect(&self, section: SectionId) -> Option<Rect>;
}

/// 把 `NavigationContext` 的分区布局适配成追踪器可用的布局
pub(crate) struct SectionLayout<'a, C: NavigationContext + ?Sized>(pub &'a C);

impl<C: NavigationContext + ?Sized> LayoutProvider for SectionLayout<'_, C> {
    fn rect(&self, element: ElementHandle) -> Option<Rect> {
        self.0.section_rect(section_of(element)?)
    }
}

/// 内存中的导航环境
///
/// 分区按给定顺序自上而下排列，滚动位置限制在文档范围内。
#[derive(Debug, Clone)]
pub struct MemoryNavigation {
    fragment: Option<String>,
    slots: HashMap<String, String>,
    viewport: Viewport,
    /// 分区在文档中的 (顶边, 高度)
    sections: HashMap<SectionId, (f64, f64)>,
    document_height: f64,
    replace_count: usize,
    scroll_log: Vec<(f64, ScrollBehavior)>,
}

impl Default for MemoryNavigation {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl MemoryNavigation {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            fragment: None,
            slots: HashMap::new(),
            viewport,
            sections: HashMap::new(),
            document_height: viewport.height,
            replace_count: 0,
            scroll_log: Vec::new(),
        }
    }

    /// 按顺序堆叠分区
    pub fn with_sections(mut self, layout: &[(SectionId, f64)]) -> Self {
        let mut top = 0.0;
        for &(section, height) in layout {
            self.sections.insert(section, (top, height));
            top += height;
        }
        self.document_height = top.max(self.viewport.height);
        self
    }

    /// 模拟带片段的地址加载
    pub fn with_fragment(mut self, fragment: &str) -> Self {
        let trimmed = fragment.trim_start_matches('#');
        self.fragment = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    /// 模拟用户滚动（不记入 `scroll_log`）
    pub fn set_scroll(&mut self, y: f64) {
        self.viewport.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// 模拟窗口尺寸变化
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.set_scroll(self.viewport.scroll_y);
    }

    /// 最大滚动位置
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// 分区在文档中的顶边
    pub fn section_top(&self, section: SectionId) -> Option<f64> {
        self.sections.get(&section).map(|(top, _)| *top)
    }

    pub fn slot(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    pub fn current_fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// `replace_fragment` 的调用次数
    pub fn replace_count(&self) -> usize {
        self.replace_count
    }

    /// 历史记录条目数；所有写入都是替换，因此恒为 1
    pub fn history_length(&self) -> usize {
        1
    }

    /// 通过 `scroll_to` 发起的滚动
    pub fn scroll_log(&self) -> &[(f64, ScrollBehavior)] {
        &self.scroll_log
    }
}

impl NavigationContext for MemoryNavigation {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, section: SectionId) {
        self.fragment = Some(section.as_str().to_string());
        self.replace_count += 1;
    }

    fn read_slot(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn write_slot(&mut self, key: &str, value: &str) {
        self.slots.insert(key.to_string(), value.to_string());
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        self.scroll_log.push((y, behavior));
        self.set_scroll(y);
    }

    fn section_rect(&self, section: SectionId) -> Option<Rect> {
        let (top, height) = self.sections.get(&section)?;
        Some(Rect::new(top - self.viewport.scroll_y, *height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_handles_roundtrip() {
        for section in SectionId::ALL {
            assert_eq!(section_of(section_handle(section)), Some(section));
        }
        assert_eq!(section_of(ElementHandle(3)), None);
    }

    #[test]
    fn test_memory_navigation_layout() {
        let mut nav = MemoryNavigation::default()
            .with_sections(&[(SectionId::Home, 800.0), (SectionId::About, 1200.0)]);

        assert_eq!(nav.section_rect(SectionId::About), Some(Rect::new(800.0, 1200.0)));
        nav.scroll_to(900.0, ScrollBehavior::Instant);
        assert_eq!(nav.section_rect(SectionId::About), Some(Rect::new(-100.0, 1200.0)));

        // 不能滚过文档底部
        nav.scroll_to(5000.0, ScrollBehavior::Smooth);
        assert_eq!(nav.scroll_y(), 1200.0);
        assert_eq!(nav.scroll_log().len(), 2);
        assert_eq!(nav.section_rect(SectionId::Gallery), None);
    }

    #[test]
    fn test_fragment_replace() {
        let mut nav = MemoryNavigation::default().with_fragment("#gallery");
        assert_eq!(nav.fragment().as_deref(), Some("gallery"));
        nav.replace_fragment(SectionId::Contact);
        assert_eq!(nav.current_fragment(), Some("contact"));
        nav.replace_fragment(SectionId::Booking);
        assert_eq!(nav.fragment().as_deref(), Some("booking"));
        assert_eq!(nav.replace_count(), 2);
        assert_eq!(nav.history_length(), 1);
    }
}
