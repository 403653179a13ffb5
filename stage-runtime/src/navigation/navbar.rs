//! 导航栏状态：滚动后的紧凑样式与移动端菜单。

use crate::config::NavbarConfig;
use crate::section::SectionId;

/// 导航栏状态
#[derive(Debug, Clone, PartialEq)]
pub struct NavbarState {
    scrolled_offset: f64,
    scrolled: bool,
    menu_open: bool,
}

impl Default for NavbarState {
    fn default() -> Self {
        Self::new(&NavbarConfig::default())
    }
}

impl NavbarState {
    pub fn new(config: &NavbarConfig) -> Self {
        Self {
            scrolled_offset: config.scrolled_offset,
            scrolled: false,
            menu_open: false,
        }
    }

    /// 导航链接
    pub fn links(&self) -> &'static [SectionId] {
        &SectionId::NAV_LINKS
    }

    /// 更新滚动位置，返回紧凑样式是否发生变化
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.scrolled_offset;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolled_threshold() {
        let mut navbar = NavbarState::default();
        assert!(!navbar.on_scroll(10.0));
        assert!(!navbar.is_scrolled());
        assert!(navbar.on_scroll(11.0));
        assert!(navbar.is_scrolled());
        assert!(!navbar.on_scroll(400.0));
    }

    #[test]
    fn test_menu_toggle() {
        let mut navbar = NavbarState::default();
        navbar.toggle_menu();
        assert!(navbar.is_menu_open());
        navbar.close_menu();
        assert!(!navbar.is_menu_open());
        assert_eq!(navbar.links().len(), 5);
        assert!(!navbar.links().contains(&SectionId::Booking));
    }
}
