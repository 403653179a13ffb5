//! 作品集弹窗。
//!
//! 关闭时立即解除页面滚动锁定，选中项延迟清除（等待淡出动画），
//! 宿主用 `CloseTicket` 在延迟到期后回调 `finish_close`。延迟期间
//! 重新打开会作废旧票据。

use tracing::debug;

use crate::config::GalleryConfig;
use crate::content::{GALLERY, GalleryItem};

/// 延迟清除票据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CloseTicket(u64);

/// 弹窗展示的媒体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMedia {
    Video(&'static str),
    Image(&'static str),
}

impl ModalMedia {
    /// 有视频时展示视频，否则展示封面图
    pub fn of(item: &GalleryItem) -> Self {
        match item.video {
            Some(video) => Self::Video(video),
            None => Self::Image(item.image),
        }
    }
}

/// 作品集弹窗状态
#[derive(Debug, Clone)]
pub struct GalleryModal {
    items: &'static [GalleryItem],
    selected: Option<usize>,
    open: bool,
    pending_close: Option<CloseTicket>,
    next_ticket: u64,
    close_debounce_ms: u32,
}

impl Default for GalleryModal {
    fn default() -> Self {
        Self::new(&GalleryConfig::default())
    }
}

impl GalleryModal {
    pub fn new(config: &GalleryConfig) -> Self {
        Self::with_items(&GALLERY, config)
    }

    pub fn with_items(items: &'static [GalleryItem], config: &GalleryConfig) -> Self {
        Self {
            items,
            selected: None,
            open: false,
            pending_close: None,
            next_ticket: 1,
            close_debounce_ms: config.close_debounce_ms,
        }
    }

    pub fn items(&self) -> &'static [GalleryItem] {
        self.items
    }

    /// 打开指定条目，越界时返回 `false`
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            debug!(index, "作品索引越界");
            return false;
        }
        self.selected = Some(index);
        self.open = true;
        self.pending_close = None;
        true
    }

    /// 关闭弹窗，返回延迟清除票据；未打开时返回 `None`
    pub fn close(&mut self) -> Option<CloseTicket> {
        if !self.open {
            return None;
        }
        self.open = false;
        let ticket = CloseTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_close = Some(ticket);
        Some(ticket)
    }

    /// 延迟到期，清除选中项；票据已失效时返回 `false`
    pub fn finish_close(&mut self, ticket: CloseTicket) -> bool {
        if self.pending_close != Some(ticket) {
            return false;
        }
        self.pending_close = None;
        self.selected = None;
        true
    }

    /// 清除选中项前的等待时间（毫秒）
    pub fn close_debounce_ms(&self) -> u32 {
        self.close_debounce_ms
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 页面滚动是否应被锁定
    pub fn body_locked(&self) -> bool {
        self.open
    }

    /// 当前选中项（淡出期间仍然保留）
    pub fn selection(&self) -> Option<&'static GalleryItem> {
        self.selected.and_then(|index| self.items.get(index))
    }

    pub fn media(&self) -> Option<ModalMedia> {
        self.selection().map(ModalMedia::of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_clears_after_debounce() {
        let mut modal = GalleryModal::default();
        assert!(modal.open(0));
        assert!(modal.body_locked());
        assert_eq!(
            modal.media(),
            Some(ModalMedia::Video("/assets/videos/wedding-performance.mp4"))
        );

        let ticket = modal.close().unwrap();
        assert!(!modal.body_locked());
        // 淡出期间内容仍在
        assert_eq!(modal.selection().map(|i| i.id), Some("colombo-wedding"));

        assert!(modal.finish_close(ticket));
        assert!(modal.selection().is_none());
        assert_eq!(modal.close_debounce_ms(), 220);
    }

    #[test]
    fn test_reopen_cancels_pending_clear() {
        let mut modal = GalleryModal::default();
        modal.open(1);
        let ticket = modal.close().unwrap();
        modal.open(3);
        assert!(!modal.finish_close(ticket));
        assert_eq!(modal.selection().map(|i| i.id), Some("chef-live"));
        assert_eq!(modal.media(), Some(ModalMedia::Image("/images/gallery-1.jpg")));
    }

    #[test]
    fn test_out_of_range_and_double_close() {
        let mut modal = GalleryModal::default();
        assert!(!modal.open(6));
        assert!(!modal.is_open());
        assert_eq!(modal.close(), None);
    }
}
