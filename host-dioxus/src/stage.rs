//! 运行时外壳：持有 `StageRuntime` 与浏览器环境，执行它返回的指令。

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use stage_runtime::content::{ABOUT_FEATURES, GALLERY, MINI_SERVICES, SERVICES, STATS};
use stage_runtime::{
    PlatformHints, RevealPreset, SectionId, StageCommand, StageConfig, StageRuntime,
};
use tracing::{debug, info, warn};

use crate::browser::{BrowserNavigation, DomLayout};
use crate::frame::FrameLoop;

/// 单帧步长上限，标签页切回时避免一次跳完整段补间
const MAX_FRAME_STEP: f32 = 0.1;

/// 界面需要响应的运行时状态
#[derive(Clone, Copy)]
pub struct StageSignals {
    pub active: Signal<Option<SectionId>>,
    pub scrolled: Signal<bool>,
    pub menu_open: Signal<bool>,
    pub hero_revealed: Signal<bool>,
}

impl StageSignals {
    /// 只能在组件内调用
    pub fn use_new() -> Self {
        Self {
            active: use_signal(|| None),
            scrolled: use_signal(|| false),
            menu_open: use_signal(|| false),
            hero_revealed: use_signal(|| false),
        }
    }
}

/// 入场绑定表：预设、元素 id、共享触发的容器 id
fn reveal_table() -> Vec<(RevealPreset, Vec<String>, Option<&'static str>)> {
    let indexed = |prefix: &str, count: usize| -> Vec<String> {
        (0..count).map(|i| format!("{prefix}-{i}")).collect()
    };
    vec![
        (
            RevealPreset::SectionTitle,
            ["title-about", "title-services", "title-gallery"]
                .map(String::from)
                .to_vec(),
            None,
        ),
        (RevealPreset::AboutImage, vec!["about-image".into()], None),
        (RevealPreset::AboutText, vec!["about-text".into()], None),
        (
            RevealPreset::AboutFeature,
            indexed("about-feature", ABOUT_FEATURES.len()),
            Some("about-text"),
        ),
        (
            RevealPreset::StatCard,
            indexed("stat-card", STATS.len()),
            Some("about-stats"),
        ),
        (
            RevealPreset::ServiceCard,
            indexed("service-card", SERVICES.len()),
            None,
        ),
        (
            RevealPreset::ServiceMini,
            indexed("service-mini", MINI_SERVICES.len()),
            None,
        ),
        (
            RevealPreset::GalleryCard,
            indexed("gallery-card", GALLERY.len()),
            None,
        ),
        (RevealPreset::ContactTitle, vec!["contact-title".into()], None),
        (RevealPreset::ContactPanel, indexed("contact-panel", 2), None),
        (RevealPreset::ContactAside, vec!["contact-aside".into()], None),
    ]
}

struct Stage {
    runtime: StageRuntime,
    nav: BrowserNavigation,
    layout: DomLayout,
    signals: StageSignals,
    last_frame: Option<f64>,
    listeners: Vec<EventListener>,
    frame_loop: Option<FrameLoop>,
    mounted: bool,
}

impl Stage {
    fn apply(&mut self, commands: Vec<StageCommand>, handle: &StageHandle) {
        for command in commands {
            match command {
                StageCommand::ApplyStyle(update) => self.layout.apply(&update),
                StageCommand::SectionActivated(section) => {
                    self.signals.active.set(Some(section));
                }
                StageCommand::NavbarScrolled(scrolled) => self.signals.scrolled.set(scrolled),
                StageCommand::ScheduleHeroHide { ticket, after_ms } => {
                    self.signals.hero_revealed.set(true);
                    let handle = handle.clone();
                    // 过期票据会被运行时忽略，定时器无需取消
                    Timeout::new(after_ms, move || handle.hide_hero(ticket)).forget();
                }
            }
        }
    }

    fn bind_page(&mut self) {
        for section in SectionId::ALL {
            self.layout.register_section(section);
        }

        for (preset, ids, container) in reveal_table() {
            let elements: Vec<_> = ids.iter().map(|id| self.layout.register(id)).collect();
            let container = container.map(|id| self.layout.register(id));
            let bindings = self.runtime.bind_reveal(preset, &elements, container);
            debug!(preset = preset.as_str(), count = bindings.len(), "绑定入场动画");
        }

        for (i, stat) in STATS.iter().enumerate() {
            if let Some(spec) = stat.counter() {
                let element = self.layout.register(&format!("stat-value-{i}"));
                self.runtime.bind_counter(element, spec);
            }
        }

        let home = self.layout.register_section(SectionId::Home);
        self.runtime.bind_hero(home);
    }
}

/// 组件共享的运行时句柄
#[derive(Clone)]
pub struct StageHandle(Rc<RefCell<Stage>>);

impl StageHandle {
    /// 浏览器环境不可用时返回 `None`
    pub fn new(config: StageConfig, platform: PlatformHints, signals: StageSignals) -> Option<Self> {
        let nav = BrowserNavigation::new()?;
        info!(
            reduced_motion = platform.prefers_reduced_motion,
            observer = platform.observer_supported,
            "初始化运行时"
        );
        Some(Self(Rc::new(RefCell::new(Stage {
            runtime: StageRuntime::new(config, platform),
            nav,
            layout: DomLayout::new(),
            signals,
            last_frame: None,
            listeners: Vec::new(),
            frame_loop: None,
            mounted: false,
        }))))
    }

    /// 首次渲染完成后调用：绑定元素、挂监听、启动帧循环
    pub fn mount(&self) {
        {
            let Ok(mut stage) = self.0.try_borrow_mut() else {
                return;
            };
            if stage.mounted {
                return;
            }
            stage.mounted = true;
            stage.bind_page();
        }

        let listeners = self.listen();
        let frame_loop = {
            let handle = self.clone();
            FrameLoop::new(move |now| handle.frame(now))
        };
        frame_loop.start();

        if let Ok(mut stage) = self.0.try_borrow_mut() {
            stage.listeners = listeners;
            stage.frame_loop = Some(frame_loop);
        }
    }

    fn listen(&self) -> Vec<EventListener> {
        let Some(window) = web_sys::window() else {
            return Vec::new();
        };
        let mut listeners = Vec::new();
        for event in ["scroll", "resize"] {
            let handle = self.clone();
            listeners.push(EventListener::new(&window, event, move |_| handle.on_scroll()));
        }
        // 用户主动滚动时放弃平滑滚动
        for event in ["wheel", "touchstart", "keydown"] {
            let handle = self.clone();
            listeners.push(EventListener::new(&window, event, move |_| handle.interrupt()));
        }
        listeners
    }

    fn with_stage(&self, f: impl FnOnce(&mut Stage) -> Vec<StageCommand>) {
        let Ok(mut stage) = self.0.try_borrow_mut() else {
            warn!("运行时正忙，丢弃本次事件");
            return;
        };
        let commands = f(&mut stage);
        stage.apply(commands, self);
    }

    fn on_scroll(&self) {
        self.with_stage(|stage| {
            let Stage {
                runtime,
                nav,
                layout,
                ..
            } = stage;
            runtime.on_scroll(nav, layout)
        });
    }

    fn interrupt(&self) {
        self.with_stage(|stage| {
            let Stage {
                runtime,
                nav,
                layout,
                ..
            } = stage;
            runtime.interrupt(nav, layout)
        });
    }

    /// 每帧推进；首帧时布局已稳定，先恢复上次的位置
    fn frame(&self, now: f64) {
        self.with_stage(|stage| {
            let previous = stage.last_frame.replace(now);
            let Stage {
                runtime,
                nav,
                layout,
                ..
            } = stage;
            let Some(last) = previous else {
                if let Some(section) = runtime.restore(nav) {
                    info!(section = %section, "恢复到分区");
                }
                return runtime.on_scroll(nav, layout);
            };
            let dt = (((now - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_STEP);
            runtime.tick(dt, nav, layout)
        });
    }

    fn hide_hero(&self, ticket: stage_runtime::HideTicket) {
        if let Ok(mut stage) = self.0.try_borrow_mut()
            && stage.runtime.hide_hero(ticket)
        {
            stage.signals.hero_revealed.set(false);
        }
    }

    /// 导航链接点击
    pub fn navigate(&self, section: SectionId) {
        self.with_stage(|stage| {
            let commands = stage.runtime.navigate(section, &mut stage.nav);
            stage.signals.menu_open.set(false);
            commands
        });
    }

    pub fn toggle_menu(&self) {
        if let Ok(mut stage) = self.0.try_borrow_mut() {
            stage.runtime.toggle_menu();
            let open = stage.runtime.navbar().is_menu_open();
            stage.signals.menu_open.set(open);
        }
    }

    /// 卸载：停帧循环、摘监听、释放订阅
    pub fn unmount(&self) {
        let Ok(mut stage) = self.0.try_borrow_mut() else {
            return;
        };
        stage.frame_loop.take();
        stage.listeners.clear();
        stage.runtime.teardown();
        stage.layout.clear();
        stage.last_frame = None;
        stage.mounted = false;
        info!("运行时已卸载");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_reveal_table_ids_unique() {
        let table = reveal_table();
        let ids: Vec<_> = table.iter().flat_map(|(_, ids, _)| ids.iter()).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(table.len(), RevealPreset::ALL.len());
    }

    #[test]
    fn test_reveal_table_matches_content() {
        let count = |preset: RevealPreset| {
            reveal_table()
                .into_iter()
                .find(|(p, _, _)| *p == preset)
                .map(|(_, ids, _)| ids.len())
        };
        assert_eq!(count(RevealPreset::ServiceCard), Some(SERVICES.len()));
        assert_eq!(count(RevealPreset::ServiceMini), Some(MINI_SERVICES.len()));
        assert_eq!(count(RevealPreset::GalleryCard), Some(GALLERY.len()));
        assert_eq!(count(RevealPreset::StatCard), Some(STATS.len()));
    }
}
