//! # Runtime 模块
//!
//! 把各个滚动相关的组件组装成一个运行时，宿主只需要转发事件。
//!
//! ## 执行模型
//!
//! ```text
//! Host                              StageRuntime
//!   │── on_scroll(ctx, layout) ──────►│ 导航栏 / 分区同步 / 入场追踪
//!   │── tick(dt, ctx, layout) ───────►│ 平滑滚动 / 入场补间
//!   │◄── Vec<StageCommand> ───────────│
//! ```
//!
//! 分区同步使用自己的追踪器；入场动画与首屏标语共用另一个追踪器，
//! 两者的订阅互不影响。播放器与作品集弹窗不依赖滚动状态，由宿主
//! 单独持有。

use tracing::{debug, info};

use crate::config::StageConfig;
use crate::entrance::presets::RevealPreset;
use crate::entrance::{BindingId, CounterSpec, EntranceController, GroupAnchor, StyleUpdate};
use crate::hero::{HeroReveal, HideTicket};
use crate::navigation::{NavbarState, NavigationContext, Navigator, SectionSync};
use crate::section::SectionId;
use crate::tracker::{ElementHandle, LayoutProvider, Tracker};

/// 平台能力与偏好
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformHints {
    /// 系统是否偏好减少动态效果
    pub prefers_reduced_motion: bool,
    /// 是否支持相交观察
    pub observer_supported: bool,
}

impl Default for PlatformHints {
    fn default() -> Self {
        Self {
            prefers_reduced_motion: false,
            observer_supported: true,
        }
    }
}

/// 运行时向宿主发出的指令
#[derive(Debug, Clone, PartialEq)]
pub enum StageCommand {
    /// 写入元素样式
    ApplyStyle(StyleUpdate),
    /// 活动分区变化（导航链接高亮）
    SectionActivated(SectionId),
    /// 导航栏紧凑样式切换
    NavbarScrolled(bool),
    /// `after_ms` 毫秒后调用 `StageRuntime::hide_hero`
    ScheduleHeroHide { ticket: HideTicket, after_ms: u32 },
}

/// 站点运行时
#[derive(Debug)]
pub struct StageRuntime {
    config: StageConfig,
    sync: SectionSync,
    navigator: Navigator,
    navbar: NavbarState,
    tracker: Tracker,
    entrance: EntranceController,
    hero: HeroReveal,
}

impl StageRuntime {
    pub fn new(config: StageConfig, platform: PlatformHints) -> Self {
        let reduced_motion = config.motion.resolve(platform.prefers_reduced_motion);
        let make_tracker = || {
            if platform.observer_supported {
                Tracker::new()
            } else {
                Tracker::unsupported()
            }
        };

        let mut navigator = Navigator::new(&config.navigation);
        navigator.set_reduced_motion(reduced_motion);
        info!(reduced_motion, observer = platform.observer_supported, "站点运行时初始化");

        Self {
            sync: SectionSync::with_tracker(make_tracker(), &config.navigation),
            navigator,
            navbar: NavbarState::new(&config.navbar),
            tracker: make_tracker(),
            entrance: EntranceController::new().with_reduced_motion(reduced_motion),
            hero: HeroReveal::new(&config.hero),
            config,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// 运行中切换减少动态效果（系统偏好变化）
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        let resolved = self.config.motion.resolve(reduced_motion);
        self.navigator.set_reduced_motion(resolved);
        self.entrance.set_reduced_motion(resolved);
    }

    pub fn reduced_motion(&self) -> bool {
        self.entrance.reduced_motion()
    }

    // ========== 绑定 ==========

    /// 按预设绑定一组元素
    ///
    /// 预设要求由容器统一触发且给出了 `container` 时，所有成员共用
    /// 容器的订阅；否则每个元素各自触发。
    pub fn bind_reveal(
        &mut self,
        preset: RevealPreset,
        elements: &[ElementHandle],
        container: Option<ElementHandle>,
    ) -> Vec<BindingId> {
        let anchor = match container {
            Some(container) if preset.shares_anchor() => GroupAnchor::Shared(container),
            _ => GroupAnchor::PerElement,
        };
        self.entrance.bind_group(
            &mut self.tracker,
            elements,
            anchor,
            preset.trigger(),
            preset.spec(),
            preset.group_layout(),
        )
    }

    /// 绑定统计计数器，与统计卡片同一条触发线
    pub fn bind_counter(&mut self, element: ElementHandle, spec: CounterSpec) -> BindingId {
        self.entrance
            .bind_counter(&mut self.tracker, element, RevealPreset::StatCard.trigger(), spec)
    }

    /// 绑定首屏元素
    pub fn bind_hero(&mut self, element: ElementHandle) {
        self.hero.bind(&mut self.tracker, element);
    }

    pub fn entrance(&self) -> &EntranceController {
        &self.entrance
    }

    // ========== 事件 ==========

    /// 首次布局完成后调用，立即跳转到恢复目标
    pub fn restore<C: NavigationContext + ?Sized>(&mut self, ctx: &mut C) -> Option<SectionId> {
        self.sync.restore(ctx)
    }

    /// 导航链接点击：关闭菜单并平滑滚动到分区
    pub fn navigate<C: NavigationContext + ?Sized>(
        &mut self,
        section: SectionId,
        ctx: &mut C,
    ) -> Vec<StageCommand> {
        self.navbar.close_menu();
        if self.navigator.go_to(section, ctx).is_none() {
            return Vec::new();
        }
        self.sync.begin_programmatic();
        if self.navigator.is_animating() {
            return Vec::new();
        }
        // 立即到达
        self.sync.finish_programmatic(Some(section), ctx);
        vec![StageCommand::SectionActivated(section)]
    }

    /// 用户开始手动滚动（滚轮、触摸、键盘），放弃进行中的平滑滚动
    pub fn interrupt<C: NavigationContext + ?Sized>(
        &mut self,
        ctx: &mut C,
        layout: &impl LayoutProvider,
    ) -> Vec<StageCommand> {
        let Some(destination) = self.navigator.cancel() else {
            return Vec::new();
        };
        debug!(section = %destination, "平滑滚动被打断");
        let mut commands = Vec::new();
        if let Some(section) = self.sync.finish_programmatic(None, ctx) {
            commands.push(StageCommand::SectionActivated(section));
        }
        commands.extend(self.on_scroll(ctx, layout));
        commands
    }

    /// 滚动或尺寸变化
    pub fn on_scroll<C: NavigationContext + ?Sized>(
        &mut self,
        ctx: &mut C,
        layout: &impl LayoutProvider,
    ) -> Vec<StageCommand> {
        let mut commands = Vec::new();

        if self.navbar.on_scroll(ctx.scroll_y()) {
            commands.push(StageCommand::NavbarScrolled(self.navbar.is_scrolled()));
        }

        if let Some(section) = self.sync.on_scroll(ctx) {
            commands.push(StageCommand::SectionActivated(section));
        }

        let events = self.tracker.sample(&ctx.viewport(), layout);
        if let Some(ticket) = self.hero.handle(&events) {
            commands.push(StageCommand::ScheduleHeroHide {
                ticket,
                after_ms: self.hero.reveal_ms(),
            });
        }
        self.entrance.handle(&events);

        commands
    }

    /// 每帧调用：推进平滑滚动与入场补间
    pub fn tick<C: NavigationContext + ?Sized>(
        &mut self,
        dt: f32,
        ctx: &mut C,
        layout: &impl LayoutProvider,
    ) -> Vec<StageCommand> {
        let mut commands = Vec::new();

        if self.navigator.is_animating() {
            let arrived = self.navigator.tick(dt, ctx);
            commands.extend(self.on_scroll(ctx, layout));
            if let Some(destination) = arrived {
                self.sync.finish_programmatic(Some(destination), ctx);
                commands.push(StageCommand::SectionActivated(destination));
            }
        }

        commands.extend(
            self.entrance
                .tick(dt)
                .into_iter()
                .map(StageCommand::ApplyStyle),
        );
        commands
    }

    /// 首屏标语的定时回调
    pub fn hide_hero(&mut self, ticket: HideTicket) -> bool {
        self.hero.hide(ticket)
    }

    // ========== 状态查询 ==========

    pub fn active_section(&self) -> Option<SectionId> {
        self.sync.active()
    }

    pub fn is_navigating(&self) -> bool {
        self.navigator.is_animating()
    }

    pub fn is_hero_revealed(&self) -> bool {
        self.hero.is_revealed()
    }

    pub fn navbar(&self) -> &NavbarState {
        &self.navbar
    }

    pub fn toggle_menu(&mut self) {
        self.navbar.toggle_menu();
    }

    /// 释放所有订阅
    pub fn teardown(&mut self) {
        self.entrance.teardown(&mut self.tracker);
        self.hero.unbind(&mut self.tracker);
        self.tracker.disconnect();
        self.sync.disconnect();
        self.navigator.cancel();
    }
}
