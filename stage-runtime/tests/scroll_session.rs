//! # 滚动会话集成测试
//!
//! 用内存导航环境模拟完整页面：六个分区自上而下排列，视口 1280×800。
//! 覆盖滚动同步、刷新恢复、平滑导航、分组入场方向与减少动态效果。

use std::collections::HashMap;

use stage_runtime::{
    ElementHandle, EntranceState, FloatingPlayer, MediaElement, MemoryNavigation, NavigationContext,
    PlatformHints, PlaybackError, Rect, RevealPreset, ScrollBehavior, SectionId, StageCommand,
    StageConfig, StageRuntime, Viewport, VisualState,
};

/// 分区高度：Home 800, About 1000, Services 1400, Gallery 1200, Contact 900, Booking 600
fn full_page() -> MemoryNavigation {
    MemoryNavigation::new(Viewport::new(0.0, 1280.0, 800.0)).with_sections(&[
        (SectionId::Home, 800.0),
        (SectionId::About, 1000.0),
        (SectionId::Services, 1400.0),
        (SectionId::Gallery, 1200.0),
        (SectionId::Contact, 900.0),
        (SectionId::Booking, 600.0),
    ])
}

/// 普通元素的文档坐标 (顶边, 高度)，按当前滚动换算成视口坐标
struct PageLayout {
    elements: HashMap<ElementHandle, (f64, f64)>,
    scroll_y: f64,
}

impl PageLayout {
    fn new(elements: &[(ElementHandle, f64, f64)]) -> Self {
        Self {
            elements: elements.iter().map(|&(e, top, h)| (e, (top, h))).collect(),
            scroll_y: 0.0,
        }
    }
}

impl stage_runtime::LayoutProvider for PageLayout {
    fn rect(&self, element: ElementHandle) -> Option<Rect> {
        let (top, height) = self.elements.get(&element)?;
        Some(Rect::new(top - self.scroll_y, *height))
    }
}

/// 滚动到 `y` 并通知运行时
fn scroll_to(
    runtime: &mut StageRuntime,
    nav: &mut MemoryNavigation,
    layout: &mut PageLayout,
    y: f64,
) -> Vec<StageCommand> {
    nav.set_scroll(y);
    layout.scroll_y = nav.scroll_y();
    runtime.on_scroll(nav, layout)
}

fn frame(
    runtime: &mut StageRuntime,
    nav: &mut MemoryNavigation,
    layout: &mut PageLayout,
    dt: f32,
) -> Vec<StageCommand> {
    layout.scroll_y = nav.scroll_y();
    runtime.tick(dt, nav, layout)
}

fn activations(commands: &[StageCommand]) -> Vec<&'static str> {
    commands
        .iter()
        .filter_map(|c| match c {
            StageCommand::SectionActivated(section) => Some(section.as_str()),
            _ => None,
        })
        .collect()
}

/// 向下滚过整页，每个分区依次成为活动分区，只替换不新增历史记录
#[test]
fn test_scroll_sweep_activates_each_section() {
    let mut nav = full_page();
    let mut layout = PageLayout::new(&[]);
    let mut runtime = StageRuntime::new(StageConfig::default(), PlatformHints::default());

    let mut seen = Vec::new();
    for y in [0.0, 800.0, 1800.0, 3200.0, 4400.0, 5100.0] {
        let commands = scroll_to(&mut runtime, &mut nav, &mut layout, y);
        seen.extend(activations(&commands));
    }

    insta::assert_debug_snapshot!(seen, @r#"
    [
        "home",
        "about",
        "services",
        "gallery",
        "contact",
        "booking",
    ]
    "#);
    assert_eq!(nav.current_fragment(), Some("booking"));
    assert_eq!(nav.slot("lastSectionId"), Some("booking"));
    assert_eq!(nav.history_length(), 1);
}

/// 一次跳过的分区不会成为活动分区
#[test]
fn test_jump_back_skips_passed_sections() {
    let mut nav = full_page();
    let mut layout = PageLayout::new(&[]);
    let mut runtime = StageRuntime::new(StageConfig::default(), PlatformHints::default());

    scroll_to(&mut runtime, &mut nav, &mut layout, 5100.0);
    assert_eq!(runtime.active_section(), Some(SectionId::Booking));

    let commands = scroll_to(&mut runtime, &mut nav, &mut layout, 3200.0);
    assert_eq!(activations(&commands), vec!["gallery"]);
    assert_eq!(nav.current_fragment(), Some("gallery"));
}

/// 带片段刷新：直接跳到片段指向的分区，忽略会话存储
#[test]
fn test_reload_with_fragment_bypasses_slot() {
    let mut nav = full_page()
        .with_fragment("#gallery")
        .with_slot("lastSectionId", "contact");
    let mut runtime = StageRuntime::new(StageConfig::default(), PlatformHints::default());

    assert_eq!(runtime.restore(&mut nav), Some(SectionId::Gallery));
    assert_eq!(nav.scroll_log(), &[(3200.0, ScrollBehavior::Instant)]);
}

/// 无片段刷新：使用会话存储中的分区
#[test]
fn test_reload_without_fragment_uses_slot() {
    let mut nav = full_page().with_slot("lastSectionId", "contact");
    let mut layout = PageLayout::new(&[]);
    let mut runtime = StageRuntime::new(StageConfig::default(), PlatformHints::default());

    assert_eq!(runtime.restore(&mut nav), Some(SectionId::Contact));
    assert_eq!(nav.scroll_y(), 4400.0);

    layout.scroll_y = nav.scroll_y();
    runtime.on_scroll(&mut nav, &layout);
    assert_eq!(runtime.active_section(), Some(SectionId::Contact));
}

/// 平滑滚动途中再次导航：只保留一个动画，目标为最新的分区
#[test]
fn test_new_navigation_replaces_in_flight_scroll() {
    let mut nav = full_page();
    let mut layout = PageLayout::new(&[]);
    let mut runtime = StageRuntime::new(StageConfig::default(), PlatformHints::default());

    runtime.navigate(SectionId::Contact, &mut nav);
    frame(&mut runtime, &mut nav, &mut layout, 0.2);
    runtime.navigate(SectionId::About, &mut nav);
    assert!(runtime.is_navigating());

    let mut arrived = Vec::new();
    for _ in 0..40 {
        let commands = frame(&mut runtime, &mut nav, &mut layout, 1.0 / 30.0);
        arrived.extend(activations(&commands));
    }
    assert_eq!(arrived, vec!["about"]);
    assert!(!runtime.is_navigating());
    // About 顶边 800，宽屏头部 84
    assert!((nav.scroll_y() - 716.0).abs() < 1e-6);
    assert_eq!(nav.current_fragment(), Some("about"));
}

/// 平滑滚动中途被用户打断，停在哪个分区就提交哪个分区
#[test]
fn test_interrupted_navigation_commits_visible_section() {
    let mut nav = full_page();
    let mut layout = PageLayout::new(&[]);
    let mut runtime = StageRuntime::new(StageConfig::default(), PlatformHints::default());
    scroll_to(&mut runtime, &mut nav, &mut layout, 0.0);
    assert_eq!(runtime.active_section(), Some(SectionId::Home));

    runtime.navigate(SectionId::Contact, &mut nav);
    let mut passed = Vec::new();
    while nav.scroll_y() < 2000.0 {
        let commands = frame(&mut runtime, &mut nav, &mut layout, 1.0 / 60.0);
        passed.extend(activations(&commands));
    }
    assert!(passed.is_empty());
    // Services 占据 1800..3200，视口仍完全落在其中
    assert!(nav.scroll_y() < 2400.0);

    let commands = runtime.interrupt(&mut nav, &layout);
    assert!(!runtime.is_navigating());
    assert_eq!(activations(&commands), vec!["services"]);

    let y = nav.scroll_y() + 50.0;
    assert!(activations(&scroll_to(&mut runtime, &mut nav, &mut layout, y)).is_empty());
    assert_eq!(runtime.active_section(), Some(SectionId::Services));
    assert_eq!(nav.current_fragment(), Some("services"));
    assert_eq!(nav.slot("lastSectionId"), Some("services"));
}

/// 作品卡片：0 号从右侧进入，1 号从左侧进入，离开时方向一致
#[test]
fn test_gallery_cards_alternate_direction() {
    let first = ElementHandle(10);
    let second = ElementHandle(11);
    let mut nav = full_page();
    let mut layout = PageLayout::new(&[(first, 3300.0, 300.0), (second, 3300.0, 300.0)]);
    let mut runtime = StageRuntime::new(StageConfig::default(), PlatformHints::default());

    let ids = runtime.bind_reveal(RevealPreset::GalleryCard, &[first, second], None);
    frame(&mut runtime, &mut nav, &mut layout, 0.0);
    let entrance = runtime.entrance();
    assert_eq!(entrance.visual(ids[0]).map(|v| v.x), Some(48.0));
    assert_eq!(entrance.visual(ids[1]).map(|v| v.x), Some(-48.0));

    // 卡片顶边到达视口 85% 以内
    scroll_to(&mut runtime, &mut nav, &mut layout, 2900.0);
    frame(&mut runtime, &mut nav, &mut layout, 2.0);
    assert_eq!(runtime.entrance().visual(ids[0]), Some(VisualState::VISIBLE));
    assert_eq!(runtime.entrance().visual(ids[1]), Some(VisualState::VISIBLE));
    assert_eq!(runtime.entrance().state(ids[1]), Some(EntranceState::Played));

    // 卡片底边越过 60%：向上离开
    scroll_to(&mut runtime, &mut nav, &mut layout, 3300.0);
    assert_eq!(runtime.entrance().state(ids[0]), Some(EntranceState::PlayingReverse));
    frame(&mut runtime, &mut nav, &mut layout, 2.0);
    let even = runtime.entrance().visual(ids[0]).unwrap();
    let odd = runtime.entrance().visual(ids[1]).unwrap();
    assert_eq!((even.x, even.opacity), (48.0, 0.0));
    assert_eq!((odd.x, odd.opacity), (-48.0, 0.0));

    // 回滚后重新进入，再回到起点之前
    scroll_to(&mut runtime, &mut nav, &mut layout, 2900.0);
    frame(&mut runtime, &mut nav, &mut layout, 2.0);
    assert_eq!(runtime.entrance().visual(ids[1]), Some(VisualState::VISIBLE));

    scroll_to(&mut runtime, &mut nav, &mut layout, 2000.0);
    frame(&mut runtime, &mut nav, &mut layout, 2.0);
    assert_eq!(runtime.entrance().visual(ids[1]).map(|v| v.x), Some(-48.0));
    assert_eq!(runtime.entrance().state(ids[1]), Some(EntranceState::NotYetPlayed));
}

/// 减少动态效果：进入时直接写入最终状态，不需要经过任何时间
#[test]
fn test_reduced_motion_applies_final_state_immediately() {
    let title = ElementHandle(20);
    let mut nav = full_page();
    let mut layout = PageLayout::new(&[(title, 900.0, 80.0)]);
    let platform = PlatformHints {
        prefers_reduced_motion: true,
        ..Default::default()
    };
    let mut runtime = StageRuntime::new(StageConfig::default(), platform);

    let ids = runtime.bind_reveal(RevealPreset::SectionTitle, &[title], None);
    scroll_to(&mut runtime, &mut nav, &mut layout, 400.0);

    assert_eq!(runtime.entrance().state(ids[0]), Some(EntranceState::Played));
    assert_eq!(runtime.entrance().visual(ids[0]), Some(VisualState::VISIBLE));
    assert!(!runtime.entrance().is_animating());

    let commands = frame(&mut runtime, &mut nav, &mut layout, 0.0);
    assert!(commands.iter().any(|c| matches!(c, StageCommand::ApplyStyle(u) if u.element == title)));
}

/// 追踪器不可用时内容直接可见
#[test]
fn test_unsupported_observer_shows_content() {
    let card = ElementHandle(30);
    let platform = PlatformHints {
        observer_supported: false,
        ..Default::default()
    };
    let mut runtime = StageRuntime::new(StageConfig::default(), platform);
    let ids = runtime.bind_reveal(RevealPreset::ServiceCard, &[card], None);
    assert_eq!(runtime.entrance().visual(ids[0]), Some(VisualState::VISIBLE));
    assert_eq!(runtime.entrance().state(ids[0]), Some(EntranceState::Played));
}

#[derive(Default)]
struct SilentMedia {
    time: f64,
    volume: f64,
}

impl MediaElement for SilentMedia {
    fn request_play(&mut self) {}

    fn pause(&mut self) {}

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> f64 {
        240.0
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// 播放器与滚动状态无关
#[test]
fn test_player_independent_of_scroll() {
    let mut nav = full_page();
    let mut layout = PageLayout::new(&[]);
    let mut runtime = StageRuntime::new(StageConfig::default(), PlatformHints::default());
    let mut media = SilentMedia::default();
    let mut player = FloatingPlayer::default();
    player.attach(&mut media);

    let rejected = player.toggle_play(&mut media).unwrap();
    player.settle_play(rejected, Err(PlaybackError::NotAllowed));
    assert!(!player.is_playing());

    let accepted = player.toggle_play(&mut media).unwrap();
    scroll_to(&mut runtime, &mut nav, &mut layout, 1800.0);
    player.settle_play(accepted, Ok(()));
    assert!(player.is_playing());

    assert_eq!(player.set_volume(&mut media, 1.2), 1.0);
    assert_eq!(player.seek(&mut media, 999.0), 240.0);
    assert_eq!(media.time, 240.0);
}
