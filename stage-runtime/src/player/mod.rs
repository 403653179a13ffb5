//! # Player 模块
//!
//! 悬浮播放器状态机，与滚动状态完全独立。
//!
//! ## 播放请求
//!
//! 媒体元素的 `play()` 是异步的，可能被自动播放策略拒绝。因此暂停态下
//! 的切换只进入 `Starting`，并返回一张 `PlayTicket`；宿主在结果到达时
//! 调用 `settle_play`。期间再次切换会作废这张票据，迟到的结果被忽略。
//!
//! ```text
//!           toggle              settle Ok
//!  Paused ─────────► Starting ───────────► Playing
//!    ▲                  │                     │
//!    └── settle Err ────┘◄──── toggle ────────┘
//! ```

mod wave;

pub use wave::IdleWave;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PlayerConfig;
use crate::error::PlaybackError;

/// 媒体元素接口
///
/// 浏览器宿主基于 `HtmlAudioElement` 实现。
pub trait MediaElement {
    /// 发起播放；结果通过 `FloatingPlayer::settle_play` 回报
    fn request_play(&mut self);

    fn pause(&mut self);

    fn set_current_time(&mut self, seconds: f64);

    fn set_volume(&mut self, volume: f64);

    fn current_time(&self) -> f64;

    /// 未加载元数据时可能是 NaN
    fn duration(&self) -> f64;

    fn volume(&self) -> f64;
}

/// 媒体元素的原生通知
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// `play`
    Play,
    /// `pause`
    Pause,
    /// `timeupdate`，携带当前时间
    TimeUpdate(f64),
    /// `loadedmetadata`，携带时长
    MetadataLoaded(f64),
    /// `ended`
    Ended,
}

/// 播放阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPhase {
    #[default]
    Paused,
    /// 已请求播放，等待结果
    Starting,
    Playing,
}

/// 播放请求票据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayTicket(u64);

/// 对外展示的播放状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
}

/// 悬浮播放器
#[derive(Debug, Clone)]
pub struct FloatingPlayer {
    title: String,
    source: String,
    looping: bool,
    phase: PlayerPhase,
    current_time: f64,
    duration: f64,
    volume: f64,
    pending: Option<PlayTicket>,
    next_ticket: u64,
}

impl Default for FloatingPlayer {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

impl FloatingPlayer {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            title: config.title.clone(),
            source: config.source.clone(),
            looping: config.looping,
            phase: PlayerPhase::Paused,
            current_time: 0.0,
            duration: 0.0,
            volume: clamp_volume(config.default_volume),
            pending: None,
            next_ticket: 1,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// 只有 `Playing` 才算在播放
    pub fn is_playing(&self) -> bool {
        self.phase == PlayerPhase::Playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            is_playing: self.is_playing(),
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume,
        }
    }

    /// 播放进度（0.0 - 1.0），时长未知时为 0
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// 挂载媒体元素：写入初始音量，读取已有的时长
    pub fn attach(&mut self, media: &mut impl MediaElement) {
        media.set_volume(self.volume);
        self.duration = finite_or_zero(media.duration());
        self.current_time = finite_or_zero(media.current_time());
    }

    /// 切换播放
    ///
    /// 从暂停态发起播放时返回票据；其他情况返回 `None`。
    pub fn toggle_play(&mut self, media: &mut impl MediaElement) -> Option<PlayTicket> {
        match self.phase {
            PlayerPhase::Playing | PlayerPhase::Starting => {
                media.pause();
                self.phase = PlayerPhase::Paused;
                self.pending = None;
                None
            }
            PlayerPhase::Paused => {
                let ticket = PlayTicket(self.next_ticket);
                self.next_ticket += 1;
                self.pending = Some(ticket);
                self.phase = PlayerPhase::Starting;
                media.request_play();
                Some(ticket)
            }
        }
    }

    /// 回报播放请求的结果；票据已失效时忽略并返回 `false`
    pub fn settle_play(&mut self, ticket: PlayTicket, result: Result<(), PlaybackError>) -> bool {
        if self.pending != Some(ticket) {
            debug!(ticket = ticket.0, "忽略过期的播放结果");
            return false;
        }
        self.pending = None;
        match result {
            Ok(()) => {
                self.phase = PlayerPhase::Playing;
            }
            Err(e) => {
                warn!(error = %e, "播放请求被拒绝");
                self.phase = PlayerPhase::Paused;
            }
        }
        true
    }

    /// 处理媒体元素的原生通知
    pub fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Play => {
                self.phase = PlayerPhase::Playing;
            }
            MediaEvent::Pause | MediaEvent::Ended => {
                self.phase = PlayerPhase::Paused;
                self.pending = None;
            }
            MediaEvent::TimeUpdate(t) => {
                self.current_time = finite_or_zero(t);
            }
            MediaEvent::MetadataLoaded(d) => {
                self.duration = finite_or_zero(d);
            }
        }
    }

    /// 跳转到指定时间，限制在 `[0, duration]`
    pub fn seek(&mut self, media: &mut impl MediaElement, seconds: f64) -> f64 {
        let target = if seconds.is_finite() {
            seconds.clamp(0.0, self.duration.max(0.0))
        } else {
            0.0
        };
        media.set_current_time(target);
        self.current_time = target;
        target
    }

    /// 设置音量，限制在 `[0, 1]`
    pub fn set_volume(&mut self, media: &mut impl MediaElement, volume: f64) -> f64 {
        let volume = clamp_volume(volume);
        media.set_volume(volume);
        self.volume = volume;
        volume
    }
}

fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// `m:ss` 格式，非有限值显示为 `0:00`
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 记录调用的假媒体元素
    #[derive(Debug, Default)]
    struct FakeMedia {
        play_requests: usize,
        pauses: usize,
        time: f64,
        duration: f64,
        volume: f64,
    }

    impl MediaElement for FakeMedia {
        fn request_play(&mut self) {
            self.play_requests += 1;
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }

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
            self.duration
        }

        fn volume(&self) -> f64 {
            self.volume
        }
    }

    #[test]
    fn test_attach_writes_default_volume() {
        let mut media = FakeMedia {
            duration: f64::NAN,
            ..Default::default()
        };
        let mut player = FloatingPlayer::default();
        player.attach(&mut media);
        assert_eq!(media.volume, 0.7);
        assert_eq!(player.duration(), 0.0);
        assert_eq!(player.title(), "DJ Suguna - Demo Mix");
        assert!(player.looping());
    }

    #[test]
    fn test_rejected_play_stays_paused() {
        let mut media = FakeMedia::default();
        let mut player = FloatingPlayer::default();

        let ticket = player.toggle_play(&mut media).unwrap();
        assert_eq!(player.phase(), PlayerPhase::Starting);
        assert!(!player.is_playing());

        assert!(player.settle_play(ticket, Err(PlaybackError::NotAllowed)));
        assert!(!player.is_playing());
        assert_eq!(player.phase(), PlayerPhase::Paused);
    }

    #[test]
    fn test_successful_play_then_pause() {
        let mut media = FakeMedia::default();
        let mut player = FloatingPlayer::default();

        let ticket = player.toggle_play(&mut media).unwrap();
        player.settle_play(ticket, Ok(()));
        assert!(player.is_playing());
        assert_eq!(media.play_requests, 1);

        assert_eq!(player.toggle_play(&mut media), None);
        assert!(!player.is_playing());
        assert_eq!(media.pauses, 1);
    }

    #[test]
    fn test_stale_ticket_ignored() {
        let mut media = FakeMedia::default();
        let mut player = FloatingPlayer::default();

        let first = player.toggle_play(&mut media).unwrap();
        // 结果到达前又点了一次
        player.toggle_play(&mut media);
        assert!(!player.settle_play(first, Ok(())));
        assert!(!player.is_playing());
    }

    #[test]
    fn test_native_events_reconcile() {
        let mut player = FloatingPlayer::default();
        player.on_media_event(MediaEvent::Play);
        assert!(player.is_playing());
        player.on_media_event(MediaEvent::TimeUpdate(12.5));
        player.on_media_event(MediaEvent::MetadataLoaded(f64::INFINITY));
        assert_eq!(player.current_time(), 12.5);
        assert_eq!(player.duration(), 0.0);
        player.on_media_event(MediaEvent::Pause);
        assert!(!player.is_playing());
    }

    #[test]
    fn test_clamps_volume_and_seek() {
        let mut media = FakeMedia::default();
        let mut player = FloatingPlayer::default();
        player.on_media_event(MediaEvent::MetadataLoaded(180.0));

        assert_eq!(player.set_volume(&mut media, 1.2), 1.0);
        assert_eq!(media.volume, 1.0);
        assert_eq!(player.set_volume(&mut media, -0.3), 0.0);

        assert_eq!(player.seek(&mut media, 500.0), 180.0);
        assert_eq!(media.time, 180.0);
        assert_eq!(player.seek(&mut media, -4.0), 0.0);
        assert_eq!(player.progress(), 0.0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }
}
