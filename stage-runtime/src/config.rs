//! # Config 模块
//!
//! 站点运行时配置，集中管理所有可调参数。
//!
//! ## 配置优先级
//!
//! 1. 宿主随页面下发的 JSON（最高）
//! 2. 默认值（最低）
//!
//! JSON 中缺失的字段一律取默认值，因此空对象 `{}` 就是一份完整配置。

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

/// 站点配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StageConfig {
    /// 分区导航
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// 动态效果
    #[serde(default)]
    pub motion: MotionConfig,

    /// 悬浮播放器
    #[serde(default)]
    pub player: PlayerConfig,

    /// 作品集弹窗
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// 首屏标语
    #[serde(default)]
    pub hero: HeroConfig,

    /// 导航栏
    #[serde(default)]
    pub navbar: NavbarConfig,
}

/// 分区导航配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// 分区成为活动分区所需的覆盖率
    #[serde(default = "default_center_threshold")]
    pub center_threshold: f64,

    /// 窄屏固定头部高度（px）
    #[serde(default = "default_narrow_header_height")]
    pub narrow_header_height: f64,

    /// 宽屏固定头部高度（px）
    #[serde(default = "default_wide_header_height")]
    pub wide_header_height: f64,

    /// 窄屏 / 宽屏分界（视口宽度，px）
    #[serde(default = "default_breakpoint")]
    pub breakpoint: f64,

    /// 平滑滚动时长（秒）
    #[serde(default = "default_scroll_duration")]
    pub scroll_duration: f32,

    /// 会话存储中记录最后分区的键
    #[serde(default = "default_slot_key")]
    pub slot_key: String,
}

/// 动态效果配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionConfig {
    /// 强制开关减少动态效果；`None` 时跟随系统偏好
    #[serde(default)]
    pub reduced_motion: Option<bool>,
}

/// 播放器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// 曲目标题
    #[serde(default = "default_player_title")]
    pub title: String,

    /// 音频地址
    #[serde(default = "default_player_source")]
    pub source: String,

    /// 初始音量 (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub default_volume: f64,

    /// 是否循环
    #[serde(default = "default_true")]
    pub looping: bool,

    /// 空闲浮动幅度（px）
    #[serde(default = "default_wave_amplitude")]
    pub wave_amplitude: f64,

    /// 空闲浮动周期参数（毫秒）
    #[serde(default = "default_wave_period_ms")]
    pub wave_period_ms: f64,
}

/// 作品集配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// 关闭弹窗后清除选中项的延迟（毫秒）
    #[serde(default = "default_close_debounce_ms")]
    pub close_debounce_ms: u32,
}

/// 首屏配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroConfig {
    /// 触发标语展示的可见比例
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,

    /// 标语展示时长（毫秒）
    #[serde(default = "default_reveal_ms")]
    pub reveal_ms: u32,
}

/// 导航栏配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavbarConfig {
    /// 超过该滚动距离后导航栏切换为紧凑样式（px）
    #[serde(default = "default_scrolled_offset")]
    pub scrolled_offset: f64,
}

// 默认值函数
fn default_center_threshold() -> f64 {
    0.55
}

fn default_narrow_header_height() -> f64 {
    64.0
}

fn default_wide_header_height() -> f64 {
    84.0
}

fn default_breakpoint() -> f64 {
    768.0
}

fn default_scroll_duration() -> f32 {
    0.8
}

fn default_slot_key() -> String {
    "lastSectionId".to_string()
}

fn default_player_title() -> String {
    "DJ Suguna - Demo Mix".to_string()
}

fn default_player_source() -> String {
    "/assets/audio/demo-mix.mp3".to_string()
}

fn default_volume() -> f64 {
    0.7
}

fn default_true() -> bool {
    true
}

fn default_wave_amplitude() -> f64 {
    10.0
}

fn default_wave_period_ms() -> f64 {
    650.0
}

fn default_close_debounce_ms() -> u32 {
    220
}

fn default_reveal_threshold() -> f64 {
    0.5
}

fn default_reveal_ms() -> u32 {
    3000
}

fn default_scrolled_offset() -> f64 {
    10.0
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            center_threshold: default_center_threshold(),
            narrow_header_height: default_narrow_header_height(),
            wide_header_height: default_wide_header_height(),
            breakpoint: default_breakpoint(),
            scroll_duration: default_scroll_duration(),
            slot_key: default_slot_key(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            title: default_player_title(),
            source: default_player_source(),
            default_volume: default_volume(),
            looping: true,
            wave_amplitude: default_wave_amplitude(),
            wave_period_ms: default_wave_period_ms(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            close_debounce_ms: default_close_debounce_ms(),
        }
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: default_reveal_threshold(),
            reveal_ms: default_reveal_ms(),
        }
    }
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_offset: default_scrolled_offset(),
        }
    }
}

impl MotionConfig {
    /// 结合系统偏好得出最终的减少动态效果开关
    pub fn resolve(&self, platform_prefers_reduced: bool) -> bool {
        self.reduced_motion.unwrap_or(platform_prefers_reduced)
    }
}

impl StageConfig {
    /// 从 JSON 解析并验证
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 解析配置，失败时返回默认配置并记录警告
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                info!("站点配置加载成功");
                config
            }
            Err(e) => {
                warn!(error = %e, "站点配置无效，使用默认配置");
                Self::default()
            }
        }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nav = &self.navigation;
        if !(nav.center_threshold > 0.0 && nav.center_threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "center_threshold 必须在 (0, 1] 之间".to_string(),
            ));
        }
        if nav.narrow_header_height <= 0.0 || nav.wide_header_height <= 0.0 {
            return Err(ConfigError::Validation("头部高度必须为正数".to_string()));
        }
        if nav.breakpoint <= 0.0 {
            return Err(ConfigError::Validation("breakpoint 必须为正数".to_string()));
        }
        if nav.scroll_duration < 0.0 {
            return Err(ConfigError::Validation(
                "scroll_duration 不能为负数".to_string(),
            ));
        }
        if nav.slot_key.is_empty() {
            return Err(ConfigError::Validation("slot_key 不能为空".to_string()));
        }

        let player = &self.player;
        if !(0.0..=1.0).contains(&player.default_volume) {
            return Err(ConfigError::Validation(
                "default_volume 必须在 0.0 - 1.0 之间".to_string(),
            ));
        }
        if player.wave_period_ms <= 0.0 {
            return Err(ConfigError::Validation(
                "wave_period_ms 必须为正数".to_string(),
            ));
        }
        if player.wave_amplitude < 0.0 {
            return Err(ConfigError::Validation(
                "wave_amplitude 不能为负数".to_string(),
            ));
        }

        if !(self.hero.reveal_threshold > 0.0 && self.hero.reveal_threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "reveal_threshold 必须在 (0, 1] 之间".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StageConfig::default();
        assert_eq!(config.navigation.center_threshold, 0.55);
        assert_eq!(config.navigation.slot_key, "lastSectionId");
        assert_eq!(config.player.default_volume, 0.7);
        assert_eq!(config.gallery.close_debounce_ms, 220);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = StageConfig::from_json("{}").unwrap();
        assert_eq!(config, StageConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            StageConfig::from_json(r#"{ "player": { "default_volume": 0.4 }, "motion": { "reduced_motion": true } }"#)
                .unwrap();
        assert_eq!(config.player.default_volume, 0.4);
        assert_eq!(config.player.title, "DJ Suguna - Demo Mix");
        assert!(config.motion.resolve(false));
    }

    #[test]
    fn test_invalid_values() {
        let result = StageConfig::from_json(r#"{ "navigation": { "center_threshold": 1.5 } }"#);
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let result = StageConfig::from_json(r#"{ "player": { "default_volume": -0.1 } }"#);
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let result = StageConfig::from_json("not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let config = StageConfig::load_or_default("{ broken");
        assert_eq!(config, StageConfig::default());
    }

    #[test]
    fn test_motion_follows_platform() {
        let motion = MotionConfig::default();
        assert!(motion.resolve(true));
        assert!(!motion.resolve(false));
    }
}
