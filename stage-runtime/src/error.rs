//! # Error 模块
//!
//! 定义 stage-runtime 中使用的错误类型。
//!
//! 站点的失败面很窄：分区标识无法识别、媒体播放被拒绝、配置无效。
//! 这些错误都不是致命的，调用方通常记录日志后降级处理。

use thiserror::Error;

use crate::animation::{ObjectId, VisualProperty};

/// 分区标识错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// 未知的分区标识
    #[error("未知的分区标识 '{0}'")]
    Unknown(String),

    /// 空标识（例如只有 `#` 的片段）
    #[error("分区标识为空")]
    Empty,
}

/// 播放错误
///
/// 对应媒体元素 `play()` 被拒绝的几种原因。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// 自动播放策略或权限拒绝
    #[error("播放被运行环境拒绝（自动播放策略）")]
    NotAllowed,

    /// 媒体格式或来源不受支持
    #[error("媒体来源不受支持")]
    NotSupported,

    /// 播放请求被后续的 pause/load 打断
    #[error("播放请求被中断")]
    Aborted,

    /// 其他错误
    #[error("播放失败: {0}")]
    Other(String),
}

impl PlaybackError {
    /// 根据 DOMException 名称归类
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotAllowedError" => Self::NotAllowed,
            "NotSupportedError" => Self::NotSupported,
            "AbortError" => Self::Aborted,
            other => Self::Other(other.to_string()),
        }
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON 解析失败
    #[error("配置解析失败: {0}")]
    Parse(String),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    Validation(String),
}

/// 动画系统错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// 对象未注册或已注销
    #[error("对象 {0} 未注册")]
    ObjectNotFound(ObjectId),

    /// 对象不支持该属性
    #[error("对象 {object} 不支持属性 {property:?}")]
    PropertyNotSupported {
        object: ObjectId,
        property: VisualProperty,
    },

    /// 没有任何属性需要动画
    #[error("动画属性列表为空")]
    EmptyTween,
}

/// stage-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    /// 分区错误
    #[error("分区错误: {0}")]
    Section(#[from] SectionError),

    /// 播放错误
    #[error("播放错误: {0}")]
    Playback(#[from] PlaybackError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 动画错误
    #[error("动画错误: {0}")]
    Animation(#[from] AnimationError),
}

/// Result 类型别名
pub type StageResult<T> = Result<T, StageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_name_mapping() {
        assert_eq!(
            PlaybackError::from_dom_name("NotAllowedError"),
            PlaybackError::NotAllowed
        );
        assert_eq!(
            PlaybackError::from_dom_name("AbortError"),
            PlaybackError::Aborted
        );
        assert_eq!(
            PlaybackError::from_dom_name("Weird"),
            PlaybackError::Other("Weird".to_string())
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: StageError = SectionError::Unknown("lobby".to_string()).into();
        assert!(matches!(err, StageError::Section(_)));
        assert!(err.to_string().contains("lobby"));
    }
}
