//! # Section 模块
//!
//! 页面分区标识。分区组件必须暴露带有这些 id 的元素，
//! 同步器与导航器才能找到它们。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SectionError;

/// 分区标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    /// 首屏
    Home,
    /// 关于 + 数据
    About,
    /// 服务
    Services,
    /// 作品集
    Gallery,
    /// 联系方式
    Contact,
    /// 预订表单
    Booking,
}

impl SectionId {
    /// 所有分区（页面自上而下的顺序）
    pub const ALL: [SectionId; 6] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Services,
        SectionId::Gallery,
        SectionId::Contact,
        SectionId::Booking,
    ];

    /// 导航栏中出现的分区
    pub const NAV_LINKS: [SectionId; 5] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Services,
        SectionId::Gallery,
        SectionId::Contact,
    ];

    /// DOM id
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Services => "services",
            SectionId::Gallery => "gallery",
            SectionId::Contact => "contact",
            SectionId::Booking => "booking",
        }
    }

    /// 导航栏显示名
    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::About => "About",
            SectionId::Services => "Services",
            SectionId::Gallery => "Gallery",
            SectionId::Contact => "Contact",
            SectionId::Booking => "Booking",
        }
    }

    /// 地址片段（带 `#`）
    pub fn fragment(&self) -> String {
        format!("#{}", self.as_str())
    }

    /// 从地址片段解析，接受 `#gallery` 与 `gallery` 两种形式
    pub fn from_fragment(fragment: &str) -> Result<Self, SectionError> {
        fragment.trim().trim_start_matches('#').parse()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SectionError::Empty);
        }
        SectionId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SectionError::Unknown(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        for id in SectionId::ALL {
            assert_eq!(id.as_str().parse::<SectionId>(), Ok(id));
        }
    }

    #[test]
    fn test_from_fragment() {
        assert_eq!(SectionId::from_fragment("#gallery"), Ok(SectionId::Gallery));
        assert_eq!(SectionId::from_fragment("contact"), Ok(SectionId::Contact));
        assert_eq!(SectionId::from_fragment("#"), Err(SectionError::Empty));
        assert_eq!(
            SectionId::from_fragment("#lobby"),
            Err(SectionError::Unknown("lobby".to_string()))
        );
    }

    #[test]
    fn test_fragment_format() {
        assert_eq!(SectionId::Booking.fragment(), "#booking");
        assert_eq!(SectionId::Home.to_string(), "home");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&SectionId::Services).unwrap();
        assert_eq!(json, "\"services\"");
    }
}
