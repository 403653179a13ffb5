//! # Content 模块
//!
//! 站点的静态内容：服务、附加服务、数据统计、关于、作品集、联系方式。
//!
//! 页面组件只从这里取文案和素材路径，不在渲染代码里硬编码。

use serde::Serialize;

use crate::entrance::CounterSpec;

/// 品牌强调色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Cyan,
    Pink,
    Green,
}

impl Accent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cyan => "cyan",
            Self::Pink => "pink",
            Self::Green => "green",
        }
    }
}

/// 服务卡片
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Service {
    pub title: &'static str,
    pub price: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub accent: Accent,
}

/// 附加服务小卡片
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MiniService {
    pub title: &'static str,
    pub description: &'static str,
}

/// 统计数字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatValue {
    /// 滚动进入时从 0 数到目标值
    Counter { target: u64, suffix: &'static str },
    /// 固定文本
    Text(&'static str),
}

/// 统计卡片
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: StatValue,
}

impl Stat {
    /// 计数器规格，固定文本返回 `None`
    pub fn counter(&self) -> Option<CounterSpec> {
        match self.value {
            StatValue::Counter { target, suffix } => {
                Some(CounterSpec::new(target).with_suffix(suffix))
            }
            StatValue::Text(_) => None,
        }
    }

    /// 未绑定计数器时的展示文本
    pub fn static_text(&self) -> String {
        match self.value {
            StatValue::Counter { target, suffix } => format!("{target}{suffix}"),
            StatValue::Text(text) => text.to_string(),
        }
    }
}

/// 作品集条目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    pub id: &'static str,
    pub title: &'static str,
    pub tag: &'static str,
    pub image: &'static str,
    pub video: Option<&'static str>,
    pub description: &'static str,
    pub link: &'static str,
}

/// 联系方式条目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactRow {
    pub label: &'static str,
    pub value: &'static str,
}

/// 首屏文案
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeroCopy {
    pub subtitle: &'static str,
    pub title: &'static str,
    pub video: &'static str,
    pub playback_rate: f64,
}

pub const BRAND: &str = "DJ SUGUNA";

pub const HERO: HeroCopy = HeroCopy {
    subtitle: "Jaffna’s Premier DJ",
    title: "DJ SUGUNATHAS",
    video: "/video/hero.mp4",
    playback_rate: 0.85,
};

const SERVICE_DESCRIPTION: &str =
    "Make your event unforgettable with high-energy mixes and a modern setup that fits your vibe.";

pub const SERVICES: [Service; 3] = [
    Service {
        title: "Wedding Celebrations",
        price: "From LKR 75,000",
        description: SERVICE_DESCRIPTION,
        features: &[
            "Ceremony music",
            "Reception entertainment",
            "First dance coordination",
            "Cultural music",
        ],
        accent: Accent::Cyan,
    },
    Service {
        title: "Corporate Events",
        price: "From LKR 50,000",
        description: SERVICE_DESCRIPTION,
        features: &[
            "Background music",
            "Award ceremonies",
            "Team building events",
            "Product launches",
        ],
        accent: Accent::Pink,
    },
    Service {
        title: "Private Parties",
        price: "From LKR 35,000",
        description: SERVICE_DESCRIPTION,
        features: &[
            "Birthday parties",
            "Anniversary celebrations",
            "House parties",
            "Pool parties",
        ],
        accent: Accent::Green,
    },
];

pub const MINI_SERVICES: [MiniService; 3] = [
    MiniService {
        title: "Sound System Rental",
        description: "Pro audio gear for any event size",
    },
    MiniService {
        title: "24/7 Support",
        description: "Round-the-clock assistance",
    },
    MiniService {
        title: "Custom Playlists",
        description: "Personalized music selection",
    },
];

pub const SERVICES_CTA: &str = "Ready to Book Your Event?";
pub const SERVICES_CTA_BUTTON: &str = "Start Planning Today";

pub const STATS: [Stat; 4] = [
    Stat {
        label: "Events Performed",
        value: StatValue::Counter {
            target: 500,
            suffix: "+",
        },
    },
    Stat {
        label: "Years Experience",
        value: StatValue::Counter {
            target: 3,
            suffix: "+",
        },
    },
    Stat {
        label: "Songs Library",
        value: StatValue::Counter {
            target: 1000,
            suffix: "+",
        },
    },
    Stat {
        label: "Client Rating",
        value: StatValue::Text("4.9/5"),
    },
];

pub const ABOUT_HEADLINE: &str = "Bringing Energy to Every Event";

pub const ABOUT_PARAGRAPHS: [&str; 2] = [
    "Based in Sri Lanka, DJ Suguna has been electrifying dance floors for over 3 years. \
     Specializing in weddings, corporate events, and private parties, I blend international \
     hits with local favorites to keep every crowd moving.",
    "From intimate gatherings to grand celebrations, I deliver unforgettable experiences with \
     state-of-the-art sound, dynamic lighting, and a passion for music that spans all genres.",
];

pub const ABOUT_FEATURES: [&str; 4] = [
    "Professional Sound Equipment",
    "Custom Lighting Setup",
    "Multilingual MC Services",
    "Wedding Specialization",
];

pub const ABOUT_IMAGE: &str = "/images/profile.png";
pub const ABOUT_HOVER_VIDEO: &str = "/assets/videos/dj-performance.mp4";

const GALLERY_IMAGE: &str = "/images/gallery-1.jpg";
const GALLERY_LINK: &str = "https://www.youtube.com/";

pub const GALLERY: [GalleryItem; 6] = [
    GalleryItem {
        id: "colombo-wedding",
        title: "Wedding Reception – Colombo",
        tag: "Wedding",
        image: GALLERY_IMAGE,
        video: Some("/assets/videos/wedding-performance.mp4"),
        description: "A magical evening celebrating love.",
        link: GALLERY_LINK,
    },
    GalleryItem {
        id: "stadium-show",
        title: "Stadium Night – Jaffna",
        tag: "Corporate",
        image: GALLERY_IMAGE,
        video: Some("/assets/videos/corporate.mp4"),
        description: "Massive stage + lighting design.",
        link: GALLERY_LINK,
    },
    GalleryItem {
        id: "club-ignite",
        title: "Club Ignite – Night Mix",
        tag: "Party",
        image: GALLERY_IMAGE,
        video: Some("/assets/videos/party.mp4"),
        description: "High-energy club session.",
        link: GALLERY_LINK,
    },
    GalleryItem {
        id: "chef-live",
        title: "Chef’s Live Counter – Event",
        tag: "Catering",
        image: GALLERY_IMAGE,
        video: None,
        description: "Live food stations + beats.",
        link: GALLERY_LINK,
    },
    GalleryItem {
        id: "artist-collab",
        title: "Guest Artist Collab",
        tag: "Feature",
        image: GALLERY_IMAGE,
        video: Some("/assets/videos/feature.mp4"),
        description: "Special performance collab.",
        link: GALLERY_LINK,
    },
    GalleryItem {
        id: "fireworks-finale",
        title: "Fireworks Finale",
        tag: "Finale",
        image: GALLERY_IMAGE,
        video: None,
        description: "End the night with a bang.",
        link: GALLERY_LINK,
    },
];

/// 按 id 查找作品
pub fn gallery_item(id: &str) -> Option<&'static GalleryItem> {
    GALLERY.iter().find(|item| item.id == id)
}

pub const CONTACT_TITLE: &str = "Let’s Create Magic";
pub const CONTACT_SUBTITLE: &str =
    "Ready to make your event unforgettable? Get in touch and let’s start planning!";
pub const BOOKING_FORM_TITLE: &str = "Book Your Event";

pub const EVENT_TYPES: [&str; 4] = ["Wedding", "Corporate", "Private Party", "Other"];

pub const CONTACT_ROWS: [ContactRow; 4] = [
    ContactRow {
        label: "Phone",
        value: "+94 77 123 4567",
    },
    ContactRow {
        label: "Email",
        value: "hello@djsuguna.lk",
    },
    ContactRow {
        label: "Location",
        value: "Colombo, Sri Lanka",
    },
    ContactRow {
        label: "Response Time",
        value: "Within 24 hours",
    },
];

/// 社交链接
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const FOOTER_BLURB: &str = "Sri Lanka's premier DJ bringing energy and excitement to weddings, \
     corporate events, and private parties. Creating unforgettable musical experiences.";

pub const FOOTER_CONTACT: [ContactRow; 3] = [
    ContactRow {
        label: "Phone",
        value: "+94 76 565 1955 / +94 75 026 2406",
    },
    ContactRow {
        label: "Email",
        value: "bookings@djsuguna.com",
    },
    ContactRow {
        label: "Location",
        value: "Jaffna, Sri Lanka",
    },
];

pub const SOCIAL_LINKS: [SocialLink; 4] = [
    SocialLink {
        label: "TikTok",
        href: "https://www.tiktok.com/@dj_suguna",
    },
    SocialLink {
        label: "Instagram",
        href: "https://www.instagram.com/dj_suguna_drug.offi_",
    },
    SocialLink {
        label: "YouTube",
        href: "https://youtube.com/@dj_suguna_",
    },
    SocialLink {
        label: "Facebook",
        href: "https://www.facebook.com/share/1ASBvjmZEQ/",
    },
];

/// 页脚“服务”栏目，全部指向服务分区
pub const FOOTER_SERVICES: [&str; 4] = [
    "Wedding DJ",
    "Corporate Events",
    "Private Parties",
    "Sound Rental",
];
