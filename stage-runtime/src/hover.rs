//! 卡片悬停效果：第一次悬停闪烁一次，之后只发光。

/// 悬停时应用的效果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEffect {
    /// 一次性闪烁
    Flicker,
    /// 描边发光
    Glow,
}

impl HoverEffect {
    /// 对应的样式类名
    pub fn class(&self) -> &'static str {
        match self {
            Self::Flicker => "flicker-once",
            Self::Glow => "hover-glow",
        }
    }
}

/// 单张卡片的悬停状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverFlicker {
    hovering: bool,
    flickered: bool,
    effect: Option<HoverEffect>,
}

impl HoverFlicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指针进入
    pub fn enter(&mut self) -> HoverEffect {
        let effect = if self.flickered {
            HoverEffect::Glow
        } else {
            self.flickered = true;
            HoverEffect::Flicker
        };
        self.hovering = true;
        self.effect = Some(effect);
        effect
    }

    /// 指针离开
    pub fn leave(&mut self) {
        self.hovering = false;
        self.effect = None;
    }

    /// 当前效果，未悬停时为 `None`
    pub fn effect(&self) -> Option<HoverEffect> {
        self.effect
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flickers_only_once() {
        let mut hover = HoverFlicker::new();
        assert_eq!(hover.effect(), None);

        assert_eq!(hover.enter(), HoverEffect::Flicker);
        assert_eq!(hover.effect().map(|e| e.class()), Some("flicker-once"));
        hover.leave();
        assert!(!hover.is_hovering());

        assert_eq!(hover.enter(), HoverEffect::Glow);
        hover.leave();
        assert_eq!(hover.enter(), HoverEffect::Glow);
    }
}
