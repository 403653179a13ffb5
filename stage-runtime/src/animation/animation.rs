//! # 补间
//!
//! 一条 f32 时间轴：入场的每个变换属性、计数器的数值、平滑滚动的进度
//! 各用一条。调用方自己决定数值落到哪里。

use super::EasingFunction;

/// 补间 ID，同一次 `animate` 下的各属性共用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(pub u64);

impl AnimationId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// 还在 stagger / delay 里
    #[default]
    Pending,
    Playing,
    Completed,
    /// 元素反向滚出或被新导航替换
    Cancelled,
}

impl AnimationState {
    /// 每帧还需要推进
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Playing)
    }

    pub fn is_finished(&self) -> bool {
        !self.is_active()
    }
}

/// 单条补间
///
/// 数值按 `from + (to - from) * eased(t)` 计算；`t` 在延迟结束后才开始走。
#[derive(Debug, Clone)]
pub struct Animation {
    pub id: AnimationId,
    from: f32,
    to: f32,
    /// 秒
    duration: f32,
    easing: EasingFunction,
    delay: f32,
    state: AnimationState,
    /// 缓动后的进度
    eased: f32,
    /// 从创建起累计的时间，包含延迟
    clock: f32,
}

impl Animation {
    /// 时长为 0 时立即完成，`current_value()` 直接给出 `to`
    pub fn new(id: AnimationId, from: f32, to: f32, duration: f32) -> Self {
        let duration = duration.max(0.0);
        let mut animation = Self {
            id,
            from,
            to,
            duration,
            easing: EasingFunction::default(),
            delay: 0.0,
            state: AnimationState::Pending,
            eased: 0.0,
            clock: 0.0,
        };
        if duration == 0.0 {
            animation.force_complete();
        }
        animation
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 分组成员错开入场用。零时长补间加了延迟后要等到延迟结束才跳到终值。
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        if self.delay > 0.0 && self.state == AnimationState::Completed {
            self.state = AnimationState::Pending;
            self.eased = 0.0;
        }
        self
    }

    /// 推进 `dt` 秒，返回是否还要继续推进
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.clock += dt;

        let playing = self.clock - self.delay;
        if playing < 0.0 {
            return true;
        }
        self.state = AnimationState::Playing;

        let t = if self.duration > 0.0 {
            playing / self.duration
        } else {
            1.0
        };
        if t >= 1.0 {
            self.force_complete();
            return false;
        }
        self.eased = self.easing.apply(t);
        true
    }

    /// 直接跳到终值（减少动态效果、切换开关时用）
    pub fn force_complete(&mut self) {
        self.eased = 1.0;
        self.state = AnimationState::Completed;
    }

    /// 停在当前值
    pub fn cancel(&mut self) {
        if self.state.is_active() {
            self.state = AnimationState::Cancelled;
        }
    }

    pub fn current_value(&self) -> f32 {
        self.from + (self.to - self.from) * self.eased
    }

    pub fn final_value(&self) -> f32 {
        self.to
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// 延迟已过
    pub fn has_started(&self) -> bool {
        self.state != AnimationState::Pending
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll_progress() -> Animation {
        Animation::new(AnimationId::new(1), 0.0, 1.0, 0.8)
    }

    #[test]
    fn test_new_tween_waits_for_first_frame() {
        let anim = scroll_progress();
        assert_eq!(anim.state(), AnimationState::Pending);
        assert_eq!(anim.current_value(), 0.0);
        assert_eq!(anim.final_value(), 1.0);
    }

    #[test]
    fn test_scroll_progress_reaches_end() {
        let mut anim = scroll_progress();

        assert!(anim.update(0.1));
        assert_eq!(anim.state(), AnimationState::Playing);

        assert!(anim.update(0.3));
        let mid = anim.current_value();
        assert!(mid > 0.0 && mid < 1.0, "{mid}");

        assert!(!anim.update(0.5));
        assert_eq!(anim.state(), AnimationState::Completed);
        assert_eq!(anim.current_value(), 1.0);
        assert!(!anim.update(0.1));
    }

    #[test]
    fn test_staggered_member_holds_start_value() {
        let mut anim = Animation::new(AnimationId::new(2), 24.0, 0.0, 0.9).with_delay(0.2);

        assert!(anim.update(0.15));
        assert!(!anim.has_started());
        assert_eq!(anim.current_value(), 24.0);

        assert!(anim.update(0.1));
        assert!(anim.has_started());
        assert!(anim.current_value() < 24.0);
    }

    #[test]
    fn test_instant_tween_completes_on_creation() {
        let anim = Animation::new(AnimationId::new(3), 0.0, 500.0, 0.0);
        assert!(anim.is_finished());
        assert_eq!(anim.current_value(), 500.0);
    }

    #[test]
    fn test_instant_tween_with_delay_jumps_after_delay() {
        let mut anim = Animation::new(AnimationId::new(4), 0.0, 1.0, 0.0).with_delay(0.2);
        assert_eq!(anim.current_value(), 0.0);
        assert!(anim.update(0.1));
        assert!(!anim.update(0.2));
        assert_eq!(anim.current_value(), 1.0);
    }

    #[test]
    fn test_cancelled_counter_stops_where_it_was() {
        let mut anim = Animation::new(AnimationId::new(5), 0.0, 150.0, 2.0)
            .with_easing(EasingFunction::Linear);
        anim.update(1.0);
        anim.cancel();
        assert_eq!(anim.state(), AnimationState::Cancelled);
        assert_eq!(anim.current_value(), 75.0);
        assert!(!anim.update(1.0));
        assert_eq!(anim.current_value(), 75.0);
    }
}
