//! 播放器的空闲浮动。

/// 竖直方向的正弦浮动：`amplitude * sin(now_ms / period_ms)`
///
/// 只在运行期间产出位移；宿主用帧循环驱动它，循环句柄释放时调用 `stop`。
#[derive(Debug, Clone, PartialEq)]
pub struct IdleWave {
    amplitude: f64,
    period_ms: f64,
    running: bool,
}

impl IdleWave {
    pub fn new(amplitude: f64, period_ms: f64) -> Self {
        Self {
            amplitude,
            period_ms: if period_ms > 0.0 { period_ms } else { 1.0 },
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 给定时间戳（毫秒）的位移，未运行时返回 `None`
    pub fn sample(&self, now_ms: f64) -> Option<f64> {
        self.running
            .then(|| self.amplitude * (now_ms / self.period_ms).sin())
    }

    /// 给定时间戳的位移，未运行时为 0
    pub fn offset(&self, now_ms: f64) -> f64 {
        self.sample(now_ms).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_only_samples_while_running() {
        let mut wave = IdleWave::new(10.0, 650.0);
        assert_eq!(wave.sample(1000.0), None);

        wave.start();
        let peak = wave.offset(650.0 * PI / 2.0);
        assert!((peak - 10.0).abs() < 1e-9);
        assert!(wave.offset(0.0).abs() < 1e-9);

        wave.stop();
        assert_eq!(wave.offset(650.0 * PI / 2.0), 0.0);
    }

    #[test]
    fn test_bounded_by_amplitude() {
        let mut wave = IdleWave::new(10.0, 650.0);
        wave.start();
        for ms in (0..20_000).step_by(37) {
            assert!(wave.offset(ms as f64).abs() <= 10.0 + 1e-9);
        }
    }
}
