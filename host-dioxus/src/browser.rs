//! 浏览器环境：运行时注入接口的 web-sys 实现。
//!
//! - [`BrowserNavigation`]：地址片段、会话存储、窗口滚动
//! - [`DomLayout`]：元素句柄与 DOM id 的映射，布局查询
//! - [`AudioMedia`]：`<audio>` 元素
//! - 平台探测与页面配置读取

use std::collections::HashMap;

use js_sys::Promise;
use stage_runtime::navigation::section_handle;
use stage_runtime::{
    ElementChange, ElementHandle, LayoutProvider, MediaElement, NavigationContext,
    PlatformHints, PlaybackError, Rect, ScrollBehavior, SectionId, StyleUpdate, Viewport,
};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAudioElement, HtmlElement, HtmlVideoElement, Storage, Window};

/// 页面内嵌配置的 `<script>` id
pub const CONFIG_SCRIPT_ID: &str = "stage-config";

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// 按 id 查找 HTML 元素
pub fn html_element(id: &str) -> Option<HtmlElement> {
    document()?.get_element_by_id(id)?.dyn_into().ok()
}

/// 元素相对视口的纵向范围
fn element_rect(id: &str) -> Option<Rect> {
    let rect = document()?.get_element_by_id(id)?.get_bounding_client_rect();
    Some(Rect::new(rect.top(), rect.height()))
}

// ========== 导航 ==========

/// 基于 `window` 的导航环境
pub struct BrowserNavigation {
    window: Window,
}

impl BrowserNavigation {
    pub fn new() -> Option<Self> {
        Some(Self {
            window: web_sys::window()?,
        })
    }

    fn session(&self) -> Option<Storage> {
        self.window.session_storage().ok().flatten()
    }

    /// 替换当前历史记录的地址，不新增条目
    fn replace_url(&self, url: &str) {
        let Ok(history) = self.window.history() else {
            return;
        };
        if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(url)) {
            warn!(url, error = ?err, "替换地址失败");
        }
    }
}

impl NavigationContext for BrowserNavigation {
    fn fragment(&self) -> Option<String> {
        let hash = self.window.location().hash().ok()?;
        let hash = hash.trim_start_matches('#');
        (!hash.is_empty()).then(|| hash.to_string())
    }

    fn replace_fragment(&mut self, section: SectionId) {
        self.replace_url(&section.fragment());
    }

    fn read_slot(&self, key: &str) -> Option<String> {
        self.session()?.get_item(key).ok().flatten()
    }

    fn write_slot(&mut self, key: &str, value: &str) {
        // 隐私模式下会话存储可能不可写，丢弃即可
        if let Some(storage) = self.session()
            && storage.set_item(key, value).is_err()
        {
            debug!(key, "会话存储写入失败");
        }
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or_default()
        };
        Viewport::new(
            self.window.scroll_y().unwrap_or_default(),
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(y);
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn section_rect(&self, section: SectionId) -> Option<Rect> {
        element_rect(section.as_str())
    }
}

// ========== 布局 ==========

/// 元素句柄注册表
///
/// 组件以 DOM id 标识需要动画的元素；分区句柄直接映射到分区 id。
#[derive(Debug, Default)]
pub struct DomLayout {
    ids: HashMap<ElementHandle, String>,
    next: u64,
}

impl DomLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个 DOM id，重复登记返回同一个句柄
    pub fn register(&mut self, id: &str) -> ElementHandle {
        if let Some(handle) = self
            .ids
            .iter()
            .find_map(|(handle, known)| (*known == id).then_some(*handle))
        {
            return handle;
        }
        self.next += 1;
        let handle = ElementHandle(self.next);
        self.ids.insert(handle, id.to_string());
        handle
    }

    /// 登记分区元素
    pub fn register_section(&mut self, section: SectionId) -> ElementHandle {
        let handle = section_handle(section);
        self.ids.insert(handle, section.as_str().to_string());
        handle
    }

    pub fn dom_id(&self, handle: ElementHandle) -> Option<&str> {
        self.ids.get(&handle).map(String::as_str)
    }

    /// 把一条样式更新写到对应元素上
    pub fn apply(&self, update: &StyleUpdate) {
        let Some(element) = self.dom_id(update.element).and_then(html_element) else {
            return;
        };
        match &update.change {
            ElementChange::Visual(state) => {
                let style = element.style();
                let result = style
                    .set_property("transform", &state.css_transform())
                    .and_then(|_| style.set_property("opacity", &state.css_opacity()));
                if let Err(err) = result {
                    debug!(error = ?err, "写入样式失败");
                }
            }
            ElementChange::Text(text) => element.set_text_content(Some(text)),
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl LayoutProvider for DomLayout {
    fn rect(&self, element: ElementHandle) -> Option<Rect> {
        element_rect(self.ids.get(&element)?)
    }
}

// ========== 媒体 ==========

/// `<audio>` 元素
///
/// `play()` 返回的 Promise 暂存起来，由调用方带着票据等待结果。
pub struct AudioMedia {
    audio: HtmlAudioElement,
    pending: Option<Result<Promise, PlaybackError>>,
}

impl AudioMedia {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self {
            audio,
            pending: None,
        }
    }

    pub fn by_id(id: &str) -> Option<Self> {
        let audio = document()?.get_element_by_id(id)?.dyn_into().ok()?;
        Some(Self::new(audio))
    }

    /// 取出最近一次 `request_play` 的结果
    pub fn take_play_request(&mut self) -> Option<Result<Promise, PlaybackError>> {
        self.pending.take()
    }
}

impl MediaElement for AudioMedia {
    fn request_play(&mut self) {
        self.pending = Some(self.audio.play().map_err(|err| playback_error(&err)));
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            debug!(error = ?err, "暂停失败");
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume);
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }

    fn volume(&self) -> f64 {
        self.audio.volume()
    }
}

/// 把 `play()` 的拒绝原因归类
pub fn playback_error(value: &JsValue) -> PlaybackError {
    match value.dyn_ref::<web_sys::DomException>() {
        Some(exception) => PlaybackError::from_dom_name(&exception.name()),
        None => PlaybackError::Other(format!("{value:?}")),
    }
}

/// 等待播放请求完成
pub async fn settle_play_request(
    request: Result<Promise, PlaybackError>,
) -> Result<(), PlaybackError> {
    let promise = request?;
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| playback_error(&err))
}

/// 设置视频播放速率
pub fn set_playback_rate(id: &str, rate: f64) {
    let video = document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok());
    match video {
        Some(video) => video.set_playback_rate(rate),
        None => debug!(id, "未找到视频元素"),
    }
}

// ========== 平台 ==========

/// 探测系统偏好与浏览器能力
pub fn platform_hints() -> PlatformHints {
    let Some(window) = web_sys::window() else {
        return PlatformHints::default();
    };
    let prefers_reduced_motion = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    let observer_supported =
        js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false);
    PlatformHints {
        prefers_reduced_motion,
        observer_supported,
    }
}

/// 读取页面内嵌的 JSON 配置，没有时返回空对象
pub fn page_config_json() -> String {
    document()
        .and_then(|doc| doc.get_element_by_id(CONFIG_SCRIPT_ID))
        .and_then(|el| el.text_content())
        .unwrap_or_else(|| "{}".to_string())
}

/// 锁定或恢复页面滚动
pub fn set_body_scroll_locked(locked: bool) {
    let Some(body) = document().and_then(|doc| doc.body()) else {
        return;
    };
    let value = if locked { "hidden" } else { "" };
    if let Err(err) = body.style().set_property("overflow", value) {
        debug!(error = ?err, "切换滚动锁定失败");
    }
}
