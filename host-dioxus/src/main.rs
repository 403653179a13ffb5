//! 演出站点 - 浏览器宿主（Dioxus 前端）
//!
//! 负责渲染各分区、转发滚动与帧事件，驱动 stage-runtime 执行动画与导航。

mod app;
mod browser;
mod components;
mod frame;
mod logging;
mod stage;

fn main() {
    logging::init();
    tracing::info!("演出站点启动");
    dioxus::launch(app::App);
}
