//! 根组件：创建运行时，提供上下文，挂载后启动事件与帧循环。

use dioxus::prelude::*;
use stage_runtime::StageConfig;
use tracing::error;

use crate::browser;
use crate::components::{
    About, Booking, Contact, FloatingPlayerWidget, Footer, Gallery, Hero, Navbar, Services,
};
use crate::stage::{StageHandle, StageSignals};

#[component]
pub fn App() -> Element {
    let signals = StageSignals::use_new();
    let config = use_hook(|| StageConfig::load_or_default(&browser::page_config_json()));
    let stage = use_hook(|| {
        let stage = StageHandle::new(config.clone(), browser::platform_hints(), signals);
        if stage.is_none() {
            error!("浏览器环境不可用，滚动与动画不会启动");
        }
        stage
    });

    use_context_provider(|| signals);
    use_context_provider(|| config.clone());
    use_context_provider(|| stage.clone());

    {
        let stage = stage.clone();
        use_effect(move || {
            if let Some(stage) = &stage {
                stage.mount();
            }
        });
    }
    use_drop(move || {
        if let Some(stage) = &stage {
            stage.unmount();
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: "/assets/main.css" }
        Navbar {}
        main {
            Hero {}
            About {}
            Services {}
            Gallery {}
            Contact {}
            Booking {}
        }
        Footer {}
        FloatingPlayerWidget {}
    }
}
