//! 悬浮播放器：状态在运行时，组件只转发媒体事件与用户操作。

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use stage_runtime::{FloatingPlayer, IdleWave, MediaElement, MediaEvent, StageConfig, format_time};
use tracing::warn;

use crate::browser::{self, AudioMedia};
use crate::frame::FrameLoop;

const PLAYER_ID: &str = "floating-player";
const AUDIO_ID: &str = "floating-player-audio";

fn audio() -> Option<AudioMedia> {
    let media = AudioMedia::by_id(AUDIO_ID);
    if media.is_none() {
        warn!(id = AUDIO_ID, "未找到播放器音频元素");
    }
    media
}

#[component]
pub fn FloatingPlayerWidget() -> Element {
    let config = use_context::<StageConfig>();
    let mut player = use_signal(|| FloatingPlayer::new(&config.player));
    let wave_loop = use_hook(|| Rc::new(RefCell::new(None::<FrameLoop>)));

    {
        let wave_loop = wave_loop.clone();
        let (amplitude, period_ms) = (config.player.wave_amplitude, config.player.wave_period_ms);
        use_effect(move || {
            if let Some(mut media) = audio() {
                player.write().attach(&mut media);
            }

            let mut slot = wave_loop.borrow_mut();
            if slot.is_some() {
                return;
            }
            let mut wave = IdleWave::new(amplitude, period_ms);
            wave.start();
            let frame_loop = FrameLoop::new(move |now| {
                if let Some(element) = browser::html_element(PLAYER_ID) {
                    let transform = format!("translateY({:.2}px)", wave.offset(now));
                    element.style().set_property("transform", &transform).ok();
                }
            });
            frame_loop.start();
            *slot = Some(frame_loop);
        });
    }

    // 卸载时释放帧循环，Drop 会取消已登记的帧
    use_drop(move || {
        wave_loop.borrow_mut().take();
    });

    let toggle = move |_: MouseEvent| {
        let Some(mut media) = audio() else {
            return;
        };
        let ticket = player.write().toggle_play(&mut media);
        let (Some(ticket), Some(request)) = (ticket, media.take_play_request()) else {
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            let result = browser::settle_play_request(request).await;
            player.write().settle_play(ticket, result);
        });
    };

    let media_event = move |event: fn(&AudioMedia) -> MediaEvent| {
        move |_: Event<MediaData>| {
            if let Some(media) = audio() {
                player.write().on_media_event(event(&media));
            }
        }
    };

    let state = player.read().state();
    let title = player.read().title().to_string();
    let source = player.read().source().to_string();
    let looping = player.read().looping();
    let progress = player.read().progress() * 100.0;

    rsx! {
        div { id: PLAYER_ID, class: "floating-player",
            audio {
                id: AUDIO_ID,
                src: source,
                preload: "metadata",
                r#loop: looping,
                onplay: media_event(|_| MediaEvent::Play),
                onpause: media_event(|_| MediaEvent::Pause),
                onended: media_event(|_| MediaEvent::Ended),
                ontimeupdate: media_event(|media| MediaEvent::TimeUpdate(media.current_time())),
                onloadedmetadata: media_event(|media| MediaEvent::MetadataLoaded(media.duration())),
            }
            button {
                class: if state.is_playing { "player-toggle playing" } else { "player-toggle" },
                "aria-label": if state.is_playing { "Pause" } else { "Play" },
                onclick: toggle,
                if state.is_playing { "❚❚" } else { "▶" }
            }
            div { class: "player-body",
                p { class: "player-title", "{title}" }
                div { class: "player-progress",
                    div { class: "player-progress-fill", style: "width: {progress:.1}%" }
                }
                input {
                    class: "player-seek",
                    r#type: "range",
                    min: "0",
                    max: "{state.duration}",
                    step: "0.1",
                    value: "{state.current_time}",
                    oninput: move |evt: FormEvent| {
                        let Ok(seconds) = evt.value().parse::<f64>() else {
                            return;
                        };
                        if let Some(mut media) = audio() {
                            player.write().seek(&mut media, seconds);
                        }
                    },
                }
                span { class: "player-time",
                    "{format_time(state.current_time)} / {format_time(state.duration)}"
                }
            }
            input {
                class: "player-volume",
                r#type: "range",
                min: "0",
                max: "1",
                step: "0.01",
                value: "{state.volume}",
                oninput: move |evt: FormEvent| {
                    let Ok(volume) = evt.value().parse::<f64>() else {
                        return;
                    };
                    if let Some(mut media) = audio() {
                        player.write().set_volume(&mut media, volume);
                    }
                },
            }
        }
    }
}
