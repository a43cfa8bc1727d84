//! ブラウザ環境の Host 実装
//!
//! ダイアログ・遷移・印刷は window を直接使い、
//! トーストは App が持つシグナルに書き込む（表示はコンポーネント側）。

use crate::share_bridge;
use gait_ai_common::download::DownloadTarget;
use gait_ai_common::notify::{Notification, Toaster, DISPLAY_DURATION, FADE_DURATION};
use gait_ai_common::platform::{Host, ShareData, ShareOutcome};
use gloo::timers::callback::Timeout;
use gloo::utils::{body, document, window};
use leptos::prelude::*;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlAnchorElement, HtmlInputElement};

/// ブラウザの Host
#[derive(Clone, Copy)]
pub struct BrowserHost {
    toaster: RwSignal<Toaster>,
}

impl BrowserHost {
    pub fn new(toaster: RwSignal<Toaster>) -> Self {
        Self { toaster }
    }
}

impl Host for BrowserHost {
    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }

    fn notify(&self, notification: Notification) {
        show_toast(self.toaster, notification);
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = window().location().set_href(url) {
            tracing::error!("navigation to {} failed: {:?}", url, e);
        }
    }

    fn go_back(&self) {
        if let Err(e) = window().history().and_then(|history| history.back()) {
            tracing::error!("history.back failed: {:?}", e);
        }
    }

    fn print(&self) {
        if let Err(e) = window().print() {
            tracing::error!("print failed: {:?}", e);
        }
    }

    fn trigger_download(&self, target: &DownloadTarget) {
        if let Err(e) = click_download_link(target) {
            tracing::error!("download of {} failed: {:?}", target.url, e);
        }
    }

    fn current_url(&self) -> String {
        window().location().href().unwrap_or_default()
    }

    fn csrf_token(&self) -> String {
        document()
            .query_selector("[name=csrfmiddlewaretoken]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    async fn sleep(&self, duration: Duration) {
        gloo::timers::future::sleep(duration).await;
    }

    async fn share(&self, data: &ShareData) -> ShareOutcome {
        share_bridge::share(data).await
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), String> {
        share_bridge::copy_text(text).await
    }
}

/// トーストを表示し、表示時間 → フェード → 消去のタイマーを仕掛ける
///
/// 後から別の通知が来た場合、古いタイマーはIDが一致せず何もしない。
pub fn show_toast(toaster: RwSignal<Toaster>, notification: Notification) {
    let mut id = 0;
    toaster.update(|t| id = t.show(notification));

    Timeout::new(DISPLAY_DURATION.as_millis() as u32, move || {
        let fading = toaster.try_update(|t| t.begin_fade(id)).unwrap_or(false);
        if fading {
            Timeout::new(FADE_DURATION.as_millis() as u32, move || {
                toaster.update(|t| {
                    t.dismiss(id);
                });
            })
            .forget();
        }
    })
    .forget();
}

/// 一時的な <a download> を作ってクリックする（同一タブ）
fn click_download_link(target: &DownloadTarget) -> Result<(), JsValue> {
    let anchor: HtmlAnchorElement = document().create_element("a")?.dyn_into()?;
    anchor.set_href(&target.url);
    anchor.set_download(&target.filename);

    body().append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    Ok(())
}
