//! Web Share API / Clipboard API via JS bridge

use crate::api::js_message;
use gait_ai_common::platform::{ShareData, ShareOutcome};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/share-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = "canShare")]
    fn can_share_js() -> bool;

    #[wasm_bindgen(js_name = "shareLink", catch)]
    async fn share_link_js(data: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "copyText", catch)]
    async fn copy_text_js(text: &str) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
struct SharePayload<'a> {
    title: &'a str,
    text: &'a str,
    url: &'a str,
}

pub async fn share(data: &ShareData) -> ShareOutcome {
    if !can_share_js() {
        return ShareOutcome::Unsupported;
    }

    let payload = SharePayload {
        title: &data.title,
        text: &data.text,
        url: &data.url,
    };
    let value = match serde_wasm_bindgen::to_value(&payload) {
        Ok(value) => value,
        Err(e) => return ShareOutcome::Failed(e.to_string()),
    };

    match share_link_js(value).await {
        Ok(_) => ShareOutcome::Shared,
        Err(e) => ShareOutcome::Failed(js_message(&e)),
    }
}

pub async fn copy_text(text: &str) -> Result<(), String> {
    copy_text_js(text)
        .await
        .map(|_| ())
        .map_err(|e| js_message(&e))
}
