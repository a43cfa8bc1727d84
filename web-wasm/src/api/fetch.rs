//! fetch API による Transport 実装
//!
//! 同一オリジンの相対URLに対して送信し、Cookie（Djangoセッション）を付ける。
//! 本文は常にテキストで受け取り、JSONとしての解釈はコントローラー側で行う。

use gait_ai_common::platform::{HttpReply, SelectedFile, Transport};
use gait_ai_common::route::{ANIMAL_FIELD, VIDEO_FIELD};
use gait_ai_common::TransportError;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestCredentials, RequestInit, RequestMode, Response};

/// ブラウザの fetch で通信する
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    type File = web_sys::File;

    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        let opts = request_init("GET");
        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        send(request).await
    }

    async fn delete(&self, url: &str, csrf_token: &str) -> Result<HttpReply, TransportError> {
        let opts = request_init("DELETE");
        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        let headers = request.headers();
        headers.set("X-CSRFToken", csrf_token).map_err(js_error)?;
        headers.set("Content-Type", "application/json").map_err(js_error)?;
        send(request).await
    }

    async fn post_upload(
        &self,
        url: &str,
        animal: &str,
        file: &SelectedFile<web_sys::File>,
    ) -> Result<HttpReply, TransportError> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_str(ANIMAL_FIELD, animal).map_err(js_error)?;
        form.append_with_blob_and_filename(VIDEO_FIELD, &file.payload, &file.name)
            .map_err(js_error)?;

        let opts = request_init("POST");
        opts.set_body(form.as_ref());
        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        send(request).await
    }
}

fn request_init(method: &str) -> RequestInit {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_credentials(RequestCredentials::SameOrigin);
    opts
}

async fn send(request: Request) -> Result<HttpReply, TransportError> {
    let window = web_sys::window().ok_or_else(|| TransportError::new("window unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    Ok(HttpReply::new(resp.status(), text.as_string().unwrap_or_default()))
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::new(js_message(&value))
}

/// JSの例外を文字列に（Error なら message のみ）
pub fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_js_error_uses_message() {
        let error = js_sys::Error::new("Failed to fetch");
        assert_eq!(js_message(&error.into()), "Failed to fetch");
    }

    #[wasm_bindgen_test]
    fn test_js_string_is_kept() {
        assert_eq!(js_message(&JsValue::from_str("aborted")), "aborted");
    }
}
