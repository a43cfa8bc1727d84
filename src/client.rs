//! reqwest による Transport 実装
//!
//! パスはサーバーURLを基準に解決する（メディアの絶対URLはそのまま）。
//! 認証はブラウザと同じく Django のセッションクッキーで行う。

use crate::config::Config;
use crate::error::{GaitAiError, Result};
use gait_ai_common::platform::{HttpReply, SelectedFile, Transport};
use gait_ai_common::route::{ANIMAL_FIELD, VIDEO_FIELD};
use gait_ai_common::TransportError;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, REFERER};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// サーバーへのHTTPクライアント
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base: Url,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let base = parse_base_url(&config.server_url())?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie_header(config) {
            let value = HeaderValue::from_str(&cookie)
                .map_err(|e| GaitAiError::Config(format!("クッキーが不正です: {}", e)))?;
            headers.insert(COOKIE, value);
        }
        // HTTPSのDjangoはCSRF検証でRefererを要求する
        if let Ok(referer) = HeaderValue::from_str(base.as_str()) {
            headers.insert(REFERER, referer);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// サーバー相対パスまたは絶対URLを解決する
    pub fn resolve(&self, path: &str) -> std::result::Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|e| TransportError::new(format!("{}: {}", path, e)))
    }

    /// ファイルをストリーミングでディスクに保存し、書き込んだバイト数を返す
    pub async fn download_to(&self, path: &str, dest: &Path) -> Result<u64> {
        let url = self
            .resolve(path)
            .map_err(|e| GaitAiError::InvalidUrl(e.to_string()))?;
        tracing::debug!("GET {} -> {}", url, dest.display());

        let mut response = self.client.get(url).send().await?.error_for_status()?;
        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> std::result::Result<HttpReply, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(HttpReply::new(status, body))
    }
}

impl Transport for ReqwestTransport {
    type File = PathBuf;

    async fn get(&self, url: &str) -> std::result::Result<HttpReply, TransportError> {
        let url = self.resolve(url)?;
        self.send(self.client.get(url)).await
    }

    async fn delete(&self, url: &str, csrf_token: &str) -> std::result::Result<HttpReply, TransportError> {
        let url = self.resolve(url)?;
        let request = self
            .client
            .delete(url)
            .header("X-CSRFToken", csrf_token)
            .header("Content-Type", "application/json");
        self.send(request).await
    }

    async fn post_upload(
        &self,
        url: &str,
        animal: &str,
        file: &SelectedFile<PathBuf>,
    ) -> std::result::Result<HttpReply, TransportError> {
        let url = self.resolve(url)?;
        let handle = tokio::fs::File::open(&file.payload)
            .await
            .map_err(|e| TransportError::new(format!("{}: {}", file.payload.display(), e)))?;

        let part = Part::stream_with_length(handle, file.size).file_name(file.name.clone());
        let form = Form::new()
            .text(ANIMAL_FIELD, animal.to_string())
            .part(VIDEO_FIELD, part);

        self.send(self.client.post(url).multipart(form)).await
    }
}

/// サーバーURLを検証する（相対パス解決のため末尾に / を付ける）
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&normalized).map_err(|e| GaitAiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(GaitAiError::InvalidUrl(format!("{}: unsupported scheme {}", raw, other))),
    }
}

/// Cookie ヘッダーの値（sessionid と csrftoken）
pub fn cookie_header(config: &Config) -> Option<String> {
    let mut pairs = Vec::new();
    if let Some(session) = config.session_cookie.as_deref().filter(|s| !s.is_empty()) {
        pairs.push(format!("sessionid={}", session));
    }
    if let Some(token) = config.csrf_token.as_deref().filter(|s| !s.is_empty()) {
        pairs.push(format!("csrftoken={}", token));
    }

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(server: &str) -> ReqwestTransport {
        let config = Config {
            server_url: server.to_string(),
            ..Default::default()
        };
        ReqwestTransport {
            client: Client::new(),
            base: parse_base_url(&config.server_url).unwrap(),
        }
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let t = transport("http://vet.example.com:8000");
        assert_eq!(
            t.resolve("/api/analysis/42/detail/").unwrap().as_str(),
            "http://vet.example.com:8000/api/analysis/42/detail/"
        );
        assert_eq!(
            t.resolve("https://cdn.example.com/media/r.txt").unwrap().as_str(),
            "https://cdn.example.com/media/r.txt"
        );
    }

    #[test]
    fn test_resolve_keeps_server_prefix_for_relative_media() {
        let t = transport("http://vet.example.com/gait");
        assert_eq!(
            t.resolve("media/reports/r.txt").unwrap().as_str(),
            "http://vet.example.com/gait/media/reports/r.txt"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://vet.example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_cookie_header() {
        let mut config = Config::default();
        assert_eq!(cookie_header(&config), None);

        config.session_cookie = Some("abc".into());
        config.csrf_token = Some("tok".into());
        assert_eq!(cookie_header(&config).as_deref(), Some("sessionid=abc; csrftoken=tok"));

        config.session_cookie = Some(String::new());
        assert_eq!(cookie_header(&config).as_deref(), Some("csrftoken=tok"));
    }
}
