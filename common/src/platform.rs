//! プラットフォーム境界
//!
//! コントローラーはブラウザ(WASM)とCLIの両方で動くため、
//! 通信とホスト環境の操作をトレイトで受け取る。
//! どちらもシングルスレッド前提（Sendを要求しない）。

use crate::download::DownloadTarget;
use crate::error::TransportError;
use crate::notify::Notification;
use std::time::Duration;

/// HTTPレスポンス（ステータスと本文テキスト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xxかどうか
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 選択済みファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile<F> {
    pub name: String,
    pub size: u64,
    pub payload: F,
}

/// HTTP通信
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// アップロード本体（ブラウザでは File、CLIではパス）
    type File: Clone;

    async fn get(&self, url: &str) -> Result<HttpReply, TransportError>;

    /// X-CSRFToken ヘッダー付きのDELETE
    async fn delete(&self, url: &str, csrf_token: &str) -> Result<HttpReply, TransportError>;

    /// multipart POST（動物の選択値 + 動画ファイル）
    async fn post_upload(
        &self,
        url: &str,
        animal: &str,
        file: &SelectedFile<Self::File>,
    ) -> Result<HttpReply, TransportError>;
}

/// 共有内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// ネイティブ共有の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Unsupported,
    Failed(String),
}

/// ホスト環境の操作
#[allow(async_fn_in_trait)]
pub trait Host {
    /// ブロッキングのアラート
    fn alert(&self, message: &str);

    /// ブロッキングの確認ダイアログ
    fn confirm(&self, message: &str) -> bool;

    /// トースト通知（最後の呼び出しが勝つ）
    fn notify(&self, notification: Notification);

    /// フルページ遷移
    fn navigate(&self, url: &str);

    fn go_back(&self);

    fn print(&self);

    /// 同一タブでのダウンロード開始
    fn trigger_download(&self, target: &DownloadTarget);

    fn current_url(&self) -> String;

    /// ページのフォームに埋め込まれたCSRFトークン
    fn csrf_token(&self) -> String;

    async fn sleep(&self, duration: Duration);

    async fn share(&self, data: &ShareData) -> ShareOutcome;

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_reply_ok_range() {
        assert!(HttpReply::new(200, "").ok());
        assert!(HttpReply::new(204, "").ok());
        assert!(!HttpReply::new(199, "").ok());
        assert!(!HttpReply::new(301, "").ok());
        assert!(!HttpReply::new(404, "").ok());
        assert!(!HttpReply::new(500, "").ok());
    }
}
