use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaitAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("サーバーURLが不正です: {0}")]
    InvalidUrl(String),

    #[error("解析IDが不正です: {0}")]
    InvalidId(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Analysis(#[from] gait_ai_common::Error),

    #[error("操作に失敗しました: {0}")]
    Failed(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GaitAiError>;
