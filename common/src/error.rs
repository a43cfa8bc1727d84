//! エラー型定義
//!
//! 画面に出すエラーの分類:
//! - 致命的（画面全体を置き換える）: `IdentifierNotFound`, `Load`, `MalformedResponse`
//! - 局所的（パネル内に表示）: `SubResource`
//! - 送信前検証（アラート）: `Validation`
//! - 操作失敗（トースト/アラート）: `Action`

use thiserror::Error;

/// 送信前検証エラー
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("❌ Пожалуйста, выберите животное")]
    MissingAnimal,

    #[error("❌ Пожалуйста, выберите видеофайл")]
    MissingFile,

    #[error("⚠️ Файл слишком большой! Максимальный размер: 500MB")]
    FileTooLarge,
}

/// 通信層のエラー（fetch失敗など、HTTPステータス以前の失敗）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("ID анализа не найден в URL")]
    IdentifierNotFound,

    #[error("{0}")]
    Load(String),

    #[error("{0}")]
    SubResource(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Сервер вернул некорректный ответ")]
    MalformedResponse,

    #[error("{0}")]
    Action(String),
}

impl Error {
    /// 画面全体をエラー表示に置き換えるべきか
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::IdentifierNotFound | Error::Load(_) | Error::MalformedResponse
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
