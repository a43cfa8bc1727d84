//! Gait AI Common Library
//!
//! CLIとWeb(WASM)で共有される型とコントローラー:
//! - 解析詳細: 取得 → 正規化 → 5領域の描画 → レポート3種の読み込み → 操作
//! - アップロード: ファイル検証 → 送信 → 段階的な進捗 → 結果表示 → 一覧へ遷移

pub mod types;
pub mod error;
pub mod route;
pub mod view;
pub mod reports;
pub mod download;
pub mod notify;
pub mod platform;
pub mod detail;
pub mod upload;
pub mod listing;

#[cfg(test)]
mod mock;

pub use types::{AnalysisRecord, IdValue};
pub use error::{Error, Result, TransportError, ValidationError};
pub use route::{extract_identifier, AnalysisId};
pub use view::{AnalysisView, Tier, VideoPanel};
pub use reports::{ReportKind, ReportPanel, ReportTabs};
pub use download::{DownloadKind, DownloadTarget};
pub use notify::{Notification, NotificationKind, Toaster};
pub use platform::{Host, HttpReply, SelectedFile, ShareData, ShareOutcome, Transport};
pub use detail::{AnalysisDetailController, DetailAction, DetailView};
pub use upload::{UploadController, UploadStage, UploadSummary, UploadView, FileSummary};
pub use listing::{load_listing, ListingOutcome, ListingStats};
