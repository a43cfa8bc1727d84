//! ダウンロード対象の解決
//!
//! 種類ごとにレコードから (URL, ファイル名) を決める。
//! URLが無ければ None（呼び出し側はエラー通知のみ行い、何もダウンロードしない）。

use crate::types::AnalysisRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// ダウンロードの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadKind {
    Original,
    Annotated,
    TextReport,
    GraphicReport,
    PoseData,
}

impl DownloadKind {
    pub const ALL: [DownloadKind; 5] = [
        DownloadKind::Original,
        DownloadKind::Annotated,
        DownloadKind::TextReport,
        DownloadKind::GraphicReport,
        DownloadKind::PoseData,
    ];

    /// レポート系か（通知文言が動画と異なる）
    pub fn is_report(&self) -> bool {
        matches!(
            self,
            DownloadKind::TextReport | DownloadKind::GraphicReport | DownloadKind::PoseData
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadKind::Original => "original",
            DownloadKind::Annotated => "annotated",
            DownloadKind::TextReport => "text",
            DownloadKind::GraphicReport => "graphic",
            DownloadKind::PoseData => "data",
        }
    }

    pub fn started_message(&self) -> &'static str {
        if self.is_report() {
            "Начинается скачивание отчета"
        } else {
            "Начинается скачивание файла"
        }
    }

    pub fn missing_message(&self) -> &'static str {
        if self.is_report() {
            "Отчет не найден"
        } else {
            "Файл не найден"
        }
    }
}

impl fmt::Display for DownloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DownloadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DownloadKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown download kind: {}", s))
    }
}

/// ダウンロード対象
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadTarget {
    pub url: String,
    pub filename: String,
}

/// 種類とレコードからダウンロード対象を決める
pub fn resolve(kind: DownloadKind, record: &AnalysisRecord) -> Option<DownloadTarget> {
    let base = record.video_filename();
    let report_base = base.unwrap_or("analysis");

    let (url, filename) = match kind {
        DownloadKind::Original => (
            record.video_path(),
            base.unwrap_or("original_video.mp4").to_string(),
        ),
        DownloadKind::Annotated => (
            record.annotated_video_path(),
            format!("{}_annotated.mp4", base.unwrap_or("video")),
        ),
        DownloadKind::TextReport => (
            record.text_report_path(),
            format!("{}_report.txt", report_base),
        ),
        DownloadKind::GraphicReport => (
            record.graphic_report_path(),
            format!("{}_graphic.png", report_base),
        ),
        DownloadKind::PoseData => (
            record.pose_data_path(),
            format!("{}_pose_data.h5", report_base),
        ),
    };

    url.map(|url| DownloadTarget {
        url: url.to_string(),
        filename,
    })
}
