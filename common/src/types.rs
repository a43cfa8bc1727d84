//! サーバーAPIのペイロード型定義
//!
//! - AnalysisRecord: 解析1件分のレコード（詳細/一覧で共通）
//! - DetailResponse / DeleteResponse / ListResponse / UploadResponse: 各APIのエンベロープ
//!
//! サーバーは任意のフィールドを省略・null・空文字で返すことがあるため、
//! 全フィールドを Option で受け、表示前に view モジュールで正規化する。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 数値または文字列で届くID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Number(n) => write!(f, "{}", n),
            IdValue::Text(s) => f.write_str(s),
        }
    }
}

/// 解析レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRecord {
    pub analysis_id: Option<IdValue>,
    pub video_id: Option<IdValue>,
    pub animal_name: Option<String>,
    pub created_at: Option<String>,
    pub analysis_date: Option<String>,
    pub video_filename: Option<String>,
    pub is_lame: Option<bool>,
    pub lameness_probability: Option<f64>,
    pub lameness_confidence: Option<f64>,
    pub confidence_score: Option<f64>,
    pub diagnosis: Option<String>,
    pub video_path: Option<String>,
    pub annotated_video_path: Option<String>,
    pub text_report_path: Option<String>,
    pub graphic_report_path: Option<String>,
    pub pose_data_path: Option<String>,
}

/// 空文字を未設定として扱う
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// 0 と NaN を未設定として扱う
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

impl AnalysisRecord {
    pub fn animal_name(&self) -> Option<&str> {
        non_empty(&self.animal_name)
    }

    pub fn video_filename(&self) -> Option<&str> {
        non_empty(&self.video_filename)
    }

    pub fn video_path(&self) -> Option<&str> {
        non_empty(&self.video_path)
    }

    pub fn annotated_video_path(&self) -> Option<&str> {
        non_empty(&self.annotated_video_path)
    }

    pub fn text_report_path(&self) -> Option<&str> {
        non_empty(&self.text_report_path)
    }

    pub fn graphic_report_path(&self) -> Option<&str> {
        non_empty(&self.graphic_report_path)
    }

    pub fn pose_data_path(&self) -> Option<&str> {
        non_empty(&self.pose_data_path)
    }

    pub fn diagnosis(&self) -> Option<&str> {
        non_empty(&self.diagnosis)
    }

    /// 作成日時（詳細APIは created_at、一覧APIは analysis_date を返す）
    pub fn timestamp(&self) -> Option<&str> {
        non_empty(&self.created_at).or_else(|| non_empty(&self.analysis_date))
    }

    pub fn is_lame(&self) -> bool {
        self.is_lame.unwrap_or(false)
    }

    /// 跛行確率（%）
    pub fn probability(&self) -> f64 {
        non_zero(self.lameness_probability).unwrap_or(0.0)
    }

    /// 信頼度（%）。lameness_confidence が無ければ confidence_score
    pub fn confidence(&self) -> f64 {
        non_zero(self.lameness_confidence)
            .or_else(|| non_zero(self.confidence_score))
            .unwrap_or(0.0)
    }
}

/// GET /api/analysis/{id}/detail/
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetailResponse {
    pub success: bool,
    pub analysis: Option<AnalysisRecord>,
    pub error: Option<String>,
}

/// DELETE /api/analysis/{id}/delete/
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// GET /api/analysis/user/
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListResponse {
    pub success: bool,
    pub analyses: Vec<AnalysisRecord>,
    pub error: Option<String>,
}

/// POST /api/upload/simple/
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub success: bool,
    pub video_id: Option<IdValue>,
    pub analysis_id: Option<IdValue>,
    pub animal_name: Option<String>,
    pub diagnosis: Option<String>,
    pub is_lame: Option<bool>,
    pub error: Option<String>,
}

impl DetailResponse {
    pub fn error_message(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}

impl DeleteResponse {
    pub fn error_message(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}

impl UploadResponse {
    pub fn error_message(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}
