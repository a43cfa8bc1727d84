//! URLとエンドポイント
//!
//! ページ遷移はすべてフルページ遷移（クライアントルーティングなし）。
//! 詳細ページと完了済みアップロードの唯一の接点は URL 内の解析ID。

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;

/// 結果一覧ページ
pub const RESULTS_PAGE: &str = "/analysis/results/";

/// アップロードページ
pub const UPLOAD_PAGE: &str = "/upload/";

/// ユーザーの解析一覧API
pub const USER_ANALYSES_ENDPOINT: &str = "/api/analysis/user/";

/// 動画アップロードAPI
pub const UPLOAD_ENDPOINT: &str = "/api/upload/simple/";

/// アップロードフォームのフィールド名
pub const ANIMAL_FIELD: &str = "animal_id";
pub const VIDEO_FIELD: &str = "video_file";

/// 解析ID（URLパスの数字部分）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalysisId(String);

impl AnalysisId {
    /// 数字のみからなる文字列ならIDとして受け付ける
    pub fn parse(value: &str) -> Option<Self> {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ロケーションのパスから解析IDを取り出す
///
/// `/analysis/{数字}/` にマッチする最初の部分を使う（前後に何があってもよい）。
///
/// # Examples
/// ```
/// use gait_ai_common::route::extract_identifier;
///
/// let id = extract_identifier("/analysis/42/").unwrap();
/// assert_eq!(id.as_str(), "42");
/// assert!(extract_identifier("/analysis/results/").is_err());
/// ```
pub fn extract_identifier(location_path: &str) -> Result<AnalysisId> {
    lazy_static::lazy_static! {
        static ref ANALYSIS_PATH_RE: Regex = Regex::new(r"/analysis/(\d+)/").unwrap();
    }

    ANALYSIS_PATH_RE
        .captures(location_path)
        .and_then(|caps| caps.get(1))
        .map(|m| AnalysisId(m.as_str().to_string()))
        .ok_or(Error::IdentifierNotFound)
}

/// 詳細取得API
pub fn detail_endpoint(id: &AnalysisId) -> String {
    format!("/api/analysis/{}/detail/", id)
}

/// 削除API
pub fn delete_endpoint(id: &AnalysisId) -> String {
    format!("/api/analysis/{}/delete/", id)
}

/// 詳細ページ
pub fn detail_page(id: impl fmt::Display) -> String {
    format!("/analysis/{}/", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_identifier_basic() {
        let id = extract_identifier("/analysis/123/").unwrap();
        assert_eq!(id.as_str(), "123");
    }

    #[test]
    fn test_extract_identifier_with_prefix_and_suffix() {
        let id = extract_identifier("/ru/analysis/7/print/").unwrap();
        assert_eq!(id.as_str(), "7");
    }

    #[test]
    fn test_extract_identifier_requires_trailing_slash() {
        assert!(matches!(
            extract_identifier("/analysis/123"),
            Err(Error::IdentifierNotFound)
        ));
    }

    #[test]
    fn test_extract_identifier_rejects_non_numeric() {
        assert!(extract_identifier("/analysis/results/").is_err());
        assert!(extract_identifier("/analysis/12a/").is_err());
        assert!(extract_identifier("/").is_err());
    }

    #[test]
    fn test_endpoints() {
        let id = AnalysisId::parse("55").unwrap();
        assert_eq!(detail_endpoint(&id), "/api/analysis/55/detail/");
        assert_eq!(delete_endpoint(&id), "/api/analysis/55/delete/");
        assert_eq!(detail_page(&id), "/analysis/55/");
        assert_eq!(detail_page(9), "/analysis/9/");
    }

    #[test]
    fn test_analysis_id_parse() {
        assert!(AnalysisId::parse("0012").is_some());
        assert!(AnalysisId::parse("").is_none());
        assert!(AnalysisId::parse("-1").is_none());
    }
}
