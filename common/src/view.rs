//! 解析詳細の表示モデル
//!
//! AnalysisRecord を一度だけ正規化し、全フィールドが埋まった AnalysisView を作る。
//! 各領域は独立して既定値/プレースホルダーに落ちるため、
//! どのフィールドが欠けても他の領域の描画は止まらない。

use crate::types::AnalysisRecord;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

/// 不明な動物名
pub const UNKNOWN_ANIMAL: &str = "Неизвестно";

/// 無題の動画
pub const UNTITLED_VIDEO: &str = "Без названия";

/// 3段階評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    /// 跛行確率の評価（70超: high, 30超: medium）
    pub fn for_probability(value: f64) -> Self {
        if value > 70.0 {
            Tier::High
        } else if value > 30.0 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    /// 信頼度の評価（70超: high, 40超: medium）
    pub fn for_confidence(value: f64) -> Self {
        if value > 70.0 {
            Tier::High
        } else if value > 40.0 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
        }
    }
}

/// ヘッダーのメタ情報
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderMeta {
    pub animal_name: String,
    pub date: String,
    pub video_filename: String,
}

/// 診断ステータス（跛行/健康の2値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBanner {
    pub is_lame: bool,
}

impl StatusBanner {
    pub fn icon(&self) -> &'static str {
        if self.is_lame { "⚠️" } else { "✅" }
    }

    pub fn label(&self) -> &'static str {
        if self.is_lame {
            "Обнаружена хромота"
        } else {
            "Здоровая походка"
        }
    }

    pub fn css_class(&self) -> &'static str {
        if self.is_lame {
            "analysis-status status-lame"
        } else {
            "analysis-status status-healthy"
        }
    }
}

/// 小数1桁の文字列にする（ちょうど半分はゼロから遠い側へ丸める）
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// 跛行確率ゲージ
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityGauge {
    pub value: f64,
    pub tier: Tier,
}

impl ProbabilityGauge {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            tier: Tier::for_probability(value),
        }
    }

    /// 小数1桁の表示値（例: "85.3%"）
    pub fn display(&self) -> String {
        format!("{}%", one_decimal(self.value))
    }

    /// バー幅（0〜100）
    pub fn bar_width(&self) -> f64 {
        self.value.clamp(0.0, 100.0)
    }

    pub fn description(&self) -> &'static str {
        match self.tier {
            Tier::High => "Высокая вероятность хромоты",
            Tier::Medium => "Средняя вероятность хромоты",
            Tier::Low => "Низкая вероятность хромоты",
        }
    }
}

/// 信頼度ゲージ
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceGauge {
    pub value: f64,
    pub tier: Tier,
}

impl ConfidenceGauge {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            tier: Tier::for_confidence(value),
        }
    }

    pub fn display(&self) -> String {
        format!("{}%", one_decimal(self.value))
    }

    /// インジケーター（ドット）のCSSクラス
    pub fn dot_class(&self) -> String {
        format!("confidence-dot confidence-{}", self.tier.as_str())
    }

    pub fn description(&self) -> &'static str {
        match self.tier {
            Tier::High => "Высокая уверенность",
            Tier::Medium => "Средняя уверенность",
            Tier::Low => "Низкая уверенность",
        }
    }
}

/// 動画パネル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VideoPanel {
    Player {
        src: String,
    },
    Missing {
        icon: &'static str,
        message: &'static str,
        note: Option<&'static str>,
    },
}

impl VideoPanel {
    fn original(path: Option<&str>) -> Self {
        match path {
            Some(src) => VideoPanel::Player { src: src.to_string() },
            None => VideoPanel::Missing {
                icon: "🎥",
                message: "Оригинальное видео не найдено",
                note: None,
            },
        }
    }

    /// 注釈付き動画。未生成の場合は「MLが生成しなかった」ことを明示する
    fn annotated(path: Option<&str>) -> Self {
        match path {
            Some(src) => VideoPanel::Player { src: src.to_string() },
            None => VideoPanel::Missing {
                icon: "🎯",
                message: "Размеченное видео не найдено",
                note: Some("ML модель не сгенерировала видео с разметкой"),
            },
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, VideoPanel::Missing { .. })
    }
}

/// 正規化済みの表示モデル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub header: HeaderMeta,
    pub status: StatusBanner,
    pub probability: ProbabilityGauge,
    pub confidence: ConfidenceGauge,
    pub original_video: VideoPanel,
    pub annotated_video: VideoPanel,
    /// 元動画の形式ラベル（動画が無ければ "-"）
    pub original_format: &'static str,
}

impl AnalysisView {
    /// レコードを正規化する（ネットワークアクセスなし）
    ///
    /// # Arguments
    /// * `record` - サーバーから取得したレコード
    /// * `now` - 日時が無い場合に使う現在時刻
    pub fn from_record(record: &AnalysisRecord, now: DateTime<Local>) -> Self {
        Self {
            header: HeaderMeta {
                animal_name: record.animal_name().unwrap_or(UNKNOWN_ANIMAL).to_string(),
                date: display_date(record.timestamp(), now),
                video_filename: record.video_filename().unwrap_or(UNTITLED_VIDEO).to_string(),
            },
            status: StatusBanner {
                is_lame: record.is_lame(),
            },
            probability: ProbabilityGauge::new(record.probability()),
            confidence: ConfidenceGauge::new(record.confidence()),
            original_video: VideoPanel::original(record.video_path()),
            annotated_video: VideoPanel::annotated(record.annotated_video_path()),
            original_format: if record.video_path().is_some() { "MP4" } else { "-" },
        }
    }
}

/// サーバーの日時文字列をローカル時刻として解釈する
///
/// 対応形式: RFC 3339 / タイムゾーン無しISO日時（ローカル扱い）/ 日付のみ
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// 表示用の日付（dd.mm.yyyy）
///
/// 日時が無ければ現在日、解釈できなければ元の文字列をそのまま返す。
pub fn display_date(raw: Option<&str>, now: DateTime<Local>) -> String {
    match raw {
        None => now.format("%d.%m.%Y").to_string(),
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%d.%m.%Y").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    // =============================================
    // 評価の境界値
    // =============================================

    #[test]
    fn test_probability_tiers() {
        assert_eq!(Tier::for_probability(71.0), Tier::High);
        assert_eq!(Tier::for_probability(70.0), Tier::Medium);
        assert_eq!(Tier::for_probability(31.0), Tier::Medium);
        assert_eq!(Tier::for_probability(30.0), Tier::Low);
        assert_eq!(Tier::for_probability(29.0), Tier::Low);
        assert_eq!(Tier::for_probability(0.0), Tier::Low);
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(Tier::for_confidence(71.0), Tier::High);
        assert_eq!(Tier::for_confidence(70.0), Tier::Medium);
        assert_eq!(Tier::for_confidence(45.0), Tier::Medium);
        assert_eq!(Tier::for_confidence(40.0), Tier::Low);
        assert_eq!(Tier::for_confidence(39.0), Tier::Low);
    }

    #[test]
    fn test_probability_gauge_formatting() {
        let gauge = ProbabilityGauge::new(85.34);
        assert_eq!(gauge.display(), "85.3%");
        assert_eq!(gauge.bar_width(), 85.34);
        assert_eq!(gauge.description(), "Высокая вероятность хромоты");

        let gauge = ProbabilityGauge::new(0.0);
        assert_eq!(gauge.display(), "0.0%");
        assert_eq!(gauge.description(), "Низкая вероятность хромоты");
    }

    #[test]
    fn test_probability_bar_is_clamped() {
        assert_eq!(ProbabilityGauge::new(130.0).bar_width(), 100.0);
        assert_eq!(ProbabilityGauge::new(-5.0).bar_width(), 0.0);
    }

    #[test]
    fn test_confidence_gauge_dot_and_description_agree() {
        let gauge = ConfidenceGauge::new(45.0);
        assert_eq!(gauge.dot_class(), "confidence-dot confidence-medium");
        assert_eq!(gauge.description(), "Средняя уверенность");

        let gauge = ConfidenceGauge::new(39.0);
        assert_eq!(gauge.dot_class(), "confidence-dot confidence-low");
        assert_eq!(gauge.description(), "Низкая уверенность");

        let gauge = ConfidenceGauge::new(92.0);
        assert_eq!(gauge.display(), "92.0%");
        assert_eq!(gauge.dot_class(), "confidence-dot confidence-high");
    }

    #[test]
    fn test_status_banner() {
        let lame = StatusBanner { is_lame: true };
        assert_eq!(lame.icon(), "⚠️");
        assert_eq!(lame.label(), "Обнаружена хромота");
        assert!(lame.css_class().contains("status-lame"));

        let healthy = StatusBanner { is_lame: false };
        assert_eq!(healthy.icon(), "✅");
        assert!(healthy.css_class().contains("status-healthy"));
    }

    // =============================================
    // 部分欠損の正規化
    // =============================================

    #[test]
    fn test_empty_record_renders_every_placeholder() {
        let view = AnalysisView::from_record(&AnalysisRecord::default(), fixed_now());

        assert_eq!(view.header.animal_name, UNKNOWN_ANIMAL);
        assert_eq!(view.header.video_filename, UNTITLED_VIDEO);
        assert_eq!(view.header.date, "01.06.2025");
        assert!(!view.status.is_lame);
        assert_eq!(view.probability.display(), "0.0%");
        assert_eq!(view.confidence.display(), "0.0%");
        assert!(view.original_video.is_missing());
        assert!(view.annotated_video.is_missing());
    }

    #[test]
    fn test_only_video_path_keeps_other_regions() {
        let record = AnalysisRecord {
            video_path: Some("/media/v.mp4".into()),
            is_lame: Some(true),
            lameness_probability: Some(88.0),
            ..Default::default()
        };
        let view = AnalysisView::from_record(&record, fixed_now());

        assert_eq!(
            view.original_video,
            VideoPanel::Player { src: "/media/v.mp4".into() }
        );
        match &view.annotated_video {
            VideoPanel::Missing { note, .. } => {
                assert_eq!(*note, Some("ML модель не сгенерировала видео с разметкой"));
            }
            other => panic!("unexpected panel: {:?}", other),
        }
        assert!(view.status.is_lame);
        assert_eq!(view.probability.tier, Tier::High);
        assert_eq!(view.original_format, "MP4");
    }

    #[test]
    fn test_format_label_absent_without_video() {
        let view = AnalysisView::from_record(&AnalysisRecord::default(), fixed_now());
        assert_eq!(view.original_format, "-");
    }

    #[test]
    fn test_gauges_round_half_up() {
        assert_eq!(ProbabilityGauge::new(3.25).display(), "3.3%");
        assert_eq!(ProbabilityGauge::new(85.25).display(), "85.3%");
        assert_eq!(ProbabilityGauge::new(12.25).display(), "12.3%");
        assert_eq!(ConfidenceGauge::new(70.25).display(), "70.3%");
        assert_eq!(ConfidenceGauge::new(40.25).display(), "40.3%");
        assert_eq!(one_decimal(85.34), "85.3");
        assert_eq!(one_decimal(0.0), "0.0");
    }

    #[test]
    fn test_original_placeholder_has_no_generation_note() {
        let view = AnalysisView::from_record(&AnalysisRecord::default(), fixed_now());
        match view.original_video {
            VideoPanel::Missing { icon, message, note } => {
                assert_eq!(icon, "🎥");
                assert_eq!(message, "Оригинальное видео не найдено");
                assert!(note.is_none());
            }
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    // =============================================
    // 日付
    // =============================================

    #[test]
    fn test_display_date_formats() {
        let now = fixed_now();
        assert_eq!(display_date(Some("2025-03-14T12:00:00+00:00"), now), "14.03.2025");
        assert_eq!(display_date(Some("2025-03-14T12:00:00.123456"), now), "14.03.2025");
        assert_eq!(display_date(Some("2025-03-14 08:30:00"), now), "14.03.2025");
        assert_eq!(display_date(Some("2025-03-14"), now), "14.03.2025");
    }

    #[test]
    fn test_display_date_fallbacks() {
        let now = fixed_now();
        assert_eq!(display_date(None, now), "01.06.2025");
        assert_eq!(display_date(Some("вчера"), now), "вчера");
    }
}
