//! レポートパネル
//!
//! テキスト/グラフィック/ポーズデータの3パネルはそれぞれ独立して失敗し、
//! 失敗は自パネル内の文言に閉じる（画面全体のエラーにはならない）。

use crate::error::Error;
use crate::platform::Transport;
use crate::types::AnalysisRecord;
use serde::Serialize;

/// ポーズ推定モデル名
pub const POSE_MODEL: &str = "SuperAnimal Quadruped HRNet W32";

/// ポーズデータ形式
pub const POSE_FORMAT: &str = "HDF5 (H5)";

/// レポートの種類（タブ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Text,
    Graphic,
    Data,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Text, ReportKind::Graphic, ReportKind::Data];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Text => "text",
            ReportKind::Graphic => "graphic",
            ReportKind::Data => "data",
        }
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            ReportKind::Text => "📄 Текстовый отчет",
            ReportKind::Graphic => "📊 Графический отчет",
            ReportKind::Data => "📁 Данные поз",
        }
    }
}

/// パネルの中身
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReportPanel {
    /// 整形済みテキスト（レポート本文または案内文）
    Text(String),
    /// 画像（読み込み成否はブラウザ側で判明する）
    Image { src: String },
    /// アイコン付きプレースホルダー
    Placeholder { icon: &'static str, message: String },
}

impl ReportPanel {
    /// グラフィックレポート画像の読み込み失敗時の表示
    pub fn graphic_not_found() -> Self {
        ReportPanel::Placeholder {
            icon: "📊",
            message: "Графический отчет не найден".to_string(),
        }
    }

    pub fn graphic_unavailable() -> Self {
        ReportPanel::Placeholder {
            icon: "📊",
            message: "Графический отчет не доступен".to_string(),
        }
    }
}

/// タブの表示状態（常にちょうど1つが表示される）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportTabs {
    active: ReportKind,
}

impl ReportTabs {
    pub fn active(&self) -> ReportKind {
        self.active
    }

    pub fn switch(&mut self, kind: ReportKind) {
        self.active = kind;
    }

    pub fn is_visible(&self, kind: ReportKind) -> bool {
        self.active == kind
    }
}

/// テキストレポートを取得する
///
/// パスが無ければ通信しない。取得失敗はパネル内の文言に変換する。
pub async fn text_report_panel<T: Transport>(transport: &T, record: &AnalysisRecord) -> ReportPanel {
    let Some(path) = record.text_report_path() else {
        return ReportPanel::Text("Текстовый отчет не доступен".to_string());
    };

    match fetch_text_report(transport, path).await {
        Ok(text) => ReportPanel::Text(text),
        Err(e) => {
            tracing::warn!("text report unavailable: {}", e);
            ReportPanel::Text(e.to_string())
        }
    }
}

async fn fetch_text_report<T: Transport>(transport: &T, path: &str) -> Result<String, Error> {
    tracing::debug!("GET {}", path);
    let reply = transport.get(path).await.map_err(|e| {
        Error::SubResource(format!("Ошибка загрузки текстового отчета: {}", e))
    })?;

    if !reply.ok() {
        return Err(Error::SubResource(
            "Текстовый отчет не найден по указанному пути".to_string(),
        ));
    }
    Ok(reply.body)
}

/// グラフィックレポート（通信はブラウザの画像読み込みに任せる）
pub fn graphic_report_panel(record: &AnalysisRecord) -> ReportPanel {
    match record.graphic_report_path() {
        Some(src) => ReportPanel::Image { src: src.to_string() },
        None => ReportPanel::graphic_unavailable(),
    }
}

/// ポーズデータ（参照のみ。ファイル自体は取得しない）
pub fn pose_data_panel(record: &AnalysisRecord) -> ReportPanel {
    match record.pose_data_path() {
        Some(path) => ReportPanel::Text(format!(
            "Файл данных поз: {}\n\nМодель: {}\nФормат: {}\nСодержит координаты ключевых точек тела лошади",
            path, POSE_MODEL, POSE_FORMAT
        )),
        None => ReportPanel::Text("Данные поз (H5 файл) не доступны".to_string()),
    }
}
