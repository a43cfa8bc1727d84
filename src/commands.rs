//! サブコマンドの実装
//!
//! いずれも common のコントローラーを ReqwestTransport + TerminalHost で動かす。
//! コントローラーは失敗を通知/表示で返すため、終了コードはホストとビューの記録から決める。

use crate::client::ReqwestTransport;
use crate::config::Config;
use crate::error::{GaitAiError, Result};
use crate::terminal::{TerminalDetailView, TerminalHost, TerminalUploadView};
use chrono::Local;
use gait_ai_common::detail::AnalysisDetailController;
use gait_ai_common::listing::{load_listing, ListingOutcome, ListingStats};
use gait_ai_common::platform::SelectedFile;
use gait_ai_common::route::detail_page;
use gait_ai_common::upload::UploadController;
use gait_ai_common::view::{display_date, one_decimal, ProbabilityGauge, StatusBanner, UNKNOWN_ANIMAL};
use gait_ai_common::{AnalysisId, DownloadKind};
use std::path::{Path, PathBuf};

type TerminalDetail = AnalysisDetailController<ReqwestTransport, TerminalHost, TerminalDetailView>;

fn parse_id(raw: &str) -> Result<AnalysisId> {
    AnalysisId::parse(raw.trim()).ok_or_else(|| GaitAiError::InvalidId(raw.to_string()))
}

fn detail_controller(
    transport: ReqwestTransport,
    config: &Config,
    id: &AnalysisId,
    assume_yes: bool,
) -> TerminalDetail {
    let host = TerminalHost::new(transport.base_url().clone(), config.csrf_token.clone(), assume_yes)
        .with_page(&detail_page(id));
    AnalysisDetailController::new(transport, host, TerminalDetailView::default())
}

/// アップロード
pub async fn upload(config: &Config, animal: &str, video: &Path) -> Result<()> {
    let metadata = std::fs::metadata(video)
        .map_err(|_| GaitAiError::FileNotFound(video.display().to_string()))?;
    let name = video
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| video.display().to_string());

    let transport = ReqwestTransport::new(config)?;
    let host = TerminalHost::new(transport.base_url().clone(), config.csrf_token.clone(), true);
    let controller = UploadController::new(transport, host, TerminalUploadView::default());

    controller.set_animal(animal);
    let accepted = controller.handle_file(SelectedFile {
        name,
        size: metadata.len(),
        payload: video.to_path_buf(),
    });
    if !accepted {
        return Err(GaitAiError::Failed(video.display().to_string()));
    }

    controller.submit().await;

    match controller.result() {
        Some(summary) => {
            println!("\n✅ 解析ID: {}", summary.analysis_id);
            Ok(())
        }
        None => Err(GaitAiError::Failed("アップロード".into())),
    }
}

/// 詳細表示
pub async fn show(config: &Config, raw_id: &str) -> Result<()> {
    let id = parse_id(raw_id)?;
    let controller = detail_controller(ReqwestTransport::new(config)?, config, &id, false);

    controller.mount(&detail_page(&id)).await;

    match controller.view().fatal() {
        Some(message) => Err(GaitAiError::Failed(message)),
        None => Ok(()),
    }
}

/// ダウンロード（キューに積まれた対象を保存する）
pub async fn download(config: &Config, raw_id: &str, kind: DownloadKind, output: Option<PathBuf>) -> Result<()> {
    let id = parse_id(raw_id)?;
    let transport = ReqwestTransport::new(config)?;
    let controller = detail_controller(transport.clone(), config, &id, false);

    controller.load_record(&id).await?;
    controller.download(kind);

    let targets = controller.host().take_downloads();
    if targets.is_empty() {
        let message = controller
            .host()
            .last_error()
            .unwrap_or_else(|| kind.missing_message().to_string());
        return Err(GaitAiError::Failed(message));
    }

    let dir = output.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;

    for target in targets {
        let dest = dir.join(safe_file_name(&target.filename));
        let bytes = transport.download_to(&target.url, &dest).await?;
        println!("✔ 保存: {} ({} bytes)", dest.display(), bytes);
    }
    Ok(())
}

/// サーバー由来のファイル名からディレクトリ部分を除く
pub fn safe_file_name(filename: &str) -> String {
    Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "download".to_string())
}

/// 削除
pub async fn delete(config: &Config, raw_id: &str, assume_yes: bool) -> Result<()> {
    let id = parse_id(raw_id)?;
    let controller = detail_controller(ReqwestTransport::new(config)?, config, &id, assume_yes);

    controller.load_record(&id).await?;
    controller.delete_record().await;

    if let Some(message) = controller.host().last_error() {
        return Err(GaitAiError::Failed(message));
    }
    if controller.host().navigations().is_empty() {
        println!("キャンセルしました");
    }
    Ok(())
}

/// 一覧
pub async fn list(config: &Config) -> Result<()> {
    let transport = ReqwestTransport::new(config)?;

    match load_listing(&transport).await {
        ListingOutcome::Empty => println!("解析結果がありません"),
        ListingOutcome::Loaded(records) => {
            let stats = ListingStats::from_records(&records);
            println!(
                "Всего: {}  С хромотой: {}  Здоровых: {}  Средняя вероятность: {}%\n",
                stats.total,
                stats.lame,
                stats.healthy,
                one_decimal(stats.mean_probability)
            );

            let now = Local::now();
            for record in &records {
                let id = record
                    .analysis_id
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".into());
                let status = StatusBanner { is_lame: record.is_lame() };
                println!(
                    "{:>6}  {}  {:<20}  {} {:>6}",
                    id,
                    display_date(record.timestamp(), now),
                    record.animal_name().unwrap_or(UNKNOWN_ANIMAL),
                    status.icon(),
                    ProbabilityGauge::new(record.probability()).display(),
                );
            }
        }
    }
    Ok(())
}
