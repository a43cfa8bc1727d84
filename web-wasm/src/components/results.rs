//! 解析結果一覧ページ

use crate::api::FetchTransport;
use chrono::Local;
use gait_ai_common::listing::{load_listing, ListingOutcome, ListingStats};
use gait_ai_common::route::{detail_page, UPLOAD_PAGE};
use gait_ai_common::view::{display_date, one_decimal, ProbabilityGauge, StatusBanner, UNKNOWN_ANIMAL};
use gait_ai_common::AnalysisRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ResultsPage() -> impl IntoView {
    let outcome = RwSignal::new(None::<ListingOutcome>);

    spawn_local(async move {
        outcome.set(Some(load_listing(&FetchTransport).await));
    });

    move || match outcome.get() {
        None => view! { <div class="loading">"Загрузка анализов..."</div> }.into_any(),
        Some(ListingOutcome::Empty) => view! {
            <div class="empty-state">
                <div class="empty-icon">"📭"</div>
                <p>"У вас пока нет анализов"</p>
                <a class="btn btn-primary" href=UPLOAD_PAGE>"Загрузить видео"</a>
            </div>
        }
        .into_any(),
        Some(ListingOutcome::Loaded(records)) => {
            let stats = ListingStats::from_records(&records);
            view! {
                <div class="results-page">
                    <StatsBar stats=stats />
                    <div class="results-list">
                        {records
                            .into_iter()
                            .map(|record| view! { <ResultRow record=record /> })
                            .collect_view()}
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn StatsBar(stats: ListingStats) -> impl IntoView {
    view! {
        <div class="stats-bar">
            <div class="stat-item">
                <span class="stat-value">{stats.total}</span>
                <span class="stat-label">"Всего"</span>
            </div>
            <div class="stat-item">
                <span class="stat-value">{stats.lame}</span>
                <span class="stat-label">"С хромотой"</span>
            </div>
            <div class="stat-item">
                <span class="stat-value">{stats.healthy}</span>
                <span class="stat-label">"Здоровых"</span>
            </div>
            <div class="stat-item">
                <span class="stat-value">{format!("{}%", one_decimal(stats.mean_probability))}</span>
                <span class="stat-label">"Средняя вероятность"</span>
            </div>
        </div>
    }
}

#[component]
fn ResultRow(record: AnalysisRecord) -> impl IntoView {
    let href = record.analysis_id.as_ref().map(detail_page).unwrap_or_default();
    let status = StatusBanner { is_lame: record.is_lame() };
    let probability = ProbabilityGauge::new(record.probability());
    let date = display_date(record.timestamp(), Local::now());
    let animal = record.animal_name().unwrap_or(UNKNOWN_ANIMAL).to_string();

    view! {
        <a class="result-card" href=href>
            <div class="result-animal">"🐴 " {animal}</div>
            <div class="result-date">"📅 " {date}</div>
            <div class={status.css_class()}>{status.icon()} " " {status.label()}</div>
            <div class={format!("result-probability probability-{}", probability.tier.as_str())}>
                {probability.display()}
            </div>
        </a>
    }
}
