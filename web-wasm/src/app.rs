//! メインアプリケーションコンポーネント
//!
//! ページはサーバー側のURLごとに1つ。クライアントルーターは持たず、
//! `location.pathname` から表示するページを決める。

use crate::components::{
    detail::DetailPage,
    header::Header,
    results::ResultsPage,
    toast::ToastView,
    upload_area::UploadPage,
};
use crate::host::BrowserHost;
use gait_ai_common::route::{RESULTS_PAGE, UPLOAD_PAGE};
use gait_ai_common::Toaster;
use leptos::prelude::*;

/// 表示するページ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Upload,
    Results,
    /// 解析IDの取り出しは詳細コントローラーが行う（失敗時はエラー表示）
    Detail,
}

impl Page {
    pub fn from_path(path: &str) -> Self {
        if path.starts_with(RESULTS_PAGE) {
            Page::Results
        } else if path.starts_with(UPLOAD_PAGE) {
            Page::Upload
        } else {
            Page::Detail
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let toaster = RwSignal::new(Toaster::new());
    let host = BrowserHost::new(toaster);

    let path = gloo::utils::window().location().pathname().unwrap_or_default();
    let page = Page::from_path(&path);
    tracing::debug!("page {:?} for {}", page, path);

    view! {
        <div class="container">
            <Header />

            {match page {
                Page::Upload => view! { <UploadPage host=host /> }.into_any(),
                Page::Results => view! { <ResultsPage /> }.into_any(),
                Page::Detail => view! { <DetailPage host=host path=path /> }.into_any(),
            }}

            <ToastView toaster=toaster />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/upload/"), Page::Upload);
        assert_eq!(Page::from_path("/analysis/results/"), Page::Results);
        assert_eq!(Page::from_path("/analysis/42/"), Page::Detail);
        assert_eq!(Page::from_path("/"), Page::Detail);
    }
}
