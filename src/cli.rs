use clap::{Parser, Subcommand};
use gait_ai_common::DownloadKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gait-ai")]
#[command(about = "馬の歩様解析サービスのターミナルクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 動画をアップロードして解析を実行
    Upload {
        /// 動物ID
        #[arg(short, long, required = true)]
        animal: String,

        /// 動画ファイル
        #[arg(required = true)]
        video: PathBuf,
    },

    /// 解析結果の詳細を表示
    Show {
        /// 解析ID
        #[arg(required = true)]
        id: String,
    },

    /// 動画/レポートをダウンロード
    Download {
        /// 解析ID
        #[arg(required = true)]
        id: String,

        /// 種類 (original/annotated/text/graphic/data)
        #[arg(required = true)]
        kind: DownloadKind,

        /// 保存先フォルダ（省略時はカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 解析を削除
    Delete {
        /// 解析ID
        #[arg(required = true)]
        id: String,

        /// 確認なしで削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 解析結果の一覧
    List,

    /// 設定を表示/編集
    Config {
        /// サーバーURL
        #[arg(long)]
        server: Option<String>,

        /// CSRFトークン（csrftoken クッキー）
        #[arg(long)]
        csrf_token: Option<String>,

        /// セッションID（sessionid クッキー）
        #[arg(long)]
        session_cookie: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
