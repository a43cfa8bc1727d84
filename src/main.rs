use clap::Parser;
use gait_ai::{cli, commands, config, error};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Upload { animal, video } => {
            println!("🐴 gait-ai - 動画アップロード\n");
            commands::upload(&config, &animal, &video).await?;
        }

        Commands::Show { id } => {
            commands::show(&config, &id).await?;
        }

        Commands::Download { id, kind, output } => {
            commands::download(&config, &id, kind, output).await?;
        }

        Commands::Delete { id, yes } => {
            commands::delete(&config, &id, yes).await?;
        }

        Commands::List => {
            commands::list(&config).await?;
        }

        Commands::Config { server, csrf_token, session_cookie, show } => {
            let mut config = config;
            let changed = server.is_some() || csrf_token.is_some() || session_cookie.is_some();

            if let Some(server) = server {
                gait_ai::client::parse_base_url(&server)?;
                config.server_url = server;
            }
            if let Some(token) = csrf_token {
                config.csrf_token = Some(token);
            }
            if let Some(cookie) = session_cookie {
                config.session_cookie = Some(cookie);
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  サーバー: {}", config.server_url());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  CSRFトークン: {}", if config.csrf_token.is_some() { "設定済み" } else { "未設定" });
                println!("  セッション: {}", if config.session_cookie.is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
