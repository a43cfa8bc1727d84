//! gait-ai: 歩様解析サービスのターミナルクライアント
//!
//! ブラウザ版と同じ common のコントローラーを、reqwest とターミナル表示で動かす。

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod terminal;
