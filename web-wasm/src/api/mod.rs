//! サーバーAPI通信

mod fetch;

pub use fetch::{js_message, FetchTransport};
