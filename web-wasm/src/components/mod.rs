//! UIコンポーネント

pub mod header;
pub mod toast;
pub mod progress_bar;
pub mod upload_area;
pub mod detail;
pub mod results;
