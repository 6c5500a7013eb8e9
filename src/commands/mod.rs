pub mod animation;
pub mod app_info;
pub mod discover;
pub mod download;
pub mod filesystem;
pub mod http;

pub use animation::*;
pub use app_info::*;
pub use discover::*;
pub use download::*;
pub use filesystem::*;
pub use http::*;
