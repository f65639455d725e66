//! 工具模块

mod text;

pub use text::{strip_emoji, truncate_chars};
#[cfg(test)]
pub use text::is_emoji;
