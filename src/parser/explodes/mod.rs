pub mod common;
pub mod hysteria2;
pub mod ss;
pub mod ssr;
pub mod trojan;
pub mod vmess;

pub use common::{explode, LinkScheme};
