pub mod explodes;
pub mod subparser;

pub use subparser::{parse_clash_config, parse_proxies};
