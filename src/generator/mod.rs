pub mod clash;
pub mod yaml;

pub use clash::extend_common_config;
pub use yaml::render_yaml;
