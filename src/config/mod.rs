//! Configuration module

mod site;

pub use site::ConfigError;
pub use site::IndexOrder;
pub use site::SiteConfig;
