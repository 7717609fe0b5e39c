//! 业务服务层

pub mod auth_service;
pub mod stats_service;
pub mod user_data_service;

pub use auth_service::AuthService;
pub use stats_service::StatsService;
pub use user_data_service::UserDataService;
