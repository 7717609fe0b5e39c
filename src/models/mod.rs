//! 领域模型与 DTO

pub mod activity;
pub mod diet;
pub mod profile;
pub mod user;
pub mod user_data;
