//! HTTP 处理器模块

pub mod activity;
pub mod auth;
pub mod diet;
pub mod food;
pub mod health;
pub mod profile;
pub mod stats;
pub mod user_data;
pub mod user_profile;
