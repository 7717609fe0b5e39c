//! 数据库访问层

pub mod activity_repo;
pub mod diet_repo;
pub mod profile_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepository;
pub use diet_repo::DietRepository;
pub use profile_repo::ProfileRepository;
pub use user_repo::UserRepository;
