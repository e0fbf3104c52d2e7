pub mod dispatch;
pub mod group;
pub mod lock;
pub mod option;
pub mod seed;
pub mod session;
pub mod status;
pub mod types;
pub mod user;
