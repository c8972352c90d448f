pub mod dashboard;
pub mod project;
pub mod session;
pub mod task;
pub mod user;
