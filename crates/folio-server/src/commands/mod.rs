pub mod dispatch;
pub mod serve;
pub mod store;
pub mod update;
