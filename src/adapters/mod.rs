pub mod app_state;
pub mod gateway;
pub mod notify;
pub mod storage;
