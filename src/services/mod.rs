pub mod history_service;
pub mod storage;
