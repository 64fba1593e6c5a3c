pub mod storage;
pub mod transports;
