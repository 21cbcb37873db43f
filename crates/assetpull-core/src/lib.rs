pub mod config;
pub mod logging;

// Pipeline: manifest -> layout/resolve -> fetch -> runner
pub mod fetch;
pub mod layout;
pub mod manifest;
pub mod resolve;
pub mod runner;
pub mod storage;
