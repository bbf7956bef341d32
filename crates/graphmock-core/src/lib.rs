pub mod config;
pub mod logging;

pub mod docs;
pub mod mocks;
pub mod sanitize;
