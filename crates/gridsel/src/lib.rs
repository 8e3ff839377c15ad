pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

pub fn init(level: &str) {
    infra::logging::init(level);
}
