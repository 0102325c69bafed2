pub mod modes;
pub mod runner;
