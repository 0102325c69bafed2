pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;
