pub mod config;
pub mod gallery;
pub mod text;
