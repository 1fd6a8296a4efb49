pub mod image;
pub mod splash;
