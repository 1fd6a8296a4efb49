pub mod geometry;
pub mod observer;
pub mod resize;
