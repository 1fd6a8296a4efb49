pub mod keyframes;
pub mod section;
pub mod spring;
