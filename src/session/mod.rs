pub mod gallery_view;
pub mod simulate;
