pub mod image;
pub mod text_measurer;
