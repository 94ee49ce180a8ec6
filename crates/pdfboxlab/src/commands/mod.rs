pub mod extract_images;
pub mod extract_text;
pub mod jar;
pub mod to_images;
