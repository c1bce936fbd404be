//! OCR domain module

mod image_data;

pub use image_data::{ImageData, ImageMimeType};
