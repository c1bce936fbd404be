//! Image data value object

use std::fmt;

/// Supported image MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMimeType {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl ImageMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }

    /// Sniff the MIME type from the leading magic bytes
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if data.starts_with(b"\xff\xd8\xff") {
            Some(Self::Jpeg)
        } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else {
            None
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ImageMimeType {
    fn default() -> Self {
        Self::Png
    }
}

/// Value object representing an image ready for text extraction.
/// Contains raw encoded bytes and their MIME type.
#[derive(Debug, Clone)]
pub struct ImageData {
    data: Vec<u8>,
    mime_type: ImageMimeType,
}

impl ImageData {
    /// Create ImageData from raw bytes with a known MIME type
    pub fn new(data: Vec<u8>, mime_type: ImageMimeType) -> Self {
        Self { data, mime_type }
    }

    /// Create ImageData from raw bytes, sniffing the MIME type.
    /// Returns None if the bytes are not a recognized image format.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        let mime_type = ImageMimeType::sniff(&data)?;
        Some(Self { data, mime_type })
    }

    /// Get the raw image bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> ImageMimeType {
        self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the image data as base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00";

    #[test]
    fn mime_type_as_str() {
        assert_eq!(ImageMimeType::Png.as_str(), "image/png");
        assert_eq!(ImageMimeType::Jpeg.as_str(), "image/jpeg");
        assert_eq!(ImageMimeType::Webp.as_str(), "image/webp");
        assert_eq!(ImageMimeType::Gif.as_str(), "image/gif");
    }

    #[test]
    fn sniff_png() {
        assert_eq!(ImageMimeType::sniff(PNG_MAGIC), Some(ImageMimeType::Png));
    }

    #[test]
    fn sniff_jpeg() {
        assert_eq!(
            ImageMimeType::sniff(b"\xff\xd8\xff\xe0rest"),
            Some(ImageMimeType::Jpeg)
        );
    }

    #[test]
    fn sniff_webp() {
        assert_eq!(
            ImageMimeType::sniff(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
            Some(ImageMimeType::Webp)
        );
    }

    #[test]
    fn sniff_gif() {
        assert_eq!(ImageMimeType::sniff(b"GIF89a..."), Some(ImageMimeType::Gif));
        assert_eq!(ImageMimeType::sniff(b"GIF87a..."), Some(ImageMimeType::Gif));
    }

    #[test]
    fn sniff_unknown() {
        assert_eq!(ImageMimeType::sniff(b"not an image"), None);
        assert_eq!(ImageMimeType::sniff(b""), None);
    }

    #[test]
    fn from_bytes_sniffs() {
        let image = ImageData::from_bytes(PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(image.mime_type(), ImageMimeType::Png);
    }

    #[test]
    fn from_bytes_rejects_unknown() {
        assert!(ImageData::from_bytes(b"plain text".to_vec()).is_none());
    }

    #[test]
    fn to_base64_round_trip() {
        let image = ImageData::new(vec![1, 2, 3, 4], ImageMimeType::Png);
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(image.to_base64())
            .unwrap();
        assert_eq!(decoded, vec![1, 2, 3, 4]);
    }

    #[test]
    fn human_readable_size() {
        let image = ImageData::new(vec![0u8; 2048], ImageMimeType::Png);
        assert_eq!(image.human_readable_size(), "2.0 KB");
    }
}
