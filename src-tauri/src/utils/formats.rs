use crate::utils::DecodeError;

/// Image containers recognised from their leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
    Tiff,
    Heif,
    Avif,
}

/// ISO-BMFF brands used by HEIC/HEIF files (iPhone photos).
const HEIF_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"hevm", b"hevs", b"mif1", b"msf1",
];
const AVIF_BRANDS: &[&[u8; 4]] = &[b"avif", b"avis"];

impl ImageFormat {
    /// Detects the container from magic bytes, `None` if unrecognised.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if let Some(format) = sniff_iso_bmff(bytes) {
            return Some(format);
        }

        match image::guess_format(bytes).ok()? {
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Gif => Some(Self::Gif),
            image::ImageFormat::WebP => Some(Self::WebP),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            image::ImageFormat::Tiff => Some(Self::Tiff),
            image::ImageFormat::Avif => Some(Self::Avif),
            _ => None,
        }
    }

    /// Whether this build can decode the format.
    pub fn is_decodable(&self) -> bool {
        self.decoder_format().is_some()
    }

    /// Matching decoder format, `None` for containers without a decoder.
    pub fn decoder_format(&self) -> Option<image::ImageFormat> {
        match self {
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Png => Some(image::ImageFormat::Png),
            Self::Gif => Some(image::ImageFormat::Gif),
            Self::WebP => Some(image::ImageFormat::WebP),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            Self::Tiff => Some(image::ImageFormat::Tiff),
            Self::Heif | Self::Avif => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::WebP => "WebP",
            Self::Bmp => "BMP",
            Self::Tiff => "TIFF",
            Self::Heif => "HEIC/HEIF",
            Self::Avif => "AVIF",
        }
    }
}

/// Reads the major brand of an `ftyp` box at offset 4.
fn sniff_iso_bmff(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.len() < 12 || &bytes[4..8] != b"ftyp" {
        return None;
    }
    let brand = &bytes[8..12];
    if HEIF_BRANDS.iter().any(|b| b.as_slice() == brand) {
        Some(ImageFormat::Heif)
    } else if AVIF_BRANDS.iter().any(|b| b.as_slice() == brand) {
        Some(ImageFormat::Avif)
    } else {
        None
    }
}

/// Resolves the decoder for `bytes`, failing early for known-unsupported containers.
pub fn decodable_format(bytes: &[u8]) -> Result<image::ImageFormat, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::corrupt("File is empty"));
    }

    let format = ImageFormat::sniff(bytes)
        .ok_or_else(|| DecodeError::corrupt("Data is not a recognised image"))?;

    format
        .decoder_format()
        .ok_or_else(|| DecodeError::unsupported(format.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ftyp(brand: &[u8; 4]) -> Vec<u8> {
        let mut bytes = vec![0x00, 0x00, 0x00, 0x18];
        bytes.extend_from_slice(b"ftyp");
        bytes.extend_from_slice(brand);
        bytes.extend_from_slice(&[0; 12]);
        bytes
    }

    #[test]
    fn heic_is_recognised_but_not_decodable() {
        let bytes = ftyp(b"heic");
        assert_eq!(ImageFormat::sniff(&bytes), Some(ImageFormat::Heif));
        let err = decodable_format(&bytes).unwrap_err();
        assert!(err.is_unsupported());
        assert!(err.to_string().contains("HEIC"));
    }

    #[test]
    fn avif_is_recognised_but_not_decodable() {
        assert_eq!(ImageFormat::sniff(&ftyp(b"avif")), Some(ImageFormat::Avif));
        assert!(!ImageFormat::Avif.is_decodable());
    }

    #[test]
    fn common_formats_are_sniffed() {
        assert_eq!(ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(
            ImageFormat::sniff(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::sniff(b"GIF89a"), Some(ImageFormat::Gif));
    }

    #[test]
    fn garbage_is_corrupt_not_unsupported() {
        let err = decodable_format(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DecodeError::Corrupt(_)));
        assert!(matches!(decodable_format(&[]), Err(DecodeError::Corrupt(_))));
    }
}
