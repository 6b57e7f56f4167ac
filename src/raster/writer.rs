use std::path::Path;

use clap::builder::PossibleValue;
use clap::ValueEnum;

use crate::error::Error;

pub mod png;
pub mod ppm;

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Ppm,
}

impl ValueEnum for ImageFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Png, Self::Ppm]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Png => Some(PossibleValue::new("PNG")),
            Self::Ppm => Some(PossibleValue::new("PPM")),
        }
    }
}

impl ImageFormat {
    /// Picks the format matching the extension of `path`.
    ///
    /// `.pgm` only takes gray rasters and `.ppm` only color rasters, so the
    /// extension always names the Netpbm variant that gets written.
    pub fn from_path(path: &Path, channels: u8) -> crate::Result<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("pgm") if channels != 1 => Err(Error::UnsupportedChannelCount(channels, "PGM")),
            Some("ppm") if channels != 3 => Err(Error::UnsupportedChannelCount(channels, "PPM")),
            Some("ppm") | Some("pgm") => Ok(Self::Ppm),
            _ => Err(Error::UnsupportedOutputFormat(
                path.to_string_lossy().into_owned(),
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::ImageFormat;
    use crate::error::Error;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ImageFormat::from_path(Path::new("out/test_image.png"), 4).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("TEST.PPM"), 3).unwrap(),
            ImageFormat::Ppm
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("gray.pgm"), 1).unwrap(),
            ImageFormat::Ppm
        );
    }

    #[test]
    fn netpbm_extension_must_match_channels() {
        assert!(matches!(
            ImageFormat::from_path(Path::new("color.pgm"), 3),
            Err(Error::UnsupportedChannelCount(3, "PGM"))
        ));
        assert!(matches!(
            ImageFormat::from_path(Path::new("gray.ppm"), 1),
            Err(Error::UnsupportedChannelCount(1, "PPM"))
        ));
    }

    #[test]
    fn unknown_extension() {
        for path in ["image.jpg", "image"] {
            if let Err(Error::UnsupportedOutputFormat(p)) = ImageFormat::from_path(Path::new(path), 3)
            {
                assert_eq!(p, path);
            } else {
                panic!("Unsupported format of {} not detected", path);
            }
        }
    }
}
