use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidDimensions {
        width: u32,
        height: u32,
        channels: u8,
    },
    OutOfBounds {
        top_left: (u32, u32),
        bottom_right: (u32, u32),
        width: u32,
        height: u32,
    },
    ColorChannelMismatch {
        expected: u8,
        actual: usize,
    },
    TooManyColorComponents(usize),
    UnsupportedChannelCount(u8, &'static str),
    UnsupportedOutputFormat(String),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteImageData(std::io::Error),
    PngEncodingFailed(image::ImageError),
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    UnsupportedMaxValue(u16),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions {
                width,
                height,
                channels,
            } => {
                write!(
                    f,
                    "Invalid raster dimensions {}x{} with {} channels",
                    width, height, channels
                )
            }
            Self::OutOfBounds {
                top_left,
                bottom_right,
                width,
                height,
            } => {
                write!(
                    f,
                    "Rectangle ({}, {})-({}, {}) does not fit into a {}x{} raster",
                    top_left.0, top_left.1, bottom_right.0, bottom_right.1, width, height
                )
            }
            Self::ColorChannelMismatch { expected, actual } => {
                write!(
                    f,
                    "Color has {} components, but the raster has {} channels",
                    actual, expected
                )
            }
            Self::TooManyColorComponents(components) => {
                write!(
                    f,
                    "Color has {} components, at most {} channels are supported",
                    components,
                    u8::MAX
                )
            }
            Self::UnsupportedChannelCount(channels, format) => {
                write!(f, "{} channels can not be written as {}", channels, format)
            }
            Self::UnsupportedOutputFormat(path) => {
                write!(f, "Unable to determine image format of '{}'", path)
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteImageData(error) => {
                write!(f, "Failed to write image data: {}", error)
            }
            Self::PngEncodingFailed(error) => write!(f, "PNG encoding failed: {}", error),
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::UnsupportedMaxValue(max_value) => {
                write!(
                    f,
                    "Max value {} is not supported, only 8 bit samples are",
                    max_value
                )
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_tokens_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size provided in header"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenOutputFileForWriting(_, error) => Some(error),
            Self::FailedToWriteImageData(error) => Some(error),
            Self::PngEncodingFailed(error) => Some(error),
            _ => None,
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(value: image::ImageError) -> Self {
        Self::PngEncodingFailed(value)
    }
}
