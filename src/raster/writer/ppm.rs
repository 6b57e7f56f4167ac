use std::io::Write;

use crate::error::Error;
use crate::raster::{writer::ImageWriter, RasterBuffer};

const MAX_SAMPLE_VALUE: u8 = u8::MAX;

enum MagicNumber {
    GrayMap,
    PixMap,
}

impl MagicNumber {
    fn for_channels(channels: u8) -> crate::Result<Self> {
        match channels {
            1 => Ok(Self::GrayMap),
            3 => Ok(Self::PixMap),
            _ => Err(Error::UnsupportedChannelCount(channels, "PPM")),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::GrayMap => "P5",
            Self::PixMap => "P6",
        }
    }
}

/// Binary Netpbm writer, gray rasters become P5 and color rasters P6.
pub struct PpmImageWriter<'a, T: Write> {
    writer: T,
    image: &'a RasterBuffer,
}

impl<'a, T: Write> PpmImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a RasterBuffer) -> Self {
        Self { writer, image }
    }

    fn write_header(&mut self, magic_number: &MagicNumber) -> std::io::Result<()> {
        write!(
            self.writer,
            "{}\n{} {}\n{}\n",
            magic_number.as_str(),
            self.image.width(),
            self.image.height(),
            MAX_SAMPLE_VALUE
        )
    }
}

impl<T: Write> ImageWriter for PpmImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let magic_number = MagicNumber::for_channels(self.image.channels())?;
        log::info!("Writing {} image", magic_number.as_str());
        self.write_header(&magic_number)
            .map_err(Error::FailedToWriteImageData)?;
        self.writer
            .write_all(&self.image.to_rgb_order())
            .map_err(Error::FailedToWriteImageData)?;
        self.writer.flush().map_err(Error::FailedToWriteImageData)
    }
}
