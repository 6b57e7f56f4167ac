use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::Error;
use crate::raster::{writer::ImageWriter, RasterBuffer};

fn color_type_for(channels: u8) -> crate::Result<ExtendedColorType> {
    match channels {
        1 => Ok(ExtendedColorType::L8),
        2 => Ok(ExtendedColorType::La8),
        3 => Ok(ExtendedColorType::Rgb8),
        4 => Ok(ExtendedColorType::Rgba8),
        _ => Err(Error::UnsupportedChannelCount(channels, "PNG")),
    }
}

pub struct PngImageWriter<'a, T: Write> {
    writer: T,
    image: &'a RasterBuffer,
}

impl<'a, T: Write> PngImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a RasterBuffer) -> Self {
        Self { writer, image }
    }
}

impl<T: Write> ImageWriter for PngImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let color_type = color_type_for(self.image.channels())?;
        log::info!("Writing PNG image as {:?}", color_type);
        let encoder = PngEncoder::new(&mut self.writer);
        encoder.write_image(
            &self.image.to_rgb_order(),
            self.image.width(),
            self.image.height(),
            color_type,
        )?;
        self.writer.flush().map_err(Error::FailedToWriteImageData)
    }
}
