use super::RasterBuffer;

pub mod ppm;

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<RasterBuffer>;
}
