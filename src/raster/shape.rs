use super::RasterBuffer;
use crate::error::Error;

/// Axis-aligned rectangle, both corners inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rectangle {
    top_left: (u32, u32),
    bottom_right: (u32, u32),
}

impl Rectangle {
    pub fn new(top_left: (u32, u32), bottom_right: (u32, u32)) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Rectangle spanning every pixel of the raster.
    pub fn covering(raster: &RasterBuffer) -> Self {
        Self::new((0, 0), (raster.width() - 1, raster.height() - 1))
    }

    pub fn top_left(&self) -> (u32, u32) {
        self.top_left
    }

    pub fn bottom_right(&self) -> (u32, u32) {
        self.bottom_right
    }

    pub fn width(&self) -> u32 {
        self.bottom_right.0.saturating_sub(self.top_left.0) + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom_right.1.saturating_sub(self.top_left.1) + 1
    }

    pub fn contains(&self, column_index: u32, row_index: u32) -> bool {
        (self.top_left.0..=self.bottom_right.0).contains(&column_index)
            && (self.top_left.1..=self.bottom_right.1).contains(&row_index)
    }

    fn fits_into(&self, raster: &RasterBuffer) -> bool {
        let (x0, y0) = self.top_left;
        let (x1, y1) = self.bottom_right;
        x0 <= x1 && y0 <= y1 && x1 < raster.width() && y1 < raster.height()
    }
}

impl RasterBuffer {
    /// Overwrites every pixel inside `rectangle` with `color`.
    ///
    /// `color` holds one sample per channel in the raster's channel order.
    /// The raster is left untouched when the rectangle does not fit or the
    /// color has the wrong number of components.
    pub fn fill_rectangle(&mut self, rectangle: &Rectangle, color: &[u8]) -> crate::Result<()> {
        if !rectangle.fits_into(self) {
            return Err(Error::OutOfBounds {
                top_left: rectangle.top_left,
                bottom_right: rectangle.bottom_right,
                width: self.width(),
                height: self.height(),
            });
        }
        if color.len() != self.channels() as usize {
            return Err(Error::ColorChannelMismatch {
                expected: self.channels(),
                actual: color.len(),
            });
        }
        log::debug!(
            "Filling rectangle {:?}-{:?} with {:?}",
            rectangle.top_left,
            rectangle.bottom_right,
            color
        );
        let (x0, y0) = rectangle.top_left;
        let (x1, y1) = rectangle.bottom_right;
        let channels = self.channels() as usize;
        for row_index in y0..=y1 {
            let start = self.offset(x0, row_index);
            let end = self.offset(x1, row_index) + channels;
            for pixel in self.as_bytes_mut()[start..end].chunks_exact_mut(channels) {
                pixel.copy_from_slice(color);
            }
        }
        Ok(())
    }
}
