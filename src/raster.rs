use clap::builder::PossibleValue;
use clap::ValueEnum;

use crate::error::Error;

pub mod brush;
pub mod reader;
pub mod shape;
pub mod writer;

/// Order of the color components of a pixel in memory.
///
/// Only buffers with three or four channels are affected, gray and
/// gray-alpha buffers are stored the same way in both orders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ValueEnum for ChannelOrder {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Rgb, Self::Bgr]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Rgb => Some(PossibleValue::new("RGB")),
            Self::Bgr => Some(PossibleValue::new("BGR")),
        }
    }
}

/// Fixed size grid of 8 bit samples, row-major with interleaved channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    channels: u8,
    channel_order: ChannelOrder,
    samples: Vec<u8>,
}

impl RasterBuffer {
    /// Allocates a black raster, samples are stored in RGB order.
    pub fn new(width: u32, height: u32, channels: u8) -> crate::Result<Self> {
        Self::with_channel_order(width, height, channels, ChannelOrder::default())
    }

    pub fn with_channel_order(
        width: u32,
        height: u32,
        channels: u8,
        channel_order: ChannelOrder,
    ) -> crate::Result<Self> {
        let length = Self::sample_count(width, height, channels).ok_or(
            Error::InvalidDimensions {
                width,
                height,
                channels,
            },
        )?;
        Ok(Self {
            width,
            height,
            channels,
            channel_order,
            samples: vec![0; length],
        })
    }

    fn sample_count(width: u32, height: u32, channels: u8) -> Option<usize> {
        if width == 0 || height == 0 || channels == 0 {
            return None;
        }
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(channels as usize)
    }

    pub(crate) fn from_samples(
        width: u32,
        height: u32,
        channels: u8,
        samples: Vec<u8>,
    ) -> crate::Result<Self> {
        let mut raster = Self::new(width, height, channels)?;
        if samples.len() != raster.samples.len() {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        raster.samples = samples;
        Ok(raster)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub(crate) fn row_stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    pub(crate) fn offset(&self, column_index: u32, row_index: u32) -> usize {
        row_index as usize * self.row_stride() + column_index as usize * self.channels as usize
    }

    /// The samples of the pixel at the given position, in buffer order.
    pub fn pixel(&self, column_index: u32, row_index: u32) -> Option<&[u8]> {
        if column_index >= self.width || row_index >= self.height {
            return None;
        }
        let start = self.offset(column_index, row_index);
        Some(&self.samples[start..start + self.channels as usize])
    }

    /// Copy of the samples with red first, regardless of the channel order.
    pub fn to_rgb_order(&self) -> Vec<u8> {
        let mut samples = self.samples.clone();
        if self.channel_order == ChannelOrder::Bgr && self.channels >= 3 {
            for pixel in samples.chunks_exact_mut(self.channels as usize) {
                pixel.swap(0, 2);
            }
        }
        samples
    }
}
