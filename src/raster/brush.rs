use std::cmp;

use super::RasterBuffer;
use crate::error::Error;

/// Square grayscale stamp, each sample is the coverage of the brush.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrushTexture {
    size: u32,
    coverage: Vec<u8>,
}

impl BrushTexture {
    pub fn new(size: u32, coverage: Vec<u8>) -> crate::Result<Self> {
        let expected = (size as usize).checked_mul(size as usize);
        if size == 0 || expected != Some(coverage.len()) {
            return Err(Error::InvalidDimensions {
                width: size,
                height: size,
                channels: 1,
            });
        }
        Ok(Self { size, coverage })
    }

    /// Brush that covers its whole square.
    pub fn solid(size: u32) -> crate::Result<Self> {
        let length = (size as usize).saturating_mul(size as usize);
        Self::new(size, vec![u8::MAX; length])
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    fn alpha(&self, column_index: usize, row_index: usize) -> f32 {
        self.coverage[row_index * self.size as usize + column_index] as f32 / u8::MAX as f32
    }
}

fn blend_sample(canvas: u8, color: u8, alpha: f32) -> u8 {
    (canvas as f32 + (color as f32 - canvas as f32) * alpha) as u8
}

impl RasterBuffer {
    /// Stamps `brush` centered on every point of `path`.
    ///
    /// The stamp spans `stroke_size` pixels starting half a stroke left of
    /// and above the point, is clipped at the raster edges and blends
    /// `color` with the brush coverage times `opacity`. Opacity is capped at
    /// 1. An empty path, a stroke size below 1 or an opacity of at most 0
    /// leave the raster untouched.
    pub fn render_stroke(
        &mut self,
        path: &[(i32, i32)],
        brush: &BrushTexture,
        color: &[u8],
        stroke_size: i32,
        opacity: f32,
    ) -> crate::Result<()> {
        if color.len() != self.channels() as usize {
            return Err(Error::ColorChannelMismatch {
                expected: self.channels(),
                actual: color.len(),
            });
        }
        if path.is_empty() || stroke_size <= 0 || opacity <= 0.0 {
            return Ok(());
        }
        let opacity = opacity.min(1.0);
        log::debug!(
            "Rendering stroke of {} points, size {}, opacity {}",
            path.len(),
            stroke_size,
            opacity
        );
        for &(center_x, center_y) in path {
            self.stamp(
                center_x as i64,
                center_y as i64,
                brush,
                color,
                stroke_size as i64,
                opacity,
            );
        }
        Ok(())
    }

    fn stamp(
        &mut self,
        center_x: i64,
        center_y: i64,
        brush: &BrushTexture,
        color: &[u8],
        stroke_size: i64,
        opacity: f32,
    ) {
        let half_stroke_size = stroke_size / 2;
        let origin_x = center_x - half_stroke_size;
        let origin_y = center_y - half_stroke_size;
        let start_x = cmp::max(0, origin_x);
        let end_x = cmp::min(self.width() as i64, center_x + half_stroke_size);
        let start_y = cmp::max(0, origin_y);
        let end_y = cmp::min(self.height() as i64, center_y + half_stroke_size);
        let brush_size = brush.size() as usize;
        let channels = self.channels() as usize;

        for row_index in start_y..end_y {
            let v = (row_index - origin_y) as f32 / stroke_size as f32;
            let texture_row = (v * brush_size as f32) as usize;
            if texture_row >= brush_size {
                continue;
            }
            for column_index in start_x..end_x {
                let u = (column_index - origin_x) as f32 / stroke_size as f32;
                let texture_column = (u * brush_size as f32) as usize;
                if texture_column >= brush_size {
                    continue;
                }
                let alpha = brush.alpha(texture_column, texture_row) * opacity;
                if alpha <= 0.0 {
                    continue;
                }
                let start = self.offset(column_index as u32, row_index as u32);
                let pixel = &mut self.as_bytes_mut()[start..start + channels];
                for (sample, &component) in pixel.iter_mut().zip(color) {
                    *sample = blend_sample(*sample, component, alpha);
                }
            }
        }
    }
}
