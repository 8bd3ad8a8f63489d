use super::Image;
use crate::error::Error;
use crate::geometry::Rectangle;

impl Image {
    /// Copies the region `rect` into a new image.
    ///
    /// Fails with [`Error::RegionOutOfBounds`] if the region has a negative
    /// origin or reaches past the right or bottom edge. A zero-area region
    /// inside the image yields the empty image. The result never shares
    /// samples with `self`.
    pub fn roi(&self, rect: &Rectangle) -> crate::Result<Image> {
        if rect.x < 0
            || rect.y < 0
            || rect.right() > self.width as i64
            || rect.bottom() > self.height as i64
        {
            return Err(Error::RegionOutOfBounds {
                region: *rect,
                size: self.size(),
            });
        }
        Ok(self.copy_region(rect.x as u32, rect.y as u32, rect.width, rect.height))
    }

    /// Same as [`Image::roi`] with the region given as raw values.
    ///
    /// Origins past `i32::MAX` are accepted as long as the region lies inside
    /// the image. The error of a rejected region reports such an origin
    /// clamped to `i32::MAX`.
    pub fn roi_from(&self, x: u32, y: u32, width: u32, height: u32) -> crate::Result<Image> {
        if x as u64 + width as u64 > self.width as u64
            || y as u64 + height as u64 > self.height as u64
        {
            return Err(Error::RegionOutOfBounds {
                region: Rectangle::new(
                    x.min(i32::MAX as u32) as i32,
                    y.min(i32::MAX as u32) as i32,
                    width,
                    height,
                ),
                size: self.size(),
            });
        }
        Ok(self.copy_region(x, y, width, height))
    }

    /// Copies a region already known to lie inside the image.
    fn copy_region(&self, x: u32, y: u32, width: u32, height: u32) -> Image {
        let mut roi = Image::new(width, height);
        if roi.is_empty() {
            return roi;
        }
        let (x, y) = (x as usize, y as usize);
        let source_width = self.width as usize;
        let width = width as usize;
        for (i, target_row) in roi.samples.chunks_exact_mut(width).enumerate() {
            let start = (y + i) * source_width + x;
            target_row.copy_from_slice(&self.samples[start..start + width]);
        }
        roi
    }
}
