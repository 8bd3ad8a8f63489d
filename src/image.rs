use std::fmt::Display;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::Error;
use crate::geometry::{Point, Size};

mod arithmetic;
pub mod reader;
mod region;
pub mod writer;

use reader::pgm::PGMImageReader;
use writer::pgm::PGMImageWriter;

/// Largest value an 8 bit sample can hold.
pub const MAX_SAMPLE_VALUE: u8 = u8::MAX;

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}

/// An owned 8 bit grayscale image.
///
/// Samples are stored row-major in one contiguous buffer, the sample at
/// column `x` and row `y` lives at `y * width + x`. The buffer is allocated
/// iff both dimensions are non-zero; an image with a zero dimension is
/// normalized to the empty `0x0` image. Cloning always copies the samples.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Image {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl Image {
    /// Allocates a zero-filled image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    fn filled(width: u32, height: u32, value: u8) -> Self {
        match Self::try_filled(width, height, value) {
            Ok(image) => image,
            Err(e) => panic!("{}", e),
        }
    }

    /// Allocates an image with every sample set to `value`.
    ///
    /// Fails with [`Error::ImageDimensionsTooLarge`] instead of panicking when
    /// the buffer would exceed `isize::MAX` bytes. `new`, `zeros` and `ones`
    /// panic in that case, like `Vec::with_capacity`.
    pub fn try_filled(width: u32, height: u32, value: u8) -> crate::Result<Self> {
        let size = Size::new(width, height);
        let area = size
            .checked_area()
            .ok_or(Error::ImageDimensionsTooLarge(width, height))?;
        if area == 0 {
            return Ok(Self::default());
        }
        Ok(Image {
            width,
            height,
            samples: vec![value; area],
        })
    }

    /// Adopts `samples` as the row-major buffer of a `width` x `height` image.
    pub fn from_vec(width: u32, height: u32, samples: Vec<u8>) -> crate::Result<Self> {
        let size = Size::new(width, height);
        let expected = size
            .checked_area()
            .ok_or(Error::ImageDimensionsTooLarge(width, height))?;
        if samples.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: samples.len(),
            });
        }
        if size.is_empty() {
            return Ok(Self::default());
        }
        Ok(Image {
            width,
            height,
            samples,
        })
    }

    pub fn zeros(width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    pub fn ones(width: u32, height: u32) -> Self {
        Self::filled(width, height, MAX_SAMPLE_VALUE)
    }

    /// Frees the buffer and resets the image to empty.
    pub fn release(&mut self) {
        self.samples = Vec::new();
        self.width = 0;
        self.height = 0;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.samples
    }

    fn index_of(&self, x: i64, y: i64) -> crate::Result<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                size: self.size(),
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn at(&self, x: u32, y: u32) -> crate::Result<u8> {
        let index = self.index_of(x as i64, y as i64)?;
        Ok(self.samples[index])
    }

    pub fn at_mut(&mut self, x: u32, y: u32) -> crate::Result<&mut u8> {
        let index = self.index_of(x as i64, y as i64)?;
        Ok(&mut self.samples[index])
    }

    pub fn at_point(&self, point: Point) -> crate::Result<u8> {
        let index = self.index_of(point.x as i64, point.y as i64)?;
        Ok(self.samples[index])
    }

    pub fn at_point_mut(&mut self, point: Point) -> crate::Result<&mut u8> {
        let index = self.index_of(point.x as i64, point.y as i64)?;
        Ok(&mut self.samples[index])
    }

    pub fn set(&mut self, x: u32, y: u32, value: u8) -> crate::Result<()> {
        *self.at_mut(x, y)? = value;
        Ok(())
    }

    pub fn fill(&mut self, value: u8) {
        self.samples.fill(value);
    }

    fn row_range(&self, y: u32) -> crate::Result<std::ops::Range<usize>> {
        if y >= self.height {
            return Err(Error::RowOutOfBounds {
                y,
                size: self.size(),
            });
        }
        let start = y as usize * self.width as usize;
        Ok(start..start + self.width as usize)
    }

    pub fn row(&self, y: u32) -> crate::Result<&[u8]> {
        let range = self.row_range(y)?;
        Ok(&self.samples[range])
    }

    pub fn row_mut(&mut self, y: u32) -> crate::Result<&mut [u8]> {
        let range = self.row_range(y)?;
        Ok(&mut self.samples[range])
    }

    /// Iterates over all rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on a zero chunk size, an empty image has no rows anyway
        self.samples.chunks_exact(self.width.max(1) as usize)
    }

    /// Reads a binary PGM (`P5`) image from `reader`.
    pub fn read_from<R: Read>(reader: R) -> crate::Result<Self> {
        PGMImageReader::new(reader).read_image()
    }

    /// Writes the image as binary PGM (`P5`) with a max value of 255.
    pub fn write_to<W: Write>(&self, writer: W) -> crate::Result<()> {
        PGMImageWriter::new(writer, self).write_image()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let file = crate::open_input_file(path.as_ref())?;
        Self::read_from(BufReader::new(file))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let file = crate::open_output_file(path.as_ref())?;
        self.write_to(BufWriter::new(file))
    }
}

impl Display for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for sample in row {
                write!(f, "{:>3} ", sample)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
