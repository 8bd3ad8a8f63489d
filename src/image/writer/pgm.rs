use std::io::Write;

use crate::error::Error;
use crate::image::{Image, ImageWriter, MAX_SAMPLE_VALUE};

/// Writes an image as binary PGM (`P5`).
///
/// The header always declares a max value of 255, regardless of the samples.
pub struct PGMImageWriter<'a, T: Write> {
    writer: T,
    image: &'a Image,
}

impl<'a, T: Write> PGMImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a Image) -> Self {
        Self { writer, image }
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        write!(
            self.writer,
            "P5\n{} {}\n{}\n",
            self.image.width(),
            self.image.height(),
            MAX_SAMPLE_VALUE
        )
    }

    fn write_samples(&mut self) -> std::io::Result<()> {
        for row in self.image.rows() {
            self.writer.write_all(row)?;
        }
        Ok(())
    }
}

impl<T: Write> ImageWriter for PGMImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        self.write_header().map_err(Error::FailedToWriteImageData)?;
        self.write_samples().map_err(Error::FailedToWriteImageData)?;
        self.writer.flush().map_err(Error::FailedToWriteImageData)?;
        log::trace!(
            "Wrote PGM image of {} ({} samples)",
            self.image.size(),
            self.image.as_slice().len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, Write};

    use super::PGMImageWriter;
    use crate::error::ErrorKind;
    use crate::image::{Image, ImageWriter};

    #[test]
    fn header_and_samples() {
        let image = Image::from_vec(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        let mut output = Vec::new();
        PGMImageWriter::new(&mut output, &image)
            .write_image()
            .unwrap();
        assert_eq!(output, b"P5\n3 2\n255\n\x00\x01\x02\x03\x04\x05");
    }

    #[test]
    fn max_value_is_always_255() {
        let image = Image::zeros(1, 1);
        let mut output = Vec::new();
        image.write_to(&mut output).unwrap();
        assert_eq!(output, b"P5\n1 1\n255\n\x00");
    }

    #[test]
    fn empty_image_writes_header_only() {
        let mut output = Vec::new();
        Image::default().write_to(&mut output).unwrap();
        assert_eq!(output, b"P5\n0 0\n255\n");
    }

    #[test]
    fn read_back_what_was_written() {
        let samples: Vec<u8> = (0..=255).collect();
        let image = Image::from_vec(16, 16, samples).unwrap();
        let mut output = Vec::new();
        image.write_to(&mut output).unwrap();
        assert_eq!(Image::read_from(output.as_slice()).unwrap(), image);
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_error_is_reported() {
        let error = Image::ones(2, 2).write_to(FullDisk).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Io);
    }
}
