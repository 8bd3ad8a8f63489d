use std::fmt::Display;

use crate::geometry::{Rectangle, Size};

/// Coarse classification of [`Error`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    TruncatedInput,
    OutOfBounds,
    ShapeMismatch,
}

#[derive(Debug)]
pub enum Error {
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadImageData(std::io::Error),
    FailedToWriteImageData(std::io::Error),
    MissingRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    UnexpectedTrailingToken(String),
    UnsupportedMaxValue(u32),
    ImageDimensionsTooLarge(u32, u32),
    TruncatedInput { expected: usize, actual: usize },
    PixelOutOfBounds { x: i64, y: i64, size: Size },
    RowOutOfBounds { y: u32, size: Size },
    RegionOutOfBounds { region: Rectangle, size: Size },
    ShapeMismatch(Size, Size),
    InvalidDataLength { expected: usize, actual: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnableToOpenInputFileForReading(..)
            | Self::UnableToOpenOutputFileForWriting(..)
            | Self::FailedToReadImageData(_)
            | Self::FailedToWriteImageData(_) => ErrorKind::Io,
            Self::MissingRequiredToken(_)
            | Self::ParsingOfTokenFailed(_)
            | Self::UnexpectedTrailingToken(_)
            | Self::UnsupportedMaxValue(_)
            | Self::ImageDimensionsTooLarge(..) => ErrorKind::Format,
            Self::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            Self::PixelOutOfBounds { .. }
            | Self::RowOutOfBounds { .. }
            | Self::RegionOutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::ShapeMismatch(..) | Self::InvalidDataLength { .. } => ErrorKind::ShapeMismatch,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadImageData(error) => {
                write!(f, "Failed to read image data: {}", error)
            }
            Self::FailedToWriteImageData(error) => {
                write!(f, "Failed to write image data: {}", error)
            }
            Self::MissingRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::UnexpectedTrailingToken(token) => {
                write!(f, "Unexpected trailing token '{}'", token)
            }
            Self::UnsupportedMaxValue(max_value) => {
                write!(f, "Max value {} is not supported, expected at most 255", max_value)
            }
            Self::ImageDimensionsTooLarge(width, height) => {
                write!(
                    f,
                    "Image dimensions {}x{} exceed the addressable memory",
                    width, height
                )
            }
            Self::TruncatedInput { expected, actual } => {
                write!(
                    f,
                    "Truncated input. Expected {} bytes of image data, but got {}.",
                    expected, actual
                )
            }
            Self::PixelOutOfBounds { x, y, size } => {
                write!(f, "Pixel ({}, {}) is outside of image {}", x, y, size)
            }
            Self::RowOutOfBounds { y, size } => {
                write!(f, "Row {} is outside of image {}", y, size)
            }
            Self::RegionOutOfBounds { region, size } => {
                write!(f, "Region {} is outside of image {}", region, size)
            }
            Self::ShapeMismatch(left, right) => {
                write!(f, "Image shapes do not match: {} vs {}", left, right)
            }
            Self::InvalidDataLength { expected, actual } => {
                write!(
                    f,
                    "Number of samples ({}) does not match the image size ({})",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::FailedToReadImageData(error)
            | Self::FailedToWriteImageData(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Error, ErrorKind};
    use crate::geometry::{Rectangle, Size};

    #[test]
    fn kinds_follow_taxonomy() {
        let io = Error::FailedToWriteImageData(std::io::Error::other("disk full"));
        assert_eq!(io.kind(), ErrorKind::Io);
        assert_eq!(Error::UnsupportedMaxValue(65535).kind(), ErrorKind::Format);
        assert_eq!(
            Error::TruncatedInput {
                expected: 4,
                actual: 1
            }
            .kind(),
            ErrorKind::TruncatedInput
        );
        assert_eq!(
            Error::RegionOutOfBounds {
                region: Rectangle::new(-1, 0, 2, 2),
                size: Size::new(4, 4)
            }
            .kind(),
            ErrorKind::OutOfBounds
        );
        assert_eq!(
            Error::ShapeMismatch(Size::new(1, 1), Size::new(2, 2)).kind(),
            ErrorKind::ShapeMismatch
        );
    }

    #[test]
    fn display_names_the_region() {
        let error = Error::RegionOutOfBounds {
            region: Rectangle::new(3, 4, 5, 6),
            size: Size::new(4, 4),
        };
        assert_eq!(
            error.to_string(),
            "Region (3, 4, 5, 6) is outside of image 4x4"
        );
    }
}
