use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use error::{Error, ErrorKind};
pub use geometry::{Point, Rectangle, Size};
pub use image::{Image, ImageReader, ImageWriter};

mod cli;
mod error;
pub mod geometry;
pub mod image;

pub type Result<T> = std::result::Result<T, error::Error>;

/// Sample value used by [`Operation::Fill`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillValue {
    Zeros,
    Ones,
}

impl FillValue {
    fn sample(self) -> u8 {
        match self {
            Self::Zeros => 0,
            Self::Ones => image::MAX_SAMPLE_VALUE,
        }
    }
}

/// A single command line action on image files.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Info {
        input_file: PathBuf,
    },
    Print {
        input_file: PathBuf,
    },
    Roi {
        input_file: PathBuf,
        output_file: PathBuf,
        region: Rectangle,
    },
    Add {
        left_file: PathBuf,
        right_file: PathBuf,
        output_file: PathBuf,
    },
    Subtract {
        left_file: PathBuf,
        right_file: PathBuf,
        output_file: PathBuf,
    },
    Fill {
        output_file: PathBuf,
        width: u32,
        height: u32,
        value: FillValue,
    },
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

/// Runs `operation`, returning the text to show the user, if any.
pub fn run_operation(operation: &Operation) -> Result<Option<String>> {
    match operation {
        Operation::Info { input_file } => {
            let image = Image::load(input_file)?;
            Ok(Some(image.size().to_string()))
        }
        Operation::Print { input_file } => {
            let image = Image::load(input_file)?;
            Ok(Some(image.to_string()))
        }
        Operation::Roi {
            input_file,
            output_file,
            region,
        } => {
            let image = Image::load(input_file)?;
            log::info!("Extracting region {} from image of {}", region, image.size());
            image.roi(region)?.save(output_file)?;
            Ok(None)
        }
        Operation::Add {
            left_file,
            right_file,
            output_file,
        } => {
            let result = (&Image::load(left_file)? + &Image::load(right_file)?)?;
            log::info!("Added images of {}", result.size());
            result.save(output_file)?;
            Ok(None)
        }
        Operation::Subtract {
            left_file,
            right_file,
            output_file,
        } => {
            let result = (&Image::load(left_file)? - &Image::load(right_file)?)?;
            log::info!("Subtracted images of {}", result.size());
            result.save(output_file)?;
            Ok(None)
        }
        Operation::Fill {
            output_file,
            width,
            height,
            value,
        } => {
            let image = Image::try_filled(*width, *height, value.sample())?;
            image.save(output_file)?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::{open_input_file, run_operation, ErrorKind, Operation};

    #[test]
    fn open_missing_input_file() {
        let error = open_input_file(&PathBuf::from("/definitely/not/here.pgm")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("/definitely/not/here.pgm"));
    }

    #[test]
    fn info_of_missing_file_fails() {
        let operation = Operation::Info {
            input_file: PathBuf::from("/definitely/not/here.pgm"),
        };
        assert!(run_operation(&operation).is_err());
    }
}
