use std::io::{self, ErrorKind, Read};

use super::super::{Image, ImageReader};
use crate::error::Error;
use crate::geometry::Size;

/// Reads binary PGM (`P5`) images with 8 bit samples.
pub struct PGMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PGMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    fn read_samples(&mut self, header: &PGMHeader) -> crate::Result<Image> {
        let size = Size::new(header.width, header.height);
        let expected = size
            .checked_area()
            .ok_or(Error::ImageDimensionsTooLarge(header.width, header.height))?;
        let mut samples = Vec::new();
        self.reader
            .by_ref()
            .take(expected as u64)
            .read_to_end(&mut samples)
            .map_err(Error::FailedToReadImageData)?;
        if samples.len() < expected {
            return Err(Error::TruncatedInput {
                expected,
                actual: samples.len(),
            });
        }
        Image::from_vec(header.width, header.height, samples)
    }
}

impl<T: Read> ImageReader for PGMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Image> {
        let header = {
            let mut tokenizer = PGMTokenizer::new(&mut self.reader);
            let mut parser = PGMHeaderParser::new(&mut tokenizer);
            parser.parse_header()?
        };
        log::debug!(
            "Parsed PGM header: {}x{}, max value {}",
            header.width,
            header.height,
            header.max_value
        );
        self.read_samples(&header)
    }
}

/// Splits the header into whitespace separated tokens.
///
/// Consumes exactly one whitespace byte after each token, so the raw sample
/// data can be read from the underlying reader right after the last header
/// token. `#` starts a comment that runs to the end of the line. Tokens
/// longer than [`MAX_TOKEN_LENGTH`] bytes are rejected without reading on.
struct PGMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PGMTokenizer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        PGMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Longest header token accepted, enough for a zero padded `u32`.
const MAX_TOKEN_LENGTH: usize = 20;

#[derive(Debug)]
enum TokenError {
    Io(io::Error),
    TooLong,
}

impl<R: Read> Iterator for PGMTokenizer<'_, R> {
    type Item = Result<String, TokenError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut in_comment = false;

        loop {
            let byte = match self.read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(e) => return Some(Err(TokenError::Io(e))),
            };
            if in_comment {
                if byte == b'\n' {
                    in_comment = false;
                    if !self.buffer.is_empty() {
                        break;
                    }
                }
                continue;
            }
            if byte == b'#' {
                in_comment = true;
                continue;
            }
            if byte.is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else if self.buffer.len() == MAX_TOKEN_LENGTH {
                return Some(Err(TokenError::TooLong));
            } else {
                self.buffer.push(byte);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned()))
    }
}

const P5_HEADER_TOKEN_NAME: &str = "P5 Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";

const MAX_SUPPORTED_VALUE: u32 = 255;

#[derive(Debug, PartialEq)]
struct PGMHeader {
    width: u32,
    height: u32,
    max_value: u32,
}

struct PGMHeaderParser<'a, T> {
    tokenizer: &'a mut T,
}

impl<'a, T> PGMHeaderParser<'a, T>
where
    T: Iterator<Item = Result<String, TokenError>>,
{
    fn new(tokenizer: &'a mut T) -> Self {
        Self { tokenizer }
    }

    fn parse_header(&mut self) -> crate::Result<PGMHeader> {
        let magic = self.next_token(P5_HEADER_TOKEN_NAME)?;
        Self::check_header_version(&magic)?;
        let width = self.parse_number(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_number(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.parse_number(MAX_VALUE_HEADER_TOKEN_NAME)?;
        Self::check_max_value(max_value)?;
        Ok(PGMHeader {
            width,
            height,
            max_value,
        })
    }

    fn check_header_version(magic: &str) -> crate::Result<()> {
        if magic != "P5" {
            return Err(Error::MissingRequiredToken(P5_HEADER_TOKEN_NAME));
        }
        Ok(())
    }

    fn check_max_value(max_value: u32) -> crate::Result<()> {
        if max_value > MAX_SUPPORTED_VALUE {
            return Err(Error::UnsupportedMaxValue(max_value));
        }
        Ok(())
    }

    fn next_token(&mut self, token_name: &'static str) -> crate::Result<String> {
        self.tokenizer
            .next()
            .ok_or(Error::MissingRequiredToken(token_name))?
            .map_err(|e| match e {
                TokenError::Io(e) => Error::FailedToReadImageData(e),
                TokenError::TooLong => Error::ParsingOfTokenFailed(token_name),
            })
    }

    fn parse_number(&mut self, token_name: &'static str) -> crate::Result<u32> {
        self.next_token(token_name)?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, Cursor, Read};

    use crate::error::{Error, ErrorKind};
    use crate::image::{Image, ImageReader};

    use super::PGMImageReader;

    fn read_pgm(bytes: &[u8]) -> crate::Result<Image> {
        PGMImageReader::new(bytes).read_image()
    }

    #[test]
    fn read_minimal_image() {
        let image = read_pgm(b"P5\n3 2\n255\n\x00\x01\x02\x03\x04\xff").unwrap();
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.row(0).unwrap(), &[0, 1, 2]);
        assert_eq!(image.row(1).unwrap(), &[3, 4, 255]);
    }

    #[test]
    fn single_whitespace_after_max_value() {
        // the second newline is the first sample
        let image = read_pgm(b"P5 2 1 255\n\n\x07").unwrap();
        assert_eq!(image.as_slice(), &[b'\n', 7]);
    }

    #[test]
    fn samples_that_look_like_whitespace() {
        let image = read_pgm(b"P5\n2 2\n255 \x20\x09\x0a\x0d").unwrap();
        assert_eq!(image.as_slice(), &[0x20, 0x09, 0x0a, 0x0d]);
    }

    #[test]
    fn header_comments() {
        let image = read_pgm(b"P5\n# created by hand\n2 1 # size\n255\n\x10\x20").unwrap();
        assert_eq!(image.as_slice(), &[0x10, 0x20]);
    }

    #[test]
    fn smaller_max_value_is_accepted() {
        let image = read_pgm(b"P5\n1 1\n15\n\x0f").unwrap();
        assert_eq!(image.at(0, 0).unwrap(), 15);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let image = read_pgm(b"P5\n1 1\n255\n\x01\x02\x03").unwrap();
        assert_eq!(image.as_slice(), &[1]);
    }

    #[test]
    fn zero_sized_image() {
        let image = read_pgm(b"P5\n0 0\n255\n").unwrap();
        assert!(image.is_empty());
    }

    #[test]
    fn wrong_magic() {
        if let Err(Error::MissingRequiredToken(name)) = read_pgm(b"P2\n1 1\n255\n1") {
            assert_eq!(name, "P5 Header");
            return;
        }
        panic!("Wrong magic not detected");
    }

    #[test]
    fn empty_input() {
        assert_eq!(read_pgm(b"").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn missing_height() {
        if let Err(Error::MissingRequiredToken("Height Header")) = read_pgm(b"P5 4") {
            return;
        }
        panic!("Missing height not detected");
    }

    #[test]
    fn malformed_width() {
        if let Err(Error::ParsingOfTokenFailed("Width Header")) = read_pgm(b"P5 -4 4 255\n") {
            return;
        }
        panic!("Malformed width not detected");
    }

    #[test]
    fn overlong_magic_stops_reading() {
        let mut input = Cursor::new(vec![b'A'; 1 << 20]);
        match PGMImageReader::new(&mut input).read_image() {
            Err(Error::ParsingOfTokenFailed(name)) => assert_eq!(name, "P5 Header"),
            other => panic!("Overlong token not detected: {:?}", other),
        }
        assert_eq!(input.position(), 21);
    }

    #[test]
    fn zero_padded_width() {
        let image = read_pgm(b"P5 00000000000000000002 1 255\n\x01\x02").unwrap();
        assert_eq!(image.as_slice(), &[1, 2]);
        if let Err(Error::ParsingOfTokenFailed("Width Header")) =
            read_pgm(b"P5 000000000000000000002 1 255\n\x01\x02")
        {
            return;
        }
        panic!("Overlong width not detected");
    }

    #[test]
    fn max_value_above_255() {
        match read_pgm(b"P5\n1 1\n65535\n\x00\x00") {
            Err(Error::UnsupportedMaxValue(value)) => assert_eq!(value, 65535),
            other => panic!("Unsupported max value not detected: {:?}", other),
        }
    }

    #[test]
    fn truncated_samples() {
        match read_pgm(b"P5\n3 3\n255\n\x01\x02\x03\x04") {
            Err(Error::TruncatedInput { expected, actual }) => {
                assert_eq!(expected, 9);
                assert_eq!(actual, 4);
            }
            other => panic!("Truncated input not detected: {:?}", other),
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn read_error_is_reported() {
        let error = PGMImageReader::new(FailingReader).read_image().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Io);
    }
}
