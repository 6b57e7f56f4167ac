use std::io::Read;

use super::ImageReader;
use crate::error::Error;
use crate::raster::RasterBuffer;

/// Reads ASCII (P3) and binary (P5, P6) Netpbm images with 8 bit samples.
pub struct PpmImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PpmImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PpmImageReader<T> {
    fn read_image(&mut self) -> crate::Result<RasterBuffer> {
        let tokenizer = PPMTokenizer::new(&mut self.reader);
        let mut parser = PPMParser::new(tokenizer);
        parser.parse()
    }
}

struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        PPMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Everything after the single whitespace that ended the last token.
    fn read_remaining_bytes(&mut self) -> std::io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

impl<R: Read> Iterator for PPMTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut byte = [0; 1];
        let mut in_comment = false;

        while self.reader.read(&mut byte).unwrap_or(0) > 0 {
            if in_comment {
                if byte[0] == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte[0] == b'#' {
                in_comment = true;
                continue;
            }
            if byte[0].is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte[0]);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const MAGIC_NUMBER_TOKEN_NAME: &str = "Magic Number Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";
const BINARY_IMAGE_DATA_TOKEN_NAME: &str = "Binary Image Data";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Encoding {
    AsciiPixMap,
    BinaryGrayMap,
    BinaryPixMap,
}

impl Encoding {
    fn channels(&self) -> u8 {
        match self {
            Self::BinaryGrayMap => 1,
            Self::AsciiPixMap | Self::BinaryPixMap => 3,
        }
    }
}

struct Header {
    encoding: Encoding,
    width: u32,
    height: u32,
    max_value: u16,
}

impl Header {
    fn sample_count(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.encoding.channels() as usize)
    }
}

struct PPMParser<'a, R: Read> {
    tokenizer: PPMTokenizer<'a, R>,
}

impl<'a, R: Read> PPMParser<'a, R> {
    fn new(tokenizer: PPMTokenizer<'a, R>) -> Self {
        Self { tokenizer }
    }

    fn parse(&mut self) -> crate::Result<RasterBuffer> {
        let header = self.parse_header()?;
        log::debug!(
            "Reading {:?} image of {}x{}",
            header.encoding,
            header.width,
            header.height
        );
        let samples = match header.encoding {
            Encoding::AsciiPixMap => self.parse_ascii_samples(header.max_value)?,
            Encoding::BinaryGrayMap | Encoding::BinaryPixMap => {
                self.parse_binary_samples(header.max_value)?
            }
        };
        Self::check_sample_count_matches_header(&samples, &header)?;
        RasterBuffer::from_samples(
            header.width,
            header.height,
            header.encoding.channels(),
            samples,
        )
    }

    fn parse_header(&mut self) -> crate::Result<Header> {
        let encoding = self.parse_magic_number()?;
        let width = self.parse_header_value(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_header_value(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.parse_header_value(MAX_VALUE_HEADER_TOKEN_NAME)?;
        Self::check_max_value(max_value)?;
        let header = Header {
            encoding,
            width,
            height,
            max_value,
        };
        Self::check_header_size(&header)?;
        Ok(header)
    }

    fn check_header_size(header: &Header) -> crate::Result<()> {
        if header.sample_count().is_none() {
            return Err(Error::InvalidDimensions {
                width: header.width,
                height: header.height,
                channels: header.encoding.channels(),
            });
        }
        Ok(())
    }

    fn parse_magic_number(&mut self) -> crate::Result<Encoding> {
        let token = self
            .tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                MAGIC_NUMBER_TOKEN_NAME,
            ))?;
        match token.as_str() {
            "P3" => Ok(Encoding::AsciiPixMap),
            "P5" => Ok(Encoding::BinaryGrayMap),
            "P6" => Ok(Encoding::BinaryPixMap),
            _ => Err(Error::PPMFileDoesNotContainRequiredToken(
                MAGIC_NUMBER_TOKEN_NAME,
            )),
        }
    }

    fn parse_header_value<V: std::str::FromStr>(
        &mut self,
        token_name: &'static str,
    ) -> crate::Result<V> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(token_name))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))
    }

    fn check_max_value(max_value: u16) -> crate::Result<()> {
        if max_value == 0 || max_value > u8::MAX as u16 {
            return Err(Error::UnsupportedMaxValue(max_value));
        }
        Ok(())
    }

    fn parse_ascii_samples(&mut self, max_value: u16) -> crate::Result<Vec<u8>> {
        let mut samples = Vec::new();
        for token in self.tokenizer.by_ref() {
            let component: u16 = token
                .parse()
                .map_err(|_| Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))?;
            samples.push(Self::scale_sample(component, max_value)?);
        }
        Self::check_pixel_was_complete(&samples)?;
        Ok(samples)
    }

    fn parse_binary_samples(&mut self, max_value: u16) -> crate::Result<Vec<u8>> {
        self.tokenizer
            .read_remaining_bytes()
            .map_err(|_| Error::PPMFileDoesNotContainRequiredToken(BINARY_IMAGE_DATA_TOKEN_NAME))?
            .into_iter()
            .map(|sample| Self::scale_sample(sample as u16, max_value))
            .collect()
    }

    fn scale_sample(sample: u16, max_value: u16) -> crate::Result<u8> {
        if sample > max_value {
            return Err(Error::ParsingOfTokenFailed(
                COLOR_COMPONENT_VALUE_TOKEN_NAME,
            ));
        }
        let max_value = max_value as u32;
        let scaled = (sample as u32 * u8::MAX as u32 + max_value / 2) / max_value;
        Ok(scaled as u8)
    }

    fn check_pixel_was_complete(samples: &[u8]) -> crate::Result<()> {
        let remainder = samples.len() % 3;
        if remainder != 0 {
            return Err(Error::IncompletePixelParsed(remainder));
        }
        Ok(())
    }

    fn check_sample_count_matches_header(samples: &[u8], header: &Header) -> crate::Result<()> {
        if Some(samples.len()) != header.sample_count() {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(())
    }
}
