use std::{
    fs::{File, OpenOptions},
    io::BufWriter,
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use error::Error;
pub use raster::{
    brush::BrushTexture,
    reader::{ppm::PpmImageReader, ImageReader},
    shape::Rectangle,
    writer::{png::PngImageWriter, ppm::PpmImageWriter, ImageFormat, ImageWriter},
    ChannelOrder, RasterBuffer,
};

mod cli;
mod error;
mod logger;
mod raster;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    output_file: PathBuf,
    width: u32,
    height: u32,
    top_left: (u32, u32),
    bottom_right: (u32, u32),
    color: Vec<u8>,
    channel_order: ChannelOrder,
    format: Option<ImageFormat>,
}

impl Arguments {
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.to_string_lossy().into_owned(), e)
        })
}

fn channels_for_color(color: &[u8]) -> Result<u8> {
    u8::try_from(color.len()).map_err(|_| Error::TooManyColorComponents(color.len()))
}

/// Allocates the raster and fills the rectangle described by `arguments`.
pub fn render_test_image(arguments: &Arguments) -> Result<RasterBuffer> {
    let channels = channels_for_color(&arguments.color)?;
    let mut image = RasterBuffer::with_channel_order(
        arguments.width,
        arguments.height,
        channels,
        arguments.channel_order,
    )?;
    logger::log_raster_summary("Allocated", image.width(), image.height(), image.channels());
    let rectangle = Rectangle::new(arguments.top_left, arguments.bottom_right);
    image.fill_rectangle(&rectangle, &arguments.color)?;
    Ok(image)
}

/// Writes `image` to `file_path`, the format is derived from the extension
/// unless given.
pub fn write_image_file(
    image: &RasterBuffer,
    file_path: &Path,
    format: Option<ImageFormat>,
) -> Result<()> {
    let format = match format {
        Some(format) => format,
        None => ImageFormat::from_path(file_path, image.channels())?,
    };
    let output_file = open_output_file(file_path)?;
    let output_file_writer = BufWriter::new(&output_file);
    log::info!("Writing {:?} to {}", format, file_path.display());
    match format {
        ImageFormat::Png => PngImageWriter::new(output_file_writer, image).write_image(),
        ImageFormat::Ppm => PpmImageWriter::new(output_file_writer, image).write_image(),
    }
}

pub fn generate_test_image(arguments: &Arguments) -> Result<()> {
    let image = render_test_image(arguments)?;
    write_image_file(&image, &arguments.output_file, arguments.format)
}
