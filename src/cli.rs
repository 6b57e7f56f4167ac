use crate::raster::writer::ImageFormat;
use crate::raster::ChannelOrder;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

const DEFAULT_OUTPUT_FILE: &str = "test_image.png";
const DEFAULT_WIDTH: u32 = 256;
const DEFAULT_HEIGHT: u32 = 256;
const DEFAULT_TOP_LEFT: &str = "64,64";
const DEFAULT_BOTTOM_RIGHT: &str = "192,192";
const DEFAULT_COLOR: &str = "255,0,0";
const MAX_COLOR_COMPONENTS: usize = 4;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_output_file_argument(command);
        let command = Self::register_width_argument(command);
        let command = Self::register_height_argument(command);
        let command = Self::register_top_left_argument(command);
        let command = Self::register_bottom_right_argument(command);
        let command = Self::register_color_argument(command);
        let command = Self::register_channel_order_argument(command);
        Self::register_format_argument(command)
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_width_argument(command: Command) -> Command {
        command.arg(Self::create_width_argument())
    }

    fn register_height_argument(command: Command) -> Command {
        command.arg(Self::create_height_argument())
    }

    fn register_top_left_argument(command: Command) -> Command {
        command.arg(Self::create_top_left_argument())
    }

    fn register_bottom_right_argument(command: Command) -> Command {
        command.arg(Self::create_bottom_right_argument())
    }

    fn register_color_argument(command: Command) -> Command {
        command.arg(Self::create_color_argument())
    }

    fn register_channel_order_argument(command: Command) -> Command {
        command.arg(Self::create_channel_order_argument())
    }

    fn register_format_argument(command: Command) -> Command {
        command.arg(Self::create_format_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to the generated image, PNG or PPM")
            .value_parser(value_parser!(PathBuf))
            .default_value(DEFAULT_OUTPUT_FILE)
    }

    fn create_width_argument() -> Arg {
        arg!(width: -W --width <PIXELS> "Width of the image")
            .default_value(DEFAULT_WIDTH.to_string())
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_height_argument() -> Arg {
        arg!(height: -H --height <PIXELS> "Height of the image")
            .default_value(DEFAULT_HEIGHT.to_string())
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_top_left_argument() -> Arg {
        arg!(top_left: --top_left <X_Y> "Inclusive top left corner of the rectangle")
            .default_value(DEFAULT_TOP_LEFT)
            .value_parser(parse_point)
    }

    fn create_bottom_right_argument() -> Arg {
        arg!(bottom_right: --bottom_right <X_Y> "Inclusive bottom right corner of the rectangle")
            .default_value(DEFAULT_BOTTOM_RIGHT)
            .value_parser(parse_point)
    }

    fn create_color_argument() -> Arg {
        arg!(color: -c --color <COMPONENTS> "Fill color, one value per channel")
            .default_value(DEFAULT_COLOR)
            .value_parser(parse_color)
    }

    fn create_channel_order_argument() -> Arg {
        arg!(channel_order: -o --channel_order <ORDER> "Order of the color components")
            .default_value("RGB")
            .value_parser(value_parser!(ChannelOrder))
    }

    fn create_format_argument() -> Arg {
        arg!(format: -f --format <FORMAT> "Output format, derived from the file extension if unset")
            .required(false)
            .value_parser(value_parser!(ImageFormat))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            output_file: Self::extract_output_file_argument(matches),
            width: Self::extract_width_argument(matches),
            height: Self::extract_height_argument(matches),
            top_left: Self::extract_top_left_argument(matches),
            bottom_right: Self::extract_bottom_right_argument(matches),
            color: Self::extract_color_argument(matches),
            channel_order: Self::extract_channel_order_argument(matches),
            format: Self::extract_format_argument(matches),
        }
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Output file must be provided, but was unset.")
            .clone()
    }

    fn extract_width_argument(matches: &ArgMatches) -> u32 {
        *matches
            .get_one::<u32>("width")
            .expect("Width must be provided, but was unset.")
    }

    fn extract_height_argument(matches: &ArgMatches) -> u32 {
        *matches
            .get_one::<u32>("height")
            .expect("Height must be provided, but was unset.")
    }

    fn extract_top_left_argument(matches: &ArgMatches) -> (u32, u32) {
        *matches
            .get_one::<(u32, u32)>("top_left")
            .expect("Top left corner must be provided, but was unset.")
    }

    fn extract_bottom_right_argument(matches: &ArgMatches) -> (u32, u32) {
        *matches
            .get_one::<(u32, u32)>("bottom_right")
            .expect("Bottom right corner must be provided, but was unset.")
    }

    fn extract_color_argument(matches: &ArgMatches) -> Vec<u8> {
        matches
            .get_one::<Vec<u8>>("color")
            .expect("Color must be provided, but was unset.")
            .clone()
    }

    fn extract_channel_order_argument(matches: &ArgMatches) -> ChannelOrder {
        matches
            .get_one::<ChannelOrder>("channel_order")
            .expect("Channel order must be provided, but was unset.")
            .to_owned()
    }

    fn extract_format_argument(matches: &ArgMatches) -> Option<ImageFormat> {
        matches.get_one::<ImageFormat>("format").copied()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_point(value: &str) -> Result<(u32, u32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("'{}' is not of the form X,Y", value))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("Invalid x coordinate '{}': {}", x, e))?;
    let y = y
        .trim()
        .parse()
        .map_err(|e| format!("Invalid y coordinate '{}': {}", y, e))?;
    Ok((x, y))
}

fn parse_color(value: &str) -> Result<Vec<u8>, String> {
    let components = value
        .split(',')
        .map(|component| {
            component
                .trim()
                .parse::<u8>()
                .map_err(|e| format!("Invalid color component '{}': {}", component, e))
        })
        .collect::<Result<Vec<u8>, String>>()?;
    if components.len() > MAX_COLOR_COMPONENTS {
        return Err(format!(
            "At most {} color components are supported, but got {}",
            MAX_COLOR_COMPONENTS,
            components.len()
        ));
    }
    Ok(components)
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::{parse_color, parse_point, CLIParser, ChannelOrder, ImageFormat};

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_output_file_argument() {
        let output_file_name = "fixture.ppm";
        let command = Command::new("test");
        let command = CLIParser::register_output_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, output_file_name]);
        let output_file = CLIParser::extract_output_file_argument(&matches);
        assert_eq!(output_file.file_name().unwrap(), output_file_name);
    }

    #[test]
    fn parse_width_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_width_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--width", "640"]);
        assert_eq!(CLIParser::extract_width_argument(&matches), 640);
    }

    #[test]
    fn parse_zero_height_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_height_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-H", "0"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Zero height not detected");
        }
    }

    #[test]
    fn parse_corner_arguments() {
        let command = Command::new("test");
        let command = CLIParser::register_top_left_argument(command);
        let command = CLIParser::register_bottom_right_argument(command);
        let matches = command.get_matches_from(vec![
            PROGRAM_NAME_ARGUMENT,
            "--top_left",
            "1,2",
            "--bottom_right",
            "30, 40",
        ]);
        assert_eq!(CLIParser::extract_top_left_argument(&matches), (1, 2));
        assert_eq!(CLIParser::extract_bottom_right_argument(&matches), (30, 40));
    }

    #[test]
    fn parse_color_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_color_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-c", "0,128,255,64"]);
        assert_eq!(
            CLIParser::extract_color_argument(&matches),
            vec![0, 128, 255, 64]
        );
    }

    #[test]
    fn parse_color_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_color_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--color", "0,256,0"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Illegal color component not detected");
        }
    }

    #[test]
    fn parse_channel_order_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_channel_order_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--channel_order", "BGR"]);
        assert_eq!(
            CLIParser::extract_channel_order_argument(&matches),
            ChannelOrder::Bgr
        );
    }

    #[test]
    fn parse_format_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_format_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-f", "PPM"]);
        assert_eq!(
            CLIParser::extract_format_argument(&matches),
            Some(ImageFormat::Ppm)
        );
    }

    #[test]
    fn point_and_color_value_parsers() {
        assert_eq!(parse_point("64,192"), Ok((64, 192)));
        assert!(parse_point("64").is_err());
        assert!(parse_point("-1,3").is_err());
        assert_eq!(parse_color("7"), Ok(vec![7]));
        assert!(parse_color("1,2,3,4,5").is_err());
        assert!(parse_color("").is_err());
    }

    #[test]
    fn parse_defaults_only() {
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT]);
        assert_eq!(
            arguments.output_file.file_name().unwrap(),
            "test_image.png",
            "output file does not match"
        );
        assert_eq!((arguments.width, arguments.height), (256, 256));
        assert_eq!(arguments.top_left, (64, 64), "top_left does not match");
        assert_eq!(
            arguments.bottom_right,
            (192, 192),
            "bottom_right does not match"
        );
        assert_eq!(arguments.color, vec![255, 0, 0], "color does not match");
        assert_eq!(arguments.channel_order, ChannelOrder::Rgb);
        assert_eq!(arguments.format, None);
    }
}
