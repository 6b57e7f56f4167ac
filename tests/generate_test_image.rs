use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use raster_fixture::{
    generate_test_image, render_test_image, CLIParser, Error, ImageReader, PpmImageReader,
};
use tempfile::TempDir;

const PROGRAM_NAME_ARGUMENT: &str = "test";
const RED: [u8; 3] = [255, 0, 0];
const BLACK: [u8; 3] = [0, 0, 0];

fn create_output_directory() -> TempDir {
    tempfile::tempdir().expect("Creation of temporary directory failed")
}

fn get_result_image_path(directory: &TempDir, file_name: &str) -> PathBuf {
    directory.path().join(file_name)
}

fn parse_arguments(output_file: &Path, options: &[&str]) -> raster_fixture::Arguments {
    let mut arguments = vec![PROGRAM_NAME_ARGUMENT, output_file.to_str().unwrap()];
    arguments.extend_from_slice(options);
    CLIParser::new().parse(arguments)
}

#[test]
fn test_generate_default_png() {
    let directory = create_output_directory();
    let result_image_path = get_result_image_path(&directory, "test_image.png");
    let arguments = parse_arguments(&result_image_path, &[]);
    generate_test_image(&arguments).expect("Generation failed");
    assert!(result_image_path.exists(), "Output file was not created");

    let image = image::open(&result_image_path)
        .expect("Output file is not a readable image")
        .to_rgb8();
    assert_eq!(image.dimensions(), (256, 256));
    assert_eq!(image.get_pixel(64, 64).0, RED);
    assert_eq!(image.get_pixel(0, 0).0, BLACK);
    assert_eq!(image.get_pixel(192, 192).0, RED);
    assert_eq!(image.get_pixel(193, 193).0, BLACK);
}

#[test]
fn test_generate_ppm_matches_rendered_raster() {
    let directory = create_output_directory();
    let result_image_path = get_result_image_path(&directory, "fixture.ppm");
    let arguments = parse_arguments(
        &result_image_path,
        &["-W", "32", "-H", "16", "--top_left", "4,2", "--bottom_right", "10,12", "-c", "0,0,255"],
    );
    generate_test_image(&arguments).expect("Generation failed");

    let input_file = File::open(&result_image_path).expect("Output file was not created");
    let written = PpmImageReader::new(BufReader::new(input_file))
        .read_image()
        .expect("Output file is not a valid PPM file");
    let rendered = render_test_image(&arguments).unwrap();
    assert_eq!(written.as_bytes(), rendered.as_bytes());
    assert_eq!(written.pixel(4, 2), Some(&[0, 0, 255][..]));
    assert_eq!(written.pixel(11, 2), Some(&BLACK[..]));
}

#[test]
fn test_generate_gray_ppm_with_explicit_format() {
    let directory = create_output_directory();
    let result_image_path = get_result_image_path(&directory, "fixture.raw");
    let arguments = parse_arguments(&result_image_path, &["-c", "200", "-f", "PPM"]);
    generate_test_image(&arguments).expect("Generation failed");

    let bytes = std::fs::read(&result_image_path).unwrap();
    assert!(bytes.starts_with(b"P5\n256 256\n255\n"));
    let written = PpmImageReader::new(bytes.as_slice()).read_image().unwrap();
    assert_eq!(written.pixel(100, 100), Some(&[200][..]));
    assert_eq!(written.pixel(10, 10), Some(&[0][..]));
}

#[test]
fn test_bgr_color_is_written_as_rgb() {
    let directory = create_output_directory();
    let result_image_path = get_result_image_path(&directory, "bgr.png");
    let arguments = parse_arguments(&result_image_path, &["-c", "0,0,255", "-o", "BGR"]);
    generate_test_image(&arguments).expect("Generation failed");

    let image = image::open(&result_image_path).unwrap().to_rgb8();
    assert_eq!(image.get_pixel(128, 128).0, RED);
}

#[test]
fn test_rectangle_outside_of_image() {
    let directory = create_output_directory();
    let result_image_path = get_result_image_path(&directory, "never.png");
    let arguments = parse_arguments(&result_image_path, &["--bottom_right", "256,192"]);
    match generate_test_image(&arguments) {
        Err(Error::OutOfBounds { .. }) => {}
        other => panic!("Expected out of bounds error, got {:?}", other),
    }
    assert!(!result_image_path.exists(), "Output file must not be created");
}

#[test]
fn test_unknown_output_extension() {
    let directory = create_output_directory();
    let result_image_path = get_result_image_path(&directory, "fixture.jpg");
    let arguments = parse_arguments(&result_image_path, &[]);
    assert!(matches!(
        generate_test_image(&arguments),
        Err(Error::UnsupportedOutputFormat(_))
    ));
}

#[test]
fn test_unwritable_output_path() {
    let directory = create_output_directory();
    let result_image_path = directory.path().join("missing").join("fixture.png");
    let arguments = parse_arguments(&result_image_path, &[]);
    match generate_test_image(&arguments) {
        Err(Error::UnableToOpenOutputFileForWriting(path, _)) => {
            assert!(path.ends_with("fixture.png"));
        }
        other => panic!("Expected open error, got {:?}", other),
    }
}
