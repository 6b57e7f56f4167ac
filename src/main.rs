use std::env::args_os;
use std::process::ExitCode;

use raster_fixture::{generate_test_image, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match generate_test_image(&arguments) {
        Ok(_) => {
            println!("Created {}", arguments.output_file().display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Generation failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
