const LOGGER_CONFIG_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if let Err(e) = log4rs::init_file(LOGGER_CONFIG_FILE, Default::default()) {
        eprintln!("Logging disabled, unable to load {}: {}", LOGGER_CONFIG_FILE, e);
    }
}

pub fn log_raster_summary(stage: &str, width: u32, height: u32, channels: u8) {
    log::info!("{}: {}x{} raster, {} channels", stage, width, height, channels);
}
