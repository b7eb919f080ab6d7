use serial_test::serial;
use toggle_logger::{LevelFilter, Logger};

#[test]
#[serial]
fn console_only_logger_has_no_file_output() {
    let logger = Logger::builder()
        .name("integration-console-only")
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    assert!(!logger.has_file_output());
}
