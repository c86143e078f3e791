//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::PortError;

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("DATABASE_URL is not set");

    assert!(matches!(error, CoreError::Configuration(ref msg) if msg == "DATABASE_URL is not set"));
    assert_eq!(error.to_string(), "Configuration error: DATABASE_URL is not set");
}

#[test]
fn test_port_error_display() {
    let error = PortError::query("relation \"bills\" does not exist");
    let display = format!("{}", error);

    assert!(display.starts_with("Query error"));
}

#[test]
fn test_port_error_source_chain() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = PortError::Connection {
        message: "connect failed".to_string(),
        source: Some(Box::new(io)),
    };

    let source = std::error::Error::source(&error).expect("source should be kept");
    assert_eq!(source.to_string(), "refused");
}
