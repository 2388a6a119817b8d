#![expect(missing_docs, reason = "tests")]

use std::net::UdpSocket;
use std::time::Duration;

use camino::Utf8Path;
use linelog::{ConfigError, InterfaceSelection, Severity, SinkFaults, Transport};
use linelog_std::{Config, OpenError, SerialConfig, UdpConfig};
use pretty_assertions::assert_eq;

fn receiver() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    socket
}

#[test]
fn udp_datagram_carries_bare_line() {
    let receiver = receiver();
    let config = Config {
        level: Severity::Info,
        interface: InterfaceSelection::Udp,
        udp: UdpConfig {
            destination: Some(receiver.local_addr().unwrap()),
            bind: Some("127.0.0.1:0".parse().unwrap()),
            ..UdpConfig::default()
        },
        ..Config::default()
    };

    let logger = linelog_std::open(&config).unwrap();
    logger.warn("src/disk.rs", 31, format_args!("disk at {}%", 91));
    logger.debug("src/disk.rs", 32, format_args!("hidden"));

    let mut buffer = [0; 512];
    let (read, _) = receiver.recv_from(&mut buffer).unwrap();
    assert_eq!(&buffer[..read], b"WARN  src/disk.rs:31: disk at 91%");
    assert_eq!(logger.faults(), SinkFaults::default());
}

#[test]
fn serial_file_receives_terminated_lines() {
    let directory = tempfile::tempdir().unwrap();
    let path = Utf8Path::from_path(directory.path())
        .unwrap()
        .join("serial");
    std::fs::write(&path, b"").unwrap();

    let config = Config {
        interface: InterfaceSelection::Serial,
        serial: SerialConfig {
            device: Some(path.clone()),
            ..SerialConfig::default()
        },
        ..Config::default()
    };

    let logger = linelog_std::open(&config).unwrap();
    linelog::error!(logger, "failure code {}", 12345);
    linelog::info!(logger, "second");
    drop(logger.take_serial_sink());

    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("ERROR "));
    assert!(lines[0].ends_with(": failure code 12345"));
    assert!(lines[1].ends_with(": second"));
    assert!(written.ends_with("\r\n"));
}

#[test]
fn both_sinks_receive_the_same_line() {
    let receiver = receiver();
    let directory = tempfile::tempdir().unwrap();
    let path = Utf8Path::from_path(directory.path())
        .unwrap()
        .join("serial");
    std::fs::write(&path, b"").unwrap();

    let config = Config {
        serial: SerialConfig {
            device: Some(path.clone()),
            ..SerialConfig::default()
        },
        udp: UdpConfig {
            destination: Some(receiver.local_addr().unwrap()),
            ..UdpConfig::default()
        },
        ..Config::default()
    };

    let logger = linelog_std::open(&config).unwrap();
    logger.info("main.rs", 7, format_args!("hello"));
    drop(logger.take_serial_sink());

    let mut buffer = [0; 512];
    let (read, _) = receiver.recv_from(&mut buffer).unwrap();
    assert_eq!(&buffer[..read], b"INFO  main.rs:7: hello");
    assert_eq!(
        std::fs::read(&path).unwrap(),
        b"INFO  main.rs:7: hello\r\n"
    );
}

#[test]
fn destination_without_udp_is_rejected() {
    let config = Config {
        interface: InterfaceSelection::Serial,
        udp: UdpConfig {
            destination: Some("127.0.0.1:9".parse().unwrap()),
            ..UdpConfig::default()
        },
        ..Config::default()
    };

    let error = linelog_std::open(&config).unwrap_err();

    assert!(matches!(
        error,
        OpenError::Config(ConfigError::TransportNotSelected(Transport::Udp))
    ));
}

#[test]
fn unsupported_baud_rate_is_ignored_for_plain_files() {
    let directory = tempfile::tempdir().unwrap();
    let path = Utf8Path::from_path(directory.path())
        .unwrap()
        .join("serial");
    std::fs::write(&path, b"").unwrap();

    let config = Config {
        interface: InterfaceSelection::Serial,
        serial: SerialConfig {
            device: Some(path),
            baud_rate: 12_345,
        },
        ..Config::default()
    };

    assert!(linelog_std::open(&config).is_ok());
}
