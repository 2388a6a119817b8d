//! `linelog` CLI
//!
//! Sends lines read from stdin through a `linelog` logger to a serial device, stdout, a UDP
//! destination, or both.

#![forbid(unsafe_code)]

use std::io::{BufRead, Read, Write};
use std::net::SocketAddr;

use camino::Utf8PathBuf;
use clap::Parser;
use eyre::WrapErr;
use linelog::sink::{SerialSink, UdpSink};
use linelog::{
    ByteDump, HOSTED_LINE_CAPACITY, InterfaceSelection, Logger, Severity, render_bytes,
};
use linelog_std::{Config, StdLogger};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Bounded single-line logging to serial and UDP sinks.
///
/// Settings are read from the configuration file first; flags override them.
#[derive(Parser, Debug)]
#[command(disable_help_subcommand = true, version)]
struct Arguments {
    /// TOML configuration file.
    #[arg(long, env = "LINELOG_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Minimum severity of logged lines.
    #[arg(long, value_enum)]
    level: Option<Severity>,

    /// Which sinks receive lines.
    #[arg(long, value_enum)]
    interface: Option<InterfaceSelection>,

    /// Serial device node; stdout is used when no device is configured.
    #[arg(long)]
    serial: Option<Utf8PathBuf>,

    /// Link speed for a serial terminal.
    #[arg(long)]
    baud_rate: Option<u32>,

    /// UDP destination as `address:port`.
    #[arg(long)]
    udp: Option<SocketAddr>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Log every line read from stdin.
    Pipe {
        /// Severity of the logged lines.
        #[arg(long, value_enum, default_value_t = Severity::Info)]
        severity: Severity,

        /// Name reported as the source file of each line.
        #[arg(long, default_value = "stdin")]
        source: String,
    },

    /// Log stdin as byte dumps.
    Dump {
        /// Bytes per dump.
        #[arg(long, default_value_t = 16)]
        chunk: usize,

        /// Severity of the logged dumps.
        #[arg(long, value_enum, default_value_t = Severity::Debug)]
        severity: Severity,

        /// Print the bare dumps to stdout instead of logging them.
        #[arg(long)]
        raw: bool,
    },
}

impl Arguments {
    /// Loads the configuration file, if any, and applies the flags on top.
    fn config(&self) -> eyre::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(interface) = self.interface {
            config.interface = interface;
        }
        if let Some(device) = &self.serial {
            config.serial.device = Some(device.clone());
        }
        if let Some(baud_rate) = self.baud_rate {
            config.serial.baud_rate = baud_rate;
        }
        if let Some(destination) = self.udp {
            config.udp.destination = Some(destination);
        }

        Ok(config)
    }
}

fn main() -> eyre::Result<()> {
    let args = Arguments::parse();

    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .with_env_var("LINELOG_CLI_LOG")
                    .from_env()?,
            )
            .with_writer(std::io::stderr)
            .compact()
            .finish(),
    )?;

    let config = args.config()?;

    match args.command {
        Command::Pipe { severity, source } => {
            let logger = open(&config)?;
            pipe(&logger, severity, &source, std::io::stdin().lock())?;
            report_faults(&logger);
        }
        Command::Dump {
            chunk,
            severity,
            raw,
        } => {
            eyre::ensure!(chunk > 0, "--chunk must be at least 1");
            let mut input = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut input)
                .wrap_err("reading stdin")?;

            if raw {
                dump_raw(&input, chunk, std::io::stdout().lock())?;
            } else {
                let logger = open(&config)?;
                dump(&logger, severity, &input, chunk);
                report_faults(&logger);
            }
        }
    }

    Ok(())
}

fn open(config: &Config) -> eyre::Result<StdLogger> {
    linelog_std::open(config).wrap_err("opening logger")
}

/// Logs each line of `input`, numbering lines from one.
fn pipe<S: SerialSink, U: UdpSink, const C: usize>(
    logger: &Logger<S, U, C>,
    severity: Severity,
    source: &str,
    input: impl BufRead,
) -> eyre::Result<()> {
    for (index, line) in input.lines().enumerate() {
        let line = line.wrap_err("reading stdin")?;
        let number = u32::try_from(index + 1).unwrap_or(u32::MAX);
        logger.log(severity, source, number, format_args!("{line}"));
    }
    Ok(())
}

/// Logs `input` in dumps of `chunk` bytes, numbered by their offset.
fn dump<S: SerialSink, U: UdpSink, const C: usize>(
    logger: &Logger<S, U, C>,
    severity: Severity,
    input: &[u8],
    chunk: usize,
) {
    for (index, bytes) in input.chunks(chunk).enumerate() {
        let offset = u32::try_from(index * chunk).unwrap_or(u32::MAX);
        logger.log(severity, "stdin", offset, format_args!("{}", ByteDump(bytes)));
    }
}

/// Writes one bounded dump line per `chunk` bytes of `input`.
fn dump_raw(input: &[u8], chunk: usize, mut output: impl Write) -> eyre::Result<()> {
    for bytes in input.chunks(chunk) {
        let rendered = render_bytes::<HOSTED_LINE_CAPACITY>(bytes);
        writeln!(output, "{rendered}").wrap_err("writing stdout")?;
    }
    Ok(())
}

fn report_faults<S: SerialSink, U: UdpSink, const C: usize>(logger: &Logger<S, U, C>) {
    let faults = logger.faults();
    if faults.total() > 0 {
        tracing::warn!(
            serial = faults.serial,
            udp = faults.udp,
            "some lines could not be delivered"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use clap::{CommandFactory, Parser};
    use linelog::test_sinks::{RecordingSerial, RecordingUdp, SerialRecord};
    use linelog::{InterfaceSelection, Logger, Severity};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::{Arguments, Command, dump, dump_raw, pipe};

    fn serial_logger() -> (Logger<RecordingSerial, RecordingUdp>, SerialRecord) {
        let logger = Logger::new(InterfaceSelection::Serial);
        let (serial, record) = RecordingSerial::new();
        logger.set_serial_sink(serial).unwrap();
        (logger, record)
    }

    #[test]
    fn verify_cli() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let args = Arguments::try_parse_from([
            "linelog",
            "--level",
            "warn",
            "--interface",
            "udp",
            "--udp",
            "192.0.2.10:5140",
            "pipe",
        ])
        .unwrap();

        let config = args.config().unwrap();

        assert_eq!(config.level, Severity::Warn);
        assert_eq!(config.interface, InterfaceSelection::Udp);
        assert_eq!(
            config.udp.destination,
            Some("192.0.2.10:5140".parse().unwrap())
        );
        assert_eq!(config.serial.device, None);
    }

    #[test]
    fn pipe_defaults() {
        let args = Arguments::try_parse_from(["linelog", "pipe"]).unwrap();

        match args.command {
            Command::Pipe { severity, source } => {
                assert_eq!(severity, Severity::Info);
                assert_eq!(source, "stdin");
            }
            command => panic!("unexpected command {command:?}"),
        }
    }

    #[test_case(&[], 4, "")]
    #[test_case(&[1, 2, 3], 4, "<1:2:3>\n")]
    #[test_case(&[1, 2, 3, 4, 5], 2, "<1:2>\n<3:4>\n<5>\n")]
    fn raw_dumps(input: &[u8], chunk: usize, expected: &str) {
        let mut output = Vec::new();
        dump_raw(input, chunk, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn pipe_numbers_lines_from_one() {
        let (logger, record) = serial_logger();

        pipe(
            &logger,
            Severity::Warn,
            "boot.log",
            Cursor::new("first\nsecond\n\nfourth"),
        )
        .unwrap();

        assert_eq!(
            record.lines(),
            [
                "WARN  boot.log:1: first",
                "WARN  boot.log:2: second",
                "WARN  boot.log:3: ",
                "WARN  boot.log:4: fourth",
            ]
        );
    }

    #[test]
    fn pipe_rejects_invalid_utf8() {
        let (logger, record) = serial_logger();

        let result = pipe(&logger, Severity::Info, "stdin", Cursor::new(b"ok\n\xFF\n"));

        assert!(result.is_err());
        assert_eq!(record.lines(), ["INFO  stdin:1: ok"]);
    }

    #[test]
    fn dump_numbers_lines_by_offset() {
        let (logger, record) = serial_logger();

        dump(&logger, Severity::Debug, &[1, 2, 3, 4, 5], 2);

        assert_eq!(
            record.lines(),
            [
                "DEBUG stdin:0: <1:2>",
                "DEBUG stdin:2: <3:4>",
                "DEBUG stdin:4: <5>",
            ]
        );
    }

    #[test]
    fn dump_below_threshold_logs_nothing() {
        let (logger, record) = serial_logger();

        dump(&logger, Severity::Trace, &[1, 2, 3], 1);

        assert_eq!(record.lines(), Vec::<String>::new());
    }
}
