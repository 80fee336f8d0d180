//! Read one register from a device and print it in every interpretation.
//!
//! Run with:
//!   RUST_LOG=i2creg_channel=trace cargo run --example read-register --features demo -- \
//!     --bus 1 --address 0x48 --register 0x00 --delay-ms 5

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "read-register", about = "Read one I2C register")]
struct Args {
    /// Bus number (`/dev/i2c-<bus>`).
    #[arg(long, env = "I2CREG_BUS")]
    bus: u32,

    /// 7-bit device address, decimal or 0x-prefixed hex.
    #[arg(long, value_parser = parse_byte)]
    address: u8,

    /// Register to read, decimal or 0x-prefixed hex.
    #[arg(long, value_parser = parse_byte)]
    register: u8,

    /// Settle delay between register select and read.
    #[arg(long, value_name = "MS", default_value_t = 0)]
    delay_ms: u64,
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|err| format!("invalid byte {s:?}: {err}"))
}

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::time::Duration;

    use i2creg::channel::{RegisterChannel, TracingObserver};
    use tracing_subscriber::EnvFilter;

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_target(false)
        .init();

    let delay = Duration::from_millis(args.delay_ms);
    let register = args.register;

    let mut channel =
        RegisterChannel::bind(args.address, args.bus)?.with_observer(TracingObserver);
    eprintln!("Bound {channel:?}");

    let byte = channel.read_u8_with_delay(register, delay)?;
    let word = channel.read_u16_be_with_delay(register, delay)?;
    let word_le = channel.read_u16_le_with_delay(register, delay)?;
    let signed = channel.read_i16_be_with_delay(register, delay)?;
    let signed_le = channel.read_i16_le_with_delay(register, delay)?;

    println!("u8      {byte}");
    println!("u16 be  {word} (0x{word:04x})");
    println!("u16 le  {word_le} (0x{word_le:04x})");
    println!("i16 be  {signed}");
    println!("i16 le  {signed_le}");

    channel.close()?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn main() {
    let _ = Args::parse();
    eprintln!("read-register needs the Linux i2c-dev interface");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_decimal_bytes() {
        let args = Args::try_parse_from([
            "read-register",
            "--bus",
            "1",
            "--address",
            "0x48",
            "--register",
            "16",
            "--delay-ms",
            "5",
        ])
        .expect("args should parse");

        assert_eq!(args.bus, 1);
        assert_eq!(args.address, 0x48);
        assert_eq!(args.register, 0x10);
        assert_eq!(args.delay_ms, 5);
    }

    #[test]
    fn delay_defaults_to_zero() {
        let args = Args::try_parse_from([
            "read-register",
            "--bus",
            "0",
            "--address",
            "0X20",
            "--register",
            "0x00",
        ])
        .expect("args should parse");

        assert_eq!(args.delay_ms, 0);
    }

    #[test]
    fn rejects_out_of_range_byte() {
        let err = Args::try_parse_from([
            "read-register",
            "--bus",
            "1",
            "--address",
            "0x148",
            "--register",
            "0",
        ])
        .expect_err("address wider than a byte should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
