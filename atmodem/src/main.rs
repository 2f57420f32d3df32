//! Operator front-end: pick a serial port and drive the modem.
//!
//! # Usage
//!
//! ```bash
//! atmodem --port /dev/ttyUSB2 --baud 115200 --mode test --apn internet
//! atmodem --port /dev/ttyUSB2 --mode manual
//! atmodem            # prompts for port, baud rate and mode
//! ```

use std::process::ExitCode;

use clap::Parser;
use log::error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};

use atmodem::transport::available_ports;
use atmodem::transport::config::parse_baud_rate;
use atmodem::{DriverBuilder, Mode, SerialConfig, SerialTransport, SessionParameters};

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a cellular modem with AT commands")]
struct Args {
    /// Serial port of the modem (prompted for when omitted)
    #[arg(short, long, env = "ATMODEM_PORT")]
    port: Option<String>,

    /// Baud rate (prompted for when omitted)
    #[arg(short, long, value_parser = parse_baud_rate)]
    baud: Option<u32>,

    /// TEST (automated setup) or MANUAL (interactive)
    #[arg(short, long)]
    mode: Option<String>,

    /// PDP context id
    #[arg(long, default_value_t = 1)]
    cid: u32,

    /// PDP bearer type
    #[arg(long, default_value = "IP")]
    pdp_type: String,

    /// Access point name
    #[arg(long, default_value = "internet", env = "ATMODEM_APN")]
    apn: String,

    /// List serial ports and exit
    #[arg(short, long)]
    list: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), atmodem::Error> {
    let mut stdin = BufReader::new(tokio::io::stdin());

    let ports = available_ports()?;
    println!("usable serial ports:");
    for port in &ports {
        println!("- {}", port);
    }
    if args.list {
        return Ok(());
    }

    let path = match args.port {
        Some(port) => port,
        None => prompt(&mut stdin, "\nserial port: ").await?,
    };
    let baud_rate = match args.baud {
        Some(baud) => baud,
        None => parse_baud_rate(&prompt(&mut stdin, "\nbaud rate: ").await?)?,
    };
    let mode: Mode = match args.mode {
        Some(mode) => mode.parse()?,
        None => prompt(&mut stdin, "\nchoose mode (TEST / MANUAL): ")
            .await?
            .parse()?,
    };

    let config = SerialConfig::new(path).with_baud_rate(baud_rate);
    let transport = SerialTransport::open(&config)?;
    let mut driver = DriverBuilder::new().build(transport)?;

    let outcome = match mode {
        Mode::Automated => {
            println!("\nTEST MODE: sending AT commands...");
            let params = SessionParameters::new(args.cid, args.pdp_type, args.apn);
            driver.run_automated(&params).await.map(|report| {
                println!(
                    "\ntest finished: {} commands in {:.1?}",
                    report.steps.len(),
                    report.elapsed
                );
            })
        }
        Mode::Interactive => {
            println!("\nMANUAL MODE: enter commands, \"STOP\" to exit.");
            driver
                .run_interactive(&mut stdin, tokio::io::stdout())
                .await
                .map(|_| ())
        }
    };

    let closed = driver.close().await;
    outcome?;
    closed
}

/// Print `label` and read one trimmed line from the operator.
async fn prompt<R: AsyncBufRead + Unpin>(input: &mut R, label: &str) -> std::io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    input.read_line(&mut line).await?;
    Ok(line.trim().to_string())
}
