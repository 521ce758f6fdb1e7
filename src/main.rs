//! Command-line front end for the Everblu Cyble read-out.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "everblu-cli", version)]
#[command(about = "Read an Itron Everblu Cyble water meter through a CC1101 transceiver")]
struct Cli {
    /// Meter production year, the two digits from the label
    #[arg(short, long)]
    year: u8,

    /// Meter serial number, without the year prefix
    #[arg(short, long)]
    serial: u32,

    /// Path of the persisted meter frequency
    #[arg(long, default_value = "everblu-frequency.json")]
    store: PathBuf,

    /// BCM number of the GPIO wired to the CC1101 GDO0 line
    #[arg(long, default_value_t = 24)]
    gdo0_pin: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read the meter once and publish the reading
    Read,
    /// Scan the band for the meter, ignoring any stored frequency
    Scan,
    /// Dump the chip version, configuration registers and power table
    Registers,
}

fn main() -> Result<()> {
    everblu_rs::init_logger();
    let cli = Cli::parse();
    run(cli)
}

#[cfg(feature = "raspberry-pi")]
fn run(cli: Cli) -> Result<()> {
    use anyhow::bail;
    use everblu_rs::radio::hal::RaspberryPiHal;
    use everblu_rs::util::{format_hex_compact, pretty_hex};
    use everblu_rs::{Cc1101, EverbluCyble, JsonFrequencyStore, LogPublisher, ReadingPublisher};

    let hal = RaspberryPiHal::new(cli.gdo0_pin)?;
    let mut radio = Cc1101::new(hal);
    let mut store = JsonFrequencyStore::new(&cli.store);

    match cli.command {
        Command::Read => {
            let mut meter = EverbluCyble::new(radio, cli.year, cli.serial);
            if meter.attach(&mut store)?.is_none() {
                bail!("no meter answered in the scan band");
            }
            let reading = meter.read_meter()?;
            println!("{}", serde_json::to_string_pretty(&reading)?);
            LogPublisher.publish(&reading)?;
        }
        Command::Scan => {
            let mut meter = EverbluCyble::new(radio, cli.year, cli.serial);
            match meter.look_for_meter(&mut store)? {
                Some(mhz) => println!("Meter found at {mhz:.4} MHz"),
                None => bail!("no meter answered in the scan band"),
            }
        }
        Command::Registers => {
            radio.set_frequency(everblu_rs::constants::FREQ_MIN_MHZ)?;
            let (partnum, version) = radio.chip_version()?;
            println!("partnum {partnum:#04x} version {version:#04x}");
            println!("{}", pretty_hex(&radio.read_config_registers()?, 16));
            println!("patable {}", format_hex_compact(&radio.read_pa_table()?));
        }
    }
    Ok(())
}

#[cfg(not(feature = "raspberry-pi"))]
fn run(_cli: Cli) -> Result<()> {
    anyhow::bail!("this build has no radio backend; rebuild with --features raspberry-pi")
}
