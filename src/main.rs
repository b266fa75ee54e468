// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use wavedecode::{
    decode_avalon, decode_spi, decode_uart, load_vcd, AvalonLines, DecodedEvent, Signal, SpiLines,
    SpiMode, VCD,
};

#[derive(Parser)]
#[command(author, version, about = "Decode protocol transactions from VCD dumps")]
struct Cli {
    /// The path to the file to read
    path: PathBuf,

    /// More logging, repeat for trace output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the dump's header information
    Info,
    /// List the signals in the dump
    Signals {
        /// Keep bit-blasted buses as separate bits
        #[arg(long)]
        raw: bool,
    },
    /// Decode an 8N1 UART line
    Uart {
        #[arg(long)]
        signal: String,
        #[arg(long, default_value_t = 9600)]
        baud: u32,
    },
    /// Decode an SPI bus
    Spi(SpiArgs),
    /// Decode an Avalon-MM interface
    Avalon(AvalonArgs),
}

#[derive(Args)]
struct SpiArgs {
    #[arg(long)]
    sclk: String,
    #[arg(long)]
    mosi: Option<String>,
    #[arg(long)]
    miso: Option<String>,
    /// Active low chip select
    #[arg(long)]
    cs: Option<String>,
    /// Clock idles high
    #[arg(long)]
    cpol: bool,
    /// Sample on the trailing clock edge
    #[arg(long)]
    cpha: bool,
}

#[derive(Args)]
struct AvalonArgs {
    #[arg(long)]
    clk: String,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    read: Option<String>,
    #[arg(long)]
    write: Option<String>,
    #[arg(long)]
    writedata: Option<String>,
    #[arg(long)]
    readdata: Option<String>,
    #[arg(long)]
    waitrequest: Option<String>,
    #[arg(long)]
    readdatavalid: Option<String>,
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::new().filter_level(level).init();
}

fn lookup<'a>(vcd: &'a VCD, name: &str) -> Result<&'a Signal, String> {
    vcd.signal(name).ok_or_else(|| {
        format!(
            "Error near {}:{}. No signal named `{name}` in the dump.",
            file!(),
            line!()
        )
    })
}

fn lookup_optional<'a>(vcd: &'a VCD, name: &Option<String>) -> Result<Option<&'a Signal>, String> {
    name.as_deref().map(|name| lookup(vcd, name)).transpose()
}

fn print_events(events: &[DecodedEvent]) {
    for event in events {
        println!("{event}");
    }
    log::info!("{} events decoded", events.len());
}

fn run(cli: &Cli) -> Result<(), String> {
    let now = Instant::now();
    let mut vcd = load_vcd(&cli.path)?;
    if !matches!(cli.command, Command::Signals { raw: true }) {
        vcd.reconstruct_vectors();
    }
    log::info!("Parsed VCD file {} : {:.2?}", cli.path.display(), now.elapsed());

    match &cli.command {
        Command::Info => {
            let metadata = &vcd.metadata;
            println!("timescale : {}", metadata.timescale);
            if let Some(date) = &metadata.date {
                println!("date      : {date}");
            }
            if let Some(version) = &metadata.version {
                println!("version   : {}", version.0);
            }
            println!("max time  : {}", metadata.max_time);
            println!("signals   : {}", vcd.signals.len());
        }
        Command::Signals { .. } => {
            for signal in vcd.signals() {
                println!(
                    "{:<48} {:>4} {:?} ({} changes)",
                    signal.name,
                    signal.size,
                    signal.signal_type,
                    signal.history.len()
                );
            }
        }
        Command::Uart { signal, baud } => {
            let line = lookup(&vcd, signal)?;
            print_events(&decode_uart(line, *baud, &vcd.metadata.timescale));
        }
        Command::Spi(args) => {
            let lines = SpiLines {
                sclk: lookup(&vcd, &args.sclk)?,
                mosi: lookup_optional(&vcd, &args.mosi)?,
                miso: lookup_optional(&vcd, &args.miso)?,
                cs: lookup_optional(&vcd, &args.cs)?,
            };
            print_events(&decode_spi(&lines, SpiMode::new(args.cpol, args.cpha)));
        }
        Command::Avalon(args) => {
            let lines = AvalonLines {
                clk: lookup(&vcd, &args.clk)?,
                address: lookup_optional(&vcd, &args.address)?,
                read: lookup_optional(&vcd, &args.read)?,
                write: lookup_optional(&vcd, &args.write)?,
                writedata: lookup_optional(&vcd, &args.writedata)?,
                readdata: lookup_optional(&vcd, &args.readdata)?,
                waitrequest: lookup_optional(&vcd, &args.waitrequest)?,
                readdatavalid: lookup_optional(&vcd, &args.readdatavalid)?,
            };
            print_events(&decode_avalon(&lines));
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
