//! BER simulation command-line interface
//!
//! - `bpsk` / `qpsk`: Monte-Carlo BER sweep against the closed-form curve
//! - `spectrum`: FFT of a test tone
//! - `constellation`: received constellation at one SNR

use std::f64::consts::PI;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_complex::Complex;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use psk_sim::channel::{add_noise, ebno_to_esno};
use psk_sim::fft::tone_spectrum;
use psk_sim::plot::{constellation_plot, GnuplotSink, PlotScale, PlotlyOutput, PlotlySink, SeriesSink};
use psk_sim::sweep::{default_snr_points, DEFAULT_NUM_BITS};
use psk_sim::{BerCurve, BerSweep, ModType, Modem, RandomSource, SweepConfig};

/// Log level used when RUST_LOG is not set
const LOG_LEVEL: &str = "info";

/// Default FFT size for the spectrum demo
const DEFAULT_FFT_SIZE: usize = 4096;

#[derive(Parser)]
#[command(name = "psk-sim")]
#[command(author, version, about = "BPSK/QPSK BER simulation over an AWGN channel", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// BPSK BER sweep
    Bpsk {
        #[command(flatten)]
        sweep: SweepArgs,

        /// Phase reference in radians, shared by modulator and demodulator
        #[arg(long, default_value_t = PI)]
        phase: f64,
    },

    /// QPSK BER sweep (SNR values are Eb/N0)
    Qpsk {
        #[command(flatten)]
        sweep: SweepArgs,
    },

    /// Magnitude spectrum of the sin/cos test tone
    Spectrum {
        /// FFT size
        #[arg(long, default_value_t = DEFAULT_FFT_SIZE)]
        size: usize,

        #[command(flatten)]
        output: PlotArgs,
    },

    /// Received constellation at a single Eb/N0
    Constellation {
        #[arg(long, value_enum, default_value_t = Modulation::Qpsk)]
        modulation: Modulation,

        /// Eb/N0 in dB
        #[arg(long, default_value_t = 10.0)]
        snr: f64,

        /// Number of symbols to draw
        #[arg(long, default_value_t = 1000)]
        symbols: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// HTML output file (opens a browser when omitted)
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SweepArgs {
    /// Bits transmitted per SNR point
    #[arg(long, default_value_t = DEFAULT_NUM_BITS)]
    bits: usize,

    /// Comma-separated SNR values in dB (default 0..=10 and 10.6)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    snr: Option<Vec<f64>>,

    /// Seed for reproducible sweeps
    #[arg(long)]
    seed: Option<u64>,

    /// Print the curves as JSON instead of tables
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    output: PlotArgs,
}

#[derive(Args)]
struct PlotArgs {
    /// Plot backend
    #[arg(long, value_enum, default_value_t = Backend::None)]
    plot: Backend,

    /// HTML output file for the plotly backend
    #[arg(long, default_value = "psk_sim.html")]
    html: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    None,
    Gnuplot,
    Html,
    Browser,
}

#[derive(Clone, Copy, ValueEnum)]
enum Modulation {
    Bpsk,
    Qpsk,
}

impl From<Modulation> for ModType {
    fn from(modulation: Modulation) -> Self {
        match modulation {
            Modulation::Bpsk => ModType::Bpsk,
            Modulation::Qpsk => ModType::Qpsk,
        }
    }
}

#[derive(Serialize)]
struct SweepReport<'a> {
    modulation: ModType,
    bits_per_point: usize,
    seed: Option<u64>,
    simulation: &'a BerCurve,
    theory: &'a BerCurve,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => LOG_LEVEL,
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(LOG_LEVEL));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}

fn random_source(seed: Option<u64>) -> RandomSource {
    match seed {
        Some(seed) => RandomSource::new_from_seed(seed),
        None => RandomSource::new_from_entropy(),
    }
}

fn make_sink(args: &PlotArgs, scale: PlotScale, title: &str, x_label: &str, y_label: &str) -> Option<Box<dyn SeriesSink>> {
    match args.plot {
        Backend::None => None,
        Backend::Gnuplot => Some(Box::new(GnuplotSink::new(scale))),
        Backend::Html => Some(Box::new(
            PlotlySink::new(scale, title, PlotlyOutput::Html(args.html.clone())).with_labels(x_label, y_label),
        )),
        Backend::Browser => Some(Box::new(
            PlotlySink::new(scale, title, PlotlyOutput::Browser).with_labels(x_label, y_label),
        )),
    }
}

fn render(sink: &mut dyn SeriesSink) {
    match sink.render() {
        Ok(true) => {}
        Ok(false) => warn!("Nothing was plotted"),
        Err(err) => warn!("Plotting failed: {}", err),
    }
}

fn run_sweep(config: SweepConfig, args: &SweepArgs) -> Result<()> {
    let modulation = config.modulation;
    let mut sweep = BerSweep::new(config, random_source(args.seed))
        .with_context(|| format!("invalid {} sweep configuration", modulation))?;

    let simulation = sweep.run().with_context(|| format!("{} sweep failed", modulation))?;
    let theory = sweep.theory();

    if args.json {
        let report = SweepReport {
            modulation,
            bits_per_point: sweep.config().num_bits,
            seed: args.seed,
            simulation: &simulation,
            theory: &theory,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("BER result");
        for ber in simulation.ber() {
            println!("{}", ber);
        }
        println!("Simulation result");
        print!("{}", simulation);
        println!("{} Theory", modulation);
        print!("{}", theory);
    }

    let title = format!("{} over AWGN", modulation);
    if let Some(mut sink) = make_sink(&args.output, PlotScale::SemilogY, &title, "Eb/N0 (dB)", "BER") {
        sink.add_series(&format!("{} sim. with AWGN Channel", modulation), &simulation.pairs());
        sink.add_series(&format!("{} theory. with AWGN Channel", modulation), &theory.pairs());
        render(sink.as_mut());
    }
    Ok(())
}

fn run_spectrum(size: usize, output: &PlotArgs) -> Result<()> {
    anyhow::ensure!(size > 0, "FFT size must be positive");
    let spectrum = tone_spectrum(size);
    info!("Computed {}-point spectrum of the test tone", size);

    match make_sink(output, PlotScale::Linear, "Test tone spectrum", "Frequency (cycles/sample)", "|X|") {
        Some(mut sink) => {
            sink.add_series("FFT", &spectrum);
            render(sink.as_mut());
        }
        None => {
            for (freq, magnitude) in &spectrum {
                println!("{:.6},{:.6e}", freq, magnitude);
            }
        }
    }
    Ok(())
}

fn run_constellation(modulation: ModType, ebno_db: f64, num_symbols: usize, seed: Option<u64>, html: Option<PathBuf>) -> Result<()> {
    let mut source = random_source(seed);
    let modem = match modulation {
        ModType::Bpsk => Modem::bpsk(0.0),
        ModType::Qpsk => Modem::qpsk(),
    };
    let bits = source.generate_bits(num_symbols * modulation.bits_per_symbol() as usize);
    let symbols: Vec<Complex<f64>> = modem.modulate(&bits)?;
    let esno_db = ebno_to_esno(ebno_db, modulation.bits_per_symbol())?;
    let received = add_noise(&mut source, &symbols, esno_db);

    let plot = constellation_plot(&received, &format!("{} at Eb/N0 = {} dB", modulation, ebno_db));
    match html {
        Some(path) => {
            std::fs::write(&path, plot.to_html())
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Constellation written to {}", path.display());
        }
        None => plot.show(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Bpsk { sweep, phase } => {
            let snr = sweep.snr.clone().unwrap_or_else(default_snr_points);
            let config = SweepConfig::bpsk(snr, sweep.bits).with_phase_offset(phase);
            run_sweep(config, &sweep)
        }
        Commands::Qpsk { sweep } => {
            let snr = sweep.snr.clone().unwrap_or_else(default_snr_points);
            run_sweep(SweepConfig::qpsk(snr, sweep.bits), &sweep)
        }
        Commands::Spectrum { size, output } => run_spectrum(size, &output),
        Commands::Constellation { modulation, snr, symbols, seed, html } => {
            run_constellation(modulation.into(), snr, symbols, seed, html)
        }
    }
}
