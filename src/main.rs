use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, warn};
use std::error::Error;
use std::path::Path;
use std::time::Instant;

use plotkit_rs::discretization::mesh::{CenterCoords, EdgeCoords};
use plotkit_rs::numerics::timing::{finalize_and_print, reset_timing};
use plotkit_rs::numerics::transform::{center_to_edge, edge_to_center};
use plotkit_rs::numerics::{Tolerance, max_abs_diff, row_max_abs_diff};
use plotkit_rs::processing::config::OutputConfig;
use plotkit_rs::processing::csv_reader::read_matrix;
use plotkit_rs::processing::csv_writer::{write_matrix, write_xy};
use plotkit_rs::processing::summary::MeshSummary;
use plotkit_rs::styling::{ColorTable, CustomTable, random_colors, spaced_colors};

#[derive(Parser)]
#[command(name = "plotkit")]
#[command(
    about = "Mesh coordinate conversion and color sampling for gridded plots",
    long_about = "Converts 2D mesh coordinates between cell-center and cell-edge placement, and samples colors from named color tables."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// JSON file with output settings (precision, delimiter, write_summary)
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert cell-center coordinates to cell-edge coordinates
    CenterToEdge {
        /// CSV matrix of X center coordinates, one line per grid row
        #[arg(long)]
        x: String,
        /// CSV matrix of Y center coordinates, same shape as X
        #[arg(long)]
        y: String,
        /// Prefix for output files: `<prefix>.x.csv`, `<prefix>.y.csv`, `<prefix>.summary.txt`
        #[arg(long)]
        out_prefix: String,
    },
    /// Convert cell-edge coordinates to cell-center coordinates
    EdgeToCenter {
        #[arg(long)]
        x: String,
        #[arg(long)]
        y: String,
        #[arg(long)]
        out_prefix: String,
    },
    /// Run center -> edge -> center and report the largest deviation
    Check {
        #[arg(long)]
        x: String,
        #[arg(long)]
        y: String,
        /// Maximum accepted absolute deviation
        #[arg(long, default_value_t = 1e-9)]
        tolerance: f64,
        /// Write the largest deviation of each grid row to this CSV file
        #[arg(long)]
        profile: Option<String>,
    },
    /// Print colors sampled from a color table, one per line
    Colors {
        #[arg(long)]
        count: usize,
        /// css4, tableau or base
        #[arg(long, default_value = "css4")]
        table: String,
        /// Read the table from a `name<TAB>#rrggbb` file instead (e.g. xkcd's rgb.txt)
        #[arg(long)]
        table_file: Option<String>,
        /// Seed for random sampling
        #[arg(long)]
        seed: Option<u64>,
        /// Take evenly spaced colors instead of random ones
        #[arg(long)]
        spaced: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        match std::fs::File::create(path) {
            Ok(file) => {
                log_builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Could not open log file '{}': {}", path, e),
        }
    }
    log_builder.init();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading output settings from {}", path);
            OutputConfig::load(path)?
        }
        None => OutputConfig::default(),
    };

    match &cli.command {
        Commands::CenterToEdge { x, y, out_prefix } => {
            let centers = CenterCoords::new(
                read_matrix(x, config.delimiter)?,
                read_matrix(y, config.delimiter)?,
            )?;
            info!("Read {:?} center coordinates", centers.shape());

            reset_timing();
            let start = Instant::now();
            let edges = center_to_edge(&centers)?;
            finalize_and_print(start.elapsed());

            save_coordinates(out_prefix, &edges.x, &edges.y, &config)?;
            if config.write_summary {
                save_summary(out_prefix, &MeshSummary::from_edges(&edges))?;
            }
        }
        Commands::EdgeToCenter { x, y, out_prefix } => {
            let edges = EdgeCoords::new(
                read_matrix(x, config.delimiter)?,
                read_matrix(y, config.delimiter)?,
            )?;
            info!("Read {:?} edge coordinates", edges.shape());

            reset_timing();
            let start = Instant::now();
            let centers = edge_to_center(&edges)?;
            finalize_and_print(start.elapsed());

            save_coordinates(out_prefix, &centers.x, &centers.y, &config)?;
            if config.write_summary {
                save_summary(out_prefix, &MeshSummary::from_centers(&centers))?;
            }
        }
        Commands::Check {
            x,
            y,
            tolerance,
            profile,
        } => {
            let centers = CenterCoords::new(
                read_matrix(x, config.delimiter)?,
                read_matrix(y, config.delimiter)?,
            )?;
            let back = edge_to_center(&center_to_edge(&centers)?)?;

            let err = max_abs_diff(&centers.x, &back.x)
                .zip(max_abs_diff(&centers.y, &back.y))
                .map(|(ex, ey)| ex.max(ey))
                .ok_or("round trip changed the mesh shape")?;

            if let Some(path) = profile {
                let per_row = row_max_abs_diff(&centers.x, &back.x)
                    .zip(row_max_abs_diff(&centers.y, &back.y))
                    .map(|(ex, ey)| ex.zip_map(&ey, f64::max))
                    .ok_or("round trip changed the mesh shape")?;
                let rows: Vec<f64> = (0..per_row.len()).map(|i| i as f64).collect();
                write_xy(path, "row", "max_abs_error", &rows, per_row.as_slice(), &config)?;
                info!("Row error profile saved to {}", path);
            }

            let mut summary = MeshSummary::from_centers(&centers);
            summary.add_round_trip_error(err);
            summary.print_to_console();

            if !summary.uniform {
                warn!("Mesh is not uniform, round trip is not expected to be exact");
            }
            if !Tolerance::Absolute(*tolerance).check(err, 0.0) {
                return Err(format!(
                    "round trip error {:.3e} exceeds tolerance {:.3e}",
                    err, tolerance
                )
                .into());
            }
            info!("Round trip within tolerance ({:.3e})", err);
        }
        Commands::Colors {
            count,
            table,
            table_file,
            seed,
            spaced,
        } => {
            let custom = match table_file {
                Some(path) => {
                    let loaded = CustomTable::load(path)?;
                    info!("Loaded {} colors from {}", loaded.len(), path);
                    Some(loaded)
                }
                None => None,
            };
            let colors = match &custom {
                Some(loaded) if *spaced => loaded.spaced_colors(*count)?,
                Some(loaded) => loaded.random_colors(*count, *seed)?,
                None => {
                    let table: ColorTable = table.parse()?;
                    if *spaced {
                        spaced_colors(*count, table)?
                    } else {
                        random_colors(*count, table, *seed)?
                    }
                }
            };
            for color in colors {
                println!("{}", color);
            }
        }
    }

    Ok(())
}

fn save_coordinates(
    prefix: &str,
    x: &nalgebra::DMatrix<f64>,
    y: &nalgebra::DMatrix<f64>,
    config: &OutputConfig,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = Path::new(prefix).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let x_path = format!("{}.x.csv", prefix);
    let y_path = format!("{}.y.csv", prefix);
    write_matrix(&x_path, x, config)?;
    write_matrix(&y_path, y, config)?;
    info!("Coordinates saved to {} and {}", x_path, y_path);
    Ok(())
}

fn save_summary(prefix: &str, summary: &MeshSummary) -> Result<(), Box<dyn Error>> {
    let path = format!("{}.summary.txt", prefix);
    summary.write_to_file(&path)?;
    summary.print_to_console();
    info!("Summary saved to {}", path);
    Ok(())
}
