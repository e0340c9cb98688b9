use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daylight3d::daylight::compare::{hour_label, simulated_grid};
use daylight3d::daylight::hour::DEFAULT_YEAR;
use daylight3d::daylight::reshape::reshape_by_coords;
use daylight3d::io::{
    load_measured_hour, read_ill, read_rad, write_comparison_csv, write_point_hour_tables,
    write_points,
};
use daylight3d::{
    AnalysisConfig, Comparison, GridLayout, GridOrientation, HourOfYear, RoomGeometry,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "Daylight simulation validation against luxmeter measurements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze room dimensions from a scene-geometry file
    Geometry {
        scene: PathBuf,
        /// Material name pattern of floor polygons (repeatable)
        #[arg(long = "floor", default_value = "PISO")]
        floor: Vec<String>,
        #[arg(long)]
        glazing: Option<PathBuf>,
        #[arg(long, default_value_t = 0.75)]
        work_plane_height: f64,
    },
    /// Write the sensor-point list of a configuration
    Grid {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the annual table row of a clock time
    Hour {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
        #[arg(long)]
        hour: u32,
        #[arg(long, default_value_t = DEFAULT_YEAR)]
        year: i32,
    },
    /// Re-grid one hour of simulated illuminance by sensor coordinates
    Show {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        ill: PathBuf,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
        #[arg(long)]
        hour: u32,
        #[arg(long)]
        reverse_rows: bool,
        #[arg(long)]
        reverse_cols: bool,
    },
    /// Compare simulated against measured illuminance for a day
    Compare {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        ill: PathBuf,
        #[arg(long)]
        measured_dir: PathBuf,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
        #[arg(long, value_delimiter = ',', default_value = "9,10,11,12,13,14,15,16,17")]
        hours: Vec<u32>,
        #[arg(long)]
        output_dir: PathBuf,
        /// Prefix of the output file names, e.g. 26jun
        #[arg(long)]
        tag: String,
    },
    /// Write the default configuration as JSON
    InitConfig {
        #[arg(long)]
        output: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::from_json_file(p)
            .with_context(|| format!("Failed to load configuration {}", p.display())),
        None => Ok(AnalysisConfig::new()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Geometry {
            scene,
            floor,
            glazing,
            work_plane_height,
        } => {
            let scene = read_rad(&scene)?;
            let glazing = glazing.as_deref().map(read_rad).transpose()?;
            let room = RoomGeometry::analyze(&scene, &floor, glazing.as_ref(), work_plane_height)
                .context("Room analysis failed")?;
            println!("{}", room);
            let (nx, ny) = room.grid_size(0.5);
            println!("Grid at 0.5 m: {} x {} = {} sensors", nx, ny, nx * ny);
        }
        Command::Grid { config, output } => {
            let config = load_config(config.as_deref())?;
            let grid = config.sensor_grid()?;
            write_points(&output, &grid.points)?;
            println!(
                "{} x {} = {} points, spacing {:.4} x {:.4} m, {:.2} m2/sensor",
                grid.nx,
                grid.ny,
                grid.len(),
                grid.spacing_x,
                grid.spacing_y,
                grid.density()
            );
            if let (Some(first), Some(last)) = (grid.first(), grid.last()) {
                println!("First point: {:.4}", first.position);
                println!("Last point: {:.4}", last.position);
            }
            if let GridLayout::Explicit { .. } = grid.layout {
                let (far_x, far_y) = grid.far_wall_offsets();
                println!("Far-wall offsets: {:.3} m (x), {:.3} m (y)", far_x, far_y);
            }
        }
        Command::Hour {
            month,
            day,
            hour,
            year,
        } => {
            let indexer = HourOfYear::new(year)?;
            println!("{}", indexer.index(month, day, hour)?);
        }
        Command::Show {
            config,
            ill,
            month,
            day,
            hour,
            reverse_rows,
            reverse_cols,
        } => {
            let config = load_config(config.as_deref())?;
            let grid = config.sensor_grid()?;
            let table = read_ill(&ill)?;
            if table.is_empty() {
                anyhow::bail!("{} holds no data rows", ill.display());
            }
            table
                .check_sensor_count(grid.len())
                .with_context(|| format!("{}: does not match the sensor grid", ill.display()))?;
            let row = table
                .at(&config.hour_indexer()?, month, day, hour)
                .with_context(|| format!("{}: no row for {}/{} {}:00", ill.display(), month, day, hour))?;
            let spatial = reshape_by_coords(&row.to_vec(), &grid.points)?.oriented(GridOrientation {
                reverse_rows,
                reverse_cols,
            });
            for (y, values) in spatial.y.iter().zip(spatial.values.rows()) {
                let cells: Vec<String> = values.iter().map(|v| format!("{:8.1}", v)).collect();
                println!("{:8.3} |{}", y, cells.join(""));
            }
            match spatial.stats() {
                Some(s) => println!(
                    "n = {}, min {:.1}, max {:.1}, mean {:.1}, median {:.1} lux",
                    s.count, s.min, s.max, s.mean, s.median
                ),
                None => println!("No data"),
            }
        }
        Command::Compare {
            config,
            ill,
            measured_dir,
            month,
            day,
            hours,
            output_dir,
            tag,
        } => {
            let config = load_config(config.as_deref())?;
            let grid = config.sensor_grid()?;
            let indexer = config.hour_indexer()?;
            let table = read_ill(&ill)?;
            if table.is_empty() {
                anyhow::bail!("{} holds no data rows", ill.display());
            }

            let mut cmp = Comparison::new(config.measured.columns.clone());
            for &hour in &hours {
                let measured = load_measured_hour(&measured_dir, &config.measured, hour)?;
                let simulated = simulated_grid(
                    &table,
                    &grid,
                    &indexer,
                    config.simulated_orientation,
                    (month, day, hour),
                )
                .with_context(|| {
                    format!(
                        "{}: no simulated values for {}/{} {}:00",
                        ill.display(),
                        month,
                        day,
                        hour
                    )
                })?;
                cmp.push(&hour_label(hour), measured, simulated)?;
            }

            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Cannot create {}", output_dir.display()))?;
            write_comparison_csv(&output_dir.join(format!("comparison_{}.csv", tag)), &cmp.records())?;
            write_point_hour_tables(&output_dir, &tag, &cmp.point_hour_tables())?;

            if let Some(summary) = cmp.summary() {
                println!("{}", summary);
            }
            println!("Error by hour (lux):");
            println!("{:>6} {:>8} {:>8} {:>8} {:>8}", "Hour", "Mean", "Std", "Min", "Max");
            for (label, s) in cmp.per_hour_summary() {
                println!(
                    "{:>6} {:>+8.1} {:>8.1} {:>+8.1} {:>+8.1}",
                    label, s.mbe, s.std, s.min_diff, s.max_diff
                );
            }
            println!("Mean illuminance per grid row (measured / simulated, lux):");
            for h in cmp.hours() {
                let (measured, simulated) = h.row_means();
                let cells: Vec<String> = measured
                    .iter()
                    .zip(&simulated)
                    .map(|(m, s)| format!("{:.0}/{:.0}", m, s))
                    .collect();
                println!("{:>6} {}", h.label, cells.join("  "));
            }
        }
        Command::InitConfig { output } => {
            AnalysisConfig::new().to_json_file(&output)?;
            println!("Wrote {}", output.display());
        }
    }
    Ok(())
}
