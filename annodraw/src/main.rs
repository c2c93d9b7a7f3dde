#![deny(clippy::all)]
#![forbid(unsafe_code)]

use annolib::{
    BbFormat, BoxCoords, DrawResult, Polygon,
    cfg::{Cfg, get_cfg_path, get_default_cfg, get_log_folder, read_cfg},
    commands,
    file_util::DEFAULT_HOMEDIR,
    parse_color,
    result::trace_ok_warn,
    tracing_setup, version_label,
};
use clap::{Parser, Subcommand};
use image::Rgb;
use std::{ops::Deref, panic, path::PathBuf, process::ExitCode};
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Config file, defaults to ~/.annodraw/annodraw_cfg.toml
    #[arg(long, global = true)]
    cfg: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw the outline of a bounding box
    Bbox {
        input: PathBuf,
        output: PathBuf,
        /// `[[x_min, y_min], [x_max, y_max]]` or `[x, y, w, h]`
        #[arg(long, allow_hyphen_values = true)]
        coords: String,
        #[arg(long, default_value = "xy")]
        format: BbFormat,
        /// `r,g,b`
        #[arg(long, value_parser = parse_color)]
        color: Option<Rgb<u8>>,
    },
    /// Draw the closed outline of a polygon
    Polygon {
        input: PathBuf,
        output: PathBuf,
        /// `[[x1, y1], [x2, y2], ...]`
        #[arg(long, allow_hyphen_values = true)]
        points: String,
        #[arg(long, value_parser = parse_color)]
        color: Option<Rgb<u8>>,
    },
    /// Draw all figures of an annotation file
    Annotate {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        annotations: PathBuf,
        #[arg(long, value_parser = parse_color)]
        color: Option<Rgb<u8>>,
    },
    /// Convert a bounding box between corner and origin-size form
    Convert {
        #[arg(allow_hyphen_values = true)]
        coords: String,
        /// `xy_to_xywh` or `xywh_to_xy`
        #[arg(long)]
        format: String,
    },
}

fn run(command: Command, cfg: &Cfg) -> DrawResult<()> {
    match command {
        Command::Bbox {
            input,
            output,
            coords,
            format,
            color,
        } => {
            let coords = BoxCoords::parse(&coords, format)?;
            commands::bbox_on_file(&input, &output, &coords, color.unwrap_or(cfg.color()))
        }
        Command::Polygon {
            input,
            output,
            points,
            color,
        } => {
            let polygon = points.parse::<Polygon>()?;
            commands::polygon_on_file(&input, &output, &polygon, color.unwrap_or(cfg.color()))
        }
        Command::Annotate {
            input,
            output,
            annotations,
            color,
        } => commands::annotate_file(
            &input,
            &output,
            &annotations,
            color.unwrap_or(cfg.color()),
        ),
        Command::Convert { coords, format } => {
            println!("{}", commands::convert(&coords, &format)?);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg_path = cli
        .cfg
        .clone()
        .unwrap_or_else(|| get_cfg_path(&DEFAULT_HOMEDIR));
    let cfg_read = read_cfg(&cfg_path);
    let cfg = cfg_read.clone().unwrap_or_else(|_| get_default_cfg());
    let log_level = cfg.log_level();
    let log_folder = cfg.log_to_file().then(|| get_log_folder(&DEFAULT_HOMEDIR));
    let _guard_flush_to_logfile = tracing_setup::tracing_setup(
        log_level.clone().unwrap_or(Level::INFO),
        log_folder.as_deref(),
    );
    trace_ok_warn(cfg_read);
    trace_ok_warn(log_level);
    info!("annodraw {} with config {:?}", version_label(), cfg_path);

    match panic::catch_unwind(|| run(cli.command, &cfg)) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            error!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            let panic_s = e
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| e.downcast_ref::<&'static str>().map(Deref::deref));
            error!("{:?}", panic_s);
            if let Some(b) = tracing_setup::BACKTRACE.with(|b| b.borrow_mut().take()) {
                error!("{:?}", b);
            }
            ExitCode::FAILURE
        }
    }
}
