//! CLI tool for yardcheck - renders a form snapshot to files on disk
//!
//! Usage:
//!   yardcheck_cli <snapshot.json>                        # All formats into .
//!   yardcheck_cli <snapshot.json> -o out --format word   # One format into out/
//!   yardcheck_cli <snapshot.json> --logo logo.png --config config.json
//!
//! Set `RUST_LOG=debug` to trace logo resolution.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::path::PathBuf;

use yardcheck::asset::{resolve_logo_bytes, FileLogoSource, LogoSource};
use yardcheck::{ExportFormat, Exporter, FormSnapshot, ReportConfig};

const USAGE: &str = "Usage: yardcheck_cli <snapshot.json> [-o <dir>] [--logo <file>] \
                     [--format word|spreadsheet|text|all] [--config <config.json>]";

struct Args {
    input: PathBuf,
    out_dir: PathBuf,
    logo: Option<PathBuf>,
    formats: Vec<ExportFormat>,
    config: Option<PathBuf>,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn parse_args() -> Args {
    let mut args = env::args().skip(1);
    let mut input = None;
    let mut out_dir = PathBuf::from(".");
    let mut logo = None;
    let mut formats = ExportFormat::ALL.to_vec();
    let mut config = None;

    while let Some(arg) = args.next() {
        let mut value = || args.next().unwrap_or_else(|| fail(USAGE));
        match arg.as_str() {
            "-o" | "--out" => out_dir = PathBuf::from(value()),
            "--logo" => logo = Some(PathBuf::from(value())),
            "--config" => config = Some(PathBuf::from(value())),
            "--format" => {
                let name = value();
                formats = if name == "all" {
                    ExportFormat::ALL.to_vec()
                } else {
                    match ExportFormat::from_name(&name) {
                        Some(format) => vec![format],
                        None => fail(&format!("Unknown format: {name}\n{USAGE}")),
                    }
                };
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ => fail(USAGE),
        }
    }

    Args {
        input: input.unwrap_or_else(|| fail(USAGE)),
        out_dir,
        logo,
        formats,
        config,
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();

    // Read snapshot
    let json = match fs::read_to_string(&args.input) {
        Ok(j) => j,
        Err(e) => fail(&format!("Error reading {}: {e}", args.input.display())),
    };
    let snapshot = match FormSnapshot::from_json(&json) {
        Ok(s) => s,
        Err(e) => fail(&format!("Error parsing snapshot: {e}")),
    };

    let config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .unwrap_or_else(|e| fail(&format!("Error reading {}: {e}", path.display())));
            ReportConfig::from_json(&json)
                .unwrap_or_else(|e| fail(&format!("Error parsing config: {e}")))
        }
        None => ReportConfig::default(),
    };

    // Resolve logo, only if some requested format shows it
    let logo = match &args.logo {
        Some(path) if args.formats.iter().any(|f| f.uses_logo()) => {
            let sources: Vec<Box<dyn LogoSource>> = vec![Box::new(FileLogoSource::new(path))];
            futures::executor::block_on(resolve_logo_bytes(&sources))
        }
        _ => None,
    };

    if let Err(e) = fs::create_dir_all(&args.out_dir) {
        fail(&format!("Error creating {}: {e}", args.out_dir.display()));
    }

    let exporter = Exporter::new(config);
    for format in args.formats {
        let artifact = match exporter.render(format, &snapshot, logo.as_ref()) {
            Ok(a) => a,
            Err(e) => fail(&format!("Error rendering {format:?}: {e}")),
        };
        let path = args.out_dir.join(&artifact.filename);
        if let Err(e) = fs::write(&path, &artifact.bytes) {
            fail(&format!("Error writing {}: {e}", path.display()));
        }
        eprintln!("Written: {}", path.display());
    }
}
