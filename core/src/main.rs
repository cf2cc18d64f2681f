use clap::Parser;
use log::{error, info};
use snsim_core::cli::{Cli, OutputFormat};
use snsim_core::geometry::read_matrix4;
use snsim_core::{ProjectionPlan, ProjectionPlanner, Result, TextReport};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let plan = match plan(&cli) {
        Ok(plan) => plan,
        Err(e) => {
            error!("Failed to plan projection: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match cli.format {
        OutputFormat::Text => {
            print!("{}", TextReport::new(&plan));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(&plan) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

fn plan(cli: &Cli) -> Result<ProjectionPlan> {
    let planner = ProjectionPlanner::new(cli.config());
    let mode = cli.projection_mode();
    let volume = cli.volume()?;
    info!("Planning {} projection", mode);

    let parameters = match (&cli.tracked_transform, cli.volume_center(volume.as_ref())) {
        (Some(path), Some(center)) => {
            info!("Reading tracked transform: {}", path.display());
            let tracked = read_matrix4(path)?;
            planner.plan_tracked(mode, center, &tracked)?
        }
        _ => planner.plan(mode)?,
    };

    Ok(ProjectionPlan::new(parameters, volume.as_ref()))
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
