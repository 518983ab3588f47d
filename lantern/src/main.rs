use clap::Parser;
use std::path::PathBuf;

use lantern::{
    app::{self, Settings},
    lantern_error,
};

#[derive(Parser)]
#[command(name = "lantern", about = "Lit scene viewer with a fly-through camera")]
struct Cli {
    /// Settings file, asset paths in it are relative to its directory
    #[arg(short, long, default_value = "settings.yaml")]
    settings: PathBuf,

    /// One of off, error, warn, info, debug, trace
    #[arg(short, long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn setup_logger(level: log::LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}:{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .chain(std::fs::File::create("lantern.log")?)
        .apply()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(why) = setup_logger(cli.log_level) {
        panic!("{}", why);
    };

    let settings_dir = cli
        .settings
        .parent()
        .map(|dir| dir.to_path_buf())
        .unwrap_or_default();
    let settings = match Settings::load(&cli.settings) {
        Ok(settings) => settings.rooted_at(&settings_dir),
        Err(why) => {
            lantern_error!("{}", why);
            std::process::exit(1);
        }
    };

    if let Err(why) = app::run(&settings) {
        lantern_error!("{}", why);
        std::process::exit(1);
    }
}
