use anyhow::Context;
use clap::Parser;
use std::io;
use tiny_shrink::cli::Args;
use tiny_shrink::constants::USAGE;
use tiny_shrink::{
    logger, resolve, RandomDelay, Resolution, ShrinkError, ShrinkOptions, Shrinker, TinyClient,
};
use tracing::{error, warn};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    let resolution = match resolve(&args.paths) {
        Ok(resolution) => resolution,
        Err(e @ ShrinkError::InvalidPath(_)) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => {
            error!("Couldn't find image files: {}", e);
            return Ok(());
        }
    };

    if let Some(warning) = resolution.warning() {
        println!("{}", warning);
    }

    let paths = match resolution {
        Resolution::Usage => {
            println!("{}", USAGE);
            return Ok(());
        }
        Resolution::Images { paths, .. } => paths,
    };

    if paths.is_empty() {
        warn!("No jpg, jpeg or png files to shrink");
        return Ok(());
    }

    let options = ShrinkOptions {
        backup: !args.no_backup,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create runtime")?;

    runtime.block_on(async {
        let client = TinyClient::new().context("Failed to create HTTP client")?;
        let shrinker = Shrinker::new(client, RandomDelay::default(), options);
        let mut stdout = io::stdout().lock();
        shrinker
            .run(&paths, &mut stdout)
            .await
            .context("Failed to write progress")?;
        Ok::<(), anyhow::Error>(())
    })
}
