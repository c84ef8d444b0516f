use anyhow::{bail, Context};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pingxel::area::{self, BoundsPolicy};
use pingxel::canvas::Canvas;
use pingxel::config::CanvasBounds;
use pingxel::dispatch::{DispatchMode, Dispatcher};
use pingxel::net::{DryRunTransport, PingTransport, Transport};
use pingxel::source::{BitmapSource, FillSource, SizeRequest, Source};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::CliOpts::parse();
    init_logger(&args);

    let bounds = CanvasBounds::default();

    if let Some(delay) = args.delay {
        if delay < 0.0 {
            bail!("delay must be greater than or equal to 0");
        }
    }

    // build the pixel source and negotiate its final dimensions
    let mut source = match (&args.image, args.fill) {
        (Some(path), None) => {
            let image = image::open(path)
                .with_context(|| format!("Could not open image {}", path.display()))?
                .to_rgba8();
            Source::Bitmap(BitmapSource::new(image, &bounds)?)
        }
        (None, Some(color)) => {
            let (SizeRequest::Exact(width), SizeRequest::Exact(height)) = (args.width, args.height)
            else {
                bail!("--fill requires explicit --width and --height");
            };
            Source::Fill(FillSource::new(color, width, height, &bounds)?)
        }
        _ => unreachable!("clap enforces exactly one pixel source"),
    };
    source.set_size(args.width, args.height, &bounds)?;
    let (width, height) = source.size();

    // place the drawing on the canvas
    let (x_origin, y_origin) = cli::resolve_origin(&args)?;
    let policy = if args.overflow {
        BoundsPolicy::Crop
    } else if args.push {
        BoundsPolicy::Push
    } else {
        BoundsPolicy::Reject
    };
    let area = area::resolve(x_origin, y_origin, width, height, &bounds, policy)?;
    tracing::info!(
        "Drawing {}x{} pixels at {},{}",
        area.width(),
        area.height(),
        area.origin_x + area.start_x as i64,
        area.origin_y + area.start_y as i64,
    );

    let transport: Arc<dyn Transport> = if args.dry_run {
        Arc::new(DryRunTransport::new())
    } else {
        Arc::new(PingTransport)
    };
    let canvas = Arc::new(Canvas::new(args.baseip.clone(), transport));

    let mode = match args.workers {
        Some(workers) => {
            if workers == 0 {
                bail!("worker pool size must be greater than 0");
            }
            if args.delay.is_some_and(|d| d > 0.0) {
                tracing::warn!("--delay has no effect with --workers, painting at full speed");
            }
            DispatchMode::Pooled { workers }
        }
        None => DispatchMode::Serial {
            delay: Duration::from_secs_f64(args.delay.unwrap_or(1.0)),
        },
    };
    let dispatcher = Dispatcher {
        mode,
        reverse: args.reverse,
        skip_transparent: args.skip_transparent,
    };

    let report = dispatcher.run(&source, &area, canvas).await;
    println!("Drawn pixels: {}/{}", report.emitted, report.total);
    Ok(())
}

fn init_logger(args: &cli::CliOpts) {
    let level = match args.verbose as i16 - args.quiet as i16 {
        i16::MIN..=-3 => LevelFilter::OFF,
        -2 => LevelFilter::ERROR,
        -1 => LevelFilter::WARN,
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(level)
        .init();
}
