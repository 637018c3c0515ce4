// Newton Display - Main Entry Point
//
// Runs the display window with a demo core on a second thread, publishing
// test patterns through the same interface a real emulator core uses.

use clap::Parser;
use log::{info, warn};
use newton_display::config::{DisplayConfig, CONFIG_FILE};
use newton_display::display::{
    display_channel, run_display, DisplayPort, FrameComposer, Orientation, Silkscreen,
    WindowConfig, SHARP_LCD,
};
use newton_display::logging::init_logger;
use newton_display::{DemoCore, Geometry, TestPattern};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Time between demo frames
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "newton-display")]
#[command(about = "Newton LCD display host with a demo core")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Panel width in pixels
    #[arg(long, default_value_t = SHARP_LCD.width)]
    width: u32,

    /// Panel height in pixels
    #[arg(long, default_value_t = SHARP_LCD.height)]
    height: u32,

    /// Window scale (overrides the configuration file)
    #[arg(short, long)]
    scale: Option<u32>,

    /// Rotate the panel a quarter turn (portrait devices)
    #[arg(long)]
    rotate: bool,

    /// Test pattern drawn by the demo core
    #[arg(short, long, value_enum, default_value_t = TestPattern::Ramp)]
    pattern: TestPattern,

    /// XBM silkscreen drawn under the panel (overrides the configuration file)
    #[arg(long)]
    silkscreen: Option<PathBuf>,

    /// Stop the demo core after this many frames
    #[arg(short = 'n', long)]
    frames: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = DisplayConfig::load_or_default(&cli.config);
    if let Some(scale) = cli.scale {
        config.video.scale = scale;
    }
    if cli.rotate {
        config.video.orientation = Orientation::Rotated;
    }
    if cli.silkscreen.is_some() {
        config.silkscreen.path = cli.silkscreen.clone();
    }

    init_logger(
        config.logging.level_filter(),
        config.logging.file.as_deref(),
    )?;

    println!("Newton Display v{}", env!("CARGO_PKG_VERSION"));
    println!("==============================");
    println!();
    println!("  Panel: {}x{}", cli.width, cli.height);
    println!("  Scale: {}x", config.video.scale);
    println!("  Orientation: {:?}", config.video.orientation);
    println!("  Pattern: {:?}", cli.pattern);
    println!();
    println!("Press F9 for a screenshot, Escape or the close button to exit.");
    println!();

    let silkscreen = match &config.silkscreen.path {
        Some(path) => match Silkscreen::load(path) {
            Ok(silkscreen) => Some(silkscreen),
            Err(err) => {
                warn!("Failed to load silkscreen {}: {}", path.display(), err);
                None
            }
        },
        None => None,
    };

    let (host, receiver) = display_channel(config.video.channel_capacity);
    let port = DisplayPort::new(host.with_limits(config.video.limits()));
    let core = DemoCore::new(Geometry::new(cli.width, cli.height), cli.pattern)?;

    let max_frames = cli.frames;
    let core_thread = thread::Builder::new()
        .name("demo-core".into())
        .spawn(move || core.run(port, FRAME_INTERVAL, max_frames))?;

    let window_config = WindowConfig::new().with_scale(config.video.scale);
    let composer = FrameComposer::new(config.video.orientation).with_silkscreen(silkscreen);

    run_display(window_config, receiver, composer, config.screenshot.options())?;

    match core_thread.join() {
        Ok(Ok(frames)) => info!("Demo core published {} frames", frames),
        Ok(Err(err)) => return Err(err.into()),
        Err(_) => return Err("demo core panicked".into()),
    }

    println!("Display window closed.");
    Ok(())
}
