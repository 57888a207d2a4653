use std::io;

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use toruslife::config::Config;
use toruslife::config::ConfigError;
use toruslife::config::RenderMode;
use toruslife::driver::Driver;
use toruslife::driver::StopToken;
use toruslife::engine::Engine;
use toruslife::io::TerminalEvents;
use toruslife::io::TerminalGuard;
use toruslife::io::stop_on_signal;
use toruslife::render::BrailleRenderer;
use toruslife::render::GlyphRenderer;
use toruslife::render::Render;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never land inside a frame
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::Help) => {
            println!("{}", ConfigError::Help);
            return Ok(());
        }
        Err(e) => return Err(e).context("Invalid arguments"),
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(?config, seed, "starting");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = Engine::random(config.width, config.height, config.rule, &mut rng);

    let mut renderer: Box<dyn Render> = match config.render_mode {
        RenderMode::Glyph => Box::new(GlyphRenderer::new(config.alive, config.dead)),
        RenderMode::Braille => Box::new(BrailleRenderer::new()),
    };

    let mut driver = Driver::new(config.interval, rng).with_generation_limit(config.generations);
    let stop = StopToken::new();
    stop_on_signal(&stop).context("Failed to install the interrupt handler")?;

    let stepped = {
        let _guard = TerminalGuard::enter().context("Failed to set up the terminal")?;
        let mut stdout = io::stdout().lock();

        driver.run(
            &mut engine,
            renderer.as_mut(),
            &mut TerminalEvents,
            &mut stdout,
            &stop,
        )?
    };

    info!(stepped, "stopped");

    println!();
    println!("Conway's Game of Life ({})", engine.rule());
    println!(
        "{stepped} generations, {} cells alive, seed {seed}",
        engine.current().population()
    );

    Ok(())
}
