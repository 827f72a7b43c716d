mod config;
mod demo;
mod host;

use canvas::scene::Game;
use canvas::surface::{ManualScheduler, RecordingSurface};

use crate::config::RunConfig;
use crate::host::HostError;

fn main() -> Result<(), HostError> {
    tracing_subscriber::fmt::init();

    let config = RunConfig::from_env()?;
    tracing::info!(
        width = config.game.width,
        height = config.game.height,
        frame_rate = config.frame_rate,
        frames = config.frames,
        "polaris starting"
    );

    // Renderer and Game are single-threaded.
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    runtime.block_on(run_demo(&config))
}

async fn run_demo(config: &RunConfig) -> Result<(), HostError> {
    let surface = RecordingSurface::new(config.game.width, config.game.height);
    let mut game = Game::new(config.game.clone(), surface, ManualScheduler::new())?;
    demo::register(&mut game);
    game.start()?;

    let script = demo::input_script(config.game.size());
    host::run(config, &mut game, &script).await?;
    game.stop();
    Ok(())
}
