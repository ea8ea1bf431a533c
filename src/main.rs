use clap::Parser;
use winit::event_loop::EventLoop;

use scene_viewer::cli::Cli;
use scene_viewer::viewer::Viewer;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let event_loop = EventLoop::new()?;
    let mut viewer = Viewer::new(cli.into());

    event_loop.run_app(&mut viewer)?;

    Ok(())
}
