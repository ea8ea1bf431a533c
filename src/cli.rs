// cli.rs - Command-line interface configuration
use clap::Parser;

use crate::viewer::Options;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-viewer")]
#[command(about = "Declarative JSON scene viewer", long_about = None)]
pub struct Cli {
    /// Scene document to load
    #[arg(long = "scene", default_value = "scene.json")]
    pub scene: String,

    /// Directory holding flattened model assets
    #[arg(long = "assets-root", default_value = "assets")]
    pub assets_root: String,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Options {
            scene: cli.scene,
            assets_root: cli.assets_root,
        }
    }
}
