/// SR3D Terminal - view OBJ shapes with the software renderer
///
/// Controls:
///   - Arrow keys, PageUp/PageDown: move the camera along X, Y, Z
///   - W/S, A/D, E/R: rotate the camera about X, Y, Z
///   - +/-: scale every object
///   - Space: toggle wireframe / solid
///   - Q/ESC: quit

use anyhow::{Context, Result};
use clap::Parser;
use sr3d_terminal::cli::Cli;
use sr3d_terminal::{build_scene, TerminalApp};
use std::fs::File;
use std::path::Path;

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.render_config();
    config.validate().context("invalid render settings")?;

    let scene = match build_scene(&cli.files, config.object_depth) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            return Err(e).context("failed to load shapes");
        }
    };

    let mut app = TerminalApp::new(scene, config, cli.fps).context("failed to set up terminal")?;
    if let Err(e) = app.run() {
        log::error!("Renderer stopped: {}", e);
        return Err(e.into());
    }
    Ok(())
}
