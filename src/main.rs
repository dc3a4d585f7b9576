//! Polycompound - golden-ratio polyhedral compounds
//!
//! Builds the configured compound, validates it and its draw buffers, and
//! steps a short spin preview. Any construction failure exits non-zero.

use polycompound::config::AppConfig;
use polycompound::systems::{PreviewSystem, StartupSystem};

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.debug.log_level),
    )
    .init();

    let output = match StartupSystem::run(&config) {
        Ok(output) => output,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "{}: {} faces in {} groups, {} shared edges",
        output.compound.name(),
        output.compound.face_count(),
        output.compound.groups().len(),
        output.compound.shared_edge_count()
    );

    let mut preview = PreviewSystem::new(&config.animation);
    let frames = preview.run(config.animation.preview_frames, &output.buffer);
    log::info!(
        "Spin preview: {} frames over {:.3}s",
        frames.len(),
        preview.elapsed()
    );
}
