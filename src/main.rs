//! Voice Dots - desktop demo of the dot-disc voice indicator
//!
//! Usage: voice-dots [config.toml]

use anyhow::Context;
use eframe::egui;
use voice_dots::config::AnimationConfig;
use voice_dots::ui::VoiceDotsApp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voice_dots=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Voice Dots");

    let config = match std::env::args().nth(1) {
        Some(path) => AnimationConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => AnimationConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Voice Widget Example"),
        ..Default::default()
    };

    eframe::run_native(
        "Voice Dots",
        options,
        Box::new(move |cc| {
            let app = VoiceDotsApp::new(cc, config)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))
}
