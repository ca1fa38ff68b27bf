use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    render::{Rect, SvgSurface},
    Result, StarfieldEngine, StarfieldError,
};

/// Configuration options for dumping rendered frames to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    pub output_dir: PathBuf,
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub frames: u32,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("frames"),
            width: 800,
            height: 600,
            fps: 60,
            frames: 120,
        }
    }
}

/// Drives an engine at a fixed frame rate and writes every frame as SVG.
#[derive(Debug, Default)]
pub struct Recorder {
    settings: RecordingSettings,
}

impl Recorder {
    pub fn new(settings: RecordingSettings) -> Self {
        Self { settings }
    }

    /// Renders `frames` ticks of `engine`, returning the written paths.
    pub fn record(&self, engine: &mut StarfieldEngine) -> Result<Vec<PathBuf>> {
        let RecordingSettings {
            output_dir,
            width,
            height,
            fps,
            frames,
        } = &self.settings;

        if *fps == 0 {
            return Err(StarfieldError::msg("recording requires a non-zero frame rate"));
        }
        if *width <= 0 || *height <= 0 {
            return Err(StarfieldError::msg(format!(
                "cannot record a {width}x{height} viewport"
            )));
        }

        fs::create_dir_all(output_dir)?;

        let dt = 1.0 / *fps as f32;
        let bounds = Rect::from_size(*width, *height);
        let mut surface = SvgSurface::new(bounds);
        let mut written = Vec::with_capacity(*frames as usize);

        for frame in 0..*frames {
            engine.update(dt, *width, *height);
            engine.render(&mut surface, bounds);

            let path = output_dir.join(format!("frame_{frame:05}.svg"));
            fs::write(&path, surface.to_document())?;
            written.push(path);
        }

        tracing::info!(frames = written.len(), dir = %output_dir.display(), "recorded frames");
        Ok(written)
    }
}
