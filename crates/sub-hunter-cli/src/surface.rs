//! Headless presentation surface that reports through `tracing`.

use sub_hunter_core::scope::{DrawItem, DrawPrimitive, Hud};
use sub_hunter_core::{AudioCue, PresentationSurface, SurfaceError};
use tracing::{debug, info, trace};

/// Counts what would have been drawn and logs sounds and HUD changes.
#[derive(Debug, Default)]
pub struct LoggingSurface {
    /// Primitives received since start.
    pub primitives: usize,
    /// Sounds played since start.
    pub cues: usize,
    /// Set once the session has been closed.
    pub closed: bool,
    last_hud: Option<String>,
}

impl LoggingSurface {
    /// Creates a fresh surface.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationSurface for LoggingSurface {
    fn draw(&mut self, item: &DrawItem) -> Result<(), SurfaceError> {
        if self.closed {
            return Err(SurfaceError::Closed);
        }
        self.primitives += 1;
        if let DrawPrimitive::Banner { text } = &item.primitive {
            debug!(%text, "banner");
        } else {
            trace!(entity = ?item.entity, primitive = ?item.primitive, "draw");
        }
        Ok(())
    }

    fn hud(&mut self, hud: &Hud) -> Result<(), SurfaceError> {
        if self.closed {
            return Err(SurfaceError::Closed);
        }
        let text = hud.to_string();
        if self.last_hud.as_deref() != Some(text.as_str()) {
            debug!(torpedo = %hud.torpedo, "{}", text.replace('\n', " "));
            self.last_hud = Some(text);
        }
        Ok(())
    }

    fn play(&mut self, cue: AudioCue) {
        self.cues += 1;
        info!(%cue, "sound");
    }

    fn close(&mut self) {
        if !self.closed {
            info!("surface closed");
        }
        self.closed = true;
    }
}
