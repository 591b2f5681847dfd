pub mod click_event;
pub mod highlight;
pub mod session;
pub mod state;
pub mod types;

use std::sync::{Mutex, MutexGuard};

use image::{DynamicImage, GenericImageView};
use thiserror::Error;
use tracing::{info, warn};

use crate::i18n::Locale;
use crate::labeling::{LabelSuggester, Point};
use click_event::is_within_frame;
use highlight::draw_click_highlight;
use session::Session;
use state::{CaptureState, RecorderState, RecorderStateError};
use types::{png_data_url, Step};

#[derive(Error, Debug)]
pub enum RecorderError {
    #[error(transparent)]
    State(#[from] RecorderStateError),

    #[error("capture is not running")]
    NotCapturing,

    #[error("click ({x}, {y}) is outside the {width}x{height} frame")]
    ClickOutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    #[error("unknown step: {0}")]
    UnknownStep(String),

    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}

/// Result of recording one click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    pub step_id: String,
    pub label: Option<String>,
    /// Whether the suggestion reached the step (it is dropped once a newer step exists).
    pub applied: bool,
}

/// Owns the capture state, the step session and the label suggester.
///
/// The session lock is never held across the recognition await, so several
/// clicks can be labelled concurrently.
pub struct Recorder {
    state: Mutex<RecorderState>,
    session: Mutex<Session>,
    suggester: LabelSuggester,
}

impl Recorder {
    pub fn new(suggester: LabelSuggester, locale: Locale) -> Self {
        Self {
            state: Mutex::new(RecorderState::new()),
            session: Mutex::new(Session::new(locale)),
            suggester,
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, RecorderState>, RecorderError> {
        self.state
            .lock()
            .map_err(|_| RecorderError::LockPoisoned("recorder state"))
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>, RecorderError> {
        self.session
            .lock()
            .map_err(|_| RecorderError::LockPoisoned("session"))
    }

    pub fn start(&self) -> Result<(), RecorderError> {
        self.state()?.start()?;
        let session_id = self.session()?.id;
        info!(%session_id, "capture started");
        Ok(())
    }

    pub fn stop(&self) -> Result<(), RecorderError> {
        self.state()?.stop()?;
        info!("capture stopped");
        Ok(())
    }

    pub fn capture_state(&self) -> Result<CaptureState, RecorderError> {
        Ok(self.state()?.current())
    }

    fn ensure_capturing(&self) -> Result<(), RecorderError> {
        if self.state()?.is_capturing() {
            Ok(())
        } else {
            Err(RecorderError::NotCapturing)
        }
    }

    /// Snapshot of the recorded steps.
    pub fn steps(&self) -> Result<Vec<Step>, RecorderError> {
        Ok(self.session()?.steps().to_vec())
    }

    /// Runs `f` with exclusive access to the session.
    pub fn with_session<T>(&self, f: impl FnOnce(&mut Session) -> T) -> Result<T, RecorderError> {
        Ok(f(&mut *self.session()?))
    }

    /// Records a click step, then labels it from the frame.
    pub async fn record_click(
        &self,
        frame: &DynamicImage,
        click: Point,
    ) -> Result<ClickOutcome, RecorderError> {
        self.ensure_capturing()?;
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 || !is_within_frame(click, width, height) {
            return Err(RecorderError::ClickOutOfBounds {
                x: click.x,
                y: click.y,
                width,
                height,
            });
        }

        let screenshot = highlighted_screenshot_of(frame, click);
        let step_id = self.session()?.add_click_step(screenshot, click).id.clone();

        let label = self.suggester.suggest_label(frame, click).await;
        let applied = self
            .session()?
            .apply_suggestion(&step_id, label.as_deref(), click);
        info!(step_id = %step_id, label = ?label, applied, "click step recorded");

        Ok(ClickOutcome {
            step_id,
            label,
            applied,
        })
    }

    /// Records a step without a click position.
    pub fn record_manual_step(&self, frame: &DynamicImage) -> Result<String, RecorderError> {
        self.ensure_capturing()?;
        let screenshot = screenshot_of(frame);
        let id = self.session()?.add_manual_step(screenshot).id.clone();
        info!(step_id = %id, "manual step recorded");
        Ok(id)
    }

    /// Handles an external capture trigger. Stale or repeated timestamps, and
    /// triggers arriving while capture is not running, yield `Ok(None)`.
    pub async fn record_trigger(
        &self,
        ts: i64,
        frame: &DynamicImage,
        click: Option<Point>,
    ) -> Result<Option<String>, RecorderError> {
        let accepted = self.session()?.accept_trigger(ts);
        if !accepted || !self.state()?.is_capturing() {
            return Ok(None);
        }
        match click {
            Some(click) => Ok(Some(self.record_click(frame, click).await?.step_id)),
            None => Ok(Some(self.record_manual_step(frame)?)),
        }
    }
}

fn highlighted_screenshot_of(frame: &DynamicImage, click: Point) -> Option<String> {
    let mut marked = frame.to_rgba8();
    draw_click_highlight(&mut marked, click);
    screenshot_of(&DynamicImage::ImageRgba8(marked))
}

fn screenshot_of(frame: &DynamicImage) -> Option<String> {
    match png_data_url(frame) {
        Ok(url) => Some(url),
        Err(err) => {
            warn!(error = %err, "failed to encode screenshot");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::NoRecognizer;
    use base64::Engine;
    use std::sync::Arc;

    fn recorder() -> Recorder {
        let suggester = LabelSuggester::new(Arc::new(NoRecognizer), Default::default());
        Recorder::new(suggester, Locale::Pt)
    }

    #[tokio::test]
    async fn click_requires_capture() {
        let recorder = recorder();
        let frame = DynamicImage::new_rgba8(640, 480);
        let err = recorder
            .record_click(&frame, Point::new(10.0, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(err, RecorderError::NotCapturing));
    }

    #[tokio::test]
    async fn out_of_bounds_click_is_rejected() {
        let recorder = recorder();
        recorder.start().expect("start");
        let frame = DynamicImage::new_rgba8(640, 480);
        let err = recorder
            .record_click(&frame, Point::new(641.0, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(err, RecorderError::ClickOutOfBounds { .. }));
        assert!(recorder.steps().expect("steps").is_empty());
    }

    #[tokio::test]
    async fn unavailable_backend_still_records_step() {
        let recorder = recorder();
        recorder.start().expect("start");
        let frame = DynamicImage::new_rgba8(640, 480);
        let outcome = recorder
            .record_click(&frame, Point::new(100.0, 100.0))
            .await
            .expect("record click");
        assert_eq!(outcome.label, None);
        assert!(outcome.applied);

        let steps = recorder.steps().expect("steps");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].title, "Clicado no ponto (100, 100)");
        assert!(steps[0].description.starts_with("Clique na área indicada"));
        assert!(steps[0]
            .screenshot
            .as_deref()
            .is_some_and(|s| s.starts_with("data:image/png;base64,")));
    }

    #[tokio::test]
    async fn click_screenshot_carries_pointer_marker() {
        let recorder = recorder();
        recorder.start().expect("start");
        let frame = DynamicImage::new_rgba8(640, 480);
        recorder
            .record_click(&frame, Point::new(320.0, 240.0))
            .await
            .expect("record click");

        let steps = recorder.steps().expect("steps");
        let payload = steps[0]
            .screenshot
            .as_deref()
            .and_then(|url| url.strip_prefix("data:image/png;base64,"))
            .expect("png data url");
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .expect("decode");
        let shot = image::load_from_memory(&bytes).expect("load png").to_rgba8();
        assert_eq!(shot.dimensions(), (640, 480));
        assert_ne!(shot.get_pixel(320, 240), &frame.to_rgba8()[(320, 240)]);
        assert_eq!(shot.get_pixel(600, 20), &frame.to_rgba8()[(600, 20)]);
    }

    #[test]
    fn manual_step_screenshot_is_unmarked() {
        let recorder = recorder();
        recorder.start().expect("start");
        let frame = DynamicImage::new_rgba8(64, 48);
        recorder.record_manual_step(&frame).expect("manual step");
        let steps = recorder.steps().expect("steps");
        assert_eq!(steps[0].screenshot, screenshot_of(&frame));
    }

    #[test]
    fn stop_twice_is_an_invalid_transition() {
        let recorder = recorder();
        recorder.start().expect("start");
        recorder.stop().expect("stop");
        assert!(matches!(recorder.stop(), Err(RecorderError::State(_))));
        assert_eq!(recorder.capture_state().expect("state"), CaptureState::Stopped);
    }
}
