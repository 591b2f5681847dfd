//! Test-step recording helpers: OCR click labels and the step session around them.

pub mod config;
pub mod i18n;
pub mod labeling;
pub mod logging;
pub mod recorder;

pub use config::{Config, ConfigError, SuggestConfig};
pub use labeling::{LabelSuggester, Point, RawWord, RecognizerError, TextRecognizer};
pub use recorder::{ClickOutcome, Recorder, RecorderError};

/// Builds a tesseract-backed recorder from the user's config.
///
/// Typical host startup:
///
/// ```no_run
/// use homolog_lib::{logging, recorder_from_config, Config};
///
/// logging::init(false);
/// let mut config = Config::load();
/// config.language = "pt".to_string();
/// config.save()?;
///
/// let recorder = recorder_from_config(&config);
/// recorder.start()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn recorder_from_config(config: &Config) -> Recorder {
    let locale = i18n::resolve_locale(i18n::parse_app_language(Some(&config.language)));
    Recorder::new(LabelSuggester::from_config(config), locale)
}
