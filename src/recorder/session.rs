use super::types::{Step, StepField};
use super::RecorderError;
use crate::i18n::{self, Locale};
use crate::labeling::{sanitize_label, Point};
use tracing::debug;
use uuid::Uuid;

/// Steps recorded so far plus the small amount of UI state around them.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    locale: Locale,
    steps: Vec<Step>,
    next_seq: usize,
    cursor: usize,
    last_trigger_ts: i64,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn click_coords(click: Point) -> (i64, i64) {
    (click.x.round() as i64, click.y.round() as i64)
}

impl Session {
    pub fn new(locale: Locale) -> Self {
        Self {
            id: Uuid::new_v4(),
            locale,
            steps: Vec::new(),
            next_seq: 1,
            cursor: 0,
            last_trigger_ts: 0,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn next_step_id(&mut self) -> String {
        let id = format!("step-{:03}", self.next_seq);
        self.next_seq += 1;
        id
    }

    fn push(&mut self, step: Step) -> &Step {
        self.steps.push(step);
        self.cursor = self.steps.len() - 1;
        &self.steps[self.cursor]
    }

    /// Adds a step without a click position.
    pub fn add_manual_step(&mut self, screenshot: Option<String>) -> &Step {
        let when = chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
        let step = Step {
            id: self.next_step_id(),
            title: i18n::manual_step_title(self.locale, self.steps.len() + 1, &when),
            description: i18n::manual_step_description(self.locale).to_string(),
            tag: String::new(),
            screenshot,
            click: None,
            created_at_ms: now_ms(),
        };
        self.push(step)
    }

    /// Adds a step for a click; the title is replaced once a label arrives.
    pub fn add_click_step(&mut self, screenshot: Option<String>, click: Point) -> &Step {
        let (x, y) = click_coords(click);
        let step = Step {
            id: self.next_step_id(),
            title: i18n::click_step_title(self.locale, x, y),
            description: String::new(),
            tag: String::new(),
            screenshot,
            click: Some(click),
            created_at_ms: now_ms(),
        };
        self.push(step)
    }

    /// Applies a suggestion result to `step_id`.
    ///
    /// Only the most recent step accepts suggestions; a result for an older or
    /// removed step is dropped and `false` is returned.
    pub fn apply_suggestion(&mut self, step_id: &str, label: Option<&str>, click: Point) -> bool {
        let locale = self.locale;
        let Some(step) = self.steps.last_mut().filter(|s| s.id == step_id) else {
            debug!(step_id, "dropping suggestion for stale step");
            return false;
        };

        let (x, y) = click_coords(click);
        match sanitize_label(label) {
            Some(label) => {
                step.set(StepField::Title, label.as_str());
                step.set(StepField::Tag, label.as_str());
                step.set(
                    StepField::Description,
                    i18n::labelled_click_description(locale, &label, x, y),
                );
            }
            None => {
                step.set(
                    StepField::Description,
                    i18n::unlabelled_click_description(locale, x, y),
                );
            }
        }
        true
    }

    pub fn update_step(
        &mut self,
        step_id: &str,
        field: StepField,
        value: impl Into<String>,
    ) -> Result<(), RecorderError> {
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.id == step_id)
            .ok_or_else(|| RecorderError::UnknownStep(step_id.to_string()))?;
        step.set(field, value);
        Ok(())
    }

    pub fn remove_step(&mut self, step_id: &str) -> Result<Step, RecorderError> {
        let idx = self
            .steps
            .iter()
            .position(|s| s.id == step_id)
            .ok_or_else(|| RecorderError::UnknownStep(step_id.to_string()))?;
        let removed = self.steps.remove(idx);
        if self.steps.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.steps.len() {
            self.cursor = self.steps.len() - 1;
        }
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.steps.clear();
        self.cursor = 0;
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the carousel cursor; out-of-range moves are ignored.
    pub fn navigate(&mut self, delta: isize) -> bool {
        let Some(target) = self.cursor.checked_add_signed(delta) else {
            return false;
        };
        if target >= self.steps.len() {
            return false;
        }
        self.cursor = target;
        true
    }

    /// Accepts a hotkey trigger only if its timestamp is newer than the last one seen.
    pub fn accept_trigger(&mut self, ts: i64) -> bool {
        if ts <= 0 || ts <= self.last_trigger_ts {
            return false;
        }
        self.last_trigger_ts = ts;
        true
    }
}
