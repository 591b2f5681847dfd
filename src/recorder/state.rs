#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderAction {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecorderStateError {
    #[error("cannot {action:?} while {from:?}")]
    InvalidTransition {
        from: CaptureState,
        action: RecorderAction,
    },
}

pub struct RecorderState {
    state: CaptureState,
}

impl RecorderState {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    pub fn current(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    fn transition(
        &mut self,
        allowed: &[CaptureState],
        to: CaptureState,
        action: RecorderAction,
    ) -> Result<(), RecorderStateError> {
        if allowed.contains(&self.state) {
            self.state = to;
            Ok(())
        } else {
            Err(RecorderStateError::InvalidTransition {
                from: self.state,
                action,
            })
        }
    }

    pub fn start(&mut self) -> Result<(), RecorderStateError> {
        self.transition(
            &[CaptureState::Idle, CaptureState::Stopped],
            CaptureState::Capturing,
            RecorderAction::Start,
        )
    }

    pub fn stop(&mut self) -> Result<(), RecorderStateError> {
        self.transition(
            &[CaptureState::Capturing],
            CaptureState::Stopped,
            RecorderAction::Stop,
        )
    }
}

impl Default for RecorderState {
    fn default() -> Self {
        Self::new()
    }
}
