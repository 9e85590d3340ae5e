use serde::Serialize;

/// Recorder phase for the active question
///
/// Legal transitions: `Idle --begin--> Recording --end--> Stopped`,
/// `Stopped --play--> Playing --pause--> Stopped`, and `Stopped --begin-->
/// Recording` (discarding the previous take). Everything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecorderState {
    Idle,
    Recording,
    Stopped,
    Playing,
}

impl RecorderState {
    /// Whether `begin` is legal from this state
    pub fn can_begin(self) -> bool {
        matches!(self, RecorderState::Idle | RecorderState::Stopped)
    }

    /// Whether an answer may be submitted in this state
    ///
    /// Submission is forbidden mid-recording and mid-playback; the user must
    /// stop (or pause) first so the in-flight capture cannot race the upload.
    pub fn can_submit(self) -> bool {
        matches!(self, RecorderState::Idle | RecorderState::Stopped)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecorderState::Idle => "idle",
            RecorderState::Recording => "recording",
            RecorderState::Stopped => "stopped",
            RecorderState::Playing => "playing",
        }
    }
}
