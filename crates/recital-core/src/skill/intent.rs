//! Closed intent set for the skill's interaction model.

use crate::error::{RecitalError, Result};
use std::fmt;

/// Intents the skill understands.
///
/// The dispatch table is a closed enum rather than a chain of string
/// comparisons, so every handler arm is checked for exhaustiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Begin a named recipe (carries the `Recipe` slot).
    Start,
    Yes,
    No,
    Next,
    Previous,
    Repeat,
    Resume,
    StartOver,
    Pause,
    Help,
    Cancel,
    Stop,
}

impl Intent {
    /// Maps a platform intent name onto the closed intent set.
    ///
    /// # Errors
    ///
    /// Unrecognized names fail with `RecitalError::InvalidIntent`, which
    /// propagates to the caller; the core defines no graceful spoken
    /// response for them.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "StartIntent" => Ok(Intent::Start),
            "AMAZON.YesIntent" => Ok(Intent::Yes),
            "AMAZON.NoIntent" => Ok(Intent::No),
            "AMAZON.NextIntent" => Ok(Intent::Next),
            "AMAZON.PreviousIntent" => Ok(Intent::Previous),
            "AMAZON.RepeatIntent" => Ok(Intent::Repeat),
            "AMAZON.ResumeIntent" => Ok(Intent::Resume),
            "AMAZON.StartOverIntent" => Ok(Intent::StartOver),
            "AMAZON.PauseIntent" => Ok(Intent::Pause),
            "AMAZON.HelpIntent" => Ok(Intent::Help),
            "AMAZON.CancelIntent" => Ok(Intent::Cancel),
            "AMAZON.StopIntent" => Ok(Intent::Stop),
            other => Err(RecitalError::invalid_intent(other)),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Start => "start",
            Intent::Yes => "yes",
            Intent::No => "no",
            Intent::Next => "next",
            Intent::Previous => "previous",
            Intent::Repeat => "repeat",
            Intent::Resume => "resume",
            Intent::StartOver => "start_over",
            Intent::Pause => "pause",
            Intent::Help => "help",
            Intent::Cancel => "cancel",
            Intent::Stop => "stop",
        };
        write!(f, "{}", name)
    }
}
