//! SSML helpers shared by the response builders.

use crate::recipe::Step;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches any angle-bracket tag; used to strip markup for card content.
static SSML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new("<[^>]+>").expect("valid tag pattern"));

/// Wrapper marker that classifies output text as SSML.
pub const SSML_WRAPPER: &str = "<speak>";

/// Standard reprompt asked after every spoken step.
pub const STEP_REPROMPT: &str = "Are you finished with this step?  ";

/// Wraps text in SSML headers.
pub fn to_ssml(text: &str) -> String {
    format!("<speak>{}</speak>", text)
}

/// Strips all angle-bracket tags from markup text.
pub fn strip_ssml(ssml: &str) -> String {
    SSML_TAG.replace_all(ssml, "").into_owned()
}

/// Renders a duration as an SSML break, e.g. `<break time="2s"/> `.
///
/// An empty duration renders as nothing.
pub fn ssml_pause(duration: &str) -> String {
    if duration.is_empty() {
        String::new()
    } else {
        format!("<break time=\"{}\"/> ", duration)
    }
}

/// Spoken form of a step: the instruction followed by a pause sized to its
/// estimated time.
pub fn step_speech(step: &Step) -> String {
    let pause = step
        .estimated_time
        .as_deref()
        .map(ssml_pause)
        .unwrap_or_default();
    format!("{}{}", step.instruction, pause)
}

/// Joins list elements with commas and a final conjunction. Oxford comma!
fn comma_conjoin(items: &[&str], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{} {} {}", first, conjunction, second),
        [init @ .., last] => {
            format!("{}, {} {}", init.join(", "), conjunction, last)
        }
    }
}

/// Joins list elements with commas and a final "and".
pub fn comma_and(items: &[&str]) -> String {
    comma_conjoin(items, "and")
}

/// Joins list elements with commas and a final "or".
pub fn comma_or(items: &[&str]) -> String {
    comma_conjoin(items, "or")
}
