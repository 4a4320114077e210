//! Outbound response envelope and builders.
//!
//! The builders mirror the platform's envelope: spoken output (plain text or
//! SSML, chosen by markup detection), an optional reprompt, an optional
//! visual card, and the attribute bag echoed back for the next turn.

use crate::session::SessionAttributes;
use crate::speech::{SSML_WRAPPER, strip_ssml};
use serde::{Deserialize, Serialize};

/// Spoken output, classified by markup detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    /// Plain synthesized text.
    PlainText { text: String },
    /// Speech markup, embedded verbatim.
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    /// Classifies text: SSML when it carries the `<speak>` wrapper marker,
    /// plain text otherwise.
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.contains(SSML_WRAPPER) {
            OutputSpeech::Ssml { ssml: text }
        } else {
            OutputSpeech::PlainText { text }
        }
    }

    /// True when this output was classified as markup.
    pub fn is_ssml(&self) -> bool {
        matches!(self, OutputSpeech::Ssml { .. })
    }
}

/// Speech played when the user stays silent after a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Visual companion summary shown on devices with a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub card_type: String,
    pub title: String,
    pub content: String,
}

/// The response proper: speech, reprompt, card, end-of-session flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    pub output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    pub should_end_session: bool,
}

/// The complete outbound envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub version: String,
    pub session_attributes: SessionAttributes,
    pub response: SpeechletResponse,
}

/// Assembles a speechlet response.
///
/// Markup detection is applied independently to `output` and
/// `reprompt_text`. The card is included when `show_card` is true or
/// `card_content` is non-empty; absent explicit content, the card text
/// defaults to the tag-stripped output.
pub fn speechlet_response(
    title: &str,
    output: &str,
    reprompt_text: Option<&str>,
    should_end_session: bool,
    show_card: bool,
    card_content: &str,
) -> SpeechletResponse {
    let card = if show_card || !card_content.is_empty() {
        Some(Card {
            card_type: "Simple".to_string(),
            title: title.to_string(),
            content: if card_content.is_empty() {
                strip_ssml(output)
            } else {
                card_content.to_string()
            },
        })
    } else {
        None
    };

    SpeechletResponse {
        output_speech: OutputSpeech::classify(output),
        reprompt: reprompt_text.map(|text| Reprompt {
            output_speech: OutputSpeech::classify(text),
        }),
        card,
        should_end_session,
    }
}

/// Wraps a speechlet response with the version tag and the attribute bag
/// echoed back for the next turn.
pub fn envelope(
    version: &str,
    session_attributes: SessionAttributes,
    response: SpeechletResponse,
) -> SkillResponse {
    SkillResponse {
        version: version.to_string(),
        session_attributes,
        response,
    }
}
