//! Request routing and intent dispatch.
//!
//! `SkillHandler` checks the security gate, routes by request type, and
//! dispatches intents over the closed [`Intent`] set. Navigation context
//! comes from session attributes, falling back to the durable step log when
//! the session expired or the user continued on another device.

use crate::config::SkillConfig;
use crate::error::{RecitalError, Result};
use crate::recipe::{Recipe, RecipeStore};
use crate::request::{IntentPayload, RequestBody, SessionEnvelope, SkillRequest};
use crate::response::{SkillResponse, SpeechletResponse, envelope, speechlet_response};
use crate::session::SessionAttributes;
use crate::skill::Intent;
use crate::speech::{STEP_REPROMPT, comma_or, ssml_pause, step_speech, to_ssml};
use crate::step_log::StepLogRepository;
use std::sync::Arc;

/// Slot carrying the requested recipe name on `Start`.
const RECIPE_SLOT: &str = "Recipe";

/// Break inserted when the user asks to pause.
const PAUSE_DURATION: &str = "10s";

/// Resolved navigation context for one request.
struct StepContext<'a> {
    recipe_name: String,
    recipe: &'a Recipe,
    step_index: usize,
}

/// Dispatches inbound platform events.
///
/// Holds everything a request needs — configuration, the recipe store, and
/// the durable step log — so handler logic performs no ambient lookups.
pub struct SkillHandler {
    config: SkillConfig,
    recipes: RecipeStore,
    step_log: Arc<dyn StepLogRepository>,
}

impl SkillHandler {
    /// Creates a handler.
    ///
    /// # Arguments
    ///
    /// * `config` - expected application id and response version
    /// * `recipes` - the loaded recipe store
    /// * `step_log` - repository backend for the durable step log
    pub fn new(
        config: SkillConfig,
        recipes: RecipeStore,
        step_log: Arc<dyn StepLogRepository>,
    ) -> Self {
        Self {
            config,
            recipes,
            step_log,
        }
    }

    /// Routes an inbound event.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(response))` for launch and intent requests
    /// - `Ok(None)` for `SessionEndedRequest`, which expects no envelope
    ///
    /// # Errors
    ///
    /// - `Authorization` when the application id does not match, before any
    ///   handler runs
    /// - `InvalidIntent` for names outside the interaction model
    pub async fn handle(&self, event: SkillRequest) -> Result<Option<SkillResponse>> {
        self.verify_application(&event.session)?;

        if event.session.new {
            log::info!("session started: {}", event.session.session_id);
        }

        match &event.request {
            RequestBody::LaunchRequest { request_id } => {
                log::debug!(
                    "launch request {} (session {})",
                    request_id,
                    event.session.session_id
                );
                Ok(Some(self.welcome()))
            }
            RequestBody::IntentRequest { request_id, intent } => {
                log::debug!(
                    "intent request {} '{}' (session {})",
                    request_id,
                    intent.name,
                    event.session.session_id
                );
                self.on_intent(intent, &event.session).await.map(Some)
            }
            RequestBody::SessionEndedRequest { request_id, reason } => {
                log::info!(
                    "session ended: {} (request {}, reason {:?})",
                    event.session.session_id,
                    request_id,
                    reason
                );
                Ok(None)
            }
        }
    }

    /// Security gate: every inbound event must carry the configured
    /// application id.
    fn verify_application(&self, session: &SessionEnvelope) -> Result<()> {
        if session.application.application_id != self.config.application_id {
            log::warn!(
                "rejected event for application '{}'",
                session.application.application_id
            );
            return Err(RecitalError::authorization(
                &session.application.application_id,
            ));
        }
        Ok(())
    }

    async fn on_intent(
        &self,
        payload: &IntentPayload,
        session: &SessionEnvelope,
    ) -> Result<SkillResponse> {
        let intent = Intent::parse(&payload.name)?;
        log::debug!("dispatching {} (session {})", intent, session.session_id);
        match intent {
            Intent::Start => self.start_recipe(payload, session).await,
            Intent::Yes | Intent::No => self.yes_no(intent, session).await,
            Intent::Next => self.next_step(session).await,
            Intent::Previous => self.previous_step(session).await,
            Intent::Repeat | Intent::Resume => self.repeat_step(session).await,
            Intent::StartOver => self.start_over(session).await,
            Intent::Pause => Ok(self.pause(session)),
            Intent::Help => Ok(self.help()),
            Intent::Cancel | Intent::Stop => Ok(self.sign_off()),
        }
    }

    fn respond(&self, attrs: SessionAttributes, response: SpeechletResponse) -> SkillResponse {
        envelope(&self.config.response_version, attrs, response)
    }

    /// Welcome response for a launch without an intent.
    fn welcome(&self) -> SkillResponse {
        let choices: Vec<String> = self
            .recipes
            .names()
            .into_iter()
            .map(|name| format!("begin {}", name))
            .collect();
        let choice_refs: Vec<&str> = choices.iter().map(String::as_str).collect();

        let speech = format!(
            "Welcome to Recital.  Which set of instructions should I read?  \
             You can say {}.  ",
            comma_or(&choice_refs)
        );
        let reprompt = format!("Should I {}?  ", comma_or(&choice_refs));

        self.respond(
            SessionAttributes::default(),
            speechlet_response(
                "Welcome to Recital!",
                &to_ssml(&speech),
                Some(&reprompt),
                false,
                true,
                "",
            ),
        )
    }

    /// Static help text describing the skill's options.
    fn help(&self) -> SkillResponse {
        let names = self.recipes.names();
        let first = names.first().copied().unwrap_or("a recipe");
        let speech = format!(
            "Recital lets you navigate sets of instructions.  \
             To begin, say begin {}, or choose from {}.  \
             While a recipe is running you can say next, previous, repeat, \
             or start over.  ",
            first,
            comma_or(&names)
        );
        let reprompt = format!("Try saying begin {} to start.", first);

        self.respond(
            SessionAttributes::default(),
            speechlet_response(
                "How to use Recital",
                &to_ssml(&speech),
                Some(&reprompt),
                false,
                true,
                "",
            ),
        )
    }

    /// Sign-off: empty speech, no card, session ends.
    fn sign_off(&self) -> SkillResponse {
        self.respond(
            SessionAttributes::default(),
            speechlet_response("Signing Off", "", None, true, false, ""),
        )
    }

    /// Speaks a long break so the user can catch up, then ends the session.
    fn pause(&self, session: &SessionEnvelope) -> SkillResponse {
        let attrs = SessionAttributes::resolve(session);
        self.respond(
            attrs,
            speechlet_response(
                "Waiting...",
                &to_ssml(&ssml_pause(PAUSE_DURATION)),
                None,
                true,
                false,
                "",
            ),
        )
    }

    /// Starts the recipe named by the `Recipe` slot.
    async fn start_recipe(
        &self,
        payload: &IntentPayload,
        session: &SessionEnvelope,
    ) -> Result<SkillResponse> {
        let mut attrs = SessionAttributes::resolve(session);

        let recipe = payload
            .slot_value(RECIPE_SLOT)
            .and_then(|name| self.recipes.get(name).map(|recipe| (name, recipe)));
        let Some((name, recipe)) = recipe else {
            return Ok(self.unknown_recipe());
        };

        let first = recipe.first_index()?;
        let step = recipe
            .step(first)
            .ok_or_else(|| RecitalError::internal("first step missing after validation"))?;

        let speech = format!(
            "Great!  Let's begin.  {}First, {}",
            recipe.intro,
            step_speech(step)
        );

        self.step_log
            .append_step(&session.user.user_id, name, first)
            .await?;
        attrs.set_position(name, first);

        Ok(self.respond(
            attrs,
            speechlet_response(
                &recipe.title,
                &to_ssml(&speech),
                Some(STEP_REPROMPT),
                false,
                false,
                "",
            ),
        ))
    }

    /// Spoken apology for a recipe name the store does not know.
    fn unknown_recipe(&self) -> SkillResponse {
        self.respond(
            SessionAttributes::default(),
            speechlet_response(
                "Unknown Recipe",
                "I'm sorry, but I don't know that recipe.",
                None,
                true,
                false,
                "",
            ),
        )
    }

    /// Yes advances like Next; No signs off. Without context, neither
    /// question was asked, so say so and end the session.
    async fn yes_no(&self, intent: Intent, session: &SessionEnvelope) -> Result<SkillResponse> {
        let attrs = SessionAttributes::resolve(session);
        if attrs.has_context() {
            return match intent {
                Intent::Yes => self.next_step(session).await,
                _ => Ok(self.sign_off()),
            };
        }

        Ok(self.respond(
            attrs,
            speechlet_response(
                "Not sure what you mean",
                "I am not sure which question you're answering.",
                None,
                true,
                false,
                "",
            ),
        ))
    }

    /// Advances to the next step, or wraps up when the last step is done.
    async fn next_step(&self, session: &SessionEnvelope) -> Result<SkillResponse> {
        let Some(context) = self.resolve_context(session).await? else {
            return Ok(self.no_context());
        };
        let mut attrs = SessionAttributes::resolve(session);

        match context.recipe.next_index(context.step_index) {
            Some(next) => {
                let step = context
                    .recipe
                    .step(next)
                    .ok_or_else(|| RecitalError::internal("next index out of range"))?;

                self.step_log
                    .append_step(&session.user.user_id, &context.recipe_name, next)
                    .await?;
                attrs.set_position(&context.recipe_name, next);

                Ok(self.respond(
                    attrs,
                    speechlet_response(
                        "Next Step",
                        &to_ssml(&step_speech(step)),
                        Some(STEP_REPROMPT),
                        false,
                        false,
                        "",
                    ),
                ))
            }
            None => Ok(self.respond(
                attrs,
                speechlet_response(
                    &format!("{}: Finished!", context.recipe.title),
                    &to_ssml(&format!(
                        "That was the last step!  {}",
                        context.recipe.conclusion
                    )),
                    None,
                    true,
                    false,
                    "",
                ),
            )),
        }
    }

    /// Goes back one step, clamping at the first.
    async fn previous_step(&self, session: &SessionEnvelope) -> Result<SkillResponse> {
        let Some(context) = self.resolve_context(session).await? else {
            return Ok(self.no_context());
        };
        let mut attrs = SessionAttributes::resolve(session);

        let previous = context.recipe.previous_index(context.step_index);
        let step = context
            .recipe
            .step(previous)
            .ok_or_else(|| RecitalError::internal("previous index out of range"))?;

        self.step_log
            .append_step(&session.user.user_id, &context.recipe_name, previous)
            .await?;
        attrs.set_position(&context.recipe_name, previous);

        Ok(self.respond(
            attrs,
            speechlet_response(
                "Going Back",
                &to_ssml(&step_speech(step)),
                Some(STEP_REPROMPT),
                false,
                false,
                "",
            ),
        ))
    }

    /// Re-speaks the current step unchanged. Nothing is persisted.
    async fn repeat_step(&self, session: &SessionEnvelope) -> Result<SkillResponse> {
        let Some(context) = self.resolve_context(session).await? else {
            return Ok(self.no_context());
        };
        let attrs = SessionAttributes::resolve(session);

        let Some(step) = context.recipe.step(context.step_index) else {
            // Stale pointer past the end of the recipe; nothing to replay.
            return Ok(self.no_context());
        };

        Ok(self.respond(
            attrs,
            speechlet_response(
                "Replay Step",
                &to_ssml(&step_speech(step)),
                Some(STEP_REPROMPT),
                false,
                false,
                "",
            ),
        ))
    }

    /// Resets to the first step of the current recipe.
    async fn start_over(&self, session: &SessionEnvelope) -> Result<SkillResponse> {
        let Some(context) = self.resolve_context(session).await? else {
            return Ok(self.no_context());
        };
        let mut attrs = SessionAttributes::resolve(session);

        let first = context.recipe.first_index()?;
        let step = context
            .recipe
            .step(first)
            .ok_or_else(|| RecitalError::internal("first step missing after validation"))?;

        self.step_log
            .append_step(&session.user.user_id, &context.recipe_name, first)
            .await?;
        attrs.set_position(&context.recipe_name, first);

        Ok(self.respond(
            attrs,
            speechlet_response(
                "Starting Over",
                &to_ssml(&step_speech(step)),
                Some(STEP_REPROMPT),
                false,
                false,
                "",
            ),
        ))
    }

    /// Spoken apology when neither the session nor the durable store knows
    /// which instructions the user means.
    fn no_context(&self) -> SkillResponse {
        self.respond(
            SessionAttributes::default(),
            speechlet_response(
                "Nothing in Progress",
                "I'm not sure which instructions you're working on.  \
                 Say begin, followed by a recipe name, to start.",
                None,
                true,
                false,
                "",
            ),
        )
    }

    /// Resolves the navigation context from session attributes, falling back
    /// to the durable step log when the session lacks recipe/step context.
    async fn resolve_context(&self, session: &SessionEnvelope) -> Result<Option<StepContext<'_>>> {
        let attrs = SessionAttributes::resolve(session);

        if let Some(name) = attrs.recipe {
            if let Some(index) = attrs.last_step {
                return match self.recipes.get(&name) {
                    Some(recipe) => Ok(Some(StepContext {
                        recipe_name: name,
                        recipe,
                        step_index: index,
                    })),
                    None => {
                        // The resource no longer carries this recipe.
                        log::warn!("session references unknown recipe '{}'", name);
                        Ok(None)
                    }
                };
            }
        }

        let Some(record) = self.step_log.last_step(&session.user.user_id).await? else {
            return Ok(None);
        };
        match self.recipes.get(&record.recipe) {
            Some(recipe) => Ok(Some(StepContext {
                recipe_name: record.recipe,
                recipe,
                step_index: record.step_index,
            })),
            None => {
                log::warn!("step log references unknown recipe '{}'", record.recipe);
                Ok(None)
            }
        }
    }
}
