//! Assistant service implementation
//!
//! Builds the grounding context for the campus assistant from a snapshot of
//! live events and clubs, and relays conversation turns to the completion
//! API. The snapshot is taken once when a session starts and is not
//! refreshed mid-conversation.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AssistantConfig;
use crate::database::{ClubRepository, EventRepository};
use crate::models::{Club, Event};
use crate::utils::errors::{AssistantError, AssistantResult, ClubMateError, Result};
use crate::utils::logging;

/// Fixed instruction prepended to every session's grounding message
const GROUNDING_INSTRUCTION: &str = "You are the ClubMate campus assistant. \
Answer only questions about the events and clubs listed below, and suggestions \
based on them. You may use general knowledge to elaborate on listed items, for \
example inferring a plausible agenda for a named event. Politely decline any \
question outside campus events and clubs.";

/// Build the grounding context block from a snapshot of events and clubs.
///
/// Each entity becomes a single line under its labeled section; the labels
/// are always present, even when a section is empty.
pub fn build_grounding_context(events: &[Event], clubs: &[Club]) -> String {
    let mut context = String::from(GROUNDING_INSTRUCTION);

    context.push_str("\n\nUpcoming Events:\n");
    for event in events {
        context.push_str(&format!(
            "- {} on {}, {} at {}\n",
            event.title,
            event.event_date.format("%Y-%m-%d"),
            event.event_time.format("%H:%M"),
            event.location,
        ));
    }

    context.push_str("\nClubs:\n");
    for club in clubs {
        context.push_str(&format!("- {}: {}\n", club.name, club.description));
    }

    context
}

/// One conversation turn, either side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// A grounded assistant conversation.
///
/// The grounding context is fixed at session start; user and model turns
/// accumulate in `history`. Failed exchanges leave the history untouched so
/// the same turn can be retried.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    grounding: String,
    pub history: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(grounding: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            grounding,
            history: Vec::new(),
        }
    }

    /// Assemble the wire contents for a new user turn: the grounding
    /// message and its acknowledgement, the accumulated history, then the
    /// new turn.
    pub fn request_contents(&self, text: &str) -> Vec<Content> {
        let mut contents = Vec::with_capacity(self.history.len() + 3);
        contents.push(Content::from_text(ChatRole::User, &self.grounding));
        contents.push(Content::from_text(ChatRole::Model, "Understood."));
        for turn in &self.history {
            contents.push(Content::from_text(turn.role, &turn.text));
        }
        contents.push(Content::from_text(ChatRole::User, text));
        contents
    }

    /// Record a completed exchange in the session history
    pub fn record_exchange(&mut self, text: &str, reply: &str) {
        self.history.push(ChatTurn {
            role: ChatRole::User,
            text: text.to_string(),
        });
        self.history.push(ChatTurn {
            role: ChatRole::Model,
            text: reply.to_string(),
        });
    }
}

/// Completion API request structure
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    fn from_text(role: ChatRole, text: &str) -> Self {
        Self {
            role: role.as_str().to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Completion API response structure
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

/// HTTP client for the completion API
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    settings: AssistantConfig,
}

impl CompletionClient {
    /// Create a new CompletionClient instance
    pub fn new(settings: AssistantConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent("ClubMate/1.0")
            .build()
            .map_err(ClubMateError::Http)?;

        Ok(Self { client, settings })
    }

    /// Send the assembled contents to the completion API and return the
    /// generated text
    pub async fn generate(&self, contents: Vec<Content>) -> AssistantResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.settings.api_url, self.settings.model, self.settings.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&GenerateContentRequest { contents })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout
                } else if e.is_connect() {
                    AssistantError::ServiceUnavailable
                } else {
                    AssistantError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

        let text: String = completion
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AssistantError::InvalidResponse(
                "completion returned no candidates".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Assistant service: session lifecycle plus the completion exchange
#[derive(Debug, Clone)]
pub struct AssistantService {
    events: EventRepository,
    clubs: ClubRepository,
    completion: CompletionClient,
}

impl AssistantService {
    /// Create a new AssistantService instance
    pub fn new(
        events: EventRepository,
        clubs: ClubRepository,
        settings: AssistantConfig,
    ) -> Result<Self> {
        Ok(Self {
            events,
            clubs,
            completion: CompletionClient::new(settings)?,
        })
    }

    /// Start a session: snapshot current events and clubs into a grounding
    /// context. Entities authored after this point are not visible to the
    /// session.
    pub async fn start_session(&self) -> Result<ChatSession> {
        let events = self.events.list().await?;
        let clubs = self.clubs.list().await?;

        let session = ChatSession::new(build_grounding_context(&events, &clubs));
        info!(
            session_id = %session.id,
            events = events.len(),
            clubs = clubs.len(),
            "Assistant session started"
        );

        Ok(session)
    }

    /// Send a user turn and append the exchange to the session history.
    ///
    /// On failure the history is left untouched so the turn can be retried
    /// against the same grounding.
    pub async fn send_message(&self, session: &mut ChatSession, text: &str) -> Result<String> {
        debug!(session_id = %session.id, "Sending assistant message");

        let contents = session.request_contents(text);
        let reply = match self.completion.generate(contents).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "Completion exchange failed");
                return Err(ClubMateError::Assistant(e));
            }
        };

        session.record_exchange(text, &reply);
        logging::log_assistant_exchange(&session.id.to_string(), text.len(), reply.len());

        Ok(reply)
    }
}
