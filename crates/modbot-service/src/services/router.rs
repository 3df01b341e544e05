//! Session router - one live conversation per user
//!
//! Inbound messages are routed by author. A session's mutex is held for a
//! whole transition, so one author's messages are handled strictly in order
//! while different authors proceed concurrently.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use modbot_common::ConversationConfig;
use modbot_core::{PlatformUser, ReportDraft, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceError;
use crate::session::{IntakeSession, ReviewSession, HELP_KEYWORD};

/// A live conversation of either kind
#[derive(Debug)]
pub enum ConversationSession {
    Intake(IntakeSession),
    Review(ReviewSession),
}

impl ConversationSession {
    pub fn is_finished(&self) -> bool {
        match self {
            Self::Intake(s) => s.is_finished(),
            Self::Review(s) => s.is_finished(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Intake(_) => "intake",
            Self::Review(_) => "review",
        }
    }
}

type SharedSession = Arc<Mutex<ConversationSession>>;

/// Registry of live conversations keyed by author
pub struct SessionRouter {
    ctx: ServiceContext,
    keywords: ConversationConfig,
    sessions: DashMap<Snowflake, SharedSession>,
}

impl SessionRouter {
    pub fn new(ctx: ServiceContext, keywords: ConversationConfig) -> Self {
        Self {
            ctx,
            keywords,
            sessions: DashMap::new(),
        }
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Number of conversations currently in progress
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn has_session(&self, user_id: Snowflake) -> bool {
        self.sessions.contains_key(&user_id)
    }

    /// Handle one inbound message and return the replies to its author
    #[instrument(skip(self, author, text), fields(author = %author.id))]
    pub async fn handle_inbound(&self, author: &PlatformUser, text: &str) -> Vec<String> {
        let text = text.trim();

        let (session, mut guard) = loop {
            let existing = self.sessions.get(&author.id).map(|s| Arc::clone(s.value()));
            let session = match existing {
                Some(session) => session,
                None => match self.open_session(author, text) {
                    Ok(session) => session,
                    Err(reply) => return vec![reply],
                },
            };

            let guard = Arc::clone(&session).lock_owned().await;
            if !guard.is_finished() {
                break (session, guard);
            }
            // Finished while this message waited; it belongs to a new conversation.
            self.discard(author.id, &session);
        };

        let mut replies = match &mut *guard {
            ConversationSession::Intake(intake) => {
                let mut replies = intake.handle_message(text, self.ctx.transport()).await;
                if let Some(draft) = intake.take_draft() {
                    replies.push(self.file_draft(draft).await);
                }
                replies
            }
            ConversationSession::Review(review) => review.handle_message(text, &self.ctx).await,
        };

        if guard.is_finished() && self.discard(author.id, &session) {
            info!(kind = guard.kind(), "Conversation finished");
        }
        drop(guard);

        if replies.is_empty() {
            replies.push(self.usage_hint(author.id));
        }
        replies
    }

    /// Remove `session` unless a newer session already replaced it
    fn discard(&self, author_id: Snowflake, session: &SharedSession) -> bool {
        self.sessions
            .remove_if(&author_id, |_, current| Arc::ptr_eq(current, session))
            .is_some()
    }

    /// Start a conversation if `text` is a start keyword the author may use
    fn open_session(&self, author: &PlatformUser, text: &str) -> Result<SharedSession, String> {
        let session = if text == self.keywords.intake_keyword {
            ConversationSession::Intake(IntakeSession::new(author.clone()))
        } else if text == self.keywords.review_keyword {
            if !self.ctx.moderation().is_moderator(author.id) {
                info!("Review refused for non-moderator");
                return Err("Only moderators can start a review.".to_string());
            }
            ConversationSession::Review(ReviewSession::new(author.id))
        } else if text == HELP_KEYWORD {
            return Err(self.general_help(author.id));
        } else {
            return Err(self.usage_hint(author.id));
        };

        info!(kind = session.kind(), "Conversation started");
        let entry = self
            .sessions
            .entry(author.id)
            .or_insert_with(|| Arc::new(Mutex::new(session)));
        Ok(Arc::clone(entry.value()))
    }

    async fn file_draft(&self, draft: ReportDraft) -> String {
        match self.ctx.report_repo().append(draft).await {
            Ok(report) => {
                info!(report_id = %report.id, "Intake filed report");
                format!("Your report has been filed with ID {}.", report.id)
            }
            Err(e) => {
                let err = ServiceError::from(e);
                error!(code = err.error_code(), error = %err, "Filing report failed");
                "Your report could not be saved right now. Please try again later.".to_string()
            }
        }
    }

    fn general_help(&self, user_id: Snowflake) -> String {
        let mut help = format!(
            "Say `{}` to report a message that breaks the rules.",
            self.keywords.intake_keyword
        );
        if self.ctx.moderation().is_moderator(user_id) {
            help.push_str(&format!(
                "\nSay `{}` to prioritize or act on open reports.",
                self.keywords.review_keyword
            ));
        }
        help.push_str("\nDuring a conversation, say `help` for the current step or `cancel` to stop.");
        help
    }

    fn usage_hint(&self, user_id: Snowflake) -> String {
        if self.has_session(user_id) {
            return "Say `help` if you are unsure what to reply.".to_string();
        }
        format!(
            "Say `{}` to start a report, or `{HELP_KEYWORD}` for more options.",
            self.keywords.intake_keyword
        )
    }
}
