//! Intake conversation - turns a reporter's replies into a report draft
//!
//! One session per reporter. Each inbound message advances the state by at
//! most one step; anything unexpected re-prompts instead. The session only
//! talks to the transport to resolve the reported message. Filing the
//! finished draft is the router's job.

use tracing::{debug, warn};

use modbot_core::traits::Transport;
use modbot_core::{
    numbered_menu, DomainError, MessageLink, PlatformMessage, PlatformUser, ReportDraft,
    ReportReason, YesNo,
};

use super::{CANCEL_KEYWORD, HELP_KEYWORD};

const LINK_HELP: &str = "Please copy paste the link to the message you want to report.\n\
    You can obtain this link by right-clicking the message and clicking `Copy Message Link`.";
const RETRY_SUFFIX: &str = "Please try again or say `cancel` to cancel.";
const ADDITIONAL_INFO_PROMPT: &str =
    "Additional information (optional). Say `skip` if you have nothing to add:";
const IMPERSONATION_NOTE: &str =
    "If someone you know is being impersonated, please have them also reach out to us.";
const SKIP_KEYWORD: &str = "skip";

/// Where the intake conversation currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    Start,
    AwaitingLink,
    MessageIdentified,
    AwaitingConcerns(ReportReason),
    MoreInfo,
    UnmatchDecision,
    BlockDecision,
    ReadyToFile,
    Complete,
}

/// Per-reporter intake conversation
#[derive(Debug)]
pub struct IntakeSession {
    reporter: PlatformUser,
    state: IntakeState,
    message: Option<PlatformMessage>,
    reason: Option<ReportReason>,
    concerns: Vec<String>,
    additional_info: Option<String>,
    unmatch: bool,
    block: bool,
}

impl IntakeSession {
    pub fn new(reporter: PlatformUser) -> Self {
        Self {
            reporter,
            state: IntakeState::Start,
            message: None,
            reason: None,
            concerns: Vec::new(),
            additional_info: None,
            unmatch: false,
            block: false,
        }
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    #[inline]
    pub fn is_ready_to_file(&self) -> bool {
        self.state == IntakeState::ReadyToFile
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == IntakeState::Complete
    }

    /// Consume one message from the reporter and return the replies
    pub async fn handle_message(&mut self, text: &str, transport: &dyn Transport) -> Vec<String> {
        let text = text.trim();

        if self.is_finished() {
            return Vec::new();
        }
        if text == CANCEL_KEYWORD {
            self.state = IntakeState::Complete;
            return vec!["Report cancelled.".to_string()];
        }
        if text == HELP_KEYWORD {
            return vec![self.help()];
        }

        let before = self.state;
        let replies = match self.state {
            IntakeState::Start => {
                self.state = IntakeState::AwaitingLink;
                vec![format!(
                    "Thank you for starting the reporting process. \
                     Say `help` at any time for more information.\n\n{LINK_HELP}"
                )]
            }
            IntakeState::AwaitingLink => self.identify_message(text, transport).await,
            IntakeState::MessageIdentified => self.choose_reason(text),
            IntakeState::AwaitingConcerns(reason) => self.choose_concerns(reason, text),
            IntakeState::MoreInfo => self.record_additional_info(text),
            IntakeState::UnmatchDecision => self.decide_unmatch(text),
            IntakeState::BlockDecision => self.decide_block(text),
            IntakeState::ReadyToFile => vec!["Your report is being filed.".to_string()],
            IntakeState::Complete => Vec::new(),
        };

        if before != self.state {
            debug!(reporter = %self.reporter.id, from = ?before, to = ?self.state, "Intake advanced");
        }
        replies
    }

    /// Hand over the finished draft, completing the session
    ///
    /// Returns `None` unless the conversation has collected everything.
    pub fn take_draft(&mut self) -> Option<ReportDraft> {
        if !self.is_ready_to_file() {
            return None;
        }
        let message = self.message.take()?;
        let reason = self.reason?;
        self.state = IntakeState::Complete;

        Some(ReportDraft {
            reported_user: message.author.name,
            reported_user_id: message.author.id,
            reported_by: self.reporter.name.clone(),
            reporter_id: self.reporter.id,
            message_content: message.content,
            reason,
            relevant_concerns: std::mem::take(&mut self.concerns),
            additional_info: self.additional_info.take(),
            unmatch_requested: self.unmatch,
            block_requested: self.block,
        })
    }

    async fn identify_message(&mut self, text: &str, transport: &dyn Transport) -> Vec<String> {
        let Some(link) = MessageLink::find_in(text) else {
            return vec![format!("I'm sorry, I couldn't read that link. {RETRY_SUFFIX}")];
        };

        let message = match transport.fetch_message(link).await {
            Ok(message) => message,
            Err(DomainError::GuildNotFound(_)) => {
                return vec!["I cannot accept reports of messages from guilds that I'm not in. \
                     Please have the guild owner add me to the guild and try again."
                    .to_string()]
            }
            Err(DomainError::ChannelNotFound(_)) => {
                return vec![format!(
                    "It seems this channel was deleted or never existed. {RETRY_SUFFIX}"
                )]
            }
            Err(DomainError::MessageNotFound(_)) => {
                return vec![format!(
                    "It seems this message was deleted or never existed. {RETRY_SUFFIX}"
                )]
            }
            Err(e) => {
                warn!(link = %link, error = %e, "Message lookup failed");
                return vec![format!("I couldn't look up that message right now. {RETRY_SUFFIX}")];
            }
        };

        let replies = vec![
            "I found this message:".to_string(),
            message.quoted(),
            "Your report is private. Please select the reason for the report:".to_string(),
            ReportReason::menu(),
        ];
        self.message = Some(message);
        self.state = IntakeState::MessageIdentified;
        replies
    }

    fn choose_reason(&mut self, text: &str) -> Vec<String> {
        let Some(reason) = ReportReason::from_choice(text) else {
            return vec![format!(
                "Please reply with the number of a reason:\n{}",
                ReportReason::menu()
            )];
        };

        self.reason = Some(reason);
        if reason.has_concerns() {
            self.state = IntakeState::AwaitingConcerns(reason);
        } else {
            self.state = IntakeState::MoreInfo;
        }
        vec![reason.concern_menu()]
    }

    fn choose_concerns(&mut self, reason: ReportReason, text: &str) -> Vec<String> {
        let Some(selected) = reason.select_concerns(text) else {
            let hint = if reason.allows_multiple() {
                "Please reply with one or more of the listed numbers."
            } else {
                "Please reply with one of the listed numbers."
            };
            return vec![format!("{hint}\n{}", reason.concern_menu())];
        };

        self.concerns = selected.into_iter().map(str::to_string).collect();
        self.state = IntakeState::MoreInfo;

        if reason == ReportReason::FalseProfile {
            vec![format!("{IMPERSONATION_NOTE}\n\n{ADDITIONAL_INFO_PROMPT}")]
        } else {
            vec![ADDITIONAL_INFO_PROMPT.to_string()]
        }
    }

    fn record_additional_info(&mut self, text: &str) -> Vec<String> {
        self.additional_info = (!text.is_empty() && text != SKIP_KEYWORD).then(|| text.to_string());
        self.state = IntakeState::UnmatchDecision;

        let thanks = if self.reason == Some(ReportReason::ImminentDanger) {
            "Thank you for reporting. We take these reports seriously. \
             Our team will review your report and take appropriate action. \
             Please call 911 for all emergencies."
        } else {
            "Thank you for reporting. Our team will review your report and take appropriate action."
        };
        vec![
            thanks.to_string(),
            format!("Would you like to unmatch this user?\n{}", YesNo::MENU),
        ]
    }

    fn decide_unmatch(&mut self, text: &str) -> Vec<String> {
        match YesNo::from_choice(text) {
            Some(YesNo::Yes) => {
                self.unmatch = true;
                self.state = IntakeState::BlockDecision;
                vec![format!("Would you like to block this user?\n{}", YesNo::MENU)]
            }
            Some(YesNo::No) => {
                self.unmatch = false;
                self.block = false;
                self.state = IntakeState::ReadyToFile;
                vec!["Done".to_string()]
            }
            None => vec![format!(
                "Please reply 1 or 2. Would you like to unmatch this user?\n{}",
                YesNo::MENU
            )],
        }
    }

    fn decide_block(&mut self, text: &str) -> Vec<String> {
        match YesNo::from_choice(text) {
            Some(answer) => {
                self.block = answer.is_yes();
                self.state = IntakeState::ReadyToFile;
                vec!["Done".to_string()]
            }
            None => vec![format!(
                "Please reply 1 or 2. Would you like to block this user?\n{}",
                YesNo::MENU
            )],
        }
    }

    fn help(&self) -> String {
        let step = match self.state {
            IntakeState::Start | IntakeState::AwaitingLink => LINK_HELP.to_string(),
            IntakeState::MessageIdentified => format!(
                "Reply with the number of the reason that best describes the message:\n{}",
                ReportReason::menu()
            ),
            IntakeState::AwaitingConcerns(reason) => {
                let how = if reason.allows_multiple() {
                    "Reply with every number that applies, separated by spaces or commas:"
                } else {
                    "Reply with the number of the concern that applies:"
                };
                format!("{how}\n{}", numbered_menu(reason.concerns()))
            }
            IntakeState::MoreInfo => {
                "Tell us anything else our team should know, or say `skip` to continue.".to_string()
            }
            IntakeState::UnmatchDecision => {
                "Unmatching removes this user from your matches. Reply 1 for yes or 2 for no."
                    .to_string()
            }
            IntakeState::BlockDecision => {
                "Blocking stops this user from contacting you. Reply 1 for yes or 2 for no."
                    .to_string()
            }
            IntakeState::ReadyToFile | IntakeState::Complete => {
                "Your report is complete.".to_string()
            }
        };
        format!("{step}\n\nSay `cancel` at any time to stop this report.")
    }
}
