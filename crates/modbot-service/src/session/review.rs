//! Review conversation - lets a moderator triage and act on reports
//!
//! Two flows share one session. Prioritize assigns a write-once priority to
//! an untriaged report. Evaluate works through prioritized reports in
//! priority order and ends by closing the report, except for escalation
//! which leaves it open for the receiving team.
//!
//! Store failures and lost races with another moderator end the session
//! with an explanation.

use tracing::{error, info, instrument, warn};

use modbot_core::{
    numbered_menu, parse_choice, DomainError, EscalationRoute, ModAction, Priority, Report, ReportId,
    Resolution, Sanction, Snowflake, YesNo,
};

use super::{CANCEL_KEYWORD, HELP_KEYWORD};
use crate::services::{ServiceContext, ServiceError, ServiceResult};

const FLOWS: [&str; 2] = ["Prioritize new reports", "Evaluate prioritized reports"];
const VIOLATION_QUESTION: &str =
    "Does this report violate policy or describe a serious situation?";
const DANGER_QUESTION: &str = "Is anyone in imminent danger?";
const FALSE_REPORT_QUESTION: &str = "Was it a false report?";
const REPORTER_SUSPENSION_NOTICE: &str = "You have been suspended for repeated false reporting.";
const REPORTER_WARNING_NOTICE: &str =
    "Ensure future reports are accurate to avoid action on your account.";

/// Where the review conversation currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Start,
    AwaitingFlow,
    // Prioritize flow
    AwaitingTriageSelection,
    ViolationCheck,
    DangerCheck,
    // Evaluate flow
    AwaitingReportSelection,
    AwaitingAction,
    AwaitingRoute,
    BanOrSuspend(ModAction),
    FalseReportCheck,
    Complete,
}

/// Per-moderator review conversation
#[derive(Debug)]
pub struct ReviewSession {
    moderator_id: Snowflake,
    state: ReviewState,
    /// Ids offered in the last listing
    listed: Vec<ReportId>,
    current: Option<Report>,
}

impl ReviewSession {
    pub fn new(moderator_id: Snowflake) -> Self {
        Self {
            moderator_id,
            state: ReviewState::Start,
            listed: Vec::new(),
            current: None,
        }
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == ReviewState::Complete
    }

    /// Consume one message from the moderator and return the replies
    #[instrument(skip(self, text, ctx), fields(moderator = %self.moderator_id, state = ?self.state))]
    pub async fn handle_message(&mut self, text: &str, ctx: &ServiceContext) -> Vec<String> {
        let text = text.trim();

        if self.is_finished() {
            return Vec::new();
        }
        if text == CANCEL_KEYWORD {
            self.state = ReviewState::Complete;
            return vec!["Review cancelled.".to_string()];
        }
        if text == HELP_KEYWORD {
            return vec![self.help()];
        }

        match self.step(text, ctx).await {
            Ok(replies) => replies,
            Err(e) => {
                if e.is_conflict() {
                    warn!(code = e.error_code(), error = %e, "Review lost a race");
                } else {
                    error!(code = e.error_code(), error = %e, "Review step failed");
                }
                self.state = ReviewState::Complete;
                vec![e.peer_message()]
            }
        }
    }

    async fn step(&mut self, text: &str, ctx: &ServiceContext) -> ServiceResult<Vec<String>> {
        match self.state {
            ReviewState::Start => {
                self.state = ReviewState::AwaitingFlow;
                Ok(vec![format!(
                    "Thank you for starting the review process. \
                     Say `help` at any time for more information.\n\n\
                     What would you like to do?\n{}",
                    numbered_menu(&FLOWS)
                )])
            }
            ReviewState::AwaitingFlow => match parse_choice(text, FLOWS.len()) {
                Some(0) => self.start_prioritize(ctx).await,
                Some(_) => self.start_evaluate(ctx).await,
                None => Ok(vec![format!(
                    "Please reply 1 or 2.\n{}",
                    numbered_menu(&FLOWS)
                )]),
            },
            ReviewState::AwaitingTriageSelection => self.select_for_triage(text, ctx).await,
            ReviewState::ViolationCheck => match YesNo::from_choice(text) {
                Some(YesNo::Yes) => {
                    self.state = ReviewState::DangerCheck;
                    Ok(vec![format!("{DANGER_QUESTION}\n{}", YesNo::MENU)])
                }
                Some(YesNo::No) => self.assign_priority(Priority::Low, ctx).await,
                None => Ok(vec![format!(
                    "Please reply 1 or 2. {VIOLATION_QUESTION}\n{}",
                    YesNo::MENU
                )]),
            },
            ReviewState::DangerCheck => match YesNo::from_choice(text) {
                Some(YesNo::Yes) => self.assign_priority(Priority::High, ctx).await,
                Some(YesNo::No) => self.assign_priority(Priority::Medium, ctx).await,
                None => Ok(vec![format!(
                    "Please reply 1 or 2. {DANGER_QUESTION}\n{}",
                    YesNo::MENU
                )]),
            },
            ReviewState::AwaitingReportSelection => self.select_for_evaluation(text, ctx).await,
            ReviewState::AwaitingAction => self.choose_action(text, ctx).await,
            ReviewState::AwaitingRoute => self.escalate(text),
            ReviewState::BanOrSuspend(action) => self.choose_sanction(action, text, ctx).await,
            ReviewState::FalseReportCheck => self.check_false_report(text, ctx).await,
            ReviewState::Complete => Ok(Vec::new()),
        }
    }

    // ========================================================================
    // Prioritize flow
    // ========================================================================

    async fn start_prioritize(&mut self, ctx: &ServiceContext) -> ServiceResult<Vec<String>> {
        let reports = ctx.report_repo().find_awaiting_triage().await?;

        if reports.is_empty() {
            self.state = ReviewState::Complete;
            let mut replies = vec!["No reports are awaiting prioritization.".to_string()];
            let triaged = ctx.report_repo().find_triaged().await?.len();
            if triaged > 0 {
                replies.push(format!(
                    "{triaged} prioritized report(s) are waiting. \
                     Start a new review and choose option 2 to evaluate them."
                ));
            }
            return Ok(replies);
        }

        self.state = ReviewState::AwaitingTriageSelection;
        Ok(vec![format!(
            "Here are the reports awaiting prioritization.{}\n\n\
             Please provide the ID number of the report you wish to prioritize:",
            self.list(&reports)
        )])
    }

    async fn select_for_triage(
        &mut self,
        text: &str,
        ctx: &ServiceContext,
    ) -> ServiceResult<Vec<String>> {
        let Some(id) = self.listed_id(text) else {
            return Ok(vec![self.unknown_id(text)]);
        };

        let report = self.reload(id, ctx).await?;
        if !report.is_awaiting_triage() {
            self.state = ReviewState::Complete;
            let why = if report.is_open() {
                "has already been prioritized by another moderator"
            } else {
                "has already been closed"
            };
            return Ok(vec![format!("Report {id} {why}.")]);
        }

        self.current = Some(report);
        self.state = ReviewState::ViolationCheck;
        Ok(vec![format!("{VIOLATION_QUESTION}\n{}", YesNo::MENU)])
    }

    async fn assign_priority(
        &mut self,
        priority: Priority,
        ctx: &ServiceContext,
    ) -> ServiceResult<Vec<String>> {
        let id = self.current_id()?;
        let report = ctx.report_repo().set_priority(id, priority).await?;

        info!(report_id = %id, priority = %priority, "Priority assigned");
        self.current = Some(report);
        self.state = ReviewState::Complete;
        Ok(vec![format!("Report {id} has been given {priority} priority.")])
    }

    // ========================================================================
    // Evaluate flow
    // ========================================================================

    async fn start_evaluate(&mut self, ctx: &ServiceContext) -> ServiceResult<Vec<String>> {
        let reports = ctx.report_repo().find_triaged().await?;

        if reports.is_empty() {
            self.state = ReviewState::Complete;
            let mut replies = vec!["No prioritized reports are waiting for evaluation.".to_string()];
            let untriaged = ctx.report_repo().find_awaiting_triage().await?.len();
            if untriaged > 0 {
                replies.push(format!(
                    "{untriaged} report(s) are awaiting prioritization. \
                     Start a new review and choose option 1 to prioritize them."
                ));
            }
            return Ok(replies);
        }

        self.state = ReviewState::AwaitingReportSelection;
        Ok(vec![format!(
            "Here is a list of the current open reports sorted by priority.{}\n\n\
             Please provide the ID number of the report you wish to process:",
            self.list(&reports)
        )])
    }

    async fn select_for_evaluation(
        &mut self,
        text: &str,
        ctx: &ServiceContext,
    ) -> ServiceResult<Vec<String>> {
        let Some(id) = self.listed_id(text) else {
            return Ok(vec![self.unknown_id(text)]);
        };

        let report = self.reload(id, ctx).await?;
        if !report.is_open() {
            self.listed.retain(|listed| *listed != id);
            if self.listed.is_empty() {
                self.state = ReviewState::Complete;
                return Ok(vec![format!(
                    "Report {id} has already been closed and no other listed reports remain."
                )]);
            }
            return Ok(vec![format!(
                "Report {id} has already been closed. Please choose another ID: {}",
                self.listed_ids()
            )]);
        }

        self.current = Some(report);
        self.state = ReviewState::AwaitingAction;
        Ok(vec![format!("Select the action to take:\n{}", ModAction::menu())])
    }

    async fn choose_action(&mut self, text: &str, ctx: &ServiceContext) -> ServiceResult<Vec<String>> {
        let Some(action) = ModAction::from_choice(text) else {
            return Ok(vec![format!(
                "Please reply with the number of an action:\n{}",
                ModAction::menu()
            )]);
        };

        match action {
            ModAction::Escalate => {
                self.state = ReviewState::AwaitingRoute;
                Ok(vec![format!(
                    "Select the route to escalate to:\n{}",
                    EscalationRoute::menu()
                )])
            }
            ModAction::Dismiss => {
                self.state = ReviewState::FalseReportCheck;
                Ok(vec![format!("{FALSE_REPORT_QUESTION}\n{}", YesNo::MENU)])
            }
            ModAction::Ban | ModAction::Suspend | ModAction::RemoveContent | ModAction::Warn => {
                self.apply_consequence(action, ctx).await
            }
        }
    }

    fn escalate(&mut self, text: &str) -> ServiceResult<Vec<String>> {
        let Some(route) = EscalationRoute::from_choice(text) else {
            return Ok(vec![format!(
                "Please reply with the number of a route:\n{}",
                EscalationRoute::menu()
            )]);
        };

        let id = self.current_id()?;
        info!(report_id = %id, route = %route, "System escalating report");
        self.state = ReviewState::Complete;
        Ok(vec![format!("System escalating to {route}")])
    }

    async fn apply_consequence(
        &mut self,
        action: ModAction,
        ctx: &ServiceContext,
    ) -> ServiceResult<Vec<String>> {
        let report = self.ensure_current_open(ctx).await?;
        let total = ctx.report_repo().count_against(report.reported_user_id).await?;
        let repeat_offender = total >= ctx.moderation().repeat_offender_threshold;

        if !repeat_offender {
            self.close_current(Resolution::new(action, self.moderator_id), ctx)
                .await?;
            self.state = ReviewState::Complete;
        }

        let mut replies = Vec::new();
        if let Some(notice) = action.consequence_notice(report.reason) {
            if !notify(ctx, report.reported_user_id, &notice).await {
                replies.push(format!(
                    "The notice to {} could not be delivered.",
                    report.reported_user
                ));
            }
        }

        if repeat_offender {
            self.state = ReviewState::BanOrSuspend(action);
            replies.push(format!(
                "User has a total of {total} reports filed against them.\n\
                 Please choose to either:\n{}",
                Sanction::menu()
            ));
        } else {
            replies.push("User has been notified".to_string());
        }
        Ok(replies)
    }

    async fn choose_sanction(
        &mut self,
        action: ModAction,
        text: &str,
        ctx: &ServiceContext,
    ) -> ServiceResult<Vec<String>> {
        let Some(sanction) = Sanction::from_choice(text) else {
            return Ok(vec![format!("Please reply 1 or 2.\n{}", Sanction::menu())]);
        };

        let report = self.current_report_or_err()?.clone();
        let resolution = Resolution::new(action, self.moderator_id).with_sanction(sanction);
        self.close_current(resolution, ctx).await?;
        self.state = ReviewState::Complete;

        let mut replies = Vec::new();
        if !notify(ctx, report.reported_user_id, &sanction.notice(report.reason)).await {
            replies.push(format!(
                "The notice to {} could not be delivered.",
                report.reported_user
            ));
        }
        replies.push(format!("User has been {}", sanction.past_tense()));
        Ok(replies)
    }

    async fn check_false_report(
        &mut self,
        text: &str,
        ctx: &ServiceContext,
    ) -> ServiceResult<Vec<String>> {
        let Some(answer) = YesNo::from_choice(text) else {
            return Ok(vec![format!(
                "Please reply 1 or 2. {FALSE_REPORT_QUESTION}\n{}",
                YesNo::MENU
            )]);
        };

        let dismissal = Resolution::new(ModAction::Dismiss, self.moderator_id);
        if !answer.is_yes() {
            self.close_current(dismissal, ctx).await?;
            self.state = ReviewState::Complete;
            return Ok(vec!["Done".to_string()]);
        }

        // Strike before close: a failed ledger write must leave the report open.
        let reporter_id = self.ensure_current_open(ctx).await?.reporter_id;
        let count = ctx
            .credibility_repo()
            .record_false_report(reporter_id)
            .await?;
        self.close_current(dismissal, ctx).await?;
        self.state = ReviewState::Complete;

        let suspended = count >= ctx.moderation().false_report_threshold;
        info!(reporter = %reporter_id, count, suspended, "False report confirmed");

        let (notice, reply) = if suspended {
            (
                REPORTER_SUSPENSION_NOTICE,
                "Reporter has been suspended for repeated false reporting.",
            )
        } else {
            (
                REPORTER_WARNING_NOTICE,
                "Reporter has been warned for false reporting.",
            )
        };

        let mut replies = Vec::new();
        if !notify(ctx, reporter_id, notice).await {
            replies.push("The notice to the reporter could not be delivered.".to_string());
        }
        replies.push(reply.to_string());
        Ok(replies)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn list(&mut self, reports: &[Report]) -> String {
        self.listed = reports.iter().map(|r| r.id).collect();
        reports
            .iter()
            .map(|r| format!("\n\n{}", r.summary()))
            .collect::<String>()
    }

    fn listed_id(&self, text: &str) -> Option<ReportId> {
        ReportId::parse_selection(text).filter(|id| self.listed.contains(id))
    }

    fn listed_ids(&self) -> String {
        self.listed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn unknown_id(&self, text: &str) -> String {
        format!(
            "There is no listed report with ID `{text}`. Please reply with one of: {}",
            self.listed_ids()
        )
    }

    async fn reload(&self, id: ReportId, ctx: &ServiceContext) -> ServiceResult<Report> {
        ctx.report_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report", id))
    }

    /// Re-read the selected report, failing if it was closed meanwhile
    async fn ensure_current_open(&self, ctx: &ServiceContext) -> ServiceResult<Report> {
        let id = self.current_id()?;
        let report = self.reload(id, ctx).await?;
        if !report.is_open() {
            return Err(DomainError::ReportClosed(id).into());
        }
        Ok(report)
    }

    fn current_report_or_err(&self) -> ServiceResult<&Report> {
        self.current
            .as_ref()
            .ok_or_else(|| ServiceError::internal("no report selected"))
    }

    fn current_id(&self) -> ServiceResult<ReportId> {
        self.current_report_or_err().map(|r| r.id)
    }

    async fn close_current(
        &mut self,
        resolution: Resolution,
        ctx: &ServiceContext,
    ) -> ServiceResult<()> {
        let id = self.current_id()?;
        let action = resolution.action;
        let report = ctx.report_repo().close(id, resolution).await?;

        info!(report_id = %id, action = %action, "Report resolved");
        self.current = Some(report);
        Ok(())
    }

    fn help(&self) -> String {
        let step = match self.state {
            ReviewState::Start | ReviewState::AwaitingFlow => format!(
                "Prioritize assigns an urgency to new reports. \
                 Evaluate acts on prioritized reports, most urgent first.\n{}",
                numbered_menu(&FLOWS)
            ),
            ReviewState::AwaitingTriageSelection | ReviewState::AwaitingReportSelection => {
                format!(
                    "Reply with the ID of one of the listed reports: {}",
                    self.listed_ids()
                )
            }
            ReviewState::ViolationCheck => format!(
                "Answering no gives the report Low priority.\n{VIOLATION_QUESTION}\n{}",
                YesNo::MENU
            ),
            ReviewState::DangerCheck => format!(
                "Yes gives the report High priority, no gives it Medium.\n{DANGER_QUESTION}\n{}",
                YesNo::MENU
            ),
            ReviewState::AwaitingAction => format!(
                "Every action except escalation closes the report.\n{}",
                ModAction::menu()
            ),
            ReviewState::AwaitingRoute => format!(
                "The report stays open for the team it is escalated to.\n{}",
                EscalationRoute::menu()
            ),
            ReviewState::BanOrSuspend(_) => format!(
                "This user has been reported repeatedly. Pick the final sanction.\n{}",
                Sanction::menu()
            ),
            ReviewState::FalseReportCheck => format!(
                "Confirmed false reports count against the reporter.\n{FALSE_REPORT_QUESTION}\n{}",
                YesNo::MENU
            ),
            ReviewState::Complete => "This review is complete.".to_string(),
        };
        format!("{step}\n\nSay `cancel` at any time to stop this review.")
    }
}

/// Best-effort direct notification; returns whether it was delivered
async fn notify(ctx: &ServiceContext, user_id: Snowflake, text: &str) -> bool {
    match ctx.transport().send_direct(user_id, text).await {
        Ok(()) => true,
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Notification not delivered");
            false
        }
    }
}
