//! # modbot-service
//!
//! Application layer containing the intake and review conversations, the
//! dependency container they share, and the router that owns live sessions.

pub mod services;
pub mod session;

#[cfg(test)]
mod test_support;

pub use services::{
    ConversationSession, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SessionRouter,
};
pub use session::{IntakeSession, IntakeState, ReviewSession, ReviewState};
