//! Service infrastructure
//!
//! The dependency container shared by every conversation, the service error
//! type, and the router that owns live conversations.

pub mod context;
pub mod error;
pub mod router;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use router::{ConversationSession, SessionRouter};
