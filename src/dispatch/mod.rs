pub mod dispatcher;
pub mod flag;
pub mod queue;

pub use dispatcher::{
    Decision, Dispatcher, EXECUTION_ERROR_REPLY, FAREWELL_REPLY, FAREWELL_TEXT, NO_ANSWER_REPLY,
    UNSUPPORTED_EVENT_REPLY, decide,
};
pub use flag::ConversationFlag;
pub use queue::{DispatchQueue, JobHandler, WebhookJob};
