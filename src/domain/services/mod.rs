mod chatbot_client;
mod comment_client;
mod conversation;
mod credentials;
mod formatter;
mod gateway;
mod list_store;
mod task_client;

pub use chatbot_client::*;
pub use comment_client::*;
pub use conversation::*;
pub use credentials::*;
pub use formatter::*;
pub use gateway::*;
pub use list_store::*;
pub use task_client::*;
