mod assistant;
mod author;
mod comment;
mod credential;
mod failure;
mod list_payload;
mod message;
mod resource;
mod storage;
mod task;
mod transport;

pub use assistant::*;
pub use author::*;
pub use comment::*;
pub use credential::*;
pub use failure::*;
pub use list_payload::*;
pub use message::*;
pub use resource::*;
pub use storage::*;
pub use task::*;
pub use transport::*;
