//! Request, response, and chat message types

pub mod message;
pub mod request;
pub mod response;

pub use message::{ChatMessage, ContentPart, MessageContent};
pub use request::{AskRequest, HistoryTurn};
pub use response::ApiResult;
