pub mod engine;
pub mod messages;
pub mod normalize;
pub mod openai;
pub mod pipeline;

pub use crate::domain::model::{Block, Content, Message, Payload, RenderFormat, Role, WireMessage};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
