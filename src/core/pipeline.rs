use crate::core::messages::msg;
use crate::core::normalize::normalize_value;
use crate::core::openai::to_openai;
use crate::core::{ConfigProvider, Payload, Pipeline, Storage};
use crate::domain::model::{Content, Message, RenderFormat};
use crate::utils::error::{ElmError, Result};
use serde_json::Value;

/// 讀取 JSON 訊息檔，整理後寫出 payload
pub struct FilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FilePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FilePipeline<S, C> {
    async fn extract(&self) -> Result<Value> {
        tracing::debug!("Reading messages from: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(value)
    }

    async fn transform(&self, data: Value) -> Result<Payload> {
        let normalized = normalize_value(&data, self.config.strip_meta())?;

        match self.config.format() {
            RenderFormat::Normalized => Ok(normalized),
            RenderFormat::OpenAi => {
                if normalized.instructions.is_some() {
                    // 輸入已帶 instructions，直接沿用，不再從訊息中提出
                    tracing::warn!("Input payload already carries instructions; keeping them");
                }
                let messages = normalized
                    .messages
                    .into_iter()
                    .map(|wire| -> Result<Message> {
                        let content: Content = serde_json::from_value(wire.content)?;
                        let mut message = msg(&wire.role, content);
                        message.name = wire.name;
                        message.tool_call_id = wire.tool_call_id;
                        message.meta = wire.meta;
                        Ok(message)
                    })
                    .collect::<Result<Vec<Message>>>()?;

                let use_instructions =
                    self.config.use_instructions() && normalized.instructions.is_none();
                let mut rendered = to_openai(&messages, use_instructions);
                if rendered.instructions.is_none() {
                    rendered.instructions = normalized.instructions;
                }
                Ok(rendered)
            }
        }
    }

    async fn load(&self, payload: Payload) -> Result<String> {
        let data = if self.config.pretty() {
            serde_json::to_vec_pretty(&payload)?
        } else {
            serde_json::to_vec(&payload)?
        };

        tracing::debug!(
            "Writing payload with {} message(s) ({} bytes)",
            payload.messages.len(),
            data.len()
        );
        self.storage
            .write_file(self.config.output_path(), &data)
            .await
            .map_err(|e| match e {
                ElmError::IoError(io) => ElmError::IoError(std::io::Error::new(
                    io.kind(),
                    format!("{}: {}", self.config.output_path(), io),
                )),
                other => other,
            })?;

        Ok(self.config.output_path().to_string())
    }
}
