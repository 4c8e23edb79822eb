use crate::domain::model::{Payload, RenderFormat};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn format(&self) -> RenderFormat;
    fn use_instructions(&self) -> bool;
    fn strip_meta(&self) -> bool;
    fn pretty(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Value>;
    async fn transform(&self, data: Value) -> Result<Payload>;
    async fn load(&self, payload: Payload) -> Result<String>;
}
