use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct RenderEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RenderEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting render...");

        // Extract
        let raw = self.pipeline.extract().await?;
        tracing::debug!("Input loaded");

        // Transform
        let payload = self.pipeline.transform(raw).await?;
        tracing::info!(
            "Rendered {} message(s){}",
            payload.messages.len(),
            if payload.instructions.is_some() {
                " with instructions"
            } else {
                ""
            }
        );

        // Load
        let output_path = self.pipeline.load(payload).await?;
        tracing::info!(
            "Output saved to: {} ({:?})",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }
}
