//! The assistive flows themselves.

use helpdesk_core::error::HelpdeskResult;
use serde_json::Value;
use tracing::warn;

use crate::error::AssistError;
use crate::runner::PromptRunner;
use crate::schemas::{
    SentimentInput, SentimentOutput, StressInput, StressOutput, VoiceClarityInput,
    VoiceClarityOutput,
};

const SENTIMENT_FLOW: &str = "sentimentAnalysis";
const STRESS_FLOW: &str = "stressAnalysis";

pub struct AssistService<R: PromptRunner> {
    runner: R,
    max_retries: u32,
}

impl<R: PromptRunner> AssistService<R> {
    pub fn new(runner: R, max_retries: u32) -> Self {
        Self {
            runner,
            max_retries,
        }
    }

    /// Analyze the sentiment of a journal entry.
    pub async fn analyze_sentiment(
        &self,
        input: SentimentInput,
    ) -> HelpdeskResult<SentimentOutput> {
        input.validate()?;

        let payload = serde_json::to_value(&input)
            .map_err(|e| AssistError::Decode(e.to_string()))?;
        let raw = self.run_with_retry(SENTIMENT_FLOW, payload).await?;

        let output: SentimentOutput =
            serde_json::from_value(raw).map_err(|e| AssistError::Decode(e.to_string()))?;
        output.check_ranges().map_err(AssistError::Decode)?;
        Ok(output)
    }

    /// Assess stress from health metrics and produce suggestions.
    pub async fn analyze_stress(&self, input: StressInput) -> HelpdeskResult<StressOutput> {
        input.validate()?;

        let payload = serde_json::to_value(&input)
            .map_err(|e| AssistError::Decode(e.to_string()))?;
        let raw = self.run_with_retry(STRESS_FLOW, payload).await?;

        let output: StressOutput =
            serde_json::from_value(raw).map_err(|e| AssistError::Decode(e.to_string()))?;
        output.check_ranges().map_err(AssistError::Decode)?;
        Ok(output)
    }

    /// Voice-clarity enhancement. No voice-processing model is wired
    /// up, so this returns the original audio unchanged together with
    /// a description of the settings that would have been applied.
    pub async fn enhance_voice_clarity(
        &self,
        input: VoiceClarityInput,
    ) -> HelpdeskResult<VoiceClarityOutput> {
        input.validate()?;

        let s = &input.settings;
        let analysis = format!(
            "Mock enhancement applied with {} level. Noise reduction at {}%, \
             clarity at {}%, voice preservation at {}%. Voice reference: {}.",
            s.enhancement_level.as_str(),
            s.noise_reduction,
            s.clarity_enhancement,
            s.voice_preservation,
            s.voice_reference.as_str(),
        );

        Ok(VoiceClarityOutput {
            processed_audio_data_uri: input.audio_data_uri,
            analysis,
        })
    }

    /// Run a flow, retrying retryable failures up to `max_retries`
    /// additional times.
    async fn run_with_retry(&self, flow: &str, input: Value) -> Result<Value, AssistError> {
        let mut attempt = 0;
        loop {
            match self.runner.run(flow, input.clone()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(flow, attempt, error = %err, "Prompt flow failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }
}
