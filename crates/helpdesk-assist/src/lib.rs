//! Helpdesk Assist — client for the assistive AI flows: sentiment
//! analysis of journal entries, stress analysis from health metrics,
//! and the mocked voice-clarity transform.
//!
//! Flows run against an external prompt service through the
//! [`PromptRunner`] trait; the HTTP implementation applies a per-call
//! timeout and retries transient failures a bounded number of times.

mod error;
mod flows;
mod runner;
mod schemas;

pub use error::AssistError;
pub use flows::AssistService;
pub use runner::{AssistConfig, HttpPromptRunner, PromptRunner};
pub use schemas::{
    ActivityLevel, EnhancementLevel, PrimarySuggestion, SentimentInput, SentimentOutput,
    StressCategory, StressInput, StressOutput, VoiceClarityInput, VoiceClarityOutput,
    VoiceReference, VoiceSettings,
};
