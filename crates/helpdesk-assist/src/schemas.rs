//! Request/response schemas for the assistive flows.
//!
//! Wire names are camelCase to match the prompt service's contracts.
//! Inputs are validated before leaving the process; outputs are
//! range-checked after decoding so a misbehaving model cannot push
//! out-of-range values into the UI.

use helpdesk_core::error::{HelpdeskError, HelpdeskResult};
use serde::{Deserialize, Serialize};

// Sentiment analysis

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentInput {
    /// The journal entry to analyze.
    pub journal_entry: String,
}

impl SentimentInput {
    pub fn validate(&self) -> HelpdeskResult<()> {
        if self.journal_entry.trim().is_empty() {
            return Err(HelpdeskError::validation("Journal entry is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentOutput {
    /// Overall sentiment, e.g. "positive", "negative", "neutral".
    pub sentiment: String,
    /// Numerical score from -1 (negative) to 1 (positive).
    pub score: f64,
    /// Detailed analysis of the emotions expressed.
    pub analysis: String,
}

impl SentimentOutput {
    pub(crate) fn check_ranges(&self) -> Result<(), String> {
        if !(-1.0..=1.0).contains(&self.score) {
            return Err(format!("sentiment score {} outside [-1, 1]", self.score));
        }
        Ok(())
    }
}

// Stress analysis

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressInput {
    /// Heart rate variability in ms.
    pub hrv: f64,
    /// Body temperature in Celsius.
    pub temperature: f64,
    /// Age in years.
    pub age: u32,
    pub blood_pressure_systolic: u32,
    pub blood_pressure_diastolic: u32,
    /// SpO2 percentage, 0-100.
    pub oxygen_saturation: f64,
    pub activity_level: ActivityLevel,
    /// Hours of sleep in the last 24 hours.
    pub sleep_hours: f64,
}

impl StressInput {
    pub fn validate(&self) -> HelpdeskResult<()> {
        if self.age == 0 {
            return Err(HelpdeskError::validation("Age must be positive"));
        }
        if self.blood_pressure_systolic == 0 || self.blood_pressure_diastolic == 0 {
            return Err(HelpdeskError::validation("Blood pressure must be positive"));
        }
        if !(0.0..=100.0).contains(&self.oxygen_saturation) {
            return Err(HelpdeskError::validation(
                "Oxygen saturation must be between 0 and 100",
            ));
        }
        if !(0.0..=24.0).contains(&self.sleep_hours) {
            return Err(HelpdeskError::validation(
                "Sleep hours must be between 0 and 24",
            ));
        }
        Ok(())
    }
}

/// Stress bands: Low 0-3, Moderate 4-6, High 7-8, Extreme 9-10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressCategory {
    Low,
    Moderate,
    High,
    Extreme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimarySuggestion {
    pub title: String,
    pub text: String,
    /// Optional icon hint for the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressOutput {
    /// Stress score from 0 (none) to 10 (extreme).
    pub stress_level: f64,
    pub stress_category: StressCategory,
    pub primary_suggestion: PrimarySuggestion,
    pub secondary_suggestions: Vec<String>,
    pub analysis_summary: String,
}

impl StressOutput {
    pub(crate) fn check_ranges(&self) -> Result<(), String> {
        if !(0.0..=10.0).contains(&self.stress_level) {
            return Err(format!("stress level {} outside [0, 10]", self.stress_level));
        }
        Ok(())
    }
}

// Voice clarity

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceReference {
    Personal,
    Generic,
}

impl VoiceReference {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceReference::Personal => "personal",
            VoiceReference::Generic => "generic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementLevel {
    Light,
    Moderate,
    Strong,
}

impl EnhancementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnhancementLevel::Light => "light",
            EnhancementLevel::Moderate => "moderate",
            EnhancementLevel::Strong => "strong",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettings {
    pub voice_reference: VoiceReference,
    pub enhancement_level: EnhancementLevel,
    /// Background noise reduction percentage, 0-100.
    pub noise_reduction: u8,
    /// Speech clarity enhancement percentage, 0-100.
    pub clarity_enhancement: u8,
    /// Original voice characteristics preservation percentage, 0-100.
    pub voice_preservation: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceClarityInput {
    /// Audio as a data URI: `data:<mimetype>;base64,<encoded_data>`.
    pub audio_data_uri: String,
    pub settings: VoiceSettings,
}

impl VoiceClarityInput {
    pub fn validate(&self) -> HelpdeskResult<()> {
        if !self.audio_data_uri.starts_with("data:") {
            return Err(HelpdeskError::validation(
                "Audio must be supplied as a data URI",
            ));
        }
        let s = &self.settings;
        for (name, pct) in [
            ("noiseReduction", s.noise_reduction),
            ("clarityEnhancement", s.clarity_enhancement),
            ("voicePreservation", s.voice_preservation),
        ] {
            if pct > 100 {
                return Err(HelpdeskError::validation(format!(
                    "{name} must be between 0 and 100"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceClarityOutput {
    /// The processed audio as a data URI.
    pub processed_audio_data_uri: String,
    /// Summary of the enhancements applied.
    pub analysis: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stress_input_wire_names_are_camel_case() {
        let input = StressInput {
            hrv: 45.0,
            temperature: 36.8,
            age: 34,
            blood_pressure_systolic: 120,
            blood_pressure_diastolic: 80,
            oxygen_saturation: 98.0,
            activity_level: ActivityLevel::Moderate,
            sleep_hours: 7.5,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["bloodPressureSystolic"], 120);
        assert_eq!(json["activityLevel"], "moderate");
        assert_eq!(json["sleepHours"], 7.5);
    }

    #[test]
    fn stress_category_keeps_title_case() {
        let json = serde_json::to_string(&StressCategory::Extreme).unwrap();
        assert_eq!(json, "\"Extreme\"");
    }

    #[test]
    fn stress_input_range_checks() {
        let mut input = StressInput {
            hrv: 45.0,
            temperature: 36.8,
            age: 34,
            blood_pressure_systolic: 120,
            blood_pressure_diastolic: 80,
            oxygen_saturation: 98.0,
            activity_level: ActivityLevel::Light,
            sleep_hours: 7.5,
        };
        assert!(input.validate().is_ok());

        input.oxygen_saturation = 101.0;
        assert!(input.validate().is_err());

        input.oxygen_saturation = 98.0;
        input.sleep_hours = 25.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn voice_input_requires_data_uri() {
        let input = VoiceClarityInput {
            audio_data_uri: "https://example.com/a.wav".into(),
            settings: VoiceSettings {
                voice_reference: VoiceReference::Personal,
                enhancement_level: EnhancementLevel::Moderate,
                noise_reduction: 50,
                clarity_enhancement: 50,
                voice_preservation: 50,
            },
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn sentiment_score_range_is_enforced() {
        let out = SentimentOutput {
            sentiment: "positive".into(),
            score: 1.5,
            analysis: "very upbeat".into(),
        };
        assert!(out.check_ranges().is_err());
    }
}
