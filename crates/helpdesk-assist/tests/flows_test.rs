//! Flow behavior tests against a stub prompt runner.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use helpdesk_assist::{
    ActivityLevel, AssistError, AssistService, EnhancementLevel, PromptRunner, SentimentInput,
    StressInput, VoiceClarityInput, VoiceReference, VoiceSettings,
};
use helpdesk_core::error::HelpdeskError;
use serde_json::{Value, json};

/// Stub runner fed with a queue of canned responses.
struct StubRunner {
    responses: Mutex<VecDeque<Result<Value, AssistError>>>,
    calls: AtomicU32,
}

impl StubRunner {
    fn new(responses: Vec<Result<Value, AssistError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PromptRunner for &StubRunner {
    async fn run(&self, _flow: &str, _input: Value) -> Result<Value, AssistError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AssistError::Transport("queue exhausted".into())))
    }
}

fn sentiment_response() -> Value {
    json!({
        "sentiment": "positive",
        "score": 0.8,
        "analysis": "Upbeat and optimistic throughout."
    })
}

fn stress_metrics() -> StressInput {
    StressInput {
        hrv: 45.0,
        temperature: 36.8,
        age: 34,
        blood_pressure_systolic: 120,
        blood_pressure_diastolic: 80,
        oxygen_saturation: 98.0,
        activity_level: ActivityLevel::Moderate,
        sleep_hours: 7.5,
    }
}

#[tokio::test]
async fn sentiment_happy_path() {
    let runner = StubRunner::new(vec![Ok(sentiment_response())]);
    let svc = AssistService::new(&runner, 2);

    let output = svc
        .analyze_sentiment(SentimentInput {
            journal_entry: "Great day at work, shipped the release.".into(),
        })
        .await
        .unwrap();

    assert_eq!(output.sentiment, "positive");
    assert!((output.score - 0.8).abs() < f64::EPSILON);
    assert_eq!(runner.calls(), 1);
}

#[tokio::test]
async fn empty_journal_entry_never_reaches_the_runner() {
    let runner = StubRunner::new(vec![Ok(sentiment_response())]);
    let svc = AssistService::new(&runner, 2);

    let result = svc
        .analyze_sentiment(SentimentInput {
            journal_entry: "   ".into(),
        })
        .await;

    assert!(matches!(result, Err(HelpdeskError::Validation { .. })));
    assert_eq!(runner.calls(), 0);
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let runner = StubRunner::new(vec![
        Err(AssistError::Timeout),
        Err(AssistError::Status {
            status: 503,
            retryable: true,
        }),
        Ok(sentiment_response()),
    ]);
    let svc = AssistService::new(&runner, 2);

    let output = svc
        .analyze_sentiment(SentimentInput {
            journal_entry: "A day like any other.".into(),
        })
        .await
        .unwrap();

    assert_eq!(output.sentiment, "positive");
    assert_eq!(runner.calls(), 3);
}

#[tokio::test]
async fn non_retryable_failures_fail_immediately() {
    let runner = StubRunner::new(vec![Err(AssistError::Status {
        status: 400,
        retryable: false,
    })]);
    let svc = AssistService::new(&runner, 2);

    let result = svc
        .analyze_sentiment(SentimentInput {
            journal_entry: "Entry.".into(),
        })
        .await;

    assert!(matches!(
        result,
        Err(HelpdeskError::Upstream {
            retryable: false,
            ..
        })
    ));
    assert_eq!(runner.calls(), 1);
}

#[tokio::test]
async fn retries_are_bounded() {
    let runner = StubRunner::new(vec![
        Err(AssistError::Timeout),
        Err(AssistError::Timeout),
        Err(AssistError::Timeout),
        Ok(sentiment_response()),
    ]);
    let svc = AssistService::new(&runner, 2);

    let result = svc
        .analyze_sentiment(SentimentInput {
            journal_entry: "Entry.".into(),
        })
        .await;

    assert!(matches!(
        result,
        Err(HelpdeskError::Upstream { retryable: true, .. })
    ));
    assert_eq!(runner.calls(), 3);
}

#[tokio::test]
async fn stress_analysis_decodes_full_output() {
    let runner = StubRunner::new(vec![Ok(json!({
        "stressLevel": 6.5,
        "stressCategory": "High",
        "primarySuggestion": {
            "title": "Deep Breaths",
            "text": "Take five slow breaths before your next call.",
            "icon": "Wind"
        },
        "secondarySuggestions": ["Short walk", "Drink water"],
        "analysisSummary": "Your HRV is low and sleep was short."
    }))]);
    let svc = AssistService::new(&runner, 2);

    let output = svc.analyze_stress(stress_metrics()).await.unwrap();
    assert_eq!(
        output.stress_category,
        helpdesk_assist::StressCategory::High
    );
    assert_eq!(output.primary_suggestion.title, "Deep Breaths");
    assert_eq!(output.secondary_suggestions.len(), 2);
}

#[tokio::test]
async fn out_of_range_stress_level_is_rejected() {
    let runner = StubRunner::new(vec![Ok(json!({
        "stressLevel": 14.0,
        "stressCategory": "Extreme",
        "primarySuggestion": { "title": "Rest", "text": "Lie down." },
        "secondarySuggestions": [],
        "analysisSummary": "Off the charts."
    }))]);
    let svc = AssistService::new(&runner, 0);

    let result = svc.analyze_stress(stress_metrics()).await;
    assert!(matches!(
        result,
        Err(HelpdeskError::Upstream {
            retryable: false,
            ..
        })
    ));
}

#[tokio::test]
async fn invalid_metrics_are_rejected_locally() {
    let runner = StubRunner::new(vec![]);
    let svc = AssistService::new(&runner, 2);

    let result = svc
        .analyze_stress(StressInput {
            oxygen_saturation: 130.0,
            ..stress_metrics()
        })
        .await;

    assert!(matches!(result, Err(HelpdeskError::Validation { .. })));
    assert_eq!(runner.calls(), 0);
}

#[tokio::test]
async fn voice_clarity_returns_original_audio_with_analysis() {
    let runner = StubRunner::new(vec![]);
    let svc = AssistService::new(&runner, 2);

    let uri = "data:audio/webm;base64,SGVsbG8=".to_string();
    let output = svc
        .enhance_voice_clarity(VoiceClarityInput {
            audio_data_uri: uri.clone(),
            settings: VoiceSettings {
                voice_reference: VoiceReference::Personal,
                enhancement_level: EnhancementLevel::Strong,
                noise_reduction: 80,
                clarity_enhancement: 70,
                voice_preservation: 90,
            },
        })
        .await
        .unwrap();

    assert_eq!(output.processed_audio_data_uri, uri);
    assert!(output.analysis.contains("strong"));
    assert!(output.analysis.contains("80%"));
    assert!(output.analysis.contains("personal"));
    // No model behind this flow; the runner is never touched.
    assert_eq!(runner.calls(), 0);
}

#[tokio::test]
async fn voice_clarity_rejects_out_of_range_settings() {
    let runner = StubRunner::new(vec![]);
    let svc = AssistService::new(&runner, 2);

    let result = svc
        .enhance_voice_clarity(VoiceClarityInput {
            audio_data_uri: "data:audio/webm;base64,SGVsbG8=".into(),
            settings: VoiceSettings {
                voice_reference: VoiceReference::Generic,
                enhancement_level: EnhancementLevel::Light,
                noise_reduction: 120,
                clarity_enhancement: 50,
                voice_preservation: 50,
            },
        })
        .await;

    assert!(matches!(result, Err(HelpdeskError::Validation { .. })));
}
