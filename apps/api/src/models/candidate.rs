use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A language the candidate claims proficiency in, on a 0–10 scale.
/// Immutable once submitted for a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDeclaration {
    pub name: String,
    pub proficiency: u8,
}

/// Knowledge tier used to calibrate question difficulty.
/// Always derived from the declared proficiency, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeTier {
    Intermediate,
    Advanced,
    Expert,
}

impl KnowledgeTier {
    /// Tier thresholds are inclusive toward the higher tier:
    /// 8–10 → Expert, 6–7 → Advanced, 0–5 → Intermediate.
    pub fn from_proficiency(proficiency: u8) -> Self {
        if proficiency >= 8 {
            KnowledgeTier::Expert
        } else if proficiency >= 6 {
            KnowledgeTier::Advanced
        } else {
            KnowledgeTier::Intermediate
        }
    }

    /// Lowercase label embedded into the calibration prompt.
    pub fn label(&self) -> &'static str {
        match self {
            KnowledgeTier::Intermediate => "intermediate",
            KnowledgeTier::Advanced => "advanced",
            KnowledgeTier::Expert => "expert",
        }
    }
}

/// Outcome of generating one question for one declared skill.
///
/// A failed generation is a first-class sentinel, not an error: one oracle
/// failure must never abort the remaining skills in the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QuestionOutcome {
    #[serde(rename = "question")]
    Question(String),
    #[serde(rename = "error")]
    Failed(String),
}

/// One entry in the candidate's question list — exactly one per declared
/// skill in per-skill generation mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    #[serde(rename = "language")]
    pub skill: String,
    #[serde(flatten)]
    pub outcome: QuestionOutcome,
}

impl GeneratedQuestion {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, QuestionOutcome::Failed(_))
    }
}

/// An answer submitted by the candidate, optionally paired with the skill
/// the question was generated for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSubmission {
    #[serde(rename = "language")]
    pub skill: Option<String>,
    #[serde(rename = "answer")]
    pub text: String,
}

/// Relevance verdict for one submitted answer. One per submission, in
/// submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationVerdict {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub answer: String,
    pub is_relevant: bool,
}

/// Pipeline stage of a candidate record.
///
/// `Intake` and `QuestionsReady` are transient: a record is only persisted
/// once identity is captured (already past Intake), and questions are handed
/// back to the candidate in the same response that stores them (already
/// awaiting answers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Intake,
    AwaitingLanguages,
    QuestionsReady,
    AwaitingAnswers,
    Evaluated,
    Reported,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Intake => "intake",
            Stage::AwaitingLanguages => "awaiting_languages",
            Stage::QuestionsReady => "questions_ready",
            Stage::AwaitingAnswers => "awaiting_answers",
            Stage::Evaluated => "evaluated",
            Stage::Reported => "reported",
        }
    }

    pub fn parse(s: &str) -> Option<Stage> {
        match s {
            "intake" => Some(Stage::Intake),
            "awaiting_languages" => Some(Stage::AwaitingLanguages),
            "questions_ready" => Some(Stage::QuestionsReady),
            "awaiting_answers" => Some(Stage::AwaitingAnswers),
            "evaluated" => Some(Stage::Evaluated),
            "reported" => Some(Stage::Reported),
            _ => None,
        }
    }
}

/// Aggregate root for one candidate's screening run.
///
/// Owned exclusively by the in-flight request handling it; all cross-request
/// state lives in the store, keyed by `id`. There is deliberately no
/// process-wide "current candidate" slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: Uuid,
    pub full_name: String,
    pub id_number: String,
    pub email: String,
    pub skills: Vec<SkillDeclaration>,
    pub questions: Vec<GeneratedQuestion>,
    pub verdicts: Vec<EvaluationVerdict>,
    pub stage: Stage,
    pub has_passed: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl CandidateRecord {
    /// A fresh record with identity captured, awaiting language declarations.
    pub fn new(full_name: String, id_number: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name,
            id_number,
            email,
            skills: Vec::new(),
            questions: Vec::new(),
            verdicts: Vec::new(),
            stage: Stage::AwaitingLanguages,
            has_passed: None,
            created_at: Utc::now(),
        }
    }
}
