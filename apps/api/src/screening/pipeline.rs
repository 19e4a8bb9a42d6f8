//! Candidate pipeline — orchestrates the stage sequence
//! Intake → AwaitingLanguages → QuestionsReady → AwaitingAnswers →
//! Evaluated → Reported.
//!
//! Every stage loads the record by candidate id and persists its result
//! before the response goes out. Stage work runs on a detached task the
//! handler awaits: a client disconnect abandons the response, not the
//! already-completed oracle results or the stage commit.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{
    AnswerSubmission, CandidateRecord, EvaluationVerdict, GeneratedQuestion, SkillDeclaration,
    Stage,
};
use crate::notify::{evaluation_email, Notifier};
use crate::oracle::CompletionOracle;
use crate::screening::evaluation;
use crate::screening::questions;
use crate::store::CandidateStore;

/// Minimum number of declared languages before the question stage runs.
pub const MIN_LANGUAGES: usize = 3;
/// Proficiency scale upper bound.
pub const MAX_PROFICIENCY: u8 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Wire DTOs (field names preserved from the public contract)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDetailsRequest {
    pub full_name: String,
    pub id_number: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDetailsResponse {
    pub message: String,
    pub candidate_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLanguagesRequest {
    pub candidate_id: Uuid,
    pub languages: Vec<SkillDeclaration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitLanguagesResponse {
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub candidate_id: Uuid,
    pub answers: Vec<AnswerSubmission>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersResponse {
    pub evaluation_result: Vec<EvaluationVerdict>,
    pub has_passed: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Stage operations
// ────────────────────────────────────────────────────────────────────────────

/// Intake → AwaitingLanguages. All identity fields must be non-empty; nothing
/// is persisted on validation failure.
pub async fn submit_details(
    store: &dyn CandidateStore,
    request: SubmitDetailsRequest,
) -> Result<SubmitDetailsResponse, AppError> {
    if request.full_name.trim().is_empty()
        || request.id_number.trim().is_empty()
        || request.email.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Please provide your full name, ID number, and email.".to_string(),
        ));
    }

    let record = CandidateRecord::new(request.full_name, request.id_number, request.email);
    store.insert(&record).await?;

    info!("Candidate {} registered", record.id);
    Ok(SubmitDetailsResponse {
        message: "Details received. Now, please provide your language proficiencies.".to_string(),
        candidate_id: record.id,
    })
}

/// AwaitingLanguages → AwaitingAnswers. Generates one calibrated question per
/// declared skill; per-skill oracle failures become sentinels and the stage
/// still advances. Questions are persisted before the response is returned.
pub async fn submit_languages(
    store: Arc<dyn CandidateStore>,
    oracle: Arc<dyn CompletionOracle>,
    request: SubmitLanguagesRequest,
) -> Result<SubmitLanguagesResponse, AppError> {
    if request.languages.len() < MIN_LANGUAGES {
        return Err(AppError::Validation(
            "Please provide proficiency in at least three languages.".to_string(),
        ));
    }
    for language in &request.languages {
        if language.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Language names must be non-empty.".to_string(),
            ));
        }
        if language.proficiency > MAX_PROFICIENCY {
            return Err(AppError::Validation(format!(
                "Proficiency for '{}' must be between 0 and {MAX_PROFICIENCY}.",
                language.name
            )));
        }
    }

    let mut record = find_candidate(store.as_ref(), request.candidate_id).await?;

    let task = tokio::spawn(async move {
        let generated =
            questions::generate_for_skills(oracle.as_ref(), &request.languages).await;
        let failures = generated.iter().filter(|q| q.is_failure()).count();
        if failures > 0 {
            info!(
                "Candidate {}: {} of {} questions failed to generate",
                record.id,
                failures,
                generated.len()
            );
        }

        record.skills = request.languages;
        record.questions.extend(generated.iter().cloned());
        record.stage = Stage::AwaitingAnswers;
        store.update(&record).await?;

        Ok(SubmitLanguagesResponse {
            questions: generated,
        })
    });

    await_stage(task).await
}

/// AwaitingAnswers → Evaluated, then Evaluated → Reported in the background.
/// The verdicts and pass status are committed before the report is
/// dispatched; a notification failure never alters either.
pub async fn submit_answers(
    store: Arc<dyn CandidateStore>,
    oracle: Arc<dyn CompletionOracle>,
    notifier: Arc<dyn Notifier>,
    request: SubmitAnswersRequest,
) -> Result<SubmitAnswersResponse, AppError> {
    if request.answers.is_empty() {
        return Err(AppError::Validation(
            "Please provide answers to the generated questions.".to_string(),
        ));
    }

    let mut record = find_candidate(store.as_ref(), request.candidate_id).await?;

    let task = tokio::spawn(async move {
        let verdicts = evaluation::evaluate(oracle.as_ref(), &request.answers).await;
        let has_passed = evaluation::has_passed(&verdicts);

        record.verdicts = verdicts.clone();
        record.has_passed = Some(has_passed);
        record.stage = Stage::Evaluated;
        store.update(&record).await?;

        info!(
            "Candidate {} evaluated: {} of {} relevant, passed={}",
            record.id,
            verdicts.iter().filter(|v| v.is_relevant).count(),
            verdicts.len(),
            has_passed
        );

        dispatch_report(store, notifier, record);

        Ok(SubmitAnswersResponse {
            evaluation_result: verdicts,
            has_passed,
        })
    });

    await_stage(task).await
}

/// Sends the evaluation report from a detached task and, on success, records
/// the Reported stage. Failures are logged only.
fn dispatch_report(
    store: Arc<dyn CandidateStore>,
    notifier: Arc<dyn Notifier>,
    mut record: CandidateRecord,
) {
    let has_passed = record.has_passed.unwrap_or(false);
    let (subject, body) = evaluation_email(&record.verdicts, has_passed);

    tokio::spawn(async move {
        match notifier.send(&record.email, &subject, &body).await {
            Ok(()) => {
                record.stage = Stage::Reported;
                if let Err(e) = store.update(&record).await {
                    error!("Failed to record report dispatch for {}: {e}", record.id);
                } else {
                    info!("Evaluation report sent to candidate {}", record.id);
                }
            }
            Err(e) => {
                error!("Failed to send evaluation report for {}: {e}", record.id);
            }
        }
    });
}

async fn await_stage<T>(
    task: tokio::task::JoinHandle<Result<T, AppError>>,
) -> Result<T, AppError> {
    match task.await {
        Ok(result) => result,
        Err(e) => Err(AppError::Internal(anyhow::anyhow!(
            "stage task failed: {e}"
        ))),
    }
}

async fn find_candidate(
    store: &dyn CandidateStore,
    id: Uuid,
) -> Result<CandidateRecord, AppError> {
    store
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found.".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
