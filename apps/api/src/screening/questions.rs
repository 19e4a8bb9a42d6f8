//! Question generation — per-skill calibrated questions and the bulk
//! deduplicated pool.
//!
//! Per-skill mode is failure-isolated: one oracle error produces one failure
//! sentinel and never aborts the remaining skills. Bulk mode is bounded: the
//! reference behavior of looping until the pool fills is capped so a
//! degenerate oracle (identical replies forever) stalls out instead of
//! spinning.

use std::collections::HashSet;

use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::candidate::{GeneratedQuestion, KnowledgeTier, QuestionOutcome, SkillDeclaration};
use crate::oracle::{CompletionOracle, CompletionRequest};
use crate::screening::dedup::{is_near_duplicate, NEAR_DUPLICATE_THRESHOLD};
use crate::screening::prompts::{calibration_prompt, followup_prompt, POOL_SEED_PROMPTS, POOL_SYSTEM};

const QUESTION_MAX_TOKENS: u32 = 100;
const QUESTION_TEMPERATURE: f32 = 0.5;

/// Attempt budget per requested pool question. With a 10-question target the
/// generator gives up after 50 completions that produced nothing new.
pub const MAX_ATTEMPTS_PER_QUESTION: usize = 5;

/// Default pool size served by GET /generate-questions.
pub const DEFAULT_POOL_SIZE: usize = 10;

#[derive(Debug, Error)]
#[error(
    "question pool stalled after {attempts} attempts with {generated} of {target} questions"
)]
pub struct GenerationStalled {
    pub attempts: usize,
    pub generated: usize,
    pub target: usize,
}

/// Generates one calibrated question per declared skill, concurrently.
/// The output order matches the input order regardless of completion order,
/// and every skill yields exactly one entry — question or failure sentinel.
pub async fn generate_for_skills(
    oracle: &dyn CompletionOracle,
    skills: &[SkillDeclaration],
) -> Vec<GeneratedQuestion> {
    join_all(skills.iter().map(|skill| generate_for_skill(oracle, skill))).await
}

async fn generate_for_skill(
    oracle: &dyn CompletionOracle,
    skill: &SkillDeclaration,
) -> GeneratedQuestion {
    let tier = KnowledgeTier::from_proficiency(skill.proficiency);
    let request = CompletionRequest {
        system: None,
        prompt: calibration_prompt(&skill.name, skill.proficiency, tier.label()),
        max_tokens: QUESTION_MAX_TOKENS,
        temperature: QUESTION_TEMPERATURE,
    };

    let outcome = match oracle.complete(request).await {
        Ok(text) => {
            let question = text.trim();
            if question.is_empty() {
                QuestionOutcome::Failed("oracle returned an empty question".to_string())
            } else {
                QuestionOutcome::Question(question.to_string())
            }
        }
        Err(e) => {
            warn!("Question generation failed for skill '{}': {e}", skill.name);
            QuestionOutcome::Failed(format!("question generation failed: {e}"))
        }
    };

    GeneratedQuestion {
        skill: skill.name.clone(),
        outcome,
    }
}

/// Assembles a pool of `target` non-redundant questions by rotating through
/// the seed prompts and rejecting verbatim repeats and near-duplicates.
///
/// Accepted questions accumulate across attempts, so a stall still reports
/// how far the pool got.
pub async fn generate_pool(
    oracle: &dyn CompletionOracle,
    target: usize,
) -> Result<Vec<String>, GenerationStalled> {
    let max_attempts = target * MAX_ATTEMPTS_PER_QUESTION;
    let mut pool: Vec<String> = Vec::with_capacity(target);
    let mut seen: HashSet<String> = HashSet::new();

    for attempt in 0..max_attempts {
        if pool.len() >= target {
            break;
        }

        // Round-robin keeps the rotation fair: every seed prompt gets tried.
        let seed = POOL_SEED_PROMPTS[attempt % POOL_SEED_PROMPTS.len()];
        let request = CompletionRequest {
            system: Some(POOL_SYSTEM),
            prompt: followup_prompt(seed),
            max_tokens: QUESTION_MAX_TOKENS,
            temperature: QUESTION_TEMPERATURE,
        };

        let question = match oracle.complete(request).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Pool generation attempt {attempt} failed: {e}");
                continue;
            }
        };

        if question.is_empty() || !seen.insert(question.clone()) {
            continue;
        }
        if is_near_duplicate(
            &question,
            pool.iter().map(String::as_str),
            NEAR_DUPLICATE_THRESHOLD,
        ) {
            continue;
        }

        pool.push(question);
    }

    if pool.len() < target {
        return Err(GenerationStalled {
            attempts: max_attempts,
            generated: pool.len(),
            target,
        });
    }

    info!("Generated question pool of {} questions", pool.len());
    Ok(pool)
}
