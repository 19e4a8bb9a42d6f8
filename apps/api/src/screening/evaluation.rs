//! Answer evaluation — one relevance verdict per submitted answer.
//!
//! The decision rule is the literal substring "relevant" in the oracle's
//! reply (case-sensitive). That heuristic is knowingly brittle — a reply
//! saying "irrelevant" also matches — but it is the system's actual decision
//! rule and is preserved as-is.

use futures::future::join_all;
use tracing::warn;

use crate::models::candidate::{AnswerSubmission, EvaluationVerdict};
use crate::oracle::{CompletionOracle, CompletionRequest};
use crate::screening::prompts::evaluation_prompt;

const EVALUATION_MAX_TOKENS: u32 = 100;
const EVALUATION_TEMPERATURE: f32 = 0.5;

/// Evaluates all submissions concurrently. Exactly one verdict per
/// submission, in submission order; an oracle failure for one item yields
/// `is_relevant = false` for that item and nothing else.
pub async fn evaluate(
    oracle: &dyn CompletionOracle,
    submissions: &[AnswerSubmission],
) -> Vec<EvaluationVerdict> {
    join_all(
        submissions
            .iter()
            .map(|submission| evaluate_one(oracle, submission)),
    )
    .await
}

async fn evaluate_one(
    oracle: &dyn CompletionOracle,
    submission: &AnswerSubmission,
) -> EvaluationVerdict {
    let request = CompletionRequest {
        system: None,
        prompt: evaluation_prompt(&submission.text),
        max_tokens: EVALUATION_MAX_TOKENS,
        temperature: EVALUATION_TEMPERATURE,
    };

    let is_relevant = match oracle.complete(request).await {
        Ok(reply) => reply.contains("relevant"),
        Err(e) => {
            warn!("Answer evaluation failed, marking not relevant: {e}");
            false
        }
    };

    EvaluationVerdict {
        language: submission.skill.clone(),
        answer: submission.text.clone(),
        is_relevant,
    }
}

/// Strict-majority pass rule: more than half the verdicts must be relevant.
/// A tie fails.
pub fn has_passed(verdicts: &[EvaluationVerdict]) -> bool {
    let relevant = verdicts.iter().filter(|v| v.is_relevant).count();
    relevant * 2 > verdicts.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::fake::ScriptedOracle;

    fn submission(skill: Option<&str>, text: &str) -> AnswerSubmission {
        AnswerSubmission {
            skill: skill.map(str::to_string),
            text: text.to_string(),
        }
    }

    fn verdict(is_relevant: bool) -> EvaluationVerdict {
        EvaluationVerdict {
            language: None,
            answer: "x".to_string(),
            is_relevant,
        }
    }

    #[tokio::test]
    async fn test_empty_input_yields_empty_output() {
        let oracle = ScriptedOracle::new(Ok("This answer is relevant.".to_string()));
        assert!(evaluate(&oracle, &[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_length_and_order_preserved() {
        let oracle = ScriptedOracle::new(Ok("Not really on topic.".to_string()))
            .on("borrow checker", Ok("That answer is relevant.".to_string()));

        let submissions = [
            submission(Some("Rust"), "The borrow checker prevents data races"),
            submission(Some("Go"), "I like turtles"),
        ];
        let verdicts = evaluate(&oracle, &submissions).await;

        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].answer, submissions[0].text);
        assert!(verdicts[0].is_relevant);
        assert_eq!(verdicts[1].answer, submissions[1].text);
        assert!(!verdicts[1].is_relevant);
    }

    #[tokio::test]
    async fn test_oracle_error_marks_single_item_not_relevant() {
        let oracle = ScriptedOracle::new(Ok("Clearly relevant.".to_string()))
            .on("flaky", Err("timeout".to_string()));

        let submissions = [
            submission(None, "a solid answer"),
            submission(None, "a flaky answer"),
            submission(None, "another solid answer"),
        ];
        let verdicts = evaluate(&oracle, &submissions).await;

        assert_eq!(verdicts.len(), 3);
        assert!(verdicts[0].is_relevant);
        assert!(!verdicts[1].is_relevant);
        assert!(verdicts[2].is_relevant);
    }

    #[tokio::test]
    async fn test_substring_rule_is_literal() {
        // Known quirk: "irrelevant" contains "relevant" and therefore passes
        // the literal check. Preserved, not corrected.
        let oracle = ScriptedOracle::new(Ok("That is completely irrelevant.".to_string()));
        let verdicts = evaluate(&oracle, &[submission(None, "anything")]).await;
        assert!(verdicts[0].is_relevant);
    }

    #[tokio::test]
    async fn test_substring_rule_is_case_sensitive() {
        let oracle = ScriptedOracle::new(Ok("RELEVANT".to_string()));
        let verdicts = evaluate(&oracle, &[submission(None, "anything")]).await;
        assert!(!verdicts[0].is_relevant);
    }

    #[test]
    fn test_strict_majority_passes() {
        // 2 of 3 relevant: 2 > 1.5
        let verdicts = vec![verdict(true), verdict(true), verdict(false)];
        assert!(has_passed(&verdicts));
    }

    #[test]
    fn test_tie_fails() {
        // 2 of 4 relevant: 2 is not > 2
        let verdicts = vec![verdict(true), verdict(true), verdict(false), verdict(false)];
        assert!(!has_passed(&verdicts));
    }

    #[test]
    fn test_empty_verdicts_fail() {
        assert!(!has_passed(&[]));
    }
}
