// All oracle prompt constants and builders for the screening module.

/// System prompt for bulk pool generation.
pub const POOL_SYSTEM: &str = "You are an interview question generator.";

/// Seed prompts the bulk pool generator rotates through.
pub const POOL_SEED_PROMPTS: &[&str] = &[
    "What are your strengths and weaknesses?",
    "Can you describe a challenging problem you faced and how you solved it?",
    "Where do you see yourself in five years?",
    "Why do you want to work here?",
    "Tell me about a time you demonstrated leadership skills.",
    "How do you handle stress and pressure?",
    "What motivates you?",
    "Can you give an example of a time you worked well in a team?",
    "How do you prioritize your work?",
    "What are your career goals?",
];

/// Calibration prompt for one declared skill: embeds the skill name, the
/// numeric proficiency, and the derived tier label.
pub fn calibration_prompt(skill: &str, proficiency: u8, tier_label: &str) -> String {
    format!(
        "I am proficient in {skill} programming language at a level of {proficiency}. \
        Could you ask me some questions to test my {tier_label} knowledge?"
    )
}

/// Follow-up prompt for bulk pool generation, seeded from one pool prompt.
pub fn followup_prompt(seed: &str) -> String {
    format!("Generate a follow-up interview question based on the following: {seed}")
}

/// Relevance-classification prompt for one submitted answer.
pub fn evaluation_prompt(answer: &str) -> String {
    format!("Evaluate the following answer and determine if it is relevant: {answer}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_prompt_embeds_all_three_inputs() {
        let prompt = calibration_prompt("Rust", 9, "expert");
        assert!(prompt.contains("Rust"));
        assert!(prompt.contains("level of 9"));
        assert!(prompt.contains("expert knowledge"));
    }

    #[test]
    fn test_pool_seed_prompts_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for prompt in POOL_SEED_PROMPTS {
            assert!(seen.insert(*prompt), "duplicate seed prompt: {prompt}");
        }
    }
}
