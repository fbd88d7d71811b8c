//! Request building — a pure function from form inputs to a Responses API payload.
//!
//! No validation happens here; callers reject empty inputs before building.

use crate::llm_client::prompts::{
    DEVELOPER_PROMPT, INSTRUCTIONS_MARKER, JOB_DESCRIPTION_MARKER, RESUME_MARKER,
};
use crate::llm_client::{InputMessage, Reasoning, ResponsesRequest, MODEL, REASONING_EFFORT};
use crate::models::options::{LengthOption, ToneOption};

/// Builds the user message: instructions, then résumé, then job description.
pub fn build_user_prompt(
    resume: &str,
    job_description: &str,
    length: LengthOption,
    tone: ToneOption,
) -> String {
    format!(
        "{INSTRUCTIONS_MARKER}\n\
         Length: {}\n\
         Tone: {}\n\
         \n\
         {RESUME_MARKER}\n\
         {resume}\n\
         \n\
         {JOB_DESCRIPTION_MARKER}\n\
         {job_description}",
        length.prompt_instruction(),
        tone.prompt_instruction(),
    )
}

/// Assembles the full request: developer instruction, user message and the
/// token ceiling of the chosen length.
pub fn build_request(
    resume: &str,
    job_description: &str,
    length: LengthOption,
    tone: ToneOption,
) -> ResponsesRequest {
    ResponsesRequest {
        model: MODEL.to_string(),
        reasoning: Reasoning {
            effort: REASONING_EFFORT.to_string(),
        },
        input: vec![
            InputMessage {
                role: "developer".to_string(),
                content: DEVELOPER_PROMPT.to_string(),
            },
            InputMessage {
                role: "user".to_string(),
                content: build_user_prompt(resume, job_description, length, tone),
            },
        ],
        max_output_tokens: length.max_output_tokens(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_instructions_and_inputs() {
        let prompt = build_user_prompt(
            "My Resume",
            "My Job",
            LengthOption::Short,
            ToneOption::Professional,
        );

        assert!(prompt.contains(&format!(
            "Length: {}",
            LengthOption::Short.prompt_instruction()
        )));
        assert!(prompt.contains(&format!(
            "Tone: {}",
            ToneOption::Professional.prompt_instruction()
        )));
        assert!(prompt.contains("RESUME:\nMy Resume"));
        assert!(prompt.contains("JOB DESCRIPTION:\nMy Job"));
    }

    #[test]
    fn test_every_option_combination_is_reflected() {
        for length in LengthOption::all() {
            for tone in ToneOption::all() {
                let prompt = build_user_prompt("Experience: Rust", "Systems Dev", length, tone);
                assert!(prompt.contains(length.prompt_instruction()));
                assert!(prompt.contains(tone.prompt_instruction()));
                assert!(prompt.contains("RESUME:\nExperience: Rust"));
                assert!(prompt.contains("JOB DESCRIPTION:\nSystems Dev"));
            }
        }
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let prompt = build_user_prompt("R", "J", LengthOption::Long, ToneOption::Simple);
        let instructions = prompt.find("INSTRUCTIONS:").unwrap();
        let resume = prompt.find("RESUME:").unwrap();
        let job = prompt.find("JOB DESCRIPTION:").unwrap();
        assert!(instructions < resume && resume < job);
    }

    #[test]
    fn test_braces_in_user_text_are_kept_verbatim() {
        let prompt = build_user_prompt(
            "Skills: {job_description}",
            "Needs {resume}",
            LengthOption::Medium,
            ToneOption::Confident,
        );
        assert!(prompt.contains("RESUME:\nSkills: {job_description}"));
        assert!(prompt.contains("JOB DESCRIPTION:\nNeeds {resume}"));
    }

    #[test]
    fn test_request_uses_developer_then_user_roles() {
        let request = build_request("R", "J", LengthOption::Medium, ToneOption::Conversational);
        assert_eq!(request.input.len(), 2);
        assert_eq!(request.input[0].role, "developer");
        assert_eq!(request.input[0].content, DEVELOPER_PROMPT);
        assert_eq!(request.input[1].role, "user");
        assert_eq!(request.max_output_tokens, 750);
        assert_eq!(request.reasoning.effort, "low");
    }

    #[test]
    fn test_builder_is_deterministic() {
        let a = build_request("R", "J", LengthOption::Long, ToneOption::Confident);
        let b = build_request("R", "J", LengthOption::Long, ToneOption::Confident);
        assert_eq!(a, b);
    }

    #[test]
    fn test_developer_prompt_demands_json_contract() {
        assert!(DEVELOPER_PROMPT.contains("\"title\""));
        assert!(DEVELOPER_PROMPT.contains("\"cover_letter\""));
        assert!(DEVELOPER_PROMPT.contains("No markdown code blocks."));
        assert!(DEVELOPER_PROMPT.contains("No headers or horizontal rules."));
    }
}
