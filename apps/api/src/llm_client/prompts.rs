// Prompt constants for cover letter generation.

/// Developer-role instruction. Enforces the JSON output contract and the
/// formatting rules the response processor relies on.
pub const DEVELOPER_PROMPT: &str = "\
You are a professional career coach. Write a compelling cover letter based on the provided resume and job description.

STRICT OUTPUT RULES:
- You MUST return a valid JSON object.
- The JSON must have exactly two string fields: \"title\" (e.g., \"Role Name at Company Name\") and \"cover_letter\" (the full text).
- For the \"cover_letter\" content:
    - Start directly with the Date or the Recipient's details.
    - No conversational preamble.
    - No markdown code blocks.
    - No headers or horizontal rules.";

/// Section markers of the user message, in the order they appear.
pub const INSTRUCTIONS_MARKER: &str = "INSTRUCTIONS:";
pub const RESUME_MARKER: &str = "RESUME:";
pub const JOB_DESCRIPTION_MARKER: &str = "JOB DESCRIPTION:";
