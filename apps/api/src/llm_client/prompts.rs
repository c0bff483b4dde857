// Cross-cutting prompt fragments. The per-field enhancement prompts live in
// `enhance/prompts.rs`.

/// System prompt that pins the model to JSON-only replies.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps rewrites faithful to what the candidate actually wrote.
pub const FAITHFULNESS_INSTRUCTION: &str = "\
    Rewrite only what is given. Do NOT invent employers, numbers, dates, \
    technologies or achievements that the original text does not state. \
    Keep the candidate's voice and tense; prefer strong action verbs.";
