//! Prompt templates.
//!
//! The classifier prompt is a strict contract: the model must return one
//! label token and nothing else, so downstream routing stays closed-set
//! even when the model misbehaves (normalization catches the rest).

/// Deterministic classification prompt for one user message.
pub fn classifier_prompt(message: &str) -> String {
    format!(
        "You are a customer support classifier.\n\
         \n\
         Your task is to classify the user's message into exactly ONE of the\n\
         following categories:\n\
         \n\
         - positive_feedback\n\
         - negative_feedback\n\
         - query\n\
         \n\
         Classification rules:\n\
         - Positive feedback expresses gratitude, appreciation, or satisfaction.\n\
         - Negative feedback expresses complaints, dissatisfaction, or unresolved issues.\n\
         - A query asks for information, clarification, or ticket status updates.\n\
         \n\
         IMPORTANT:\n\
         - Return ONLY the category label.\n\
         - Do NOT include explanations.\n\
         - Do NOT include punctuation or formatting.\n\
         - Do NOT include extra text.\n\
         \n\
         User message:\n\
         \"\"\"{message}\"\"\"\n"
    )
}
