use crate::domain::Difficulty;

const FALLBACK_INSTRUCTION: &str = "Adjust your teaching to the user's level.";

/// Builds the system prompt that frames the model as a language teacher.
///
/// The output depends only on the arguments. A reference section is appended
/// only when `reference` holds non-empty text.
pub fn build_system_prompt(
    native_language: &str,
    target_language: &str,
    difficulty: Option<Difficulty>,
    reference: Option<&str>,
) -> String {
    let instruction = difficulty_instruction(native_language, target_language, difficulty);

    let mut prompt = format!(
        "You are an expert language teacher. Your goal is to teach the user {target}. \
         The user is fluent in {native}.\n\
         \n\
         {instruction}\n\
         \n\
         Be patient, encouraging, and helpful. Correct mistakes gently by providing the \
         correct form and briefly explaining why, if appropriate for their level.\n\
         Engage in a conversation to help them practice. Ask questions to prompt them to \
         use the language.\n\
         \n\
         If the user asks a question in {native}, answer it but try to bridge it back to \
         {target}.\n",
        target = target_language,
        native = native_language,
    );

    if let Some(text) = reference.filter(|t| !t.is_empty()) {
        prompt.push_str(&format!(
            "\n\nHere is the official reference material for {target_language}. \
             Use this strictly for vocabulary and grammar rules:\n\n{text}"
        ));
    }

    prompt
}

fn difficulty_instruction(
    native_language: &str,
    target_language: &str,
    difficulty: Option<Difficulty>,
) -> String {
    match difficulty {
        Some(Difficulty::Beginner) => format!(
            "The user is a beginner in {target_language}. Use simple vocabulary and basic \
             grammar structures. Explain concepts clearly in {native_language} when necessary, \
             but encourage usage of {target_language}. Focus on basic greetings, numbers, and \
             common phrases."
        ),
        Some(Difficulty::Intermediate) => format!(
            "The user is at an intermediate level in {target_language}. You can use more \
             complex sentences and grammar. Explanations in {native_language} should be \
             minimal, primarily for complex nuances. Focus on conversational flow and \
             expanding vocabulary."
        ),
        Some(Difficulty::Advanced) => format!(
            "The user is an advanced learner of {target_language}. Converse almost exclusively \
             in {target_language}. Use sophisticated vocabulary, idioms, and complex grammatical \
             structures. Only use {native_language} for very subtle linguistic distinctions or \
             if explicitly asked."
        ),
        None => FALLBACK_INSTRUCTION.to_string(),
    }
}
