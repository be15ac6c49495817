use crate::DefinitionRequest;

/// System prompt pinning the structured-output contract.
///
/// The contract is what prevents silent auto-correction: the model reports an
/// unrecognized word through `isValidWord`/`suggestedWord` instead of quietly
/// defining a different word.
pub fn definition_system_prompt() -> String {
    "You are a dictionary writer for language learners. \
     Respond with a single JSON object and nothing else, using exactly these keys: \
     definitionTarget (definition in the target language), \
     definition (definition in the learner's native language), \
     examples (array of {sentence, translation, meaningIndex}), \
     usageNote (short usage guidance or null), \
     phonetic (IPA transcription or null), \
     isValidWord (boolean), \
     suggestedWord (likely intended spelling or null). \
     If the word has several senses, number them inside definitionTarget and \
     definition as '1. ... 2. ...' and tag each example with the 1-based \
     meaningIndex of the sense it illustrates. \
     Always describe the word exactly as given, even when it looks misspelled; \
     in that case set isValidWord to false and fill suggestedWord."
        .to_string()
}

pub fn definition_user_prompt(request: &DefinitionRequest) -> String {
    let mut prompt = format!(
        "Define the {} word \"{}\" for a speaker of {}. \
         Give 2-4 example sentences with translations.",
        request.target_language, request.word, request.native_language
    );

    if let Some(seed) = &request.seed_text {
        prompt.push_str(&format!(
            " Base the definition on this reference text and do not contradict it:\n{seed}"
        ));
    }

    prompt
}

/// Query string for the image search, scoped to one sense when known.
pub fn image_query(prompt: &str, meaning_context: Option<&str>) -> String {
    match meaning_context {
        Some(context) if !context.trim().is_empty() => format!("{prompt} {}", context.trim()),
        _ => prompt.to_string(),
    }
}
