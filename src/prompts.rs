//! Prompt templates and response schemas for the coach.

use crate::api::types::Schema;
use crate::content::{LearningMode, FLASHCARD_COUNT, QUIZ_OPTION_COUNT, QUIZ_QUESTION_COUNT};

/// Reply the model gives for topics outside the syllabus.
pub const OUT_OF_SCOPE_REPLY: &str = "Please upload the relevant CEH content to proceed.";

/// Reminder appended to every lesson.
pub const SAFETY_REMINDER: &str = "For authorized ethical hacking only.";

/// Build the grounding instruction sent with every request.
pub fn system_instruction(context: &str) -> String {
    format!(
        r#"
You are a CEH (Certified Ethical Hacking) Coach and Training Assistant.
Your primary knowledge base is the following 12-module course index.
STRICTLY ADHERE TO THIS SCOPE.

{context}

RULES:
1. Use ONLY the information context provided above to determine valid topics.
2. If the user asks about a topic NOT in this index, reply: "{refusal}"
3. Do NOT provide real hacking instructions for illegal activities.
4. Always provide a safety reminder: "{reminder}"
5. Output tone: Friendly instructor, Beginner to Intermediate cybersecurity level.
6. You may use general knowledge to define terms listed in the syllabus (for example what "Nmap" is), but do not drift into topics the modules do not list.
"#,
        context = context,
        refusal = OUT_OF_SCOPE_REPLY,
        reminder = SAFETY_REMINDER,
    )
}

/// User prompt for one learning mode on one subtopic.
pub fn content_prompt(mode: LearningMode, module_title: &str, subtopic_title: &str) -> String {
    match mode {
        LearningMode::Quiz => format!(
            "Generate {count} multiple choice questions for the CEH topic: Module: \"{module}\", Subtopic: \"{subtopic}\". \
             Each question must have exactly {options} options. \
             Focus on the technical details mentioned in the syllabus.",
            count = QUIZ_QUESTION_COUNT,
            options = QUIZ_OPTION_COUNT,
            module = module_title,
            subtopic = subtopic_title,
        ),
        LearningMode::Flashcards => format!(
            "Generate {count} flashcards (Term and Definition) for the CEH topic: Module: \"{module}\", Subtopic: \"{subtopic}\".",
            count = FLASHCARD_COUNT,
            module = module_title,
            subtopic = subtopic_title,
        ),
        LearningMode::Summary => format!(
            "Provide a concise summary of \"{subtopic}\" from \"{module}\". Bullet points, key takeaways.",
            module = module_title,
            subtopic = subtopic_title,
        ),
        LearningMode::Lesson => format!(
            "Teach me about \"{subtopic}\" from \"{module}\".\n\
             Structure:\n\
             1. Definition\n\
             2. Key Concepts\n\
             3. Tools (if applicable based on syllabus)\n\
             4. Techniques (if applicable)\n\
             5. Example\n\
             6. Step-by-step breakdown (theoretical)\n\
             End with the safety reminder.",
            module = module_title,
            subtopic = subtopic_title,
        ),
    }
}

/// User prompt for a free-form question.
pub fn question_prompt(query: &str) -> String {
    format!(
        "User Question: \"{}\"\n\n\
         Provide a clear, concise answer based strictly on the CEH syllabus context provided. \
         If the answer involves tools or techniques, mention them only if they are in the syllabus. \
         If the answer is not in the context, say so.",
        query
    )
}

pub fn quiz_schema() -> Schema {
    Schema::array(Schema::object([
        ("question", Schema::string()),
        ("options", Schema::array(Schema::string())),
        ("correctAnswerIndex", Schema::integer()),
        ("explanation", Schema::string()),
    ]))
}

pub fn flashcard_schema() -> Schema {
    Schema::array(Schema::object([
        ("term", Schema::string()),
        ("definition", Schema::string()),
    ]))
}

/// Response schema for structured modes, `None` for text modes.
pub fn schema_for(mode: LearningMode) -> Option<Schema> {
    match mode {
        LearningMode::Quiz => Some(quiz_schema()),
        LearningMode::Flashcards => Some(flashcard_schema()),
        LearningMode::Lesson | LearningMode::Summary => None,
    }
}
