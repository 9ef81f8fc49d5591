//! Per-language prompt templates and fixed messages.
//!
//! Each pipeline node (grading, generation, rewriting) has one Handlebars
//! template per supported language, held in a static lookup keyed by
//! [`Language`]. Fallback messages shown when the pipeline gives up are plain
//! constants, also per language.

use crate::language::Language;
use handlebars::Handlebars;
use rihla_core::{AppError, AppResult};
use std::collections::HashMap;

/// Templates for one language, one entry per pipeline node.
struct PromptSet {
    grade: &'static str,
    generate: &'static str,
    rewrite: &'static str,
    no_information: &'static str,
    index_unavailable: &'static str,
}

const ENGLISH: PromptSet = PromptSet {
    grade: "You are a grader. Your job is to check if a
retrieved document is relevant to a user question.
Respond with a *single word*: 'yes' if relevant, 'no' if not.

Document: {{document}}
Question: {{question}}

Answer:",
    generate: "You are an assistant for question-answering tasks.
Use the following pieces of retrieved context to answer the question.
If you don't know the answer, just say that you don't know.
The answer should be in English.

Question: {{question}}
Context: {{context}}

Helpful Answer:",
    rewrite: "You are a query rewriter. Rewrite the following question to be
a concise and specific search query for a vector database.
Respond ONLY with the rewritten query, nothing else.

Original Question: {{question}}

Rewritten Query:",
    no_information: "Could not find relevant information after multiple attempts.",
    index_unavailable: "Sorry, the English index is not available.",
};

const ARABIC: PromptSet = PromptSet {
    grade: "أنت مُقيّم. مهمتك هي التحقق مما إذا كانت الوثيقة المسترجعة ذات صلة بسؤال المستخدم.
أجب بكلمة واحدة فقط: 'yes' إذا كانت ذات صلة، 'no' إذا لم تكن كذلك.

الوثيقة: {{document}}
السؤال: {{question}}

الإجابة:",
    generate: "أنت مساعد للإجابة على الأسئلة.
استخدم أجزاء السياق المسترجعة التالية للإجابة على السؤال.
إذا كنت لا تعرف الإجابة، قل فقط أنك لا تعرف.
يجب أن تكون الإجابة بالعربية.

السؤال: {{question}}
السياق: {{context}}

الإجابة المفيدة:",
    rewrite: "أنت مُعيد صياغة الاستعلامات. أعد صياغة السؤال التالي ليصبح
استعلام بحث موجز ومحدد لقاعدة بيانات متجهية.
قدم فقط الاستعلام المُعاد صياغته، لا شيء آخر.

السؤال الأصلي: {{question}}

الاستعلام المُعاد صياغته:",
    no_information: "لم أتمكن من إيجاد معلومات ذات صلة بعد محاولات متعددة.",
    index_unavailable: "عذراً، فهرس اللغة العربية غير متاح حالياً.",
};

/// Shown when the question's language is neither Arabic nor English.
/// Bilingual because the user's language is unknown at that point.
const UNSUPPORTED_LANGUAGE: &str =
    "Sorry, only Arabic and English are supported. عذراً، ندعم اللغتين العربية والإنجليزية فقط.";

fn prompt_set(language: Language) -> &'static PromptSet {
    match language {
        Language::Arabic => &ARABIC,
        Language::English => &ENGLISH,
    }
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

/// Build the binary relevance prompt for one candidate document.
pub fn grading_prompt(language: Language, question: &str, document: &str) -> AppResult<String> {
    let mut variables = HashMap::new();
    variables.insert("question".to_string(), question.to_string());
    variables.insert("document".to_string(), document.to_string());

    render_template(prompt_set(language).grade, &variables)
}

/// Build the grounded-answer prompt from the question and the joined context.
pub fn generation_prompt(language: Language, question: &str, context: &str) -> AppResult<String> {
    let mut variables = HashMap::new();
    variables.insert("question".to_string(), question.to_string());
    variables.insert("context".to_string(), context.to_string());

    render_template(prompt_set(language).generate, &variables)
}

/// Build the query-rewriting prompt.
pub fn rewrite_prompt(language: Language, question: &str) -> AppResult<String> {
    let mut variables = HashMap::new();
    variables.insert("question".to_string(), question.to_string());

    render_template(prompt_set(language).rewrite, &variables)
}

/// Fixed message returned when no relevant passages were found after all
/// rewrite attempts.
pub fn no_information_message(language: Language) -> &'static str {
    prompt_set(language).no_information
}

/// Fixed message returned when the language's index failed to load.
pub fn index_unavailable_message(language: Language) -> &'static str {
    prompt_set(language).index_unavailable
}

/// Fixed message returned for questions in an unsupported language.
pub fn unsupported_language_message() -> &'static str {
    UNSUPPORTED_LANGUAGE
}
