//! Rendering of query outcomes into host-visible text.
//!
//! One text block per call. Optional answer fields append suffix blocks in
//! a fixed order: attachment, references, follow-ups, language, specialist,
//! continuation marker.

use crate::error::Error;
use crate::outcome::{Answer, QueryOutcome, SpecialistOption};

pub fn render_outcome(outcome: &QueryOutcome) -> String {
    match outcome {
        QueryOutcome::Clarification { prompt, options } => render_clarification(prompt, options),
        QueryOutcome::Answer(answer) => render_answer(answer),
    }
}

pub fn render_error(error: &Error) -> String {
    format!("❌ Error: {error}")
}

fn render_clarification(prompt: &str, options: &[SpecialistOption]) -> String {
    let list = options
        .iter()
        .enumerate()
        .map(|(i, opt)| format!("{}. {}: {}", i + 1, opt.id.to_uppercase(), opt.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{prompt}\n\nPlease choose a specialist:\n{list}\n\nReply with the specialist code (e.g., \"civa\" or \"IRC\")."
    )
}

fn render_answer(answer: &Answer) -> String {
    let mut text = answer.text.clone();

    if let Some(url) = &answer.attachment_url {
        text.push_str(&format!("\n\n📄 Full detailed answer (PDF):\n{url}"));
    }
    if !answer.references.is_empty() {
        text.push_str(&format!("\n\n📚 References: {}", answer.references.join(", ")));
    }
    if !answer.followup_questions.is_empty() {
        text.push_str("\n\n💡 Follow-up questions:");
        for (i, question) in answer.followup_questions.iter().enumerate() {
            text.push_str(&format!("\n{}. {question}", i + 1));
        }
    }
    if let Some(language) = &answer.detected_language {
        text.push_str(&format!("\n\n🌐 Detected language: {language}"));
    }
    if let Some(specialist) = &answer.specialist {
        text.push_str(&format!("\n\n👤 Specialist: {}", specialist.to_uppercase()));
    }
    if answer.conversation_continued {
        text.push_str("\n\n🔄 Conversation continued");
    }

    text
}
