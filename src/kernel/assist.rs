//! Assistant actions: request building, splice policy and the in-flight guard.

use super::buffer::{byte_offset, char_slice};
use super::services::ports::GenerationRequest;

pub const SYSTEM_ROLE: &str = "You are a helpful writing assistant for a Markdown editor. \
Always return the response in valid Markdown format without wrapping it in code blocks unless requested.";

/// Chars of document context sent by `Continue` when nothing is selected.
pub const CONTEXT_SNIPPET_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistAction {
    Continue,
    Summarize,
    FixGrammar,
    Explain,
    Translate,
}

impl AssistAction {
    pub const ALL: [AssistAction; 5] = [
        AssistAction::Continue,
        AssistAction::Summarize,
        AssistAction::FixGrammar,
        AssistAction::Explain,
        AssistAction::Translate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::Summarize => "Summarize",
            Self::FixGrammar => "Fix grammar",
            Self::Explain => "Explain",
            Self::Translate => "Translate",
        }
    }

    pub fn requires_selection(self) -> bool {
        self != Self::Continue
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistRejection {
    #[error("Select some text first to {0}")]
    EmptySelection(&'static str),
    #[error("The assistant is still working on the previous request")]
    Busy,
}

pub fn context_snippet(content: &str) -> String {
    match content.char_indices().nth(CONTEXT_SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

pub fn build_instruction(action: AssistAction, selected: &str, content: &str) -> String {
    match action {
        AssistAction::Continue => {
            let text = if selected.is_empty() {
                context_snippet(content)
            } else {
                selected.to_string()
            };
            format!(
                "Continue writing the following markdown text creatively. seamlessly matching the tone and style. \n\nText:\n{text}"
            )
        }
        AssistAction::Summarize => format!(
            "Summarize the following markdown text into a concise paragraph:\n\n{selected}"
        ),
        AssistAction::FixGrammar => format!(
            "Fix the grammar and spelling of the following text, keeping the markdown formatting intact. Only return the corrected text:\n\n{selected}"
        ),
        AssistAction::Explain => {
            format!("Explain the concepts in the following text simply:\n\n{selected}")
        }
        AssistAction::Translate => format!(
            "Translate the following text to English (if not already) or Spanish (if English), maintaining markdown structure:\n\n{selected}"
        ),
    }
}

/// Validates the selection and builds the outbound request.
pub fn prepare(
    action: AssistAction,
    start: usize,
    end: usize,
    content: &str,
) -> Result<GenerationRequest, AssistRejection> {
    let (start, end) = (start.min(end), start.max(end));
    let selected = char_slice(content, start, end);
    if action.requires_selection() && selected.is_empty() {
        return Err(AssistRejection::EmptySelection(action.label()));
    }
    Ok(GenerationRequest {
        instruction: build_instruction(action, selected, content),
        system_role: SYSTEM_ROLE.to_string(),
    })
}

/// Applies `generated` to `content`; returns the new text and the char offset just past the
/// inserted text.
pub fn splice(
    action: AssistAction,
    content: &str,
    start: usize,
    end: usize,
    generated: &str,
) -> (String, usize) {
    let (start, end) = (start.min(end), start.max(end));
    let end_byte = byte_offset(content, end);
    match action {
        AssistAction::Continue => {
            let (before, after) = content.split_at(end_byte);
            let sep = if !before.ends_with('\n') && !generated.starts_with('\n') {
                "\n"
            } else {
                ""
            };
            let out = format!("{before}{sep}{generated}{after}");
            let cursor = before.chars().count() + sep.len() + generated.chars().count();
            (out, cursor)
        }
        _ => {
            let start_byte = byte_offset(content, start);
            let out = format!(
                "{}{}{}",
                &content[..start_byte],
                generated,
                &content[end_byte..]
            );
            let cursor = content[..start_byte].chars().count() + generated.chars().count();
            (out, cursor)
        }
    }
}

/// A request that has been sent and not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAssist {
    pub request_id: u64,
    pub doc_id: String,
    pub action: AssistAction,
    pub start: usize,
    pub end: usize,
    /// Text of `[0, end)` at dispatch time. Covers the span and everything before the
    /// insertion point, so an edit anywhere up to `end` invalidates the result.
    pub anchor_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistStatus {
    Idle,
    InFlight(PendingAssist),
}

#[derive(Debug, Clone)]
pub struct AssistState {
    status: AssistStatus,
    next_request_id: u64,
}

impl AssistState {
    pub fn new() -> Self {
        Self {
            status: AssistStatus::Idle,
            next_request_id: 1,
        }
    }

    pub fn status(&self) -> &AssistStatus {
        &self.status
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.status, AssistStatus::InFlight(_))
    }

    pub fn pending(&self) -> Option<&PendingAssist> {
        match &self.status {
            AssistStatus::InFlight(pending) => Some(pending),
            AssistStatus::Idle => None,
        }
    }

    /// `idle → in_flight`. Rejects a second request while one is outstanding.
    pub fn begin(
        &mut self,
        doc_id: &str,
        action: AssistAction,
        start: usize,
        end: usize,
        content: &str,
    ) -> Result<(u64, GenerationRequest), AssistRejection> {
        if self.is_in_flight() {
            return Err(AssistRejection::Busy);
        }
        let request = prepare(action, start, end, content)?;
        let (start, end) = (start.min(end), start.max(end));
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.status = AssistStatus::InFlight(PendingAssist {
            request_id,
            doc_id: doc_id.to_string(),
            action,
            start,
            end,
            anchor_prefix: char_slice(content, 0, end).to_string(),
        });
        Ok((request_id, request))
    }

    /// `in_flight → idle`. Returns the pending request when `request_id` matches it.
    pub fn finish(&mut self, request_id: u64) -> Option<PendingAssist> {
        let matches = matches!(
            &self.status,
            AssistStatus::InFlight(pending) if pending.request_id == request_id
        );
        if !matches {
            return None;
        }
        match std::mem::replace(&mut self.status, AssistStatus::Idle) {
            AssistStatus::InFlight(pending) => Some(pending),
            AssistStatus::Idle => None,
        }
    }
}

impl Default for AssistState {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingAssist {
    /// Whether `content` still starts with the text it had up to `end` at dispatch time.
    pub fn still_applies(&self, content: &str) -> bool {
        char_slice(content, 0, self.end) == self.anchor_prefix
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/assist.rs"]
mod tests;
