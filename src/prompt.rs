//! Prompt construction
//!
//! Two fixed instruction templates (general analysis and question
//! answering) with the payload spliced verbatim between literal data
//! markers. Selection is an explicit two-branch function. The payload is
//! treated as opaque analysis input and is not escaped or sanitized.

/// Marks the start of the dataset inside a rendered prompt.
pub const DATA_START_MARKER: &str = "---BEGIN DATA---";
/// Marks the end of the dataset inside a rendered prompt.
pub const DATA_END_MARKER: &str = "---END DATA---";

/// Output field declared for the general-analysis template.
pub const INSIGHTS_FIELD: &str = "insights";
/// Output field declared for the question-answering template.
pub const ANSWER_FIELD: &str = "answer";

const GENERAL_INSIGHTS_INSTRUCTIONS: &str = "\
You are an expert data analyst. Analyze the dataset provided between the \
markers below and generate key insights. The data may be CSV, JSON, plain \
text, or CSV text extracted from the first sheet of a spreadsheet. Base your \
analysis solely on the provided data.

1. Identify notable trends and patterns.
2. Highlight the top performers.
3. Flag underperforming or anomalous areas.
4. Summarize the most actionable findings.

If the data is empty, uninterpretable, or insufficient to support a \
conclusion, state that explicitly instead of fabricating findings.";

const QUESTION_INSTRUCTIONS: &str = "\
You are an expert data analyst. Answer the question below using only the \
dataset provided between the markers. The data may be CSV, JSON, plain text, \
or CSV text extracted from the first sheet of a spreadsheet. If the answer \
cannot be derived from the provided data, state that explicitly instead of \
inventing an answer.";

/// A rendered prompt plus the single string field the backend must return.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub text: String,
    pub output_field: &'static str,
}

/// Render the prompt for a payload and an optional question.
///
/// A question that is blank after trimming selects the general template.
pub fn build_prompt(payload: &str, question: Option<&str>) -> PromptSpec {
    match question.map(str::trim).filter(|q| !q.is_empty()) {
        Some(question) => PromptSpec {
            text: format!(
                "{instructions}\n\n{start}\n{payload}\n{end}\n\nQuestion: {question}\n\nAnswer:",
                instructions = QUESTION_INSTRUCTIONS,
                start = DATA_START_MARKER,
                payload = payload,
                end = DATA_END_MARKER,
                question = question,
            ),
            output_field: ANSWER_FIELD,
        },
        None => PromptSpec {
            text: format!(
                "{instructions}\n\n{start}\n{payload}\n{end}",
                instructions = GENERAL_INSIGHTS_INSTRUCTIONS,
                start = DATA_START_MARKER,
                payload = payload,
                end = DATA_END_MARKER,
            ),
            output_field: INSIGHTS_FIELD,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_question_selects_general_template() {
        let spec = build_prompt("a,b\n1,2", None);
        assert_eq!(spec.output_field, INSIGHTS_FIELD);
        assert!(spec.text.contains("trends and patterns"));
        assert!(!spec.text.contains("Question:"));
    }

    #[test]
    fn test_question_selects_question_template() {
        let spec = build_prompt("a,b\n1,2", Some("What is the sum?"));
        assert_eq!(spec.output_field, ANSWER_FIELD);
        assert!(spec.text.contains("Question: What is the sum?"));
        assert!(!spec.text.contains("top performers"));
    }

    #[test]
    fn test_blank_question_selects_general_template() {
        let spec = build_prompt("a,b\n1,2", Some("   "));
        assert_eq!(spec.output_field, INSIGHTS_FIELD);
    }

    #[test]
    fn test_question_is_trimmed_into_the_prompt() {
        let spec = build_prompt("x", Some("  Why?  "));
        assert!(spec.text.contains("Question: Why?\n"));
    }

    #[test]
    fn test_payload_is_embedded_verbatim_between_markers() {
        let payload = "name,score\n\"Ann, B.\",97";
        let spec = build_prompt(payload, None);
        let delimited = format!("{}\n{}\n{}", DATA_START_MARKER, payload, DATA_END_MARKER);
        assert!(spec.text.contains(&delimited));
    }
}
