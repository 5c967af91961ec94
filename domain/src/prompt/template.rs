//! Prompt templates for the pipeline stages

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Stage 1: ask a backend to classify a prompt
    pub fn intent_assessment(prompt: &str, context: Option<&str>) -> String {
        let context_line = context
            .filter(|c| !c.trim().is_empty())
            .map(|c| format!("\nPrevious context: {c}\n"))
            .unwrap_or_default();

        format!(
            r#"Analyze the following user input and determine the intent. Classify it as either "chat" or "objective".

User Input: "{prompt}"
{context_line}
Classification Criteria:
- "chat": Casual conversation, greetings, simple questions, social pleasantries
- "objective": Task requests, problem-solving, creation tasks, analysis requests, complex queries

Respond in the following JSON format:
{{
    "intent": "chat" or "objective",
    "confidence": 0.0 to 1.0,
    "reasoning": "brief explanation of the classification"
}}"#
        )
    }

    /// Stage 2: ask a backend for structured objectives
    pub fn objective_extraction(prompt: &str) -> String {
        format!(
            r#"Extract clear, actionable objectives from this user request:

Request: "{prompt}"

Return a JSON object with:
- primary_objectives: list of main objectives
- secondary_objectives: list of supporting objectives
- expected_outcomes: list of expected results
- constraints: list of limitations or requirements"#
        )
    }

    /// Direct reply for chat-classified prompts
    pub fn chat_reply(prompt: &str) -> String {
        format!(
            r#"You are ESKAI, a helpful AI assistant. The user said: "{prompt}"

Provide a friendly, helpful response. Keep it conversational and natural."#
        )
    }

    /// System prompt for an execution agent
    pub fn agent_system(tools: &[String]) -> String {
        let mut prompt = String::from("You are a helpful AI agent executing tasks.");
        if !tools.is_empty() {
            prompt.push_str(&format!("\nAvailable tools: {}.", tools.join(", ")));
        }
        prompt.push_str("\nComplete the task thoroughly and report the result in plain text.");
        prompt
    }

    /// Stage 6: combine agent outputs into one answer
    pub fn synthesis(objectives: &[String], outputs: &[String]) -> String {
        let mut prompt = String::from(
            "Synthesize the following agent outputs into a comprehensive final result:\n\n",
        );
        prompt.push_str(&format!("Original Objectives: {}\n\nAgent Outputs:\n", objectives.join("; ")));

        let formatted: Vec<String> = outputs
            .iter()
            .enumerate()
            .map(|(i, output)| format!("Agent {} Output: {}", i + 1, output))
            .collect();
        prompt.push_str(&formatted.join("\n\n"));

        prompt.push_str(
            "\n\nProvide a coherent, comprehensive response that addresses all the original objectives.",
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_assessment_format() {
        let prompt = PromptTemplate::intent_assessment("Plan a trip", None);
        assert!(prompt.contains("User Input: \"Plan a trip\""));
        assert!(prompt.contains("\"intent\": \"chat\" or \"objective\""));
        assert!(!prompt.contains("Previous context"));
    }

    #[test]
    fn test_intent_assessment_with_context() {
        let prompt = PromptTemplate::intent_assessment("And Peru?", Some("We discussed Chile"));
        assert!(prompt.contains("Previous context: We discussed Chile"));
        let blank = PromptTemplate::intent_assessment("And Peru?", Some("  "));
        assert!(!blank.contains("Previous context"));
    }

    #[test]
    fn test_agent_system_lists_tools() {
        let prompt = PromptTemplate::agent_system(&["internet".into(), "analysis".into()]);
        assert!(prompt.contains("Available tools: internet, analysis."));
        assert!(!PromptTemplate::agent_system(&[]).contains("Available tools"));
    }

    #[test]
    fn test_synthesis_numbers_outputs() {
        let prompt = PromptTemplate::synthesis(
            &["Research market".into()],
            &["first".into(), "second".into()],
        );
        assert!(prompt.contains("Original Objectives: Research market"));
        assert!(prompt.contains("Agent 1 Output: first"));
        assert!(prompt.contains("Agent 2 Output: second"));
    }
}
