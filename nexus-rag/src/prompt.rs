//! Prompt assembly for context-injected generation.

use crate::document::DocumentChunk;

/// Operating policy sent as the system instruction on every request.
pub const POLICY_INSTRUCTION: &str = "\
You are an expert AI Assistant for TelcoNexus, a major telecommunications company.
Your role is to assist network engineers and data scientists by answering questions using ONLY the provided context.

Strict Rules:
1. Use the provided \"Context\" to answer the user's question.
2. If the answer is not in the context, state that you don't have that information in the internal knowledge base.
3. Be professional, concise, and technical. Use telecom acronyms (HSS, UPF, SLA) correctly.
4. Format your response with clear headings or bullet points if necessary.
5. Do NOT mention the underlying model or its provider. You are the TelcoNexus Internal Assistant.";

/// Render retrieved chunks as `Source:`/`Content:` pairs separated by a blank line.
pub fn render_context(chunks: &[DocumentChunk]) -> String {
    chunks
        .iter()
        .map(|c| format!("Source: {}\nContent: {}", c.source, c.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Combine a rendered context block with the literal user question.
pub fn render_prompt(context_block: &str, question: &str) -> String {
    format!("Context Information:\n{context_block}\n\nUser Question:\n{question}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_block_keeps_order_and_separates_chunks() {
        let chunks = vec![
            DocumentChunk::new("a", "Runbook: HSS", "restart diameter"),
            DocumentChunk::new("b", "Policy: L1", "report in 15 minutes"),
        ];
        assert_eq!(
            render_context(&chunks),
            "Source: Runbook: HSS\nContent: restart diameter\n\n\
             Source: Policy: L1\nContent: report in 15 minutes"
        );
    }

    #[test]
    fn empty_context_renders_empty_block() {
        assert_eq!(render_context(&[]), "");
    }

    #[test]
    fn prompt_embeds_question_verbatim() {
        let prompt = render_prompt("Source: x\nContent: y", "What is N4?");
        assert!(prompt.starts_with("Context Information:\nSource: x"));
        assert!(prompt.ends_with("User Question:\nWhat is N4?"));
    }

    #[test]
    fn policy_forbids_revealing_provider() {
        assert!(POLICY_INSTRUCTION.contains("ONLY the provided context"));
        assert!(POLICY_INSTRUCTION.contains("TelcoNexus Internal Assistant"));
    }
}
