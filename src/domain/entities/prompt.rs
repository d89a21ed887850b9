use serde::{Deserialize, Serialize};

/// Fixed parts of the answer prompt. The question, the retrieved context and
/// the `Answer:` cue are appended when the prompt is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplate {
    pub persona: String,
    pub example_dialogue: String,
    pub instruction: String,
}

impl PromptTemplate {
    pub fn render(&self, question: &str, context: &str) -> String {
        format!(
            "{persona}\n\nExample dialogue:\n{example}\n\n{instruction}\n\n\
             Question: {question}\n\nContext: {context}\n\nAnswer: ",
            persona = self.persona,
            example = self.example_dialogue,
            instruction = self.instruction,
        )
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            persona: "You are a friendly assistant who loves to help people with a warm, \
                      human-like approach."
                .to_string(),
            example_dialogue: "User: Hi there! Can you tell me about Narrow AI?\n\
                 Assistant: Hello! I'd be delighted to explain. Narrow AI, also known as weak AI, \
                 refers to systems that are specifically designed to perform a single task, such as \
                 image recognition or language translation. While they can be extremely proficient \
                 at their tasks, they lack the general problem-solving abilities of human \
                 intelligence."
                .to_string(),
            instruction: "Now, please answer the following question in a similar friendly and \
                          detailed manner:"
                .to_string(),
        }
    }
}
