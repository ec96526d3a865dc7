use crate::io_struct::Message;

pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Reply the model is told to give when the messages do not answer the question.
pub const NOT_FOUND_REPLY: &str = "I could not find that information.";

pub const SYSTEM_INSTRUCTION: &str =
    "You are an intelligent assistant trained to extract relevant facts from user messages.";

/// Render messages as `speaker: text` lines, in order.
pub fn build_corpus(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| {
            format!(
                "{}: {}",
                msg.speaker.as_deref().unwrap_or(UNKNOWN_SPEAKER),
                msg.text.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn compose_prompt(corpus: &str, question: &str) -> String {
    format!(
        "You are a helpful assistant answering questions about Aurora members.\n\
         The following are recent messages from members:\n\
         {corpus}\n\
         \n\
         Question: {question}\n\
         \n\
         Please provide a concise, factual answer using only the information from the messages.\n\
         If the answer cannot be found in the messages, reply exactly: \"{NOT_FOUND_REPLY}\"\n"
    )
}
