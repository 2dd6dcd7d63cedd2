//! Answer generator implementations.

mod openai;
mod template_fallback;

pub use openai::OpenAiChat;
pub use template_fallback::TemplateFallback;

/// System instruction sent with every remote generation request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions strictly \
using the provided context. If the answer cannot be derived from the context, say you don't know.";
