// Cross-cutting prompt fragments sent with every completion call.
// Task-specific templates live next to the module that fills them.

/// Fixed system role message for the chat transcript.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
