pub const DEFAULT_ONESHOT_PROMPT: &str = "summarize all the expenses of all time";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You have access to tools. When you choose to call a tool, do not narrate status updates. \
After tools run, return only a concise final answer.";
