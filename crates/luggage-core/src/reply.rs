//! Turning the model's free-text reply into a JSON array

use serde_json::Value;

use crate::error::AppError;
use crate::models::LuggageItem;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// A model reply normalized to an array of items.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    /// Items exactly as the model wrote them.
    pub items: Vec<Value>,
    /// The model returned a single value that was wrapped into an array.
    pub wrapped: bool,
}

impl ParsedReply {
    /// Typed view of the items that match the luggage schema; others are skipped.
    pub fn luggage_items(&self) -> Vec<LuggageItem> {
        self.items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect()
    }

    /// The model reported that the image has no luggage.
    pub fn is_no_luggage(&self) -> bool {
        let typed = self.luggage_items();
        !typed.is_empty() && typed.iter().all(LuggageItem::is_no_luggage)
    }
}

/// Extract the JSON text from a reply.
///
/// With a ```` ```json ```` fence, the text between it and the next fence; otherwise the
/// whole reply. Trimmed either way.
pub fn extract_json_block(text: &str) -> &str {
    match text.split_once(JSON_FENCE) {
        Some((_, rest)) => rest.split(FENCE).next().unwrap_or(rest).trim(),
        None => text.trim(),
    }
}

/// Parse a reply into an array of items, wrapping a lone value.
pub fn parse_model_reply(text: &str) -> Result<ParsedReply, AppError> {
    let json_text = extract_json_block(text);

    match serde_json::from_str::<Value>(json_text) {
        Ok(Value::Array(items)) => Ok(ParsedReply {
            items,
            wrapped: false,
        }),
        Ok(other) => Ok(ParsedReply {
            items: vec![other],
            wrapped: true,
        }),
        Err(e) => Err(AppError::UnparseableReply {
            reason: e.to_string(),
            raw: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_fenced_block() {
        let reply = "Here is the analysis:\n```json\n[{\"a\": 1}]\n```\nAnything else?";
        assert_eq!(extract_json_block(reply), "[{\"a\": 1}]");
    }

    #[test]
    fn test_extract_unterminated_fence() {
        assert_eq!(extract_json_block("```json\n{\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_uses_first_fence_only() {
        let reply = "```json\n[1]\n```\n```json\n[2]\n```";
        assert_eq!(extract_json_block(reply), "[1]");
    }

    #[test]
    fn test_extract_plain_reply_is_trimmed() {
        assert_eq!(extract_json_block("  \n[1, 2]\n "), "[1, 2]");
    }

    #[test]
    fn test_parse_array_is_verbatim() {
        let parsed = parse_model_reply("```json\n[{\"object_type\": \"backpack\"}]\n```").unwrap();
        assert!(!parsed.wrapped);
        assert_eq!(parsed.items, vec![json!({"object_type": "backpack"})]);
    }

    #[test]
    fn test_parse_single_object_is_wrapped() {
        let parsed = parse_model_reply("{\"object_type\": \"suitcase\"}").unwrap();
        assert!(parsed.wrapped);
        assert_eq!(parsed.items, vec![json!({"object_type": "suitcase"})]);
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let parsed = parse_model_reply("[{\"z\": 1, \"a\": 2}]").unwrap();
        let keys: Vec<&String> = parsed.items[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn test_parse_failure_keeps_raw_reply() {
        let err = parse_model_reply("I could not find any luggage, sorry.").unwrap_err();
        match err {
            AppError::UnparseableReply { raw, .. } => {
                assert_eq!(raw, "I could not find any luggage, sorry.")
            }
            other => panic!("Expected UnparseableReply, got {other:?}"),
        }
    }

    #[test]
    fn test_commented_schema_echo_is_unparseable() {
        let reply = "```json\n[\n  {\"object_type\": \"suitcase\"}\n  // ... more\n]\n```";
        assert!(parse_model_reply(reply).is_err());
    }

    #[test]
    fn test_no_luggage_detection() {
        let parsed = parse_model_reply(
            &serde_json::to_string(&vec![LuggageItem::no_luggage()]).unwrap(),
        )
        .unwrap();
        assert!(parsed.is_no_luggage());

        let parsed = parse_model_reply("[{\"object_type\": \"suitcase\"}]").unwrap();
        assert!(!parsed.is_no_luggage());
        assert_eq!(parsed.luggage_items().len(), 1);
    }
}
