use serde_json::Value;

/// Decode one serialized utterance result and extract its `"text"` field.
///
/// Returns `Ok(None)` for a well-formed object without a text field (such
/// results contribute nothing to the transcript) and `Err` for anything that
/// is not valid JSON. Untrusted recognizer output is only ever parsed, never
/// evaluated.
pub fn parse_utterance(raw: &str) -> Result<Option<String>, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(value
        .get("text")
        .and_then(Value::as_str)
        .map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_extracts_text_field() {
        let parsed = parse_utterance(r#"{"text": "hello world"}"#).unwrap();
        assert_eq!(parsed.as_deref(), Some("hello world"));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let raw = r#"{"result": [{"word": "hi", "conf": 0.9}], "text": "hi"}"#;
        let parsed = parse_utterance(raw).unwrap();
        assert_eq!(parsed.as_deref(), Some("hi"));
    }

    #[rstest]
    #[case::empty_object("{}")]
    #[case::null_text(r#"{"text": null}"#)]
    #[case::non_string_text(r#"{"text": 42}"#)]
    #[case::partial_only(r#"{"partial": "hel"}"#)]
    fn test_missing_text_field_yields_none(#[case] raw: &str) {
        assert_eq!(parse_utterance(raw).unwrap(), None);
    }

    #[rstest]
    #[case::truncated(r#"{"text": "hel"#)]
    #[case::not_json("__import__('os').system('rm -rf /')")]
    #[case::bare_expression("1 + 1")]
    fn test_malformed_content_fails_safely(#[case] raw: &str) {
        assert!(parse_utterance(raw).is_err());
    }

    #[test]
    fn test_code_like_text_is_returned_as_plain_data() {
        let parsed = parse_utterance(r#"{"text": "os.system('reboot')"}"#).unwrap();
        assert_eq!(parsed.as_deref(), Some("os.system('reboot')"));
    }
}
