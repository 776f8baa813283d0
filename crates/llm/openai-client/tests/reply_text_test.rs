//! Unit tests for [`openai_client::reply_text`] and [`openai_client::ReplyError`] tagging.

use openai_client::{reply_text, CompletionOptions, ReplyError};

/// **Test: Non-blank content is returned unchanged.**
#[test]
fn reply_text_returns_content() {
    assert_eq!(reply_text(Some("Hi there!".to_string())).unwrap(), "Hi there!");
}

/// **Test: Missing or blank content is tagged Empty and recoverable by downcast.**
#[test]
fn reply_text_blank_is_empty_error() {
    for content in [None, Some(String::new()), Some("  \n".to_string())] {
        let err = reply_text(content).unwrap_err();
        assert_eq!(err.downcast_ref::<ReplyError>(), Some(&ReplyError::Empty));
    }
}

/// **Test: Options default to temperature 0.**
#[test]
fn completion_options_default_temperature_zero() {
    let options = CompletionOptions::new("gpt-3.5-turbo");
    assert_eq!(options.temperature, 0.0);
    assert_eq!(options.with_temperature(0.7).temperature, 0.7);
}
