use englab::chat::{self, ChatClient, ChatError, LATEX_HINT};
use englab::config::ApiConfig;

fn client() -> ChatClient {
    ChatClient::new(&ApiConfig {
        endpoint: "https://example.invalid/v1/chat/completions".into(),
        api_key: "sk-test".into(),
        model: "typhoon-v1.5x-70b-instruct".into(),
    })
}

#[test]
fn payload_matches_the_wire_format() {
    let request = client()
        .build_request("why is the sky blue?", false)
        .expect("request");
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["model"], "typhoon-v1.5x-70b-instruct");
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][0]["content"], "why is the sky blue?");
    assert_eq!(json["max_tokens"], 512);
    assert_eq!(json["temperature"], 0.96);
    assert_eq!(json["top_p"], 0.9);
    assert_eq!(json["top_k"], 0);
    assert_eq!(json["repetition_penalty"], 1.05);
    assert_eq!(json["min_p"], 0.0);
}

#[test]
fn latex_instruction_is_optional_and_prepended() {
    let hinted = client().build_request("state Newton's second law", true).unwrap();
    assert!(hinted.messages[0].content.starts_with(LATEX_HINT));
    assert!(hinted.messages[0]
        .content
        .ends_with("state Newton's second law"));
}

#[test]
fn empty_message_is_rejected_without_a_request() {
    // build_request is the only path to a payload, so this guarantees no
    // network call can be made for empty input.
    assert!(matches!(
        client().build_request("", true),
        Err(ChatError::EmptyMessage)
    ));
    assert!(matches!(
        client().build_request(" \n\t ", false),
        Err(ChatError::EmptyMessage)
    ));
}

#[test]
fn reply_extraction_takes_the_first_choice() {
    let body = serde_json::json!({
        "choices": [
            {"message": {"role": "assistant", "content": "first"}},
            {"message": {"role": "assistant", "content": "second"}}
        ]
    });
    assert_eq!(chat::extract_reply(&body).unwrap(), "first");
}

#[test]
fn malformed_response_shape_degrades_to_an_error_string() {
    let bodies = [
        serde_json::json!("not an object"),
        serde_json::json!({"error": "boom"}),
        serde_json::json!({"choices": [{"text": "legacy shape"}]}),
    ];
    for body in bodies {
        let err = chat::extract_reply(&body).unwrap_err();
        assert!(matches!(err, ChatError::BadResponse(_)));
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn send_without_api_key_fails_locally() {
    let client = ChatClient::new(&ApiConfig::default());
    assert!(matches!(
        client.send("hello", false),
        Err(ChatError::MissingApiKey)
    ));
}
