use anyhow::Result;
use elmkit::{
    assistant, developer, normalize, normalize_json_str, system, to_openai, tool, user,
    ElmError, MessageItem, Payload,
};
use serde_json::{json, Map};

/// 一段含工具呼叫的對話，從建構到送出
#[test]
fn test_tool_conversation_renders_for_openai() -> Result<()> {
    let mut meta = Map::new();
    meta.insert("latency_ms".to_string(), json!(180));

    let conversation = vec![
        system("You are a calculator."),
        developer("Answer with digits only."),
        user("What is 6 * 7?"),
        assistant("Calling multiply").with_meta(meta),
        tool("42").with_name("multiply").with_tool_call_id("call_1"),
    ];

    let payload = to_openai(&conversation, true);

    assert_eq!(
        payload.to_value(),
        json!({
            "messages": [
                {"role": "system", "content": "Answer with digits only."},
                {"role": "user", "content": "What is 6 * 7?"},
                {"role": "assistant", "content": "Calling multiply"},
                {"role": "tool", "content": "42", "name": "multiply", "tool_call_id": "call_1"}
            ],
            "instructions": "You are a calculator."
        })
    );
    Ok(())
}

/// 已建構的訊息經過 normalize 後，再讀回 JSON 應得到相同的 payload
#[test]
fn test_normalized_payload_is_accepted_again() -> Result<()> {
    let items = vec![
        MessageItem::from(system("rules")),
        MessageItem::from(json!({"role": "USER", "content": [{"type": "text", "text": "hi"}]})),
    ];
    let first = normalize(items, true)?;

    let text = serde_json::to_string(&first)?;
    let second = normalize_json_str(&text, true)?;

    assert_eq!(first, second);
    assert_eq!(second.messages[1].role, "user");
    Ok(())
}

#[test]
fn test_payload_with_instructions_passes_through() -> Result<()> {
    let payload: Payload = normalize(
        json!({
            "instructions": [{"type": "text", "text": "be brief"}],
            "messages": [{"role": "user", "content": "hi", "meta": {"id": 1}}]
        }),
        false,
    )?;

    assert_eq!(
        payload.to_value(),
        json!({
            "messages": [{"role": "user", "content": "hi", "meta": {"id": 1}}],
            "instructions": [{"type": "text", "text": "be brief"}]
        })
    );
    Ok(())
}

#[test]
fn test_first_invalid_message_stops_normalization() {
    let result = normalize(
        json!([
            {"role": "user", "content": "fine"},
            {"role": "assistant", "content": ""},
            {"role": "user", "content": 3}
        ]),
        true,
    );

    match result {
        Err(ElmError::ValueError { message }) => {
            assert_eq!(message, "Empty string content is not allowed")
        }
        other => panic!("expected ValueError, got {:?}", other),
    }
}
