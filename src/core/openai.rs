use crate::core::messages::non_empty;
use crate::domain::model::{Message, Payload, Role, WireMessage};

/// 轉成 OpenAI 請求格式。
///
/// `use_instructions` 為真時，第一則 `system` 訊息會從清單移出並放進
/// `instructions`，其餘 system 訊息維持為一般訊息。`developer` 角色一律
/// 映射為 `system`；內容原樣傳遞，`meta` 不會送出。
pub fn to_openai(messages: &[Message], use_instructions: bool) -> Payload {
    let lifted = if use_instructions {
        messages
            .iter()
            .position(|m| m.role == Role::System.as_str())
    } else {
        None
    };

    let rendered = messages
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != lifted)
        .map(|(_, m)| render_message(m))
        .collect::<Vec<_>>();

    if let Some(index) = lifted {
        tracing::debug!(
            "Lifted system message at index {} into instructions",
            index
        );
    }

    Payload {
        messages: rendered,
        instructions: lifted.map(|i| messages[i].content.clone().into()),
    }
}

fn render_message(m: &Message) -> WireMessage {
    let role = if m.role == Role::Developer.as_str() {
        Role::System.as_str().to_string()
    } else {
        m.role.clone()
    };

    WireMessage {
        role,
        content: m.content.clone().into(),
        name: non_empty(&m.name),
        tool_call_id: non_empty(&m.tool_call_id),
        meta: None,
    }
}
