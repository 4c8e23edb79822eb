use crate::core::messages::non_empty;
use crate::domain::model::{Message, Payload, WireMessage};
use crate::utils::error::{ElmError, Result};
use serde_json::{Map, Value};

/// 清單中的單一項目：已建構的 `Message` 或原始 JSON
#[derive(Debug, Clone, PartialEq)]
pub enum MessageItem {
    Message(Message),
    Value(Value),
}

/// `normalize` 接受的輸入
#[derive(Debug, Clone, PartialEq)]
pub enum MessagesIn {
    /// 字串、單一訊息物件、訊息物件陣列，或完整 `{"messages": [...]}` payload
    Value(Value),
    Message(Message),
    List(Vec<MessageItem>),
}

impl From<&str> for MessagesIn {
    fn from(text: &str) -> Self {
        MessagesIn::Value(Value::String(text.to_string()))
    }
}

impl From<String> for MessagesIn {
    fn from(text: String) -> Self {
        MessagesIn::Value(Value::String(text))
    }
}

impl From<Value> for MessagesIn {
    fn from(value: Value) -> Self {
        MessagesIn::Value(value)
    }
}

impl From<Map<String, Value>> for MessagesIn {
    fn from(map: Map<String, Value>) -> Self {
        MessagesIn::Value(Value::Object(map))
    }
}

impl From<Message> for MessagesIn {
    fn from(message: Message) -> Self {
        MessagesIn::Message(message)
    }
}

impl From<Vec<Message>> for MessagesIn {
    fn from(messages: Vec<Message>) -> Self {
        MessagesIn::List(messages.into_iter().map(MessageItem::Message).collect())
    }
}

impl From<Vec<MessageItem>> for MessagesIn {
    fn from(items: Vec<MessageItem>) -> Self {
        MessagesIn::List(items)
    }
}

impl From<Message> for MessageItem {
    fn from(message: Message) -> Self {
        MessageItem::Message(message)
    }
}

impl From<Value> for MessageItem {
    fn from(value: Value) -> Self {
        MessageItem::Value(value)
    }
}

/// 把任何可接受的輸入整理成 `{"messages": [...]}`。
///
/// 接受：
///   1) 字串（視為 user 訊息）
///   2) 單一訊息物件 `{role, content}`
///   3) 訊息物件陣列
///   4) 單一 `Message`
///   5) `Message` 與訊息物件混合的清單
///   6) 完整 payload `{"messages": [...], "instructions": ...}`
pub fn normalize(data: impl Into<MessagesIn>, strip_meta: bool) -> Result<Payload> {
    let payload = match data.into() {
        MessagesIn::Value(value) => return normalize_value(&value, strip_meta),
        MessagesIn::Message(message) => {
            Payload::new(vec![message_to_wire(&message, strip_meta)?])
        }
        MessagesIn::List(items) => {
            if items.is_empty() {
                return Err(ElmError::value_error("Empty message list is not allowed"));
            }
            let messages = items
                .iter()
                .map(|item| match item {
                    MessageItem::Message(message) => message_to_wire(message, strip_meta),
                    MessageItem::Value(value) => list_item_to_wire(value, strip_meta),
                })
                .collect::<Result<Vec<_>>>()?;
            Payload::new(messages)
        }
    };

    tracing::debug!("Normalized {} message(s)", payload.messages.len());
    Ok(payload)
}

/// 原始 JSON 輸入的版本
pub fn normalize_value(data: &Value, strip_meta: bool) -> Result<Payload> {
    let payload = match data {
        // 完整 payload
        Value::Object(map) if map.contains_key("messages") => {
            let items = match map.get("messages") {
                Some(Value::Array(items)) => items,
                _ => return Err(ElmError::type_error("'messages' must be a list")),
            };
            let messages = items
                .iter()
                .map(|item| match item {
                    Value::Object(obj) => coerce_message_map(obj, strip_meta),
                    _ => Err(ElmError::type_error("Message item must be a dict")),
                })
                .collect::<Result<Vec<_>>>()?;

            Payload {
                messages,
                // 存在就照抄，包含 null
                instructions: map.get("instructions").cloned(),
            }
        }
        Value::String(text) => Payload::new(vec![WireMessage::new("user", text.as_str())]),
        Value::Object(map) => Payload::new(vec![coerce_message_map(map, strip_meta)?]),
        Value::Array(items) => {
            if items.is_empty() {
                return Err(ElmError::value_error("Empty message list is not allowed"));
            }
            let messages = items
                .iter()
                .map(|item| list_item_to_wire(item, strip_meta))
                .collect::<Result<Vec<_>>>()?;
            Payload::new(messages)
        }
        _ => {
            return Err(ElmError::type_error(
                "Invalid input: must be str, dict, list, or Message",
            ))
        }
    };

    tracing::debug!("Normalized {} message(s)", payload.messages.len());
    Ok(payload)
}

pub fn normalize_json_str(text: &str, strip_meta: bool) -> Result<Payload> {
    let value: Value = serde_json::from_str(text)?;
    normalize_value(&value, strip_meta)
}

fn list_item_to_wire(item: &Value, strip_meta: bool) -> Result<WireMessage> {
    match item {
        Value::Object(map) => coerce_message_map(map, strip_meta),
        _ => Err(ElmError::type_error(
            "List items must be dicts or Message with 'role' and 'content'",
        )),
    }
}

fn message_to_wire(m: &Message, strip_meta: bool) -> Result<WireMessage> {
    if m.role.is_empty() {
        return Err(ElmError::value_error(
            "Message object must have 'role' and 'content'",
        ));
    }

    let wire = WireMessage {
        role: m.role.to_lowercase(),
        content: m.content.clone().into(),
        name: non_empty(&m.name),
        tool_call_id: non_empty(&m.tool_call_id),
        meta: if strip_meta {
            None
        } else {
            m.meta.as_ref().filter(|meta| !meta.is_empty()).cloned()
        },
    };
    validate_wire_message(&wire)?;
    Ok(wire)
}

fn coerce_message_map(d: &Map<String, Value>, strip_meta: bool) -> Result<WireMessage> {
    let role = match d.get("role") {
        Some(Value::String(role)) if !role.is_empty() => role,
        _ => {
            return Err(ElmError::value_error(
                "Each message dict must have non-empty string 'role'",
            ))
        }
    };
    let content = match d.get("content") {
        Some(Value::Null) | None => {
            return Err(ElmError::value_error("Each message dict must have 'content'"))
        }
        Some(content) => content.clone(),
    };

    let mut out = WireMessage::new(role.to_lowercase(), content);
    out.name = optional_string(d, "name")?;
    out.tool_call_id = optional_string(d, "tool_call_id")?;
    if !strip_meta {
        out.meta = match d.get("meta") {
            None | Some(Value::Null) => None,
            Some(Value::Object(meta)) => Some(meta.clone()),
            Some(_) => return Err(ElmError::type_error("'meta' must be a dict when provided")),
        };
    }

    validate_wire_message(&out)?;
    Ok(out)
}

/// null 與缺少相同；有值時必須是字串（空字串照樣保留）
fn optional_string(d: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match d.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ElmError::type_error(format!(
            "'{}' must be a string when provided",
            key
        ))),
    }
}

fn validate_wire_message(d: &WireMessage) -> Result<()> {
    if d.role.is_empty() {
        return Err(ElmError::value_error("Invalid 'role'"));
    }

    // 不檢查各家的 block 格式，只要求每個 block 是物件
    match &d.content {
        Value::String(text) if text.is_empty() => {
            Err(ElmError::value_error("Empty string content is not allowed"))
        }
        Value::String(_) => Ok(()),
        Value::Array(parts) => {
            for (i, part) in parts.iter().enumerate() {
                if !part.is_object() {
                    return Err(ElmError::type_error(format!(
                        "content blocks must be dicts; got {} at index {}",
                        json_type_name(part),
                        i
                    )));
                }
            }
            Ok(())
        }
        _ => Err(ElmError::type_error(
            "content must be a string or a list of blocks (dicts)",
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
