use crate::domain::model::{Content, Message, Role, WireMessage};
use serde_json::{Map, Value};

/// 主要工廠：角色轉小寫，不做其他驗證
pub fn msg(role: &str, content: impl Into<Content>) -> Message {
    Message {
        role: role.to_lowercase(),
        content: content.into(),
        name: None,
        tool_call_id: None,
        meta: None,
    }
}

pub fn system(content: impl Into<Content>) -> Message {
    msg(Role::System.as_str(), content)
}

pub fn user(content: impl Into<Content>) -> Message {
    msg(Role::User.as_str(), content)
}

pub fn assistant(content: impl Into<Content>) -> Message {
    msg(Role::Assistant.as_str(), content)
}

pub fn tool(content: impl Into<Content>) -> Message {
    msg(Role::Tool.as_str(), content)
}

pub fn developer(content: impl Into<Content>) -> Message {
    msg(Role::Developer.as_str(), content)
}

impl Message {
    pub fn new(role: Role, content: impl Into<Content>) -> Self {
        msg(role.as_str(), content)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tool_call_id(mut self, tool_call_id: impl Into<String>) -> Self {
        self.tool_call_id = Some(tool_call_id.into());
        self
    }

    pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }

    /// 轉成可送往 API 或寫入日誌的字典；空字串的 `name`/`tool_call_id` 會被省略
    pub fn to_dict(&self, include_meta: bool) -> WireMessage {
        WireMessage {
            role: self.role.clone(),
            content: self.content.clone().into(),
            name: non_empty(&self.name),
            tool_call_id: non_empty(&self.tool_call_id),
            meta: if include_meta {
                self.meta.as_ref().filter(|meta| !meta.is_empty()).cloned()
            } else {
                None
            },
        }
    }

    pub fn to_value(&self, include_meta: bool) -> Value {
        serde_json::to_value(self.to_dict(include_meta)).unwrap_or(Value::Null)
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
