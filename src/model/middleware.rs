// The MIT License (MIT)
//
// Copyright (c) 2016 AT&T
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

use serde::{Deserialize, Serialize};
use super::ResourceType;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Middleware {
    #[serde(rename = "type")]
    pub middleware_type: ResourceType,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub items: Vec<MiddlewareItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareItem {
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub queues: Vec<String>,
}

impl Middleware {
    pub fn new(middleware_type: ResourceType, enabled: bool) -> Middleware {
        Middleware {
            middleware_type: middleware_type,
            enabled: enabled,
            items: vec![],
        }
    }

    pub fn with_item(mut self, name: &str, enabled: bool, queues: &[&str]) -> Middleware {
        self.items.push(MiddlewareItem {
            name: name.to_string(),
            enabled: enabled,
            queues: queues.iter().map(|q| q.to_string()).collect(),
        });
        self
    }

    pub fn item(&self, name: &str) -> Option<&MiddlewareItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload() {
        let payload = r#"[{"type": "pbs", "enabled": true,
                           "items": [{"name": "pbs.example.org", "enabled": true, "queues": ["short"]}]},
                          {"type": "local", "enabled": false}]"#;
        let middlewares: Vec<Middleware> = serde_json::from_str(payload).unwrap();

        assert_eq!(middlewares.len(), 2);
        assert_eq!(middlewares[0].middleware_type, ResourceType::Pbs);
        assert_eq!(middlewares[0].item("pbs.example.org").unwrap().queues, vec!["short".to_string()]);
        assert!(!middlewares[1].enabled);
        assert!(middlewares[1].items.is_empty());
    }
}
