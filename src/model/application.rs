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

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub arguments: String,
    pub resource: String,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub last_update: i64,
}

impl Application {
    pub fn new(name: &str, version: &str, resource: &str, path: &str) -> Application {
        Application {
            id: "".to_string(),
            name: name.to_string(),
            version: version.to_string(),
            description: "".to_string(),
            path: path.to_string(),
            arguments: "".to_string(),
            resource: resource.to_string(),
            queue: None,
            last_update: 0,
        }
    }

    /// Label used by UNICORE to identify installed applications.
    pub fn unicore_label(&self) -> String {
        format!("{} {}", self.name, self.version)
    }

    pub fn same_identity(&self, other: &Application) -> bool {
        self.name == other.name && self.version == other.version && self.resource == other.resource
    }
}
