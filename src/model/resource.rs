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

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::CatalogError;

#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ResourceType {
    Pbs,
    Lsf,
    Sge,
    Moab,
    Unicore,
    Local,
}

#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Cluster,
    Local,
    Unicore,
}

pub const ALL_RESOURCE_TYPES: [ResourceType; 6] = [ResourceType::Pbs,
                                                   ResourceType::Lsf,
                                                   ResourceType::Sge,
                                                   ResourceType::Moab,
                                                   ResourceType::Unicore,
                                                   ResourceType::Local];

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ResourceType::Pbs => "pbs",
            ResourceType::Lsf => "lsf",
            ResourceType::Sge => "sge",
            ResourceType::Moab => "moab",
            ResourceType::Unicore => "unicore",
            ResourceType::Local => "local",
        }
    }

    pub fn category(&self) -> ResourceCategory {
        match *self {
            ResourceType::Pbs | ResourceType::Lsf | ResourceType::Sge | ResourceType::Moab => ResourceCategory::Cluster,
            ResourceType::Unicore => ResourceCategory::Unicore,
            ResourceType::Local => ResourceCategory::Local,
        }
    }

    /// Cluster resources submit through a batch queue and must declare at least one.
    pub fn requires_queue(&self) -> bool {
        self.category() == ResourceCategory::Cluster
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<ResourceType, CatalogError> {
        let lowered = value.trim().to_lowercase();
        ALL_RESOURCE_TYPES.iter()
            .find(|t| t.as_str() == lowered)
            .cloned()
            .ok_or_else(|| CatalogError::InvalidResourceType(value.to_string()))
    }
}

impl TryFrom<String> for ResourceType {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<ResourceType, CatalogError> {
        value.parse()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub queues: Vec<String>,
    #[serde(default)]
    pub last_update: i64,
}

impl Resource {
    pub fn new(name: &str, resource_type: ResourceType) -> Resource {
        Resource {
            name: name.to_string(),
            resource_type: resource_type,
            url: "".to_string(),
            description: "".to_string(),
            queues: vec![],
            last_update: 0,
        }
    }

    pub fn with_queues(mut self, queues: &[&str]) -> Resource {
        self.queues = queues.iter().map(|q| q.to_string()).collect();
        self
    }

    pub fn has_queue(&self, queue: &str) -> bool {
        self.queues.iter().any(|q| q == queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resource_type_case_insensitively() {
        assert_eq!("PBS".parse::<ResourceType>().unwrap(), ResourceType::Pbs);
        assert_eq!(" unicore ".parse::<ResourceType>().unwrap(), ResourceType::Unicore);
        assert!("condor".parse::<ResourceType>().is_err());
    }

    #[test]
    fn categories() {
        assert_eq!(ResourceType::Moab.category(), ResourceCategory::Cluster);
        assert_eq!(ResourceType::Local.category(), ResourceCategory::Local);
        assert!(ResourceType::Lsf.requires_queue());
        assert!(!ResourceType::Unicore.requires_queue());
    }

    #[test]
    fn resource_type_json_is_lowercase() {
        let json = serde_json::to_string(&ResourceType::Sge).unwrap();
        assert_eq!(json, "\"sge\"");
    }

    #[test]
    fn resource_body_accepts_any_type_case() {
        let resource: Resource = serde_json::from_str(r#"{"name":"pbs.example.org","type":"PBS","queues":["short"]}"#)
            .unwrap();
        assert_eq!(resource.resource_type, ResourceType::Pbs);
        assert_eq!(serde_json::from_str::<ResourceType>("\" Local\"").unwrap(), ResourceType::Local);

        let unknown = serde_json::from_str::<Resource>(r#"{"name":"x","type":"condor"}"#);
        assert!(unknown.unwrap_err().to_string().contains("condor"));
    }
}
