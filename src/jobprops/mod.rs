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

//! Maps a job's target resource and application onto the property set a
//! workflow engine submits with. Each handler covers one resource category;
//! the first handler in the chain that accepts the category answers.

use std::collections::BTreeMap;
use serde::Serialize;
use crate::error::{CatalogError, Result};
use crate::model::{Application, Resource, ResourceCategory};

pub use self::handlers::{ClusterHandler, LocalHandler, UnicoreHandler};

mod handlers;

pub const KEY_GRID_TYPE: &str = "gridtype";
pub const KEY_GRID: &str = "grid";
pub const KEY_RESOURCE: &str = "resource";
pub const KEY_BINARY: &str = "binary";
pub const KEY_PARAMS: &str = "params";
pub const KEY_JOB_IS_TYPE: &str = "jobistype";

pub struct JobTarget<'a> {
    pub resource: &'a Resource,
    pub application: &'a Application,
    pub queue: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JobProperties(BTreeMap<String, String>);

impl JobProperties {
    fn common(target: &JobTarget) -> JobProperties {
        let mut properties = JobProperties::default();
        properties.insert(KEY_GRID_TYPE, target.resource.resource_type.as_str());
        properties.insert(KEY_GRID, &target.resource.name);
        properties.insert(KEY_JOB_IS_TYPE, "binary");
        properties
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

pub trait JobPropertyHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn accepts(&self, category: ResourceCategory) -> bool;

    fn properties(&self, target: &JobTarget) -> Result<JobProperties>;
}

pub struct JobPropertyChain {
    handlers: Vec<Box<dyn JobPropertyHandler>>,
}

impl JobPropertyChain {
    pub fn new() -> JobPropertyChain {
        JobPropertyChain { handlers: vec![] }
    }

    pub fn with_handler(mut self, handler: Box<dyn JobPropertyHandler>) -> JobPropertyChain {
        self.handlers.push(handler);
        self
    }

    pub fn standard() -> JobPropertyChain {
        JobPropertyChain::new()
            .with_handler(Box::new(ClusterHandler))
            .with_handler(Box::new(LocalHandler))
            .with_handler(Box::new(UnicoreHandler))
    }

    pub fn properties(&self, target: &JobTarget) -> Result<JobProperties> {
        if target.application.resource != target.resource.name {
            return Err(CatalogError::validation(format!("application {} is not installed on {}",
                                                        target.application.name,
                                                        target.resource.name)));
        }

        let category = target.resource.resource_type.category();
        match self.handlers.iter().find(|handler| handler.accepts(category)) {
            Some(handler) => {
                debug!("{} handler maps {} on {}",
                       handler.name(),
                       target.application.name,
                       target.resource.name);
                handler.properties(target)
            }
            None => Err(CatalogError::UnsupportedResourceType(target.resource.resource_type.to_string())),
        }
    }
}

lazy_static! {
    static ref STANDARD_CHAIN: JobPropertyChain = JobPropertyChain::standard();
}

pub fn job_properties(target: &JobTarget) -> Result<JobProperties> {
    STANDARD_CHAIN.properties(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceType;

    fn blast_on(resource: &Resource) -> Application {
        let mut application = Application::new("blast", "2.2", &resource.name, "/opt/blast/bin/blastall");
        application.arguments = "-p blastn".to_string();
        application
    }

    #[test]
    fn cluster_uses_first_queue_by_default() {
        let resource = Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["short", "long"]);
        let application = blast_on(&resource);
        let target = JobTarget { resource: &resource, application: &application, queue: None };

        let properties = job_properties(&target).unwrap();
        assert_eq!(properties.get(KEY_GRID_TYPE), Some("pbs"));
        assert_eq!(properties.get(KEY_GRID), Some("pbs.example.org"));
        assert_eq!(properties.get(KEY_RESOURCE), Some("short"));
        assert_eq!(properties.get(KEY_BINARY), Some("/opt/blast/bin/blastall"));
        assert_eq!(properties.get(KEY_PARAMS), Some("-p blastn"));
        assert_eq!(properties.get(KEY_JOB_IS_TYPE), Some("binary"));
    }

    #[test]
    fn cluster_queue_precedence() {
        let resource = Resource::new("sge.example.org", ResourceType::Sge).with_queues(&["short", "long"]);
        let mut application = blast_on(&resource);
        application.queue = Some("long".to_string());

        let target = JobTarget { resource: &resource, application: &application, queue: None };
        assert_eq!(job_properties(&target).unwrap().get(KEY_RESOURCE), Some("long"));

        let target = JobTarget { resource: &resource, application: &application, queue: Some("short".to_string()) };
        assert_eq!(job_properties(&target).unwrap().get(KEY_RESOURCE), Some("short"));

        let target = JobTarget { resource: &resource, application: &application, queue: Some("gpu".to_string()) };
        assert!(job_properties(&target).is_err());
    }

    #[test]
    fn cluster_without_queue_fails() {
        let resource = Resource::new("lsf.example.org", ResourceType::Lsf);
        let application = blast_on(&resource);
        let target = JobTarget { resource: &resource, application: &application, queue: None };

        match job_properties(&target) {
            Err(CatalogError::Validation(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn local_ignores_queues() {
        let resource = Resource::new("workstation", ResourceType::Local);
        let application = blast_on(&resource);
        let target = JobTarget { resource: &resource, application: &application, queue: Some("any".to_string()) };

        let properties = job_properties(&target).unwrap();
        assert_eq!(properties.get(KEY_GRID_TYPE), Some("local"));
        assert_eq!(properties.get(KEY_RESOURCE), None);
        assert_eq!(properties.get(KEY_BINARY), Some("/opt/blast/bin/blastall"));
    }

    #[test]
    fn unicore_uses_application_label() {
        let resource = Resource::new("unicore.example.org", ResourceType::Unicore);
        let application = blast_on(&resource);
        let target = JobTarget { resource: &resource, application: &application, queue: None };

        let properties = job_properties(&target).unwrap();
        assert_eq!(properties.get(KEY_GRID_TYPE), Some("unicore"));
        assert_eq!(properties.get(KEY_RESOURCE), Some("blast 2.2"));
        assert_eq!(properties.get(KEY_BINARY), None);
    }

    #[test]
    fn chain_without_matching_handler() {
        let chain = JobPropertyChain::new().with_handler(Box::new(LocalHandler));
        let resource = Resource::new("moab.example.org", ResourceType::Moab).with_queues(&["batch"]);
        let application = blast_on(&resource);
        let target = JobTarget { resource: &resource, application: &application, queue: None };

        match chain.properties(&target) {
            Err(CatalogError::UnsupportedResourceType(t)) => assert_eq!(t, "moab"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn application_must_live_on_resource() {
        let resource = Resource::new("workstation", ResourceType::Local);
        let other = Resource::new("elsewhere", ResourceType::Local);
        let application = blast_on(&other);
        let target = JobTarget { resource: &resource, application: &application, queue: None };

        assert!(job_properties(&target).is_err());
    }

    #[test]
    fn serializes_as_flat_object() {
        let resource = Resource::new("workstation", ResourceType::Local);
        let application = blast_on(&resource);
        let target = JobTarget { resource: &resource, application: &application, queue: None };

        let json = serde_json::to_value(job_properties(&target).unwrap()).unwrap();
        assert_eq!(json["gridtype"], "local");
    }
}
