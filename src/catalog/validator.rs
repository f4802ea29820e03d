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

use std::collections::HashSet;
use crate::error::{CatalogError, Result};
use crate::model::{Application, Resource};

pub fn validate_resource(resource: &Resource) -> Result<()> {
    if resource.name.trim().is_empty() {
        return Err(CatalogError::validation("resource name must not be empty"));
    }
    if resource.name.chars().any(char::is_whitespace) {
        return Err(CatalogError::validation(format!("resource name '{}' contains whitespace", resource.name)));
    }

    let mut seen = HashSet::new();
    for queue in &resource.queues {
        if queue.trim().is_empty() {
            return Err(CatalogError::validation(format!("{} lists an empty queue name", resource.name)));
        }
        if !seen.insert(queue.as_str()) {
            return Err(CatalogError::validation(format!("{} lists queue '{}' twice", resource.name, queue)));
        }
    }

    if resource.resource_type.requires_queue() && resource.queues.is_empty() {
        return Err(CatalogError::validation(format!("{} resource {} needs at least one queue",
                                                    resource.resource_type,
                                                    resource.name)));
    }

    Ok(())
}

pub fn validate_application(application: &Application, resource: &Resource) -> Result<()> {
    if application.name.trim().is_empty() {
        return Err(CatalogError::validation("application name must not be empty"));
    }
    if application.version.trim().is_empty() {
        return Err(CatalogError::validation(format!("application {} has no version", application.name)));
    }
    if application.path.trim().is_empty() {
        return Err(CatalogError::validation(format!("application {} has no executable path", application.name)));
    }
    if application.resource != resource.name {
        return Err(CatalogError::validation(format!("application {} belongs to {}, not {}",
                                                    application.name,
                                                    application.resource,
                                                    resource.name)));
    }

    match application.queue {
        Some(ref queue) if !resource.has_queue(queue) => {
            Err(CatalogError::validation(format!("queue '{}' is not offered by {}", queue, resource.name)))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceType;

    #[test]
    fn resource_rules() {
        assert!(validate_resource(&Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["short"])).is_ok());
        assert!(validate_resource(&Resource::new("workstation", ResourceType::Local)).is_ok());

        assert!(validate_resource(&Resource::new("", ResourceType::Local)).is_err());
        assert!(validate_resource(&Resource::new("my cluster", ResourceType::Local)).is_err());
        assert!(validate_resource(&Resource::new("pbs.example.org", ResourceType::Pbs)).is_err());
        assert!(validate_resource(&Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["a", "a"]))
            .is_err());
        assert!(validate_resource(&Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&[" "])).is_err());
    }

    #[test]
    fn application_rules() {
        let resource = Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["short"]);
        let mut application = Application::new("blast", "2.2", "pbs.example.org", "/opt/blast");
        assert!(validate_application(&application, &resource).is_ok());

        application.queue = Some("short".to_string());
        assert!(validate_application(&application, &resource).is_ok());

        application.queue = Some("long".to_string());
        assert!(validate_application(&application, &resource).is_err());

        let unversioned = Application::new("blast", "", "pbs.example.org", "/opt/blast");
        assert!(validate_application(&unversioned, &resource).is_err());

        let pathless = Application::new("blast", "2.2", "pbs.example.org", "");
        assert!(validate_application(&pathless, &resource).is_err());

        let elsewhere = Application::new("blast", "2.2", "lsf.example.org", "/opt/blast");
        assert!(validate_application(&elsewhere, &resource).is_err());
    }
}
