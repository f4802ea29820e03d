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

use crate::error::{CatalogError, Result};
use crate::model::{Middleware, MiddlewareItem, Resource, ResourceType};

/// Enabled items of every enabled middleware of the given type.
pub fn enabled_items<'a>(middlewares: &'a [Middleware], middleware_type: ResourceType) -> Vec<&'a MiddlewareItem> {
    middlewares.iter()
        .filter(|m| m.enabled && m.middleware_type == middleware_type)
        .flat_map(|m| m.items.iter())
        .filter(|item| item.enabled)
        .collect()
}

pub fn is_type_enabled(middlewares: &[Middleware], middleware_type: ResourceType) -> bool {
    middlewares.iter().any(|m| m.enabled && m.middleware_type == middleware_type)
}

/// Local execution needs no item per host, every other type needs an
/// enabled item named after the resource.
pub fn is_resource_enabled(middlewares: &[Middleware], resource: &Resource) -> bool {
    match resource.resource_type {
        ResourceType::Local => is_type_enabled(middlewares, ResourceType::Local),
        resource_type => enabled_items(middlewares, resource_type).iter().any(|item| item.name == resource.name),
    }
}

pub fn available_resources(middlewares: &[Middleware], resources: &[Resource]) -> Vec<Resource> {
    resources.iter()
        .filter(|resource| is_resource_enabled(middlewares, resource))
        .cloned()
        .collect()
}

/// Resource queues also offered by the middleware item. An item listing no
/// queues leaves the resource's own list unrestricted.
pub fn enabled_queues(middlewares: &[Middleware], resource: &Resource) -> Vec<String> {
    if !is_resource_enabled(middlewares, resource) {
        return vec![];
    }

    let items = enabled_items(middlewares, resource.resource_type);
    let item = items.iter().find(|item| item.name == resource.name);
    match item {
        Some(item) if !item.queues.is_empty() => {
            resource.queues.iter().filter(|q| item.queues.contains(q)).cloned().collect()
        }
        _ => resource.queues.clone(),
    }
}

/// Queue a job on `resource` runs in, given the queue it asked for.
///
/// The resource must be enabled by the middleware. Types without queues pass
/// the request through. For the others a requested queue must be enabled, and
/// without a request the first enabled queue is taken.
pub fn resolve_queue(middlewares: &[Middleware], resource: &Resource, requested: Option<String>) -> Result<Option<String>> {
    if !is_resource_enabled(middlewares, resource) {
        return Err(CatalogError::validation(format!("{} is not enabled by the middleware", resource.name)));
    }
    if !resource.resource_type.requires_queue() {
        return Ok(requested);
    }

    let enabled = enabled_queues(middlewares, resource);
    match requested {
        Some(queue) => {
            match enabled.contains(&queue) {
                true => Ok(Some(queue)),
                false => {
                    Err(CatalogError::validation(format!("queue '{}' is not enabled on {}", queue, resource.name)))
                }
            }
        }
        None => {
            enabled.into_iter()
                .next()
                .map(Some)
                .ok_or_else(|| CatalogError::validation(format!("no queue of {} is enabled", resource.name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology() -> Vec<Middleware> {
        vec![Middleware::new(ResourceType::Pbs, true)
                 .with_item("pbs.example.org", true, &["short"])
                 .with_item("pbs.old.example.org", false, &[]),
             Middleware::new(ResourceType::Lsf, false).with_item("lsf.example.org", true, &[]),
             Middleware::new(ResourceType::Local, true)]
    }

    #[test]
    fn only_enabled_items_of_enabled_middlewares() {
        let middlewares = topology();

        let pbs: Vec<&str> = enabled_items(&middlewares, ResourceType::Pbs).into_iter().map(|i| i.name.as_str()).collect();
        assert_eq!(pbs, vec!["pbs.example.org"]);
        assert!(enabled_items(&middlewares, ResourceType::Lsf).is_empty());
        assert!(enabled_items(&middlewares, ResourceType::Sge).is_empty());
    }

    #[test]
    fn resource_availability() {
        let middlewares = topology();
        let resources = vec![Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["short", "long"]),
                             Resource::new("pbs.old.example.org", ResourceType::Pbs),
                             Resource::new("lsf.example.org", ResourceType::Lsf),
                             Resource::new("workstation", ResourceType::Local)];

        let names: Vec<String> = available_resources(&middlewares, &resources).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["pbs.example.org", "workstation"]);
    }

    #[test]
    fn queues_are_intersected_with_middleware() {
        let middlewares = topology();
        let pbs = Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["short", "long"]);
        let lsf = Resource::new("lsf.example.org", ResourceType::Lsf).with_queues(&["normal"]);

        assert_eq!(enabled_queues(&middlewares, &pbs), vec!["short"]);
        assert!(enabled_queues(&middlewares, &lsf).is_empty());

        let open = vec![Middleware::new(ResourceType::Pbs, true).with_item("pbs.example.org", true, &[])];
        assert_eq!(enabled_queues(&open, &pbs), vec!["short", "long"]);
    }

    #[test]
    fn resolves_queue_within_enabled_set() {
        let middlewares = vec![Middleware::new(ResourceType::Pbs, true).with_item("pbs.example.org", true, &["long"]),
                               Middleware::new(ResourceType::Local, true)];
        let pbs = Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["short", "long"]);

        assert_eq!(resolve_queue(&middlewares, &pbs, None).unwrap(), Some("long".to_string()));
        assert_eq!(resolve_queue(&middlewares, &pbs, Some("long".to_string())).unwrap(),
                   Some("long".to_string()));
        assert!(resolve_queue(&middlewares, &pbs, Some("short".to_string())).is_err());

        let closed = vec![Middleware::new(ResourceType::Pbs, true).with_item("pbs.example.org", true, &["gpu"])];
        assert!(resolve_queue(&closed, &pbs, None).is_err());

        let workstation = Resource::new("workstation", ResourceType::Local);
        assert_eq!(resolve_queue(&middlewares, &workstation, Some("any".to_string())).unwrap(),
                   Some("any".to_string()));
        assert!(resolve_queue(&[], &workstation, None).is_err());
    }
}
