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
use crate::model::ResourceCategory;
use super::{JobProperties, JobPropertyHandler, JobTarget, KEY_BINARY, KEY_PARAMS, KEY_RESOURCE};

pub struct ClusterHandler;

impl JobPropertyHandler for ClusterHandler {
    fn name(&self) -> &'static str {
        "cluster"
    }

    fn accepts(&self, category: ResourceCategory) -> bool {
        category == ResourceCategory::Cluster
    }

    fn properties(&self, target: &JobTarget) -> Result<JobProperties> {
        let queue = select_queue(target)?;

        let mut properties = JobProperties::common(target);
        properties.insert(KEY_RESOURCE, &queue);
        properties.insert(KEY_BINARY, &target.application.path);
        properties.insert(KEY_PARAMS, &target.application.arguments);
        Ok(properties)
    }
}

fn select_queue(target: &JobTarget) -> Result<String> {
    let requested = target.queue
        .clone()
        .or_else(|| target.application.queue.clone());

    match requested {
        Some(queue) => {
            match target.resource.has_queue(&queue) {
                true => Ok(queue),
                false => {
                    Err(CatalogError::validation(format!("queue '{}' is not offered by {}", queue, target.resource.name)))
                }
            }
        }
        None => {
            target.resource
                .queues
                .first()
                .cloned()
                .ok_or_else(|| CatalogError::validation(format!("{} declares no queue", target.resource.name)))
        }
    }
}

pub struct LocalHandler;

impl JobPropertyHandler for LocalHandler {
    fn name(&self) -> &'static str {
        "local"
    }

    fn accepts(&self, category: ResourceCategory) -> bool {
        category == ResourceCategory::Local
    }

    fn properties(&self, target: &JobTarget) -> Result<JobProperties> {
        let mut properties = JobProperties::common(target);
        properties.insert(KEY_BINARY, &target.application.path);
        properties.insert(KEY_PARAMS, &target.application.arguments);
        Ok(properties)
    }
}

pub struct UnicoreHandler;

impl JobPropertyHandler for UnicoreHandler {
    fn name(&self) -> &'static str {
        "unicore"
    }

    fn accepts(&self, category: ResourceCategory) -> bool {
        category == ResourceCategory::Unicore
    }

    // UNICORE resolves the executable itself from the installed application label
    fn properties(&self, target: &JobTarget) -> Result<JobProperties> {
        let mut properties = JobProperties::common(target);
        properties.insert(KEY_RESOURCE, &target.application.unicore_label());
        properties.insert(KEY_PARAMS, &target.application.arguments);
        Ok(properties)
    }
}
