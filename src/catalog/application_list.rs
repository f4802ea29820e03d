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

use std::collections::HashMap;
use crate::filter::{Criterion, OnResource};
use crate::model::Application;

#[derive(Clone, Default)]
pub struct ApplicationList {
    application_list: HashMap<String, Application>,
}

impl ApplicationList {
    pub fn new() -> ApplicationList {
        ApplicationList { application_list: HashMap::new() }
    }

    pub fn put_application(&mut self, application: Application) {
        debug!("put application {} ({})", application.name, application.id);
        self.application_list.insert(application.id.clone(), application);
    }

    pub fn remove_application(&mut self, application_id: &str) -> Option<Application> {
        self.application_list.remove(application_id)
    }

    pub fn get_application(&self, application_id: &str) -> Option<&Application> {
        self.application_list.get(application_id)
    }

    /// Another application with the same name, version and resource.
    pub fn find_same_identity(&self, application: &Application) -> Option<&Application> {
        self.application_list
            .values()
            .find(|existing| existing.id != application.id && existing.same_identity(application))
    }

    pub fn get_applications(&self) -> Vec<Application> {
        let mut result: Vec<Application> = self.application_list.values().cloned().collect();
        sort_applications(&mut result);
        result
    }

    pub fn get_applications_on_resource(&self, resource_name: &str) -> Vec<Application> {
        let on_resource = OnResource(resource_name.to_string());
        let mut result: Vec<Application> = self.application_list
            .values()
            .filter(|application| on_resource.matches(application))
            .cloned()
            .collect();
        sort_applications(&mut result);
        result
    }

    pub fn count_on_resource(&self, resource_name: &str) -> usize {
        self.application_list.values().filter(|application| application.resource == resource_name).count()
    }

    pub fn len(&self) -> usize {
        self.application_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.application_list.is_empty()
    }
}

fn sort_applications(applications: &mut Vec<Application>) {
    applications.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.version.cmp(&b.version))
            .then_with(|| a.resource.cmp(&b.resource))
    });
}
