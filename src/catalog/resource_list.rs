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
use crate::model::Resource;

#[derive(Clone, Default)]
pub struct ResourceList {
    resource_list: HashMap<String, Resource>,
}

impl ResourceList {
    pub fn new() -> ResourceList {
        ResourceList { resource_list: HashMap::new() }
    }

    pub fn contains(&self, resource_name: &str) -> bool {
        self.resource_list.contains_key(resource_name)
    }

    pub fn put_resource(&mut self, resource: Resource) {
        debug!("put resource {}", resource.name);
        self.resource_list.insert(resource.name.clone(), resource);
    }

    pub fn remove_resource(&mut self, resource_name: &str) -> Option<Resource> {
        self.resource_list.remove(resource_name)
    }

    pub fn get_resource(&self, resource_name: &str) -> Option<&Resource> {
        self.resource_list.get(resource_name)
    }

    /// All resources ordered by name.
    pub fn get_resources(&self) -> Vec<Resource> {
        let mut result: Vec<Resource> = self.resource_list.values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        result
    }

    pub fn len(&self) -> usize {
        self.resource_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_list.is_empty()
    }
}
