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

use crate::model::{Application, Resource, ResourceCategory, ResourceType};
use crate::search::ApplicationSearch;
use super::Criterion;

pub struct ResourceTypeIs(pub ResourceType);

impl Criterion<Resource> for ResourceTypeIs {
    fn matches(&self, resource: &Resource) -> bool {
        resource.resource_type == self.0
    }
}

pub struct ResourceCategoryIs(pub ResourceCategory);

impl Criterion<Resource> for ResourceCategoryIs {
    fn matches(&self, resource: &Resource) -> bool {
        resource.resource_type.category() == self.0
    }
}

pub struct ResourceNameContains(String);

impl ResourceNameContains {
    pub fn new(fragment: &str) -> ResourceNameContains {
        ResourceNameContains(fragment.to_lowercase())
    }
}

impl Criterion<Resource> for ResourceNameContains {
    fn matches(&self, resource: &Resource) -> bool {
        resource.name.to_lowercase().contains(&self.0)
    }
}

pub struct HasQueue(pub String);

impl Criterion<Resource> for HasQueue {
    fn matches(&self, resource: &Resource) -> bool {
        resource.has_queue(&self.0)
    }
}

pub struct OnResource(pub String);

impl Criterion<Application> for OnResource {
    fn matches(&self, application: &Application) -> bool {
        application.resource == self.0
    }
}

pub struct ApplicationNameIs(pub String);

impl Criterion<Application> for ApplicationNameIs {
    fn matches(&self, application: &Application) -> bool {
        application.name.eq_ignore_ascii_case(&self.0)
    }
}

pub struct VersionIs(pub String);

impl Criterion<Application> for VersionIs {
    fn matches(&self, application: &Application) -> bool {
        application.version == self.0
    }
}

pub struct SimilarTo {
    query: String,
    search: ApplicationSearch,
}

impl SimilarTo {
    pub fn new(query: &str, threshold: f64) -> SimilarTo {
        SimilarTo {
            query: query.to_string(),
            search: ApplicationSearch::new(threshold),
        }
    }
}

impl Criterion<Application> for SimilarTo {
    fn matches(&self, application: &Application) -> bool {
        self.search.matches(application, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AllOf, filter};

    fn resources() -> Vec<Resource> {
        vec![Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["short", "long"]),
             Resource::new("sge.Example.org", ResourceType::Sge).with_queues(&["all.q"]),
             Resource::new("unicore.grid.eu", ResourceType::Unicore),
             Resource::new("workstation", ResourceType::Local)]
    }

    fn names(resources: Vec<Resource>) -> Vec<String> {
        resources.into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn resource_criteria() {
        let resources = resources();

        assert_eq!(names(filter(&resources, &ResourceTypeIs(ResourceType::Sge))), vec!["sge.Example.org"]);
        assert_eq!(names(filter(&resources, &ResourceCategoryIs(ResourceCategory::Cluster))).len(), 2);
        assert_eq!(names(filter(&resources, &ResourceNameContains::new("EXAMPLE"))).len(), 2);
        assert_eq!(names(filter(&resources, &HasQueue("long".to_string()))), vec!["pbs.example.org"]);

        let not_cluster = ResourceCategoryIs(ResourceCategory::Cluster).not();
        assert_eq!(names(filter(&resources, &not_cluster)), vec!["unicore.grid.eu", "workstation"]);
    }

    #[test]
    fn application_criteria() {
        let applications = vec![Application::new("BLAST", "2.2", "pbs.example.org", "/opt/blast"),
                                Application::new("blast", "2.6", "pbs.example.org", "/opt/blast26"),
                                Application::new("blast", "2.6", "workstation", "/usr/bin/blast"),
                                Application::new("gromacs", "4.6", "workstation", "/usr/bin/mdrun")];

        let mut criteria: AllOf<Application> = AllOf::new();
        criteria.push(OnResource("pbs.example.org".to_string()));
        criteria.push(ApplicationNameIs("blast".to_string()));
        assert_eq!(filter(&applications, &criteria).len(), 2);

        criteria.push(VersionIs("2.6".to_string()));
        assert_eq!(filter(&applications, &criteria)[0].path, "/opt/blast26");

        let similar = filter(&applications, &SimilarTo::new("gromac", 0.9));
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].name, "gromacs");
    }
}
