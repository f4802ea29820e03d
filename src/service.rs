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

//! Catalog operations as the API exposes them: permission checks, middleware
//! availability and search layered over the catalog manager.

use crate::catalog::{CatalogManager, CatalogSnapshot};
use crate::error::{CatalogError, Result};
use crate::filter::{AllOf, ResourceNameContains, ResourceTypeIs, filter};
use crate::jobprops::JobProperties;
use crate::middleware::{self, CachedMiddlewareProvider};
use crate::model::{Application, Middleware, Resource, ResourceType};
use crate::permission::{Permission, PermissionManager};
use crate::search::{ApplicationSearch, SearchHit};
use crate::utils::Config;

pub struct CatalogService {
    catalog: CatalogManager,
    middleware: CachedMiddlewareProvider,
    permissions: PermissionManager,
    search: ApplicationSearch,
}

impl CatalogService {
    pub fn new(catalog: CatalogManager,
               middleware: CachedMiddlewareProvider,
               permissions: PermissionManager,
               search: ApplicationSearch)
               -> CatalogService {
        CatalogService {
            catalog: catalog,
            middleware: middleware,
            permissions: permissions,
            search: search,
        }
    }

    pub fn from_config(config: &Config) -> Result<CatalogService> {
        Ok(CatalogService::new(CatalogManager::new(config)?,
                               CachedMiddlewareProvider::from_config(config),
                               PermissionManager::from_config(&config.permissions)?,
                               ApplicationSearch::new(config.search_threshold)))
    }

    pub fn catalog(&self) -> &CatalogManager {
        &self.catalog
    }

    pub fn list_resources(&self, resource_type: Option<&str>, name: Option<&str>) -> Result<Vec<Resource>> {
        let mut criteria: AllOf<Resource> = AllOf::new();
        if let Some(resource_type) = resource_type {
            criteria.push(ResourceTypeIs(resource_type.parse::<ResourceType>()?));
        }
        if let Some(name) = name {
            criteria.push(ResourceNameContains::new(name));
        }
        Ok(filter(&self.catalog.request_list_resources()?, &criteria))
    }

    /// Resources the current middleware topology enables, with their queues narrowed to the enabled ones.
    pub fn available_resources(&self) -> Result<Vec<Resource>> {
        let middlewares = self.middleware.middlewares()?;
        let resources = self.catalog.request_list_resources()?;
        Ok(middleware::available_resources(&middlewares, &resources)
            .into_iter()
            .map(|mut resource| {
                resource.queues = middleware::enabled_queues(&middlewares, &resource);
                resource
            })
            .collect())
    }

    pub fn get_resource(&self, name: &str) -> Result<Resource> {
        self.catalog.request_resource(name)
    }

    pub fn add_resource(&self, user: Option<&str>, resource: Resource) -> Result<Resource> {
        self.permissions.check(user, Permission::AddResource)?;
        self.catalog.send_add_resource(resource)
    }

    pub fn update_resource(&self, user: Option<&str>, name: &str, mut resource: Resource) -> Result<Resource> {
        self.permissions.check(user, Permission::EditResource)?;
        if resource.name.is_empty() {
            resource.name = name.to_string();
        }
        if resource.name != name {
            return Err(CatalogError::validation("resources cannot be renamed"));
        }
        self.catalog.send_update_resource(resource)
    }

    pub fn remove_resource(&self, user: Option<&str>, name: &str) -> Result<Resource> {
        self.permissions.check(user, Permission::RemoveResource)?;
        self.catalog.send_remove_resource(name)
    }

    pub fn applications_on_resource(&self, name: &str) -> Result<Vec<Application>> {
        self.catalog.request_applications_on_resource(name)
    }

    pub fn list_applications(&self) -> Result<Vec<Application>> {
        self.catalog.request_list_applications()
    }

    pub fn search_applications(&self, query: &str) -> Result<Vec<SearchHit>> {
        Ok(self.search.search(&self.catalog.request_list_applications()?, query))
    }

    pub fn get_application(&self, id: &str) -> Result<Application> {
        self.catalog.request_application(id)
    }

    pub fn add_application(&self, user: Option<&str>, application: Application) -> Result<Application> {
        self.permissions.check(user, Permission::AddApplication)?;
        self.catalog.send_add_application(application)
    }

    pub fn update_application(&self, user: Option<&str>, id: &str, mut application: Application) -> Result<Application> {
        self.permissions.check(user, Permission::EditApplication)?;
        application.id = id.to_string();
        self.catalog.send_update_application(application)
    }

    pub fn remove_application(&self, user: Option<&str>, id: &str) -> Result<Application> {
        self.permissions.check(user, Permission::RemoveApplication)?;
        self.catalog.send_remove_application(id)
    }

    pub fn middlewares(&self) -> Result<Vec<Middleware>> {
        self.middleware.middlewares()
    }

    pub fn refresh_middlewares(&self, user: Option<&str>) -> Result<Vec<Middleware>> {
        self.permissions.check(user, Permission::RefreshMiddleware)?;
        self.middleware.refresh()
    }

    /// Job properties for an application, provided its resource is enabled by
    /// the middleware. Cluster jobs only run in queues the middleware enables.
    pub fn job_properties(&self, resource_name: &str, application_id: &str, queue: Option<String>) -> Result<JobProperties> {
        let middlewares = self.middleware.middlewares()?;
        self.catalog.request_job_properties(resource_name, application_id, queue, Some(middlewares))
    }

    pub fn export(&self, user: Option<&str>) -> Result<CatalogSnapshot> {
        self.permissions.check(user, Permission::ViewResources)?;
        self.catalog.request_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobprops::{KEY_GRID, KEY_RESOURCE};

    const CONFIG: &str = r#"
catalog:
  resources:
    - name: pbs.example.org
      type: pbs
      queues: [short, long]
    - name: lsf.example.org
      type: lsf
      queues: [normal]
    - name: workstation
      type: local
  applications:
    - name: blast
      version: "2.2"
      resource: pbs.example.org
      path: /opt/blast/bin/blastall
    - name: gromacs
      version: "4.6"
      resource: lsf.example.org
      path: /usr/bin/mdrun
middleware:
  middlewares:
    - type: pbs
      enabled: true
      items:
        - name: pbs.example.org
          enabled: true
          queues: [short]
    - type: lsf
      enabled: false
      items:
        - name: lsf.example.org
          enabled: true
    - type: local
      enabled: true
permissions:
  default_role: guest
  roles:
    guest: [resource.view]
    admin: [resource.view, resource.add, resource.edit, resource.remove,
            application.add, application.edit, application.remove, middleware.refresh]
  users:
    alice: [admin]
"#;

    fn service() -> CatalogService {
        CatalogService::from_config(&Config::from_str(CONFIG).unwrap()).unwrap()
    }

    fn names(resources: &[Resource]) -> Vec<&str> {
        resources.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn lists_with_filters() {
        let service = service();

        assert_eq!(service.list_resources(None, None).unwrap().len(), 3);
        assert_eq!(names(&service.list_resources(Some("LSF"), None).unwrap()), vec!["lsf.example.org"]);
        assert_eq!(names(&service.list_resources(None, Some("example")).unwrap()).len(), 2);
        assert!(service.list_resources(Some("condor"), None).is_err());
    }

    #[test]
    fn availability_follows_middleware() {
        let service = service();

        let available = service.available_resources().unwrap();
        assert_eq!(names(&available), vec!["pbs.example.org", "workstation"]);
        assert_eq!(available[0].queues, vec!["short"]);
    }

    #[test]
    fn mutations_need_permission() {
        let service = service();
        let resource = Resource::new("sge.example.org", ResourceType::Sge).with_queues(&["all.q"]);

        match service.add_resource(None, resource.clone()) {
            Err(CatalogError::PermissionDenied { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        service.add_resource(Some("alice"), resource).unwrap();

        let renamed = Resource::new("other", ResourceType::Sge).with_queues(&["all.q"]);
        assert!(service.update_resource(Some("alice"), "sge.example.org", renamed).is_err());

        assert!(service.refresh_middlewares(Some("bob")).is_err());
        assert_eq!(service.refresh_middlewares(Some("alice")).unwrap().len(), 3);
        assert_eq!(service.export(None).unwrap().resources.len(), 4);
    }

    #[test]
    fn application_update_keeps_path_id() {
        let service = service();
        let blast = service.applications_on_resource("pbs.example.org").unwrap().remove(0);

        let mut changed = blast.clone();
        changed.id = "ignored".to_string();
        changed.arguments = "-p blastp".to_string();
        let updated = service.update_application(Some("alice"), &blast.id, changed).unwrap();
        assert_eq!(updated.id, blast.id);
        assert_eq!(service.get_application(&blast.id).unwrap().arguments, "-p blastp");
    }

    #[test]
    fn search_over_catalog() {
        let service = service();

        let hits = service.search_applications("gromac").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].application.name, "gromacs");
        assert_eq!(service.list_applications().unwrap().len(), 2);
    }

    #[test]
    fn job_properties_respect_middleware() {
        let service = service();
        let blast = service.applications_on_resource("pbs.example.org").unwrap().remove(0);
        let gromacs = service.applications_on_resource("lsf.example.org").unwrap().remove(0);

        let properties = service.job_properties("pbs.example.org", &blast.id, None).unwrap();
        assert_eq!(properties.get(KEY_GRID), Some("pbs.example.org"));

        // "long" exists on the resource but the middleware only enables "short"
        assert!(service.job_properties("pbs.example.org", &blast.id, Some("long".to_string())).is_err());
        assert!(service.job_properties("lsf.example.org", &gromacs.id, None).is_err());
    }

    #[test]
    fn default_queue_skips_disabled_queues() {
        let service = service();
        let blast = service.applications_on_resource("pbs.example.org").unwrap().remove(0);

        // "long" now comes first on the resource, but only "short" is enabled
        let reordered = Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["long", "short"]);
        service.update_resource(Some("alice"), "pbs.example.org", reordered).unwrap();

        let properties = service.job_properties("pbs.example.org", &blast.id, None).unwrap();
        assert_eq!(properties.get(KEY_RESOURCE), Some("short"));
        assert_eq!(service.available_resources().unwrap()[0].queues, vec!["short"]);
    }
}
