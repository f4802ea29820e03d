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

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use chrono::Utc;
use uuid::Uuid;
use crate::error::{CatalogError, Result};
use crate::jobprops::{JobProperties, JobTarget, job_properties};
use crate::middleware::resolve_queue;
use crate::model::{Application, Middleware, Resource};
use crate::utils::Config;
use super::application_list::ApplicationList;
use super::resource_list::ResourceList;
use super::store::{CatalogSnapshot, CatalogStore};
use super::validator::{validate_application, validate_resource};

/// Handle to the catalog. Every clone talks to the same serving thread,
/// which owns the catalog and applies requests one at a time.
#[derive(Clone)]
pub struct CatalogManager {
    sender: Sender<CatalogRequestMsg>,
    my_name: String,
}

impl CatalogManager {
    pub fn new(config: &Config) -> Result<CatalogManager> {
        let store = CatalogStore::new(config.store_file.as_ref().map(PathBuf::from));
        let mut state = State::new(store);
        state.load(&config.seed_resources, &config.seed_applications)?;
        CatalogManager::start(&config.name, state)
    }

    pub fn in_memory(name: &str) -> Result<CatalogManager> {
        CatalogManager::start(name, State::new(CatalogStore::in_memory()))
    }

    fn start(name: &str, state: State) -> Result<CatalogManager> {
        let (tx, rx) = channel();
        let catalog_manager = CatalogManager {
            sender: tx,
            my_name: name.to_string(),
        };
        catalog_manager.start_serving(state, rx)?;
        Ok(catalog_manager)
    }

    pub fn get_my_name(&self) -> String {
        self.my_name.clone()
    }

    pub fn send_ping(&self) -> Result<()> {
        match self.call(|sender| CatalogRequestMsg::Ping { sender: sender })? {
            CatalogResponseMsg::Pong => Ok(()),
            _ => Err(CatalogError::ChannelClosed),
        }
    }

    pub fn send_add_resource(&self, resource: Resource) -> Result<Resource> {
        self.expect_resource(self.call(|sender| {
            CatalogRequestMsg::AddResource {
                sender: sender,
                resource: resource,
            }
        })?)
    }

    pub fn send_update_resource(&self, resource: Resource) -> Result<Resource> {
        self.expect_resource(self.call(|sender| {
            CatalogRequestMsg::UpdateResource {
                sender: sender,
                resource: resource,
            }
        })?)
    }

    pub fn send_remove_resource(&self, resource_name: &str) -> Result<Resource> {
        self.expect_resource(self.call(|sender| {
            CatalogRequestMsg::RemoveResource {
                sender: sender,
                resource_name: resource_name.to_string(),
            }
        })?)
    }

    pub fn request_resource(&self, resource_name: &str) -> Result<Resource> {
        self.expect_resource(self.call(|sender| {
            CatalogRequestMsg::GetResource {
                sender: sender,
                resource_name: resource_name.to_string(),
            }
        })?)
    }

    pub fn request_list_resources(&self) -> Result<Vec<Resource>> {
        match self.call(|sender| CatalogRequestMsg::GetResources { sender: sender })? {
            CatalogResponseMsg::Resources { resources } => Ok(resources),
            _ => Err(CatalogError::ChannelClosed),
        }
    }

    pub fn send_add_application(&self, application: Application) -> Result<Application> {
        self.expect_application(self.call(|sender| {
            CatalogRequestMsg::AddApplication {
                sender: sender,
                application: application,
            }
        })?)
    }

    pub fn send_update_application(&self, application: Application) -> Result<Application> {
        self.expect_application(self.call(|sender| {
            CatalogRequestMsg::UpdateApplication {
                sender: sender,
                application: application,
            }
        })?)
    }

    pub fn send_remove_application(&self, application_id: &str) -> Result<Application> {
        self.expect_application(self.call(|sender| {
            CatalogRequestMsg::RemoveApplication {
                sender: sender,
                application_id: application_id.to_string(),
            }
        })?)
    }

    pub fn request_application(&self, application_id: &str) -> Result<Application> {
        self.expect_application(self.call(|sender| {
            CatalogRequestMsg::GetApplication {
                sender: sender,
                application_id: application_id.to_string(),
            }
        })?)
    }

    pub fn request_list_applications(&self) -> Result<Vec<Application>> {
        self.expect_applications(self.call(|sender| CatalogRequestMsg::GetApplications { sender: sender })?)
    }

    pub fn request_applications_on_resource(&self, resource_name: &str) -> Result<Vec<Application>> {
        self.expect_applications(self.call(|sender| {
            CatalogRequestMsg::GetApplicationsOnResource {
                sender: sender,
                resource_name: resource_name.to_string(),
            }
        })?)
    }

    pub fn request_snapshot(&self) -> Result<CatalogSnapshot> {
        match self.call(|sender| CatalogRequestMsg::GetSnapshot { sender: sender })? {
            CatalogResponseMsg::Snapshot { snapshot } => Ok(snapshot),
            _ => Err(CatalogError::ChannelClosed),
        }
    }

    /// With `middlewares` the queue is resolved against the queues they enable,
    /// on the same resource the properties are built from.
    pub fn request_job_properties(&self,
                                  resource_name: &str,
                                  application_id: &str,
                                  queue: Option<String>,
                                  middlewares: Option<Vec<Middleware>>)
                                  -> Result<JobProperties> {
        let response = self.call(|sender| {
            CatalogRequestMsg::GetJobProperties {
                sender: sender,
                resource_name: resource_name.to_string(),
                application_id: application_id.to_string(),
                queue: queue,
                middlewares: middlewares,
            }
        })?;
        match response {
            CatalogResponseMsg::JobProperties { properties } => properties,
            _ => Err(CatalogError::ChannelClosed),
        }
    }

    fn call<F>(&self, build: F) -> Result<CatalogResponseMsg>
        where F: FnOnce(Sender<CatalogResponseMsg>) -> CatalogRequestMsg
    {
        let (sender, receiver) = channel();
        self.sender.send(build(sender)).map_err(|_| CatalogError::ChannelClosed)?;
        receiver.recv().map_err(|_| CatalogError::ChannelClosed)
    }

    fn expect_resource(&self, response: CatalogResponseMsg) -> Result<Resource> {
        match response {
            CatalogResponseMsg::Resource { resource } => resource,
            _ => Err(CatalogError::ChannelClosed),
        }
    }

    fn expect_application(&self, response: CatalogResponseMsg) -> Result<Application> {
        match response {
            CatalogResponseMsg::Application { application } => application,
            _ => Err(CatalogError::ChannelClosed),
        }
    }

    fn expect_applications(&self, response: CatalogResponseMsg) -> Result<Vec<Application>> {
        match response {
            CatalogResponseMsg::Applications { applications } => applications,
            _ => Err(CatalogError::ChannelClosed),
        }
    }
}

struct State {
    store: CatalogStore,
    resource_list: ResourceList,
    application_list: ApplicationList,
}

enum CatalogRequestMsg {
    Ping {
        sender: Sender<CatalogResponseMsg>,
    },
    AddResource {
        sender: Sender<CatalogResponseMsg>,
        resource: Resource,
    },
    UpdateResource {
        sender: Sender<CatalogResponseMsg>,
        resource: Resource,
    },
    RemoveResource {
        sender: Sender<CatalogResponseMsg>,
        resource_name: String,
    },
    GetResource {
        sender: Sender<CatalogResponseMsg>,
        resource_name: String,
    },
    GetResources {
        sender: Sender<CatalogResponseMsg>,
    },
    AddApplication {
        sender: Sender<CatalogResponseMsg>,
        application: Application,
    },
    UpdateApplication {
        sender: Sender<CatalogResponseMsg>,
        application: Application,
    },
    RemoveApplication {
        sender: Sender<CatalogResponseMsg>,
        application_id: String,
    },
    GetApplication {
        sender: Sender<CatalogResponseMsg>,
        application_id: String,
    },
    GetApplications {
        sender: Sender<CatalogResponseMsg>,
    },
    GetApplicationsOnResource {
        sender: Sender<CatalogResponseMsg>,
        resource_name: String,
    },
    GetSnapshot {
        sender: Sender<CatalogResponseMsg>,
    },
    GetJobProperties {
        sender: Sender<CatalogResponseMsg>,
        resource_name: String,
        application_id: String,
        queue: Option<String>,
        middlewares: Option<Vec<Middleware>>,
    },
}

enum CatalogResponseMsg {
    Pong,
    Resource {
        resource: Result<Resource>,
    },
    Resources {
        resources: Vec<Resource>,
    },
    Application {
        application: Result<Application>,
    },
    Applications {
        applications: Result<Vec<Application>>,
    },
    Snapshot {
        snapshot: CatalogSnapshot,
    },
    JobProperties {
        properties: Result<JobProperties>,
    },
}

impl CatalogManager {
    fn start_serving(&self, mut state: State, rx: Receiver<CatalogRequestMsg>) -> Result<()> {
        thread::Builder::new()
            .name("catalog-serve".to_string())
            .spawn(move || {
                // runs until every CatalogManager handle is dropped
                for msg in rx.iter() {
                    let (sender, response) = state.handle(msg);
                    if sender.send(response).is_err() {
                        debug!("requester left before the catalog answered");
                    }
                }
                debug!("catalog serving thread stopped");
            })?;
        Ok(())
    }
}

impl State {
    fn new(store: CatalogStore) -> State {
        State {
            store: store,
            resource_list: ResourceList::new(),
            application_list: ApplicationList::new(),
        }
    }

    /// Restores the stored catalog, or seeds an empty one from the configuration.
    fn load(&mut self, seed_resources: &[Resource], seed_applications: &[Application]) -> Result<()> {
        if let Some(snapshot) = self.store.load()? {
            if !snapshot.resources.is_empty() || !snapshot.applications.is_empty() {
                for resource in snapshot.resources {
                    self.resource_list.put_resource(resource);
                }
                for mut application in snapshot.applications {
                    if application.id.is_empty() {
                        application.id = new_id();
                    }
                    self.application_list.put_application(application);
                }
                info!("loaded {} resources and {} applications from store",
                      self.resource_list.len(),
                      self.application_list.len());
                return Ok(());
            }
        }

        for resource in seed_resources {
            self.add_resource(resource.clone())?;
        }
        for application in seed_applications {
            self.add_application(application.clone())?;
        }
        info!("seeded catalog with {} resources and {} applications",
              self.resource_list.len(),
              self.application_list.len());
        Ok(())
    }

    fn handle(&mut self, msg: CatalogRequestMsg) -> (Sender<CatalogResponseMsg>, CatalogResponseMsg) {
        match msg {
            CatalogRequestMsg::Ping { sender } => {
                debug!("got ping");
                (sender, CatalogResponseMsg::Pong)
            }
            CatalogRequestMsg::AddResource { sender, resource } => {
                (sender, CatalogResponseMsg::Resource { resource: self.add_resource(resource) })
            }
            CatalogRequestMsg::UpdateResource { sender, resource } => {
                (sender, CatalogResponseMsg::Resource { resource: self.update_resource(resource) })
            }
            CatalogRequestMsg::RemoveResource { sender, resource_name } => {
                (sender, CatalogResponseMsg::Resource { resource: self.remove_resource(&resource_name) })
            }
            CatalogRequestMsg::GetResource { sender, resource_name } => {
                (sender, CatalogResponseMsg::Resource { resource: self.get_resource(&resource_name).map(|r| r.clone()) })
            }
            CatalogRequestMsg::GetResources { sender } => {
                (sender, CatalogResponseMsg::Resources { resources: self.resource_list.get_resources() })
            }
            CatalogRequestMsg::AddApplication { sender, application } => {
                (sender, CatalogResponseMsg::Application { application: self.add_application(application) })
            }
            CatalogRequestMsg::UpdateApplication { sender, application } => {
                (sender, CatalogResponseMsg::Application { application: self.update_application(application) })
            }
            CatalogRequestMsg::RemoveApplication { sender, application_id } => {
                (sender, CatalogResponseMsg::Application { application: self.remove_application(&application_id) })
            }
            CatalogRequestMsg::GetApplication { sender, application_id } => {
                let application = self.get_application(&application_id).map(|a| a.clone());
                (sender, CatalogResponseMsg::Application { application: application })
            }
            CatalogRequestMsg::GetApplications { sender } => {
                (sender, CatalogResponseMsg::Applications { applications: Ok(self.application_list.get_applications()) })
            }
            CatalogRequestMsg::GetApplicationsOnResource { sender, resource_name } => {
                let applications = self.get_resource(&resource_name)
                    .map(|_| self.application_list.get_applications_on_resource(&resource_name));
                (sender, CatalogResponseMsg::Applications { applications: applications })
            }
            CatalogRequestMsg::GetSnapshot { sender } => (sender, CatalogResponseMsg::Snapshot { snapshot: self.snapshot() }),
            CatalogRequestMsg::GetJobProperties { sender, resource_name, application_id, queue, middlewares } => {
                let properties = self.job_properties(&resource_name, &application_id, queue, middlewares);
                (sender, CatalogResponseMsg::JobProperties { properties: properties })
            }
        }
    }

    fn get_resource(&self, resource_name: &str) -> Result<&Resource> {
        self.resource_list
            .get_resource(resource_name)
            .ok_or_else(|| CatalogError::ResourceNotFound(resource_name.to_string()))
    }

    fn get_application(&self, application_id: &str) -> Result<&Application> {
        self.application_list
            .get_application(application_id)
            .ok_or_else(|| CatalogError::ApplicationNotFound(application_id.to_string()))
    }

    fn add_resource(&mut self, mut resource: Resource) -> Result<Resource> {
        validate_resource(&resource)?;
        if self.resource_list.contains(&resource.name) {
            return Err(CatalogError::DuplicateResource(resource.name));
        }

        info!("add resource {} ({})", resource.name, resource.resource_type);
        resource.last_update = Utc::now().timestamp();
        let previous = self.resource_list.clone();
        self.resource_list.put_resource(resource.clone());
        self.persist_or_restore(Some(previous), None)?;
        Ok(resource)
    }

    fn update_resource(&mut self, mut resource: Resource) -> Result<Resource> {
        self.get_resource(&resource.name)?;
        validate_resource(&resource)?;

        for application in self.application_list.get_applications_on_resource(&resource.name) {
            match application.queue {
                Some(ref queue) if !resource.has_queue(queue) => {
                    return Err(CatalogError::validation(format!("queue '{}' is still used by application {}",
                                                                queue,
                                                                application.name)));
                }
                _ => {}
            }
        }

        info!("update resource {}", resource.name);
        resource.last_update = Utc::now().timestamp();
        let previous = self.resource_list.clone();
        self.resource_list.put_resource(resource.clone());
        self.persist_or_restore(Some(previous), None)?;
        Ok(resource)
    }

    fn remove_resource(&mut self, resource_name: &str) -> Result<Resource> {
        self.get_resource(resource_name)?;
        let applications = self.application_list.count_on_resource(resource_name);
        if applications > 0 {
            return Err(CatalogError::ResourceInUse {
                resource: resource_name.to_string(),
                applications: applications,
            });
        }

        info!("remove resource {}", resource_name);
        let previous = self.resource_list.clone();
        let removed = self.resource_list.remove_resource(resource_name);
        self.persist_or_restore(Some(previous), None)?;
        removed.ok_or_else(|| CatalogError::ResourceNotFound(resource_name.to_string()))
    }

    fn add_application(&mut self, mut application: Application) -> Result<Application> {
        validate_application(&application, self.get_resource(&application.resource)?)?;
        application.id = new_id();
        if let Some(existing) = self.application_list.find_same_identity(&application) {
            return Err(CatalogError::DuplicateApplication(format!("{} {} on {}",
                                                                  existing.name,
                                                                  existing.version,
                                                                  existing.resource)));
        }

        info!("add application {} {} on {}",
              application.name,
              application.version,
              application.resource);
        application.last_update = Utc::now().timestamp();
        let previous = self.application_list.clone();
        self.application_list.put_application(application.clone());
        self.persist_or_restore(None, Some(previous))?;
        Ok(application)
    }

    fn update_application(&mut self, mut application: Application) -> Result<Application> {
        self.get_application(&application.id)?;
        validate_application(&application, self.get_resource(&application.resource)?)?;
        if let Some(existing) = self.application_list.find_same_identity(&application) {
            return Err(CatalogError::DuplicateApplication(format!("{} {} on {}",
                                                                  existing.name,
                                                                  existing.version,
                                                                  existing.resource)));
        }

        info!("update application {}", application.id);
        application.last_update = Utc::now().timestamp();
        let previous = self.application_list.clone();
        self.application_list.put_application(application.clone());
        self.persist_or_restore(None, Some(previous))?;
        Ok(application)
    }

    fn remove_application(&mut self, application_id: &str) -> Result<Application> {
        self.get_application(application_id)?;

        info!("remove application {}", application_id);
        let previous = self.application_list.clone();
        let removed = self.application_list.remove_application(application_id);
        self.persist_or_restore(None, Some(previous))?;
        removed.ok_or_else(|| CatalogError::ApplicationNotFound(application_id.to_string()))
    }

    fn job_properties(&self,
                      resource_name: &str,
                      application_id: &str,
                      queue: Option<String>,
                      middlewares: Option<Vec<Middleware>>)
                      -> Result<JobProperties> {
        let resource = self.get_resource(resource_name)?;
        let application = self.get_application(application_id)?;
        let queue = match middlewares {
            Some(middlewares) => {
                resolve_queue(&middlewares, resource, queue.or_else(|| application.queue.clone()))?
            }
            None => queue,
        };

        let target = JobTarget {
            resource: resource,
            application: application,
            queue: queue,
        };
        job_properties(&target)
    }

    fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            resources: self.resource_list.get_resources(),
            applications: self.application_list.get_applications(),
        }
    }

    /// A catalog change only counts once it is stored; otherwise the lists roll back.
    fn persist_or_restore(&mut self,
                          resources: Option<ResourceList>,
                          applications: Option<ApplicationList>)
                          -> Result<()> {
        match self.store.save(&self.snapshot()) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("storing catalog failed, change reverted: {}", err);
                if let Some(resources) = resources {
                    self.resource_list = resources;
                }
                if let Some(applications) = applications {
                    self.application_list = applications;
                }
                Err(err)
            }
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobprops::KEY_RESOURCE;
    use crate::model::ResourceType;

    fn pbs() -> Resource {
        Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["short", "long"])
    }

    fn blast() -> Application {
        Application::new("blast", "2.2", "pbs.example.org", "/opt/blast/bin/blastall")
    }

    #[test]
    fn resource_lifecycle() {
        let catalog = CatalogManager::in_memory("test").unwrap();
        catalog.send_ping().unwrap();

        let added = catalog.send_add_resource(pbs()).unwrap();
        assert!(added.last_update > 0);
        assert_eq!(catalog.request_resource("pbs.example.org").unwrap().queues.len(), 2);

        match catalog.send_add_resource(pbs()) {
            Err(CatalogError::DuplicateResource(name)) => assert_eq!(name, "pbs.example.org"),
            other => panic!("unexpected {:?}", other),
        }

        let mut changed = pbs();
        changed.description = "campus cluster".to_string();
        catalog.send_update_resource(changed).unwrap();
        assert_eq!(catalog.request_resource("pbs.example.org").unwrap().description, "campus cluster");

        catalog.send_remove_resource("pbs.example.org").unwrap();
        assert!(catalog.request_list_resources().unwrap().is_empty());
        match catalog.request_resource("pbs.example.org") {
            Err(CatalogError::ResourceNotFound(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn application_lifecycle() {
        let catalog = CatalogManager::in_memory("test").unwrap();
        catalog.send_add_resource(pbs()).unwrap();

        let added = catalog.send_add_application(blast()).unwrap();
        assert_eq!(added.id.len(), 32);
        assert_eq!(catalog.request_application(&added.id).unwrap(), added);

        assert!(catalog.send_add_application(blast()).is_err());

        let mut newer = added.clone();
        newer.version = "2.6".to_string();
        catalog.send_update_application(newer).unwrap();
        assert_eq!(catalog.request_list_applications().unwrap()[0].version, "2.6");

        assert_eq!(catalog.request_applications_on_resource("pbs.example.org").unwrap().len(), 1);
        assert!(catalog.request_applications_on_resource("nowhere").is_err());

        catalog.send_remove_application(&added.id).unwrap();
        assert!(catalog.request_list_applications().unwrap().is_empty());
    }

    #[test]
    fn application_needs_existing_resource() {
        let catalog = CatalogManager::in_memory("test").unwrap();

        match catalog.send_add_application(blast()) {
            Err(CatalogError::ResourceNotFound(name)) => assert_eq!(name, "pbs.example.org"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn resource_with_applications_cannot_be_removed() {
        let catalog = CatalogManager::in_memory("test").unwrap();
        catalog.send_add_resource(pbs()).unwrap();
        let mut application = blast();
        application.queue = Some("long".to_string());
        catalog.send_add_application(application).unwrap();

        match catalog.send_remove_resource("pbs.example.org") {
            Err(CatalogError::ResourceInUse { applications, .. }) => assert_eq!(applications, 1),
            other => panic!("unexpected {:?}", other),
        }

        let shrunk = Resource::new("pbs.example.org", ResourceType::Pbs).with_queues(&["short"]);
        assert!(catalog.send_update_resource(shrunk).is_err());
    }

    #[test]
    fn job_properties_through_catalog() {
        let catalog = CatalogManager::in_memory("test").unwrap();
        catalog.send_add_resource(pbs()).unwrap();
        let application = catalog.send_add_application(blast()).unwrap();

        let properties = catalog.request_job_properties("pbs.example.org", &application.id, Some("long".to_string()), None)
            .unwrap();
        assert_eq!(properties.get(KEY_RESOURCE), Some("long"));

        assert!(catalog.request_job_properties("pbs.example.org", "missing", None, None).is_err());
    }

    #[test]
    fn default_queue_comes_from_middleware() {
        let catalog = CatalogManager::in_memory("test").unwrap();
        catalog.send_add_resource(pbs()).unwrap();
        let application = catalog.send_add_application(blast()).unwrap();
        let middlewares = vec![Middleware::new(ResourceType::Pbs, true).with_item("pbs.example.org", true, &["long"])];

        let properties = catalog.request_job_properties("pbs.example.org", &application.id, None, Some(middlewares.clone()))
            .unwrap();
        assert_eq!(properties.get(KEY_RESOURCE), Some("long"));

        let short = catalog.request_job_properties("pbs.example.org",
                                                   &application.id,
                                                   Some("short".to_string()),
                                                   Some(middlewares));
        assert!(short.is_err());
    }

    #[test]
    fn seeds_then_restores_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let store_file = dir.path().join("catalog.yml");
        let mut config = Config::from_str("").unwrap();
        config.store_file = Some(store_file.to_string_lossy().to_string());
        config.seed_resources = vec![pbs()];
        config.seed_applications = vec![blast()];

        let catalog = CatalogManager::new(&config).unwrap();
        let seeded = catalog.request_snapshot().unwrap();
        assert_eq!(seeded.resources.len(), 1);
        assert_eq!(seeded.applications.len(), 1);
        catalog.send_add_resource(Resource::new("workstation", ResourceType::Local)).unwrap();
        drop(catalog);

        // seeds are ignored once a store exists
        config.seed_resources = vec![];
        let restored = CatalogManager::new(&config).unwrap().request_snapshot().unwrap();
        assert_eq!(restored.resources.len(), 2);
        assert_eq!(restored.applications[0].id, seeded.applications[0].id);
    }

    #[test]
    fn failed_store_reverts_change() {
        let dir = tempfile::tempdir().unwrap();
        // a directory in place of the store file makes the rename fail
        let store_file = dir.path().join("catalog.yml");
        std::fs::create_dir(&store_file).unwrap();
        std::fs::write(store_file.join("keep"), "x").unwrap();

        let mut state = State::new(CatalogStore::new(Some(store_file)));
        assert!(state.add_resource(pbs()).is_err());
        assert!(state.resource_list.is_empty());
    }
}
