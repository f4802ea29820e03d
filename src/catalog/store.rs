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

use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use yaml_rust::{Yaml, YamlEmitter, YamlLoader};
use yaml_rust::yaml::Hash;
use crate::error::{CatalogError, Result};
use crate::model::{Application, Resource};
use crate::utils::{read_application, read_list, read_resource};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CatalogSnapshot {
    pub resources: Vec<Resource>,
    pub applications: Vec<Application>,
}

/// YAML file holding the catalog between runs. Without a path the catalog lives in memory only.
pub struct CatalogStore {
    path: Option<PathBuf>,
}

impl CatalogStore {
    pub fn new(path: Option<PathBuf>) -> CatalogStore {
        CatalogStore { path: path }
    }

    pub fn in_memory() -> CatalogStore {
        CatalogStore { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref().map(|p| p.as_path())
    }

    /// `None` when there is no store file yet.
    pub fn load(&self) -> Result<Option<CatalogSnapshot>> {
        let path = match self.path {
            Some(ref path) if path.exists() => path,
            _ => return Ok(None),
        };

        let content = fs::read_to_string(path)?;
        let docs = YamlLoader::load_from_str(&content)?;
        let doc = match docs.into_iter().next() {
            Some(doc) => doc,
            None => return Ok(Some(CatalogSnapshot::default())),
        };

        Ok(Some(CatalogSnapshot {
            resources: read_list(&doc, "resources", read_resource)?,
            applications: read_list(&doc, "applications", read_application)?,
        }))
    }

    pub fn save(&self, snapshot: &CatalogSnapshot) -> Result<()> {
        let path = match self.path {
            Some(ref path) => path,
            None => return Ok(()),
        };

        let mut doc = Hash::new();
        doc.insert(key("resources"),
                   Yaml::Array(snapshot.resources.iter().map(resource_to_yaml).collect()));
        doc.insert(key("applications"),
                   Yaml::Array(snapshot.applications.iter().map(application_to_yaml).collect()));

        let mut content = String::new();
        {
            let mut emitter = YamlEmitter::new(&mut content);
            emitter.dump(&Yaml::Hash(doc)).map_err(|err| CatalogError::YamlEmit(format!("{:?}", err)))?;
        }
        content.push('\n');

        // write aside and rename so a crash never leaves a truncated store
        let temporary = path.with_extension("tmp");
        fs::write(&temporary, content)?;
        fs::rename(&temporary, path)?;
        debug!("stored {} resources and {} applications in {}",
               snapshot.resources.len(),
               snapshot.applications.len(),
               path.display());
        Ok(())
    }
}

fn key(name: &str) -> Yaml {
    Yaml::String(name.to_string())
}

fn string(value: &str) -> Yaml {
    Yaml::String(value.to_string())
}

fn resource_to_yaml(resource: &Resource) -> Yaml {
    let mut hash = Hash::new();
    hash.insert(key("name"), string(&resource.name));
    hash.insert(key("type"), string(resource.resource_type.as_str()));
    hash.insert(key("url"), string(&resource.url));
    hash.insert(key("description"), string(&resource.description));
    hash.insert(key("queues"),
                Yaml::Array(resource.queues.iter().map(|q| string(q)).collect()));
    hash.insert(key("last_update"), Yaml::Integer(resource.last_update));
    Yaml::Hash(hash)
}

fn application_to_yaml(application: &Application) -> Yaml {
    let mut hash = Hash::new();
    hash.insert(key("id"), string(&application.id));
    hash.insert(key("name"), string(&application.name));
    hash.insert(key("version"), string(&application.version));
    hash.insert(key("description"), string(&application.description));
    hash.insert(key("path"), string(&application.path));
    hash.insert(key("arguments"), string(&application.arguments));
    hash.insert(key("resource"), string(&application.resource));
    if let Some(ref queue) = application.queue {
        hash.insert(key("queue"), string(queue));
    }
    hash.insert(key("last_update"), Yaml::Integer(application.last_update));
    Yaml::Hash(hash)
}
