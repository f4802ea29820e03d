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
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use yaml_rust::yaml::Yaml;
use yaml_rust::YamlLoader;
use crate::error::{CatalogError, Result};
use crate::model::{Application, Middleware, MiddlewareItem, Resource, ResourceType};

pub const DEFAULT_NAME: &str = "grid-resource-catalog";
pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: i64 = 3005;
pub const DEFAULT_CACHE_TTL_IN_SECONDS: i64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_IN_SECONDS: i64 = 10;
pub const DEFAULT_SEARCH_THRESHOLD: f64 = 0.8;
pub const DEFAULT_ROLE: &str = "guest";

#[derive(Clone, Debug)]
pub struct Config {
    pub name: String,
    pub api_host: String,
    pub api_port: u16,
    pub store_file: Option<String>,
    pub seed_resources: Vec<Resource>,
    pub seed_applications: Vec<Application>,
    pub middleware_url: Option<String>,
    pub middlewares: Vec<Middleware>,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub search_threshold: f64,
    pub permissions: PermissionConfig,
}

#[derive(Clone, Debug, Default)]
pub struct PermissionConfig {
    pub default_role: String,
    pub roles: HashMap<String, Vec<String>>,
    pub users: HashMap<String, Vec<String>>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_file: P) -> Result<Config> {
        let mut file = File::open(config_file.as_ref())?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Config::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Config> {
        let docs = YamlLoader::load_from_str(content)?;
        match docs.into_iter().next() {
            Some(doc) => Config::from_yaml(&doc),
            None => Config::from_yaml(&Yaml::Null),
        }
    }

    pub fn from_yaml(config: &Yaml) -> Result<Config> {
        let port = read_int(&config["api"], "port", DEFAULT_API_PORT)?;
        if port < 1 || port > 65535 {
            return Err(CatalogError::Config(format!("api.port out of range: {}", port)));
        }

        let ttl = read_int(&config["middleware"], "cache_ttl_in_seconds", DEFAULT_CACHE_TTL_IN_SECONDS)?;
        let timeout = read_int(&config["middleware"],
                               "request_timeout_in_seconds",
                               DEFAULT_REQUEST_TIMEOUT_IN_SECONDS)?;
        if ttl < 0 || timeout < 0 {
            return Err(CatalogError::Config("middleware durations must not be negative".to_string()));
        }

        let threshold = read_float(&config["search"], "threshold", DEFAULT_SEARCH_THRESHOLD)?;
        if threshold < 0.0 || threshold > 1.0 {
            return Err(CatalogError::Config(format!("search.threshold must be within [0, 1], got {}", threshold)));
        }

        Ok(Config {
            name: non_empty(read_string(config, "name")?).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            api_host: non_empty(read_string(&config["api"], "host")?).unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            api_port: port as u16,
            store_file: non_empty(read_string(&config["catalog"], "store_file")?),
            seed_resources: read_list(&config["catalog"], "resources", read_resource)?,
            seed_applications: read_list(&config["catalog"], "applications", read_application)?,
            middleware_url: non_empty(read_string(&config["middleware"], "url")?),
            middlewares: read_list(&config["middleware"], "middlewares", read_middleware)?,
            cache_ttl: Duration::from_secs(ttl as u64),
            request_timeout: Duration::from_secs(timeout as u64),
            search_threshold: threshold,
            permissions: read_permissions(&config["permissions"])?,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    match value.is_empty() {
        true => None,
        false => Some(value),
    }
}

fn is_missing(element: &Yaml) -> bool {
    element.is_badvalue() || element.is_null()
}

fn wrong_type(key: &str, expected: &str) -> CatalogError {
    CatalogError::Config(format!("'{}' must be {}", key, expected))
}

pub fn read_string(element: &Yaml, key: &str) -> Result<String> {
    let value = &element[key];
    if is_missing(value) {
        return Ok("".to_string());
    }
    match *value {
        Yaml::String(ref s) => Ok(s.clone()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(ref r) => Ok(r.clone()),
        _ => Err(wrong_type(key, "a string")),
    }
}

pub fn read_required_string(element: &Yaml, key: &str) -> Result<String> {
    let value = read_string(element, key)?;
    match value.is_empty() {
        true => Err(CatalogError::Config(format!("missing required key '{}'", key))),
        false => Ok(value),
    }
}

pub fn read_bool(element: &Yaml, key: &str, default: bool) -> Result<bool> {
    let value = &element[key];
    if is_missing(value) {
        return Ok(default);
    }
    value.as_bool().ok_or_else(|| wrong_type(key, "a boolean"))
}

pub fn read_int(element: &Yaml, key: &str, default: i64) -> Result<i64> {
    let value = &element[key];
    if is_missing(value) {
        return Ok(default);
    }
    value.as_i64().ok_or_else(|| wrong_type(key, "an integer"))
}

pub fn read_float(element: &Yaml, key: &str, default: f64) -> Result<f64> {
    let value = &element[key];
    if is_missing(value) {
        return Ok(default);
    }
    match *value {
        Yaml::Integer(i) => Ok(i as f64),
        _ => value.as_f64().ok_or_else(|| wrong_type(key, "a number")),
    }
}

pub fn read_string_list(element: &Yaml, key: &str) -> Result<Vec<String>> {
    let value = &element[key];
    if is_missing(value) {
        return Ok(vec![]);
    }
    let items = value.as_vec().ok_or_else(|| wrong_type(key, "a list"))?;
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => result.push(s.to_string()),
            None => return Err(wrong_type(key, "a list of strings")),
        }
    }
    Ok(result)
}

pub fn read_list<T, F>(element: &Yaml, key: &str, read_item: F) -> Result<Vec<T>>
    where F: Fn(&Yaml) -> Result<T>
{
    let value = &element[key];
    if is_missing(value) {
        return Ok(vec![]);
    }
    let items = value.as_vec().ok_or_else(|| wrong_type(key, "a list"))?;
    items.iter().map(|item| read_item(item)).collect()
}

pub fn read_resource(element: &Yaml) -> Result<Resource> {
    Ok(Resource {
        name: read_required_string(element, "name")?,
        resource_type: read_required_string(element, "type")?.parse::<ResourceType>()?,
        url: read_string(element, "url")?,
        description: read_string(element, "description")?,
        queues: read_string_list(element, "queues")?,
        last_update: read_int(element, "last_update", 0)?,
    })
}

pub fn read_application(element: &Yaml) -> Result<Application> {
    Ok(Application {
        id: read_string(element, "id")?,
        name: read_required_string(element, "name")?,
        version: read_string(element, "version")?,
        description: read_string(element, "description")?,
        path: read_string(element, "path")?,
        arguments: read_string(element, "arguments")?,
        resource: read_required_string(element, "resource")?,
        queue: non_empty(read_string(element, "queue")?),
        last_update: read_int(element, "last_update", 0)?,
    })
}

pub fn read_middleware(element: &Yaml) -> Result<Middleware> {
    Ok(Middleware {
        middleware_type: read_required_string(element, "type")?.parse::<ResourceType>()?,
        enabled: read_bool(element, "enabled", false)?,
        items: read_list(element, "items", read_middleware_item)?,
    })
}

fn read_middleware_item(element: &Yaml) -> Result<MiddlewareItem> {
    Ok(MiddlewareItem {
        name: read_required_string(element, "name")?,
        enabled: read_bool(element, "enabled", false)?,
        queues: read_string_list(element, "queues")?,
    })
}

fn read_permissions(element: &Yaml) -> Result<PermissionConfig> {
    let mut permissions = PermissionConfig {
        default_role: non_empty(read_string(element, "default_role")?).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        roles: HashMap::new(),
        users: HashMap::new(),
    };

    for (section, target) in vec![("roles", &mut permissions.roles), ("users", &mut permissions.users)] {
        let value = &element[section];
        if is_missing(value) {
            continue;
        }
        let hash = value.as_hash().ok_or_else(|| wrong_type(section, "a mapping"))?;
        for (key, _) in hash {
            let name = key.as_str().ok_or_else(|| wrong_type(section, "keyed by name"))?;
            target.insert(name.to_string(), read_string_list(value, name)?);
        }
    }

    Ok(permissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
name: test-catalog
api:
  port: 4010
catalog:
  resources:
    - name: pbs.example.org
      type: PBS
      queues: [short, long]
  applications:
    - name: blast
      version: "2.2"
      resource: pbs.example.org
      path: /opt/blast/bin/blastall
      queue: short
middleware:
  cache_ttl_in_seconds: 60
  middlewares:
    - type: pbs
      enabled: true
      items:
        - name: pbs.example.org
          enabled: true
search:
  threshold: 0.75
permissions:
  default_role: viewer
  roles:
    admin: [resource.add, resource.remove]
    viewer: [resource.view]
  users:
    alice: [admin]
"#;

    #[test]
    fn reads_full_config() {
        let config = Config::from_str(CONFIG).unwrap();

        assert_eq!(config.name, "test-catalog");
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.api_port, 4010);
        assert_eq!(config.store_file, None);
        assert_eq!(config.seed_resources.len(), 1);
        assert_eq!(config.seed_resources[0].resource_type, ResourceType::Pbs);
        assert_eq!(config.seed_resources[0].queues, vec!["short", "long"]);
        assert_eq!(config.seed_applications[0].version, "2.2");
        assert_eq!(config.seed_applications[0].queue, Some("short".to_string()));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.middlewares[0].items[0].name, "pbs.example.org");
        assert_eq!(config.search_threshold, 0.75);
        assert_eq!(config.permissions.default_role, "viewer");
        assert_eq!(config.permissions.users["alice"], vec!["admin"]);
        assert_eq!(config.permissions.roles["admin"].len(), 2);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();

        assert_eq!(config.name, DEFAULT_NAME);
        assert_eq!(config.api_port, 3005);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert!(config.middleware_url.is_none());
        assert_eq!(config.permissions.default_role, DEFAULT_ROLE);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_str("api:\n  port: 70000\n").is_err());
        assert!(Config::from_str("search:\n  threshold: 1.5\n").is_err());
        assert!(Config::from_str("catalog:\n  resources:\n    - name: x\n      type: condor\n").is_err());
        assert!(Config::from_str("api:\n  port: abc\n").is_err());
    }

    #[test]
    fn reads_config_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), CONFIG).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.name, "test-catalog");
    }
}
