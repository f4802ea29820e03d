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

//! Role based permissions for catalog mutations.
//!
//! Roles map to permission sets in the configuration file. A resolver maps a
//! user to roles; users it does not know, and anonymous callers, fall back to
//! the default role.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use crate::error::{CatalogError, Result};
use crate::utils::PermissionConfig;

pub const ANONYMOUS: &str = "anonymous";

#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub enum Permission {
    ViewResources,
    AddResource,
    EditResource,
    RemoveResource,
    AddApplication,
    EditApplication,
    RemoveApplication,
    RefreshMiddleware,
}

const ALL_PERMISSIONS: [Permission; 8] = [Permission::ViewResources,
                                          Permission::AddResource,
                                          Permission::EditResource,
                                          Permission::RemoveResource,
                                          Permission::AddApplication,
                                          Permission::EditApplication,
                                          Permission::RemoveApplication,
                                          Permission::RefreshMiddleware];

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Permission::ViewResources => "resource.view",
            Permission::AddResource => "resource.add",
            Permission::EditResource => "resource.edit",
            Permission::RemoveResource => "resource.remove",
            Permission::AddApplication => "application.add",
            Permission::EditApplication => "application.edit",
            Permission::RemoveApplication => "application.remove",
            Permission::RefreshMiddleware => "middleware.refresh",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Permission> {
        ALL_PERMISSIONS.iter()
            .find(|p| p.as_str() == value.trim())
            .cloned()
            .ok_or_else(|| CatalogError::Config(format!("unknown permission '{}'", value)))
    }
}

pub trait UserRoleResolver: Send + Sync {
    /// Roles assigned to the user, empty when the user is unknown.
    fn roles(&self, user: &str) -> Vec<String>;
}

pub struct ConfiguredUsers {
    users: HashMap<String, Vec<String>>,
}

impl ConfiguredUsers {
    pub fn new(users: HashMap<String, Vec<String>>) -> ConfiguredUsers {
        ConfiguredUsers { users: users }
    }
}

impl UserRoleResolver for ConfiguredUsers {
    fn roles(&self, user: &str) -> Vec<String> {
        self.users.get(user).cloned().unwrap_or_default()
    }
}

pub struct PermissionManager {
    default_role: String,
    roles: HashMap<String, HashSet<Permission>>,
    resolver: Box<dyn UserRoleResolver>,
}

impl PermissionManager {
    pub fn from_config(config: &PermissionConfig) -> Result<PermissionManager> {
        let resolver = Box::new(ConfiguredUsers::new(config.users.clone()));
        PermissionManager::with_resolver(config, resolver)
    }

    pub fn with_resolver(config: &PermissionConfig, resolver: Box<dyn UserRoleResolver>) -> Result<PermissionManager> {
        let mut roles = HashMap::new();
        for (role, names) in &config.roles {
            let permissions = names.iter()
                .map(|name| name.parse::<Permission>())
                .collect::<Result<HashSet<Permission>>>()?;
            roles.insert(role.clone(), permissions);
        }

        for (user, user_roles) in &config.users {
            for role in user_roles {
                if !roles.contains_key(role) {
                    warn!("user {} references undefined role {}", user, role);
                }
            }
        }

        Ok(PermissionManager {
            default_role: config.default_role.clone(),
            roles: roles,
            resolver: resolver,
        })
    }

    pub fn roles_of(&self, user: Option<&str>) -> Vec<String> {
        let roles = match user {
            Some(user) if !user.is_empty() => self.resolver.roles(user),
            _ => vec![],
        };
        match roles.is_empty() {
            true => vec![self.default_role.clone()],
            false => roles,
        }
    }

    pub fn is_permitted(&self, user: Option<&str>, permission: Permission) -> bool {
        self.roles_of(user)
            .iter()
            .filter_map(|role| self.roles.get(role))
            .any(|permissions| permissions.contains(&permission))
    }

    pub fn check(&self, user: Option<&str>, permission: Permission) -> Result<()> {
        match self.is_permitted(user, permission) {
            true => Ok(()),
            false => {
                let user = user.unwrap_or(ANONYMOUS).to_string();
                info!("denied {} to {}", permission, user);
                Err(CatalogError::PermissionDenied {
                    user: user,
                    permission: permission.to_string(),
                })
            }
        }
    }
}
