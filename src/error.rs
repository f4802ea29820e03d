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

use std::io;
use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] yaml_rust::ScanError),

    #[error("yaml emit error: {0}")]
    YamlEmit(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("middleware service error: {0}")]
    Middleware(String),

    #[error("invalid resource type: {0}")]
    InvalidResourceType(String),

    #[error("no job property handler for resource type {0}")]
    UnsupportedResourceType(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("application not found: {0}")]
    ApplicationNotFound(String),

    #[error("resource already exists: {0}")]
    DuplicateResource(String),

    #[error("application already exists: {0}")]
    DuplicateApplication(String),

    #[error("resource {resource} still hosts {applications} application(s)")]
    ResourceInUse { resource: String, applications: usize },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("user '{user}' lacks permission {permission}")]
    PermissionDenied { user: String, permission: String },

    #[error("http server error: {0}")]
    Server(String),

    #[error("catalog state channel closed")]
    ChannelClosed,
}

impl CatalogError {
    pub fn validation<S: Into<String>>(msg: S) -> CatalogError {
        CatalogError::Validation(msg.into())
    }
}
