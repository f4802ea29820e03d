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

use std::io::Read;
use std::time::Duration;
use hyper::Client;
use hyper::header::{Accept, qitem};
use hyper::mime::{Mime, SubLevel, TopLevel};
use hyper::status::StatusCode;
use crate::error::{CatalogError, Result};
use crate::model::Middleware;

/// Where the middleware topology comes from.
pub trait MiddlewareSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<Middleware>>;

    fn describe(&self) -> String;
}

/// Queries the grid-configuration service, which answers with a JSON array of middleware records.
pub struct HttpMiddlewareSource {
    url: String,
    timeout: Duration,
}

impl HttpMiddlewareSource {
    pub fn new(url: &str, timeout: Duration) -> HttpMiddlewareSource {
        HttpMiddlewareSource {
            url: url.to_string(),
            timeout: timeout,
        }
    }
}

impl MiddlewareSource for HttpMiddlewareSource {
    fn fetch(&self) -> Result<Vec<Middleware>> {
        let mut client = Client::new();
        client.set_read_timeout(Some(self.timeout));
        client.set_write_timeout(Some(self.timeout));

        let json = Mime(TopLevel::Application, SubLevel::Json, Vec::new());
        let mut response = client.get(&self.url)
            .header(Accept(vec![qitem(json)]))
            .send()
            .map_err(|err| CatalogError::Middleware(format!("request to {} failed: {}", self.url, err)))?;

        if response.status != StatusCode::Ok {
            return Err(CatalogError::Middleware(format!("{} answered {}", self.url, response.status)));
        }

        let mut body = String::new();
        response.read_to_string(&mut body)?;
        parse_middlewares(&body)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}

pub fn parse_middlewares(body: &str) -> Result<Vec<Middleware>> {
    serde_json::from_str(body).map_err(|err| CatalogError::Middleware(format!("invalid middleware payload: {}", err)))
}

/// Fixed topology taken from the configuration file.
pub struct StaticMiddlewareSource {
    middlewares: Vec<Middleware>,
}

impl StaticMiddlewareSource {
    pub fn new(middlewares: Vec<Middleware>) -> StaticMiddlewareSource {
        StaticMiddlewareSource { middlewares: middlewares }
    }
}

impl MiddlewareSource for StaticMiddlewareSource {
    fn fetch(&self) -> Result<Vec<Middleware>> {
        Ok(self.middlewares.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} entries)", self.middlewares.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceType;

    #[test]
    fn rejects_malformed_payload() {
        match parse_middlewares("{\"type\": \"pbs\"}") {
            Err(CatalogError::Middleware(msg)) => assert!(msg.contains("invalid middleware payload")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_middlewares("[{\"type\": \"condor\"}]").is_err());
    }

    #[test]
    fn payload_type_names_ignore_case() {
        let middlewares = parse_middlewares(r#"[{"type":"PBS","enabled":true,
                                                 "items":[{"name":"pbs.example.org","enabled":true}]},
                                                {"type":"Unicore","enabled":false}]"#)
            .unwrap();

        assert_eq!(middlewares[0].middleware_type, ResourceType::Pbs);
        assert_eq!(middlewares[0].items[0].name, "pbs.example.org");
        assert_eq!(middlewares[1].middleware_type, ResourceType::Unicore);
    }

    #[test]
    fn static_source_returns_configured_entries() {
        let source = StaticMiddlewareSource::new(vec![Middleware::new(ResourceType::Lsf, true)]);

        assert_eq!(source.fetch().unwrap()[0].middleware_type, ResourceType::Lsf);
        assert_eq!(source.describe(), "static (1 entries)");
    }

    #[test]
    fn unreachable_service_is_a_middleware_error() {
        let source = HttpMiddlewareSource::new("http://127.0.0.1:1/middlewares", Duration::from_millis(200));

        match source.fetch() {
            Err(CatalogError::Middleware(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
