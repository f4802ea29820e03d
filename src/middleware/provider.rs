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

use std::sync::Arc;
use std::time::Duration;
use crate::error::Result;
use crate::model::Middleware;
use crate::utils::Config;
use super::cache::{Clock, TtlCache};
use super::source::{HttpMiddlewareSource, MiddlewareSource, StaticMiddlewareSource};

pub struct CachedMiddlewareProvider {
    source: Box<dyn MiddlewareSource>,
    cache: TtlCache<Vec<Middleware>>,
}

impl CachedMiddlewareProvider {
    pub fn new(source: Box<dyn MiddlewareSource>, ttl: Duration) -> CachedMiddlewareProvider {
        CachedMiddlewareProvider {
            source: source,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn with_clock(source: Box<dyn MiddlewareSource>, ttl: Duration, clock: Arc<dyn Clock>) -> CachedMiddlewareProvider {
        CachedMiddlewareProvider {
            source: source,
            cache: TtlCache::with_clock(ttl, clock),
        }
    }

    pub fn from_config(config: &Config) -> CachedMiddlewareProvider {
        let source: Box<dyn MiddlewareSource> = match config.middleware_url {
            Some(ref url) => Box::new(HttpMiddlewareSource::new(url, config.request_timeout)),
            None => Box::new(StaticMiddlewareSource::new(config.middlewares.clone())),
        };
        info!("middleware source: {}, cache ttl {:?}", source.describe(), config.cache_ttl);
        CachedMiddlewareProvider::new(source, config.cache_ttl)
    }

    pub fn middlewares(&self) -> Result<Vec<Middleware>> {
        let source = &self.source;
        self.cache.get_or_fetch(|| {
            debug!("fetching middlewares from {}", source.describe());
            match source.fetch() {
                Ok(middlewares) => {
                    info!("fetched {} middleware entries", middlewares.len());
                    Ok(middlewares)
                }
                Err(err) => {
                    warn!("middleware fetch from {} failed: {}", source.describe(), err);
                    Err(err)
                }
            }
        })
    }

    pub fn enabled_middlewares(&self) -> Result<Vec<Middleware>> {
        Ok(self.middlewares()?.into_iter().filter(|m| m.enabled).collect())
    }

    pub fn refresh(&self) -> Result<Vec<Middleware>> {
        self.cache.invalidate();
        self.middlewares()
    }

    pub fn stale(&self) -> Option<Vec<Middleware>> {
        self.cache.stale()
    }
}
