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

//! Time-to-live memoization of a single remotely fetched value.
//!
//! The check-and-refresh sequence runs under one mutex, so callers arriving
//! while a refresh is in flight block until it finishes and then read the
//! fresh value instead of issuing their own fetch. A failed fetch leaves the
//! timestamp untouched, which makes the next caller retry right away.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    start: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> ManualClock {
        ManualClock {
            start: Instant::now(),
            elapsed: Mutex::new(Duration::from_secs(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *elapsed += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let elapsed = self.elapsed.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.start + *elapsed
    }
}

struct Slot<T> {
    value: Option<T>,
    fetched_at: Option<Instant>,
}

pub struct TtlCache<T> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: Mutex<Slot<T>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> TtlCache<T> {
        TtlCache::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> TtlCache<T> {
        TtlCache {
            ttl: ttl,
            clock: clock,
            slot: Mutex::new(Slot {
                value: None,
                fetched_at: None,
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value while it is younger than the ttl, otherwise
    /// runs `fetch` and stores its result.
    pub fn get_or_fetch<F, E>(&self, fetch: F) -> Result<T, E>
        where F: FnOnce() -> Result<T, E>
    {
        let mut slot = self.lock();

        if let (Some(value), Some(fetched_at)) = (slot.value.as_ref(), slot.fetched_at) {
            if self.clock.now().saturating_duration_since(fetched_at) < self.ttl {
                return Ok(value.clone());
            }
        }

        let value = fetch()?;
        slot.value = Some(value.clone());
        slot.fetched_at = Some(self.clock.now());
        Ok(value)
    }

    /// Marks the current value as expired. The value stays readable through `stale`.
    pub fn invalidate(&self) {
        self.lock().fetched_at = None;
    }

    /// Last successfully fetched value, regardless of age.
    pub fn stale(&self) -> Option<T> {
        self.lock().value.clone()
    }

    pub fn age(&self) -> Option<Duration> {
        self.lock().fetched_at.map(|fetched_at| self.clock.now().saturating_duration_since(fetched_at))
    }

    fn lock(&self) -> MutexGuard<Slot<T>> {
        // a panicking fetch must not wedge every later caller
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
