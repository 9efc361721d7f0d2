// src/id.rs
use anyhow::{Result, anyhow};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::config::{IdsCfg, OverflowPolicy};
use crate::types::Response;

/// First identifier issued by a fresh builder.
pub const DEFAULT_START: u64 = 100_000;

/// Zero-pad width of an identifier.
pub const DEFAULT_WIDTH: usize = 10;

/// Render `value` in base 10, left-padded with '0' to `width` characters.
/// Values with more digits than `width` are not truncated.
pub fn format_identifier(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}

fn digits(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Issues `Response`s carrying sequential zero-padded identifiers.
///
/// Every build advances the counter by exactly one. Mutation goes through
/// `&mut self`; wrap the builder in [`SharedIdentifierBuilder`] to issue from
/// several threads or tasks.
#[derive(Debug, Clone)]
pub struct IdentifierResponseBuilder {
    counter: u64,
    width: usize,
    overflow: OverflowPolicy,
    exhausted: bool,
}

impl Default for IdentifierResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierResponseBuilder {
    pub fn new() -> Self {
        Self::with_start(DEFAULT_START)
    }

    pub fn with_start(start: u64) -> Self {
        Self {
            counter: start,
            width: DEFAULT_WIDTH,
            overflow: OverflowPolicy::Widen,
            exhausted: false,
        }
    }

    pub fn from_config(cfg: &IdsCfg) -> Self {
        Self {
            counter: cfg.start,
            width: cfg.width,
            overflow: cfg.overflow,
            exhausted: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Value the next build will issue.
    pub fn peek(&self) -> u64 {
        self.counter
    }

    /// Build a success response for the current counter, then advance it.
    ///
    /// Never fails: identifiers wider than the pad width are widened
    /// regardless of the configured policy. Once the counter reaches
    /// `u64::MAX` it stops advancing, so every later call repeats that
    /// identifier; use [`try_build_response`](Self::try_build_response) to
    /// get an error instead.
    pub fn build_response(&mut self) -> Response {
        let identifier = format_identifier(self.counter, self.width);
        self.advance();
        Response::success(identifier)
    }

    /// Like [`build_response`](Self::build_response) but honours the
    /// overflow policy. On error the counter is left untouched.
    pub fn try_build_response(&mut self) -> Result<Response> {
        if self.exhausted {
            return Err(anyhow!(
                "identifier counter exhausted at {}",
                self.counter
            ));
        }
        if self.overflow == OverflowPolicy::Fail && digits(self.counter) > self.width {
            return Err(anyhow!(
                "identifier {} exceeds {} digits",
                self.counter,
                self.width
            ));
        }
        Ok(self.build_response())
    }

    fn advance(&mut self) {
        match self.counter.checked_add(1) {
            Some(next) => self.counter = next,
            None => {
                if !self.exhausted {
                    tracing::warn!(
                        target = "ids",
                        "counter reached {}; further identifiers will repeat",
                        self.counter
                    );
                }
                self.exhausted = true;
            }
        }
    }
}

/// Cloneable handle issuing from one builder under a lock.
///
/// All clones draw from the same sequence: no duplicates, no gaps.
#[derive(Debug, Clone, Default)]
pub struct SharedIdentifierBuilder {
    inner: Arc<Mutex<IdentifierResponseBuilder>>,
}

impl SharedIdentifierBuilder {
    pub fn new(builder: IdentifierResponseBuilder) -> Self {
        Self {
            inner: Arc::new(Mutex::new(builder)),
        }
    }

    pub fn build_response(&self) -> Response {
        self.inner.lock().build_response()
    }

    pub fn try_build_response(&self) -> Result<Response> {
        self.inner.lock().try_build_response()
    }

    pub fn peek(&self) -> u64 {
        self.inner.lock().peek()
    }
}

impl From<IdentifierResponseBuilder> for SharedIdentifierBuilder {
    fn from(builder: IdentifierResponseBuilder) -> Self {
        Self::new(builder)
    }
}
