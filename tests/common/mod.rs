//! Common test utilities and logging infrastructure
//!
//! Import this module in integration tests:
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=show_more::fit=trace` - Log every measurement
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use show_more::fit::FitConfig;
use show_more::measure::LineMeasure;

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Idempotent. `log` records from the crate reach the subscriber through
/// `tracing`'s log bridge.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("show_more=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_ansi(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// A test span guard that logs entry and exit.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Measurer that fits `width` characters per line, ignoring newlines.
pub fn per_line(width: usize) -> impl Fn(&str) -> usize + Copy {
    move |text: &str| text.chars().count().div_ceil(width).max(1)
}

/// The `"... more"` configuration used throughout the examples.
pub fn more(max_lines: usize) -> FitConfig {
    FitConfig::new(max_lines)
        .ellipsis("...")
        .spacer_width(1)
        .action_label("more")
}

/// Wraps a measurer and records every string it is asked about.
pub struct Recorder<M> {
    inner: M,
    calls: Cell<usize>,
    seen: RefCell<Vec<String>>,
}

impl<M: LineMeasure> Recorder<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.borrow().clone()
    }
}

impl<M: LineMeasure> LineMeasure for Recorder<M> {
    fn line_count(&self, text: &str) -> usize {
        self.calls.set(self.calls.get() + 1);
        self.seen.borrow_mut().push(text.to_string());
        self.inner.line_count(text)
    }
}
