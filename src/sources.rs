/// Special-name providers
///
/// Names written with the `{...}` internal syntax resolve through a set of
/// engine-supplied lookups: statistics by key, the event generator's rate,
/// the wall-clock date, the running script's identity, and the hostname.
/// This module defines that provider boundary, with an in-memory
/// implementation for tests and embedding, and a system-backed
/// implementation behind the `system-sources` feature.
use std::collections::HashMap;

use crate::vars::VarValue;

/// Lookup surface for `{...}` internal variable resolution
///
/// Each method resolves one reserved name (or, for [`stat`], a keyed
/// family of names) to a value, or reports it unavailable. The defaults
/// return `None`, so an implementation only overrides what its engine
/// actually provides.
///
/// [`stat`]: SpecialSources::stat
pub trait SpecialSources: Send + Sync {
    /// Named statistic, `{stats.<key>}`
    fn stat(&self, _key: &str) -> Option<VarValue> {
        None
    }

    /// Event generator rate, `{eventrate}`
    fn event_rate(&self) -> Option<VarValue> {
        None
    }

    /// Wall-clock date, `{date}`
    fn date(&self) -> Option<VarValue> {
        None
    }

    /// Identity of the running workload script, `{script}`
    fn script(&self) -> Option<VarValue> {
        None
    }

    /// Hostname, `{hostname}`
    fn host(&self) -> Option<VarValue> {
        None
    }
}

/// In-memory provider set
///
/// Holds fixed values configured up front. Useful for tests and for
/// embedding the binding core without a full engine behind it.
///
/// # Example
/// ```
/// use latebind::{StaticSources, VarValue};
///
/// let sources = StaticSources::new()
///     .with_host(VarValue::str("node-a"))
///     .with_stat("iops", VarValue::Integer(1200));
/// ```
#[derive(Clone, Default)]
pub struct StaticSources {
    stats: HashMap<String, VarValue>,
    event_rate: Option<VarValue>,
    date: Option<VarValue>,
    script: Option<VarValue>,
    host: Option<VarValue>,
}

impl StaticSources {
    pub fn new() -> Self {
        StaticSources::default()
    }

    pub fn with_stat(mut self, key: impl Into<String>, value: VarValue) -> Self {
        self.stats.insert(key.into(), value);
        self
    }

    pub fn with_event_rate(mut self, value: VarValue) -> Self {
        self.event_rate = Some(value);
        self
    }

    pub fn with_date(mut self, value: VarValue) -> Self {
        self.date = Some(value);
        self
    }

    pub fn with_script(mut self, value: VarValue) -> Self {
        self.script = Some(value);
        self
    }

    pub fn with_host(mut self, value: VarValue) -> Self {
        self.host = Some(value);
        self
    }
}

impl SpecialSources for StaticSources {
    fn stat(&self, key: &str) -> Option<VarValue> {
        self.stats.get(key).cloned()
    }

    fn event_rate(&self) -> Option<VarValue> {
        self.event_rate.clone()
    }

    fn date(&self) -> Option<VarValue> {
        self.date.clone()
    }

    fn script(&self) -> Option<VarValue> {
        self.script.clone()
    }

    fn host(&self) -> Option<VarValue> {
        self.host.clone()
    }
}

/// System-backed provider set
///
/// Resolves the date from the system clock and the hostname from the
/// process environment. Statistics and event rate stay with the engine.
/// Only available with the `system-sources` feature.
#[cfg(feature = "system-sources")]
#[derive(Clone, Default)]
pub struct SystemSources {
    script: Option<String>,
}

#[cfg(feature = "system-sources")]
impl SystemSources {
    pub fn new() -> Self {
        SystemSources::default()
    }

    /// Set the script identity reported for `{script}`
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }
}

#[cfg(feature = "system-sources")]
impl SpecialSources for SystemSources {
    fn date(&self) -> Option<VarValue> {
        let stamp = chrono::Local::now().format("%y%m%d%H%M").to_string();
        Some(VarValue::str(&stamp))
    }

    fn script(&self) -> Option<VarValue> {
        self.script.as_deref().map(VarValue::str)
    }

    fn host(&self) -> Option<VarValue> {
        let host = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        Some(VarValue::str(&host))
    }
}
