//! Special-name resolution
//!
//! Two reserved syntaxes, seen here with the scope sigil already stripped:
//! `{identifier}` dispatches to the engine's provider set (statistics by
//! key, event rate, date, script identity, hostname), and `(identifier)`
//! reads the process environment. A successfully resolved value is written
//! into a `Special`-kind variable cached on the special list: later lookups
//! of the same literal name find the cached variable and never re-invoke
//! the provider (snapshot-once). Failed resolutions are not cached.

use log::error;

use super::{BindError, VarId, VarKind, VarSpace, VarValue};

const STATS_PREFIX: &str = "stats.";
const EVENTGEN_NAME: &str = "eventrate";
const DATE_NAME: &str = "date";
const SCRIPT_NAME: &str = "script";
const HOST_NAME: &str = "hostname";

impl VarSpace {
    /// Resolve a special name, reusing the cached variable when present
    ///
    /// `name` must be bare of the `$` sigil but keep its `{...}` or
    /// `(...)` wrapper. Names with neither wrapper are not special and
    /// return `None` immediately.
    pub fn find_special(&mut self, name: &str) -> Option<VarId> {
        if !name.starts_with('{') && !name.starts_with('(') {
            return None;
        }

        if let Some(id) = self.find_in(name, &self.specials) {
            return Some(id);
        }

        let value = match self.resolve_special(name) {
            Ok(value) => value,
            Err(e) => {
                error!("{}", e);
                return None;
            }
        };

        // Provider strings may come from outside the arena; re-intern so
        // the cached variable owns an arena string
        let value = match value {
            VarValue::Str(s) => {
                let s = s.to_string();
                match self.intern(&s) {
                    Ok(interned) => VarValue::Str(interned),
                    Err(e) => {
                        error!("cannot cache special variable {}: {}", name, e);
                        return None;
                    }
                }
            }
            other => other,
        };

        let id = match self.alloc(name, VarKind::Special) {
            Ok(id) => id,
            Err(e) => {
                error!("cannot cache special variable {}: {}", name, e);
                return None;
            }
        };
        self.arena.var_mut(id).set_value(value);
        Some(id)
    }

    fn resolve_special(&self, name: &str) -> Result<VarValue, BindError> {
        if let Some(body) = name.strip_prefix('{') {
            let ident = body.strip_suffix('}').ok_or_else(|| unresolved(name))?;
            return self.resolve_internal(name, ident);
        }

        if let Some(body) = name.strip_prefix('(') {
            let ident = body.strip_suffix(')').ok_or_else(|| unresolved(name))?;
            return std::env::var(ident)
                .ok()
                .map(|s| VarValue::str(&s))
                .ok_or_else(|| unresolved(name));
        }

        Err(unresolved(name))
    }

    /// Dispatch an internal variable name to its provider; first match wins
    fn resolve_internal(&self, name: &str, ident: &str) -> Result<VarValue, BindError> {
        let sources = self.sources().ok_or_else(|| unresolved(name))?;

        let value = if let Some(key) = ident.strip_prefix(STATS_PREFIX) {
            sources.stat(key)
        } else if ident == EVENTGEN_NAME {
            sources.event_rate()
        } else if ident == DATE_NAME {
            sources.date()
        } else if ident == SCRIPT_NAME {
            sources.script()
        } else if ident == HOST_NAME {
            sources.host()
        } else {
            None
        };

        value.ok_or_else(|| unresolved(name))
    }
}

fn unresolved(name: &str) -> BindError {
    BindError::UnresolvedSpecial {
        name: name.to_string(),
    }
}
