//! String rendering of variables for diagnostics and templated output

use serde::{Deserialize, Serialize};

use super::{strip_sigil, VarId, VarKind, VarSpace, VarValue};

/// One row of the registry snapshot, serializable for tooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarReport {
    pub name: String,
    pub kind: VarKind,
    pub rendered: String,
}

impl VarSpace {
    /// Render a variable's value as a string
    ///
    /// Strips the sigil, resolves through local/global scope and then the
    /// special forms. Booleans render `"true"`/`"false"`, numerics render
    /// as exact decimal, random variables as a label of their distribution
    /// kind, and a variable with no payload as `"No default"`. An unknown
    /// name renders as absent.
    pub fn var_to_string(&mut self, name: &str) -> Option<String> {
        let bare = strip_sigil(name).to_owned();
        let id = match self.find(&bare) {
            Some(id) => Some(id),
            None => self.find_special(&bare),
        }?;
        Some(self.render_value(id))
    }

    pub(super) fn render_value(&self, id: VarId) -> String {
        let var = self.arena.var(id);

        if var.kind() == VarKind::Random {
            return match var.value() {
                Some(VarValue::Generator(gen)) => {
                    format!("{} random var", self.arena.generator(*gen).kind().label())
                }
                _ => "uninitialized random var".to_string(),
            };
        }

        match var.value() {
            Some(VarValue::Str(s)) => s.to_string(),
            Some(VarValue::Boolean(true)) => "true".to_string(),
            Some(VarValue::Boolean(false)) => "false".to_string(),
            Some(VarValue::Integer(v)) => v.to_string(),
            Some(VarValue::Double(v)) => v.to_string(),
            Some(VarValue::Generator(gen)) => {
                // A generator payload on a non-random variable: a local
                // aliasing a random variable's distribution
                format!("{} random var", self.arena.generator(*gen).kind().label())
            }
            None => "No default".to_string(),
        }
    }

    /// Snapshot every registered variable with its rendered value
    ///
    /// Rows cover the global list, the local stack (newest first), and the
    /// cached specials, in that order.
    pub fn report(&self) -> Vec<VarReport> {
        self.globals
            .iter()
            .chain(self.locals.iter().rev())
            .chain(self.specials.iter())
            .map(|&id| {
                let var = self.arena.var(id);
                VarReport {
                    name: var.name().to_string(),
                    kind: var.kind(),
                    rendered: self.render_value(id),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scalars() {
        let mut space = VarSpace::new();
        space.assign_str("$dir", "/mnt/test").unwrap();
        space.assign_bool("$cached", true).unwrap();
        space.assign_int("$nfiles", 1000000).unwrap();

        assert_eq!(space.var_to_string("$dir").unwrap(), "/mnt/test");
        assert_eq!(space.var_to_string("$cached").unwrap(), "true");
        assert_eq!(space.var_to_string("$nfiles").unwrap(), "1000000");
    }

    #[test]
    fn test_render_double_exact_decimal() {
        let mut space = VarSpace::new();
        space.local_assign_double("$ratio", 0.5).unwrap();
        assert_eq!(space.var_to_string("$ratio").unwrap(), "0.5");
    }

    #[test]
    fn test_render_unset_and_unknown() {
        let mut space = VarSpace::new();
        space.alloc("declared", VarKind::Normal).unwrap();
        assert_eq!(space.var_to_string("$declared").unwrap(), "No default");
        assert!(space.var_to_string("$unknown").is_none());
    }

    #[test]
    fn test_render_random_label() {
        let mut space = VarSpace::new();
        space.define_random("$fsize").unwrap();
        assert_eq!(space.var_to_string("$fsize").unwrap(), "uniform random var");
    }

    #[test]
    fn test_report_covers_all_scopes() {
        let mut space = VarSpace::new();
        space.assign_int("$global", 1).unwrap();
        space.local_assign_int("$local", 2).unwrap();

        let report = space.report();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "global");
        assert_eq!(report[0].kind, VarKind::Normal);
        assert_eq!(report[0].rendered, "1");
        assert_eq!(report[1].name, "local");
        assert_eq!(report[1].kind, VarKind::Local);
    }

    #[test]
    fn test_report_serializes() {
        let mut space = VarSpace::new();
        space.assign_int("$n", 5).unwrap();
        let json = serde_json::to_string(&space.report()).unwrap();
        assert_eq!(json, r#"[{"name":"n","kind":"normal","rendered":"5"}]"#);
    }
}
