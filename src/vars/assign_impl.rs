//! Assignment operations for the registry
//!
//! These back the configuration language's `set` command: resolve a name in
//! the ambient search order (allocating on first use), then overwrite the
//! variable's single payload. Random variables reject scalar assignment -
//! their value is the distribution, not a number.

use log::{debug, error};

use super::{strip_sigil, BindError, VarId, VarKind, VarSpace, VarValue};

impl VarSpace {
    fn assign_target(&mut self, name: &str) -> Result<VarId, BindError> {
        let id = match self.find_or_alloc(name) {
            Ok(id) => id,
            Err(e) => {
                error!("cannot assign variable {}: {}", name, e);
                return Err(e.into());
            }
        };

        if self.arena.var(id).kind() == VarKind::Random {
            error!("cannot assign scalar to random variable {}", name);
            return Err(BindError::WrongKind {
                name: strip_sigil(name).to_string(),
            });
        }

        Ok(id)
    }

    /// Assign a boolean, resolving or allocating `name` in ambient order
    pub fn assign_bool(&mut self, name: &str, value: bool) -> Result<(), BindError> {
        let id = self.assign_target(name)?;
        self.arena.var_mut(id).set_value(VarValue::Boolean(value));
        Ok(())
    }

    /// Assign an integer
    pub fn assign_int(&mut self, name: &str, value: u64) -> Result<(), BindError> {
        let id = self.assign_target(name)?;
        self.arena.var_mut(id).set_value(VarValue::Integer(value));
        debug!("assign integer {}={}", name, value);
        Ok(())
    }

    /// Assign a string, interning it into the shared arena
    pub fn assign_str(&mut self, name: &str, value: &str) -> Result<(), BindError> {
        let id = self.assign_target(name)?;
        let interned = match self.intern(value) {
            Ok(s) => s,
            Err(e) => {
                error!("cannot assign variable {}: {}", name, e);
                return Err(e.into());
            }
        };
        self.arena.var_mut(id).set_value(VarValue::Str(interned));
        Ok(())
    }

    /// Copy the populated payload from `src` onto `dst`
    ///
    /// Scalar payloads copy by value; string payloads re-intern so the
    /// destination owns an arena string of its own (the only fallible
    /// step). Generator payloads are not copied here - local-variable
    /// assignment aliases them instead, see
    /// [`local_from_var`](VarSpace::local_from_var).
    pub fn copy_value(&mut self, dst: VarId, src: VarId) -> Result<(), BindError> {
        let payload = match self.arena.var(src).value() {
            Some(VarValue::Boolean(v)) => VarValue::Boolean(*v),
            Some(VarValue::Integer(v)) => VarValue::Integer(*v),
            Some(VarValue::Double(v)) => VarValue::Double(*v),
            Some(VarValue::Str(s)) => {
                let s = s.to_string();
                match self.intern(&s) {
                    Ok(interned) => VarValue::Str(interned),
                    Err(e) => {
                        error!(
                            "cannot assign string for variable {}: {}",
                            self.arena.var(dst).name(),
                            e
                        );
                        return Err(e.into());
                    }
                }
            }
            Some(VarValue::Generator(_)) | None => return Ok(()),
        };

        self.arena.var_mut(dst).set_value(payload);
        Ok(())
    }
}
