//! Local-variable lifecycle and prototype inheritance
//!
//! Workload components instantiated from a template get their own local
//! scope: every allocation pushes onto the local stack, so nested
//! instantiation shadows rather than replaces. Prototype inheritance copies
//! a template's local defaults onto the fresh instance, but only for locals
//! the instance has not already set - per-instance overrides win.

use log::error;

use super::{strip_sigil, BindError, VarId, VarKind, VarSpace, VarValue};

impl VarSpace {
    /// Allocate a local variable, pushed onto the local scope stack
    pub fn alloc_local(&mut self, name: &str) -> Result<VarId, BindError> {
        let bare = strip_sigil(name);
        match self.alloc(bare, VarKind::Local) {
            Ok(id) => Ok(id),
            Err(e) => {
                error!("cannot assign variable {}: {}", name, e);
                Err(e.into())
            }
        }
    }

    /// Allocate a local and set a boolean payload
    pub fn local_assign_bool(&mut self, name: &str, value: bool) -> Result<VarId, BindError> {
        let id = self.alloc_local(name)?;
        self.arena.var_mut(id).set_value(VarValue::Boolean(value));
        Ok(id)
    }

    /// Allocate a local and set an integer payload
    pub fn local_assign_int(&mut self, name: &str, value: u64) -> Result<VarId, BindError> {
        let id = self.alloc_local(name)?;
        self.arena.var_mut(id).set_value(VarValue::Integer(value));
        Ok(id)
    }

    /// Allocate a local and set a double payload
    pub fn local_assign_double(&mut self, name: &str, value: f64) -> Result<VarId, BindError> {
        let id = self.alloc_local(name)?;
        self.arena.var_mut(id).set_value(VarValue::Double(value));
        Ok(id)
    }

    /// Allocate a local and set a string payload
    pub fn local_assign_str(&mut self, name: &str, value: &str) -> Result<VarId, BindError> {
        let interned = match self.intern(value) {
            Ok(s) => s,
            Err(e) => {
                error!("cannot assign variable {}: {}", name, e);
                return Err(e.into());
            }
        };
        let id = self.alloc_local(name)?;
        self.arena.var_mut(id).set_value(VarValue::Str(interned));
        Ok(id)
    }

    /// Allocate a local and copy the value of an existing variable into it
    ///
    /// The source is found through the ambient search order and must exist.
    /// Scalars and strings copy by value (strings into a fresh arena
    /// string); a generator payload is copied *by reference* - the new
    /// local aliases the same generator, it does not duplicate it.
    pub fn local_from_var(&mut self, name: &str, src_name: &str) -> Result<VarId, BindError> {
        let src_bare = strip_sigil(src_name);
        let src = match self.find(src_bare) {
            Some(id) => id,
            None => {
                error!("cannot find source variable {}", src_bare);
                return Err(BindError::NotFound {
                    name: src_bare.to_string(),
                });
            }
        };

        let dst = self.alloc_local(name)?;

        match self.arena.var(src).value().cloned() {
            Some(VarValue::Str(s)) => {
                let s = s.to_string();
                let interned = match self.intern(&s) {
                    Ok(s) => s,
                    Err(e) => {
                        error!("cannot assign variable {}: {}", name, e);
                        return Err(e.into());
                    }
                };
                self.arena.var_mut(dst).set_value(VarValue::Str(interned));
            }
            Some(payload) => self.arena.var_mut(dst).set_value(payload),
            None => {}
        }

        Ok(dst)
    }

    /// Copy a prototype's default onto a freshly instantiated local
    ///
    /// Looks up a variable with `new_local`'s name restricted to the
    /// prototype's local scope. When found, and only when `new_local` has
    /// no payload set yet, the prototype's value is copied over - a value
    /// set on the instance before instantiation always wins.
    pub fn propagate_prototype_defaults(&mut self, new_local: VarId, proto_locals: &[VarId]) {
        let name = self.arena.var(new_local).name().to_owned();

        let proto = match self.find_in(&name, proto_locals) {
            Some(id) => id,
            None => return,
        };

        if !self.arena.var(new_local).is_set() {
            let _ = self.copy_value(new_local, proto);
        }
    }
}
