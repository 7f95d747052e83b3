/// Attribute value descriptors - delayed binding of workload attributes
///
/// An [`AttrValue`] is the one way the execution engine obtains a concrete
/// value for a workload attribute. It is either an owned literal, a
/// reference to a variable's live slot, or a reference to a random
/// distribution generator. References hold arena ids, so reading always
/// observes the variable's *current* payload: `set` commands issued between
/// loading a workload description and running it are picked up for free.
///
/// Reads are pure except through [`AttrValue::Random`], where every read
/// advances the generator's sampling state.
use std::sync::Arc;

use log::error;

use crate::arena::{AllocError, GenId, VarId};
use crate::vars::{VarSpace, VarValue};

/// A delayed-binding value descriptor
///
/// Literal variants carry their value; `Var*` variants point at a typed
/// variable slot; [`AttrValue::Random`] points at a generator. An *absent*
/// descriptor is represented as `Option::None` at the API boundary and reads
/// as the documented zero value through the free-function accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Int(u64),
    Double(f64),
    Str(Arc<str>),
    VarBool(VarId),
    VarInt(VarId),
    VarDouble(VarId),
    VarStr(VarId),
    Random(GenId),
}

impl AttrValue {
    /// Human label for the descriptor kind, used in type-mismatch diagnostics
    pub fn type_label(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "boolean value",
            AttrValue::Int(_) => "integer value",
            AttrValue::Double(_) => "double float value",
            AttrValue::Str(_) => "string",
            AttrValue::VarBool(_) => "points to boolean in variable",
            AttrValue::VarInt(_) => "points to integer in variable",
            AttrValue::VarDouble(_) => "points to double float in variable",
            AttrValue::VarStr(_) => "points to string in variable",
            AttrValue::Random(_) => "random distribution reference",
        }
    }

    /// Allocate a boolean literal descriptor
    pub fn literal_bool(value: bool) -> AttrValue {
        AttrValue::Bool(value)
    }

    /// Allocate an integer literal descriptor
    pub fn literal_int(value: u64) -> AttrValue {
        AttrValue::Int(value)
    }

    /// Allocate a double literal descriptor
    pub fn literal_double(value: f64) -> AttrValue {
        AttrValue::Double(value)
    }

    /// Allocate a string literal descriptor, interning the string
    ///
    /// Fails if the arena's string pool is exhausted.
    pub fn literal_str(space: &mut VarSpace, value: &str) -> Result<AttrValue, AllocError> {
        match space.intern(value) {
            Ok(s) => Ok(AttrValue::Str(s)),
            Err(e) => {
                error!("descriptor string allocation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Build a reference descriptor pointing at `id`'s live slot
    ///
    /// The descriptor kind matches the variable's currently-populated payload
    /// kind; a `Random`-kind variable yields a generator reference. A
    /// variable with no payload set yet has no recognized storage kind, so
    /// the reference cannot be typed: the failure is logged and `None`
    /// returned.
    pub fn from_var(space: &VarSpace, id: VarId) -> Option<AttrValue> {
        let var = space.variable(id);
        match var.value() {
            Some(VarValue::Boolean(_)) => Some(AttrValue::VarBool(id)),
            Some(VarValue::Integer(_)) => Some(AttrValue::VarInt(id)),
            Some(VarValue::Double(_)) => Some(AttrValue::VarDouble(id)),
            Some(VarValue::Str(_)) => Some(AttrValue::VarStr(id)),
            Some(VarValue::Generator(gen)) => Some(AttrValue::Random(*gen)),
            None => {
                error!("illegal variable type for ${}", var.name());
                None
            }
        }
    }

    /// Resolve this descriptor to an integer
    ///
    /// Literal integers return directly; integer references read the live
    /// slot (unset slot reads as 0); generator references sample and
    /// truncate. Any other kind is a type-contract violation: logged, 0.
    pub fn get_int(&self, space: &VarSpace) -> u64 {
        match self {
            AttrValue::Int(value) => *value,
            AttrValue::VarInt(id) => match space.variable(*id).value() {
                Some(VarValue::Integer(value)) => *value,
                _ => 0,
            },
            AttrValue::Random(gen) => space.generator(*gen).sample(space) as u64,
            other => {
                error!("attempt to get integer from {}", other.type_label());
                0
            }
        }
    }

    /// Resolve this descriptor to a double
    ///
    /// Integer kinds widen; generator references sample. Unset slots read as
    /// 0.0. Any other kind is logged and reads as 0.0.
    pub fn get_dbl(&self, space: &VarSpace) -> f64 {
        match self {
            AttrValue::Int(value) => *value as f64,
            AttrValue::Double(value) => *value,
            AttrValue::VarInt(id) => match space.variable(*id).value() {
                Some(VarValue::Integer(value)) => *value as f64,
                _ => 0.0,
            },
            AttrValue::VarDouble(id) => match space.variable(*id).value() {
                Some(VarValue::Double(value)) => *value,
                _ => 0.0,
            },
            AttrValue::Random(gen) => space.generator(*gen).sample(space),
            other => {
                error!("attempt to get floating point from {}", other.type_label());
                0.0
            }
        }
    }

    /// Resolve this descriptor to a boolean
    ///
    /// Integer kinds coerce: non-zero is true. Unset slots read as false.
    pub fn get_bool(&self, space: &VarSpace) -> bool {
        match self {
            AttrValue::Bool(value) => *value,
            AttrValue::VarBool(id) => match space.variable(*id).value() {
                Some(VarValue::Boolean(value)) => *value,
                _ => false,
            },
            AttrValue::Int(value) => *value != 0,
            AttrValue::VarInt(id) => match space.variable(*id).value() {
                Some(VarValue::Integer(value)) => *value != 0,
                _ => false,
            },
            other => {
                error!("attempt to get boolean from {}", other.type_label());
                false
            }
        }
    }

    /// Resolve this descriptor to a string
    ///
    /// Only string kinds resolve; everything else is logged and reads as
    /// absent. Unset slots read as absent.
    pub fn get_str(&self, space: &VarSpace) -> Option<Arc<str>> {
        match self {
            AttrValue::Str(value) => Some(Arc::clone(value)),
            AttrValue::VarStr(id) => match space.variable(*id).value() {
                Some(VarValue::Str(value)) => Some(Arc::clone(value)),
                _ => None,
            },
            other => {
                error!("attempt to get string from {}", other.type_label());
                None
            }
        }
    }
}

/// Resolve a possibly-absent descriptor to an integer (absent reads as 0)
pub fn get_int(space: &VarSpace, avd: Option<&AttrValue>) -> u64 {
    avd.map_or(0, |a| a.get_int(space))
}

/// Resolve a possibly-absent descriptor to a double (absent reads as 0.0)
pub fn get_dbl(space: &VarSpace, avd: Option<&AttrValue>) -> f64 {
    avd.map_or(0.0, |a| a.get_dbl(space))
}

/// Resolve a possibly-absent descriptor to a boolean (absent reads as false)
pub fn get_bool(space: &VarSpace, avd: Option<&AttrValue>) -> bool {
    avd.map_or(false, |a| a.get_bool(space))
}

/// Resolve a possibly-absent descriptor to a string (absent reads as absent)
pub fn get_str(space: &VarSpace, avd: Option<&AttrValue>) -> Option<Arc<str>> {
    avd.and_then(|a| a.get_str(space))
}
