/// Shared value store backing every variable, generator and interned string
///
/// Everything the binding core hands out lives in one arena owned by the
/// `VarSpace`: variables, generators, and the string pool. Entities are
/// addressed by typed ids rather than references, so a descriptor can alias
/// a variable's live slot without any lifetime plumbing. Nothing is freed
/// before the arena itself is dropped.
use std::collections::HashSet;
use std::sync::Arc;

use crate::generator::Generator;
use crate::vars::Variable;

/// Error types for arena allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// The configured capacity cap was reached
    Exhausted(&'static str),
}

impl std::fmt::Display for AllocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocError::Exhausted(what) => write!(f, "out of memory for {}", what),
        }
    }
}

impl std::error::Error for AllocError {}

/// Handle to a variable slot in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

/// Handle to a generator slot in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenId(pub(crate) usize);

/// Arena holding variables, generators, and the interned string pool
///
/// An optional entity cap models shared-memory exhaustion: once the total
/// number of variables, generators, and distinct interned strings reaches
/// the cap, further allocation fails with [`AllocError::Exhausted`].
pub struct Arena {
    vars: Vec<Variable>,
    gens: Vec<Generator>,
    strings: HashSet<Arc<str>>,
    cap: Option<usize>,
    used: usize,
}

impl Arena {
    /// Create an unbounded arena
    pub fn new() -> Self {
        Arena {
            vars: Vec::new(),
            gens: Vec::new(),
            strings: HashSet::new(),
            cap: None,
            used: 0,
        }
    }

    /// Create an arena that fails allocation after `cap` entities
    pub fn with_capacity(cap: usize) -> Self {
        Arena {
            cap: Some(cap),
            ..Arena::new()
        }
    }

    fn charge(&mut self, what: &'static str) -> Result<(), AllocError> {
        if let Some(cap) = self.cap {
            if self.used >= cap {
                return Err(AllocError::Exhausted(what));
            }
        }
        self.used += 1;
        Ok(())
    }

    /// Allocate a variable slot
    pub fn alloc_var(&mut self, var: Variable) -> Result<VarId, AllocError> {
        self.charge("variables")?;
        let id = VarId(self.vars.len());
        self.vars.push(var);
        Ok(id)
    }

    pub fn var(&self, id: VarId) -> &Variable {
        &self.vars[id.0]
    }

    pub fn var_mut(&mut self, id: VarId) -> &mut Variable {
        &mut self.vars[id.0]
    }

    /// Allocate a generator slot
    pub fn alloc_gen(&mut self, gen: Generator) -> Result<GenId, AllocError> {
        self.charge("random distribution objects")?;
        let id = GenId(self.gens.len());
        self.gens.push(gen);
        Ok(id)
    }

    pub fn generator(&self, id: GenId) -> &Generator {
        &self.gens[id.0]
    }

    pub fn generator_mut(&mut self, id: GenId) -> &mut Generator {
        &mut self.gens[id.0]
    }

    /// Intern a string, returning a shared handle to the pooled copy
    ///
    /// Re-interning an already-pooled string is free and never fails.
    pub fn intern(&mut self, s: &str) -> Result<Arc<str>, AllocError> {
        if let Some(existing) = self.strings.get(s) {
            return Ok(Arc::clone(existing));
        }
        self.charge("strings")?;
        let interned: Arc<str> = Arc::from(s);
        self.strings.insert(Arc::clone(&interned));
        Ok(interned)
    }

    /// Number of entities currently allocated
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
