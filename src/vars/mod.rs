/// Variable registry - named, scoped, mutable storage cells
// Sub-modules
mod error;

// Implementation modules
mod assign_impl;
mod local_impl;
mod random_impl;
mod render_impl;
mod special_impl;

// Public exports
pub use error::BindError;
pub use random_impl::RandParam;
pub use render_impl::VarReport;

use std::sync::Arc;

use log::error;
use serde::{Deserialize, Serialize};

use crate::arena::{AllocError, Arena, GenId, VarId};
use crate::attr::AttrValue;
use crate::generator::Generator;
use crate::sources::SpecialSources;

/// Which scope list owns a variable and whether mutation is permitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    /// Globally visible, assignable
    Normal,
    /// Lives on the local scope stack, shadows globals
    Local,
    /// Dynamically resolved (`{...}` / `(...)`), cached after first use
    Special,
    /// Owns a random distribution generator; rejects scalar assignment
    Random,
}

/// The single active payload of a variable (a variable may also be unset)
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
    Boolean(bool),
    Integer(u64),
    Double(f64),
    Str(Arc<str>),
    Generator(GenId),
}

impl VarValue {
    /// Convenience constructor for string payloads
    pub fn str(s: &str) -> VarValue {
        VarValue::Str(Arc::from(s))
    }
}

/// A named, typed, mutable storage cell
pub struct Variable {
    name: Arc<str>,
    kind: VarKind,
    value: Option<VarValue>,
}

impl Variable {
    pub(crate) fn new(name: Arc<str>, kind: VarKind) -> Self {
        Variable {
            name,
            kind,
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    pub fn value(&self) -> Option<&VarValue> {
        self.value.as_ref()
    }

    /// Whether any payload has been set yet
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn set_value(&mut self, value: VarValue) {
        self.value = Some(value);
    }
}

/// Strip the configuration language's `$` scope sigil when present
pub(crate) fn strip_sigil(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}

/// The variable registry: one shared arena plus the three scope lists
///
/// All structural mutation (allocation, linking, generator creation) takes
/// `&mut self` and belongs to the single-actor configuration phase. Reads -
/// descriptor accessors, rendering, sampling - take `&self` and may be
/// shared across worker threads once execution starts.
///
/// # Example
/// ```
/// use latebind::{attr, VarSpace};
///
/// let mut space = VarSpace::new();
/// let iosize = space.ref_attr("$iosize");
/// space.assign_int("$iosize", 8192).unwrap();
///
/// // The descriptor was bound before the assignment set a type, so it is
/// // absent and reads as zero; a fresh reference sees the live value.
/// assert_eq!(attr::get_int(&space, iosize.as_ref()), 0);
/// let iosize = space.ref_attr("$iosize");
/// assert_eq!(attr::get_int(&space, iosize.as_ref()), 8192);
/// ```
pub struct VarSpace {
    arena: Arena,
    globals: Vec<VarId>,
    locals: Vec<VarId>,
    specials: Vec<VarId>,
    sources: Option<Arc<dyn SpecialSources>>,
    on_fatal: Box<dyn Fn(i32) + Send + Sync>,
}

impl VarSpace {
    /// Create an empty registry over an unbounded arena
    pub fn new() -> Self {
        VarSpace {
            arena: Arena::new(),
            globals: Vec::new(),
            locals: Vec::new(),
            specials: Vec::new(),
            sources: None,
            on_fatal: Box::new(|code| std::process::exit(code)),
        }
    }

    /// Create a registry whose arena fails allocation after `cap` entities
    pub fn with_capacity(cap: usize) -> Self {
        VarSpace {
            arena: Arena::with_capacity(cap),
            ..VarSpace::new()
        }
    }

    /// Set the special-name provider set
    pub fn with_sources(mut self, sources: Arc<dyn SpecialSources>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Replace the fatal-shutdown hook (default: `std::process::exit`)
    ///
    /// The hook runs only on the one fatal path: arena exhaustion while
    /// binding a fresh attribute reference.
    pub fn set_shutdown_hook(&mut self, hook: impl Fn(i32) + Send + Sync + 'static) {
        self.on_fatal = Box::new(hook);
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        self.arena.var(id)
    }

    pub fn generator(&self, id: GenId) -> &Generator {
        self.arena.generator(id)
    }

    pub fn generator_mut(&mut self, id: GenId) -> &mut Generator {
        self.arena.generator_mut(id)
    }

    pub(crate) fn intern(&mut self, s: &str) -> Result<Arc<str>, AllocError> {
        self.arena.intern(s)
    }

    pub(crate) fn sources(&self) -> Option<&Arc<dyn SpecialSources>> {
        self.sources.as_ref()
    }

    /// Allocate a variable and link it into the scope list its kind implies
    ///
    /// Locals always push onto the scope stack, shadowing any same-named
    /// local already there; normal, random and special variables append to
    /// their lists in insertion order. `name` is stored as given.
    pub fn alloc(&mut self, name: &str, kind: VarKind) -> Result<VarId, AllocError> {
        let interned = self.arena.intern(name)?;
        let id = self.arena.alloc_var(Variable::new(interned, kind))?;
        match kind {
            VarKind::Normal | VarKind::Random => self.globals.push(id),
            VarKind::Local => self.locals.push(id),
            VarKind::Special => self.specials.push(id),
        }
        Ok(id)
    }

    /// Search the local stack (newest first), then the global list
    ///
    /// `name` must be bare: the public entry points strip the `$` sigil
    /// before calling down to here. Matching is exact and case-sensitive.
    pub fn find(&self, name: &str) -> Option<VarId> {
        self.locals
            .iter()
            .rev()
            .chain(self.globals.iter())
            .copied()
            .find(|id| self.arena.var(*id).name() == name)
    }

    /// Search one specific scope list only
    ///
    /// Used when a name must resolve against a prototype's local scope
    /// rather than the ambient search order.
    pub fn find_in(&self, name: &str, scope: &[VarId]) -> Option<VarId> {
        scope
            .iter()
            .copied()
            .find(|id| self.arena.var(*id).name() == name)
    }

    /// Find `name`, allocating a fresh normal variable when absent
    pub fn find_or_alloc(&mut self, name: &str) -> Result<VarId, AllocError> {
        let bare = strip_sigil(name);
        match self.find(bare) {
            Some(id) => Ok(id),
            None => self.alloc(bare, VarKind::Normal),
        }
    }

    /// Snapshot of the current local scope, newest first
    ///
    /// The engine captures this before instantiating a workload component
    /// from a prototype, then feeds it to
    /// [`propagate_prototype_defaults`](VarSpace::propagate_prototype_defaults).
    pub fn locals(&self) -> Vec<VarId> {
        self.locals.iter().rev().copied().collect()
    }

    /// Bind a workload attribute to a named variable
    ///
    /// The primary binding entry point used while compiling a workload
    /// attribute. Resolution order: local/global scope, then special-name
    /// resolution, then implicit allocation of a fresh normal variable -
    /// referencing an undeclared name is legal and creates it. Allocation
    /// failure here is the single fatal condition in this core: it is
    /// logged and the shutdown hook runs.
    ///
    /// The returned descriptor is typed from the variable's current
    /// payload, so referencing a still-unset variable yields `None`, which
    /// reads as zero/absent through the accessors.
    pub fn ref_attr(&mut self, name: &str) -> Option<AttrValue> {
        let bare = strip_sigil(name).to_owned();

        let id = match self.find(&bare).or_else(|| self.find_special(&bare)) {
            Some(id) => id,
            None => match self.alloc(&bare, VarKind::Normal) {
                Ok(id) => id,
                Err(e) => {
                    error!("invalid variable ${}: {}", bare, e);
                    (self.on_fatal)(1);
                    return None;
                }
            },
        };

        AttrValue::from_var(self, id)
    }
}

impl Default for VarSpace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_prefers_local_over_global() {
        let mut space = VarSpace::new();
        let global = space.alloc("nfiles", VarKind::Normal).unwrap();
        assert_eq!(space.find("nfiles"), Some(global));

        let local = space.alloc("nfiles", VarKind::Local).unwrap();
        assert_eq!(space.find("nfiles"), Some(local));
    }

    #[test]
    fn test_local_shadowing_is_a_stack() {
        let mut space = VarSpace::new();
        let first = space.alloc("depth", VarKind::Local).unwrap();
        let second = space.alloc("depth", VarKind::Local).unwrap();
        assert_ne!(first, second);
        assert_eq!(space.find("depth"), Some(second));
    }

    #[test]
    fn test_find_is_exact_and_case_sensitive() {
        let mut space = VarSpace::new();
        space.alloc("iosize", VarKind::Normal).unwrap();
        assert!(space.find("IOSIZE").is_none());
        assert!(space.find("iosiz").is_none());
    }

    #[test]
    fn test_find_or_alloc_strips_sigil() {
        let mut space = VarSpace::new();
        let id = space.find_or_alloc("$dir").unwrap();
        assert_eq!(space.variable(id).name(), "dir");
        assert_eq!(space.find_or_alloc("dir").unwrap(), id);
    }

    #[test]
    fn test_ref_attr_allocates_undeclared() {
        let mut space = VarSpace::new();
        assert!(space.find("filesize").is_none());
        // Undeclared and unset: descriptor is absent, but the variable now exists
        assert!(space.ref_attr("$filesize").is_none());
        assert!(space.find("filesize").is_some());
    }

    #[test]
    fn test_ref_attr_fatal_on_exhaustion() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc as StdArc;

        let mut space = VarSpace::with_capacity(0);
        let fired = StdArc::new(AtomicBool::new(false));
        let observer = StdArc::clone(&fired);
        space.set_shutdown_hook(move |_| observer.store(true, Ordering::SeqCst));

        assert!(space.ref_attr("$overflow").is_none());
        assert!(fired.load(Ordering::SeqCst));
    }
}
