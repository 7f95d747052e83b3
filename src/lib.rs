/// latebind - delayed-binding attribute values and scoped variables
///
/// This library is the typed attribute-value and variable-binding core of a
/// storage workload-generation engine. A workload description binds its
/// parameters (I/O sizes, rates, file counts) to [`AttrValue`] descriptors
/// when it is loaded; `set`-style assignments may keep changing the
/// underlying [`VarSpace`] variables until the run starts, and every read
/// resolves through the live state at that moment. A descriptor may also
/// point at a random distribution [`Generator`] whose own parameters are
/// themselves late-bound values.
///
/// # Example
///
/// ```
/// use latebind::{attr, VarSpace};
///
/// let mut space = VarSpace::new();
/// space.assign_int("$iosize", 4096).unwrap();
/// let iosize = space.ref_attr("$iosize");
///
/// // A later `set` is observed by the already-bound descriptor
/// space.assign_int("$iosize", 8192).unwrap();
/// assert_eq!(attr::get_int(&space, iosize.as_ref()), 8192);
/// ```
pub mod arena;
pub mod attr;
pub mod generator;
pub mod sources;
pub mod vars;

/// Re-export main types for convenience
pub use arena::{AllocError, GenId, VarId};
pub use attr::AttrValue;
pub use generator::{DistributionKind, Generator, RandSource, SampleInputs, Sampler, UniformSampler};
pub use sources::{SpecialSources, StaticSources};
pub use vars::{BindError, RandParam, VarKind, VarReport, VarSpace, VarValue, Variable};

#[cfg(feature = "system-sources")]
pub use sources::SystemSources;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delayed_binding_round_trip() {
        let mut space = VarSpace::new();
        space.assign_str("$path", "/mnt/a").unwrap();
        let path = space.ref_attr("$path");

        space.assign_str("$path", "/mnt/b").unwrap();
        assert_eq!(
            attr::get_str(&space, path.as_ref()).as_deref(),
            Some("/mnt/b")
        );
    }

    #[test]
    fn test_random_attribute_samples() {
        let mut space = VarSpace::new();
        let id = space.define_random("$think").unwrap();
        let gen = space.generator_of(id).unwrap();
        space.generator_mut(gen).set_seed(AttrValue::literal_int(9));
        space.generator_mut(gen).set_min(AttrValue::literal_int(10));
        space.generator_mut(gen).set_mean(AttrValue::literal_int(20));

        let think = space.ref_attr("$think").unwrap();
        for _ in 0..32 {
            let value = think.get_int(&space);
            assert!((10..30).contains(&value));
        }
    }
}
