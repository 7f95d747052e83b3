/// Random distribution handles with late-bound parameters
///
/// A [`Generator`] is the value source behind a `Random`-kind variable.
/// Its parameters (seed, min, mean, shape, round-to) are themselves
/// [`AttrValue`]s, so a distribution's mean can be a literal, a variable
/// reference, or another distribution - the recursion falls out of the type
/// design rather than being special-cased.
///
/// The numeric algorithms for gamma and tabular distributions live in the
/// surrounding engine; this module owns the indirection contract (the
/// [`Sampler`] trait) and ships a uniform default so a freshly defined
/// random variable samples out of the box.
use std::sync::Mutex;

use log::error;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::attr::{self, AttrValue};
use crate::vars::VarSpace;

/// Distribution family of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    Uniform,
    Gamma,
    Tabular,
}

impl DistributionKind {
    /// Label used by the string-rendering entry points
    pub fn label(&self) -> &'static str {
        match self {
            DistributionKind::Uniform => "uniform",
            DistributionKind::Gamma => "gamma",
            DistributionKind::Tabular => "tabular",
        }
    }
}

/// Where a generator draws its randomness from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RandSource {
    /// Seeded pseudo-random stream, reproducible across runs
    PseudoRandom,
    /// Operating-system entropy, never reproducible
    SystemEntropy,
}

impl RandSource {
    pub fn label(&self) -> &'static str {
        match self {
            RandSource::PseudoRandom => "pseudo-random",
            RandSource::SystemEntropy => "system-entropy",
        }
    }
}

/// Resolved distribution parameters handed to a sampler on each draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleInputs {
    pub min: f64,
    pub mean: f64,
    pub shape: f64,
}

/// Capability interface for distribution sampling
///
/// The engine installs a sampler per generator; each call may advance
/// internal state. Implementations for gamma and tabular distributions are
/// supplied by the engine's random subsystem - only the uniform default
/// lives here.
pub trait Sampler: Send {
    fn sample(&mut self, inputs: &SampleInputs) -> f64;
}

/// Mean-preserving uniform sampler over `[min, 2*mean - min)`
pub struct UniformSampler<R: Rng + Send> {
    rng: R,
}

impl<R: Rng + Send> UniformSampler<R> {
    pub fn new(rng: R) -> Self {
        UniformSampler { rng }
    }
}

impl<R: Rng + Send> Sampler for UniformSampler<R> {
    fn sample(&mut self, inputs: &SampleInputs) -> f64 {
        let spread = (inputs.mean - inputs.min).max(0.0) * 2.0;
        inputs.min + self.rng.gen::<f64>() * spread
    }
}

/// A random distribution handle owned by one `Random`-kind variable
///
/// Parameters resolve through the attribute accessors on every draw, so a
/// `set` command issued after the workload model is loaded changes what the
/// next sample sees. The sampler itself is built lazily from the seed and
/// source on the first draw; [`Generator::reset_sampler`] discards it so a
/// re-seeded generator starts a fresh stream.
pub struct Generator {
    kind: DistributionKind,
    source: RandSource,
    seed: Option<AttrValue>,
    min: Option<AttrValue>,
    mean: Option<AttrValue>,
    shape: Option<AttrValue>,
    round: Option<AttrValue>,
    sampler: Mutex<Option<Box<dyn Sampler>>>,
}

impl Generator {
    /// Create a generator with no parameters set: uniform, pseudo-random
    pub fn new() -> Self {
        Generator {
            kind: DistributionKind::Uniform,
            source: RandSource::PseudoRandom,
            seed: None,
            min: None,
            mean: None,
            shape: None,
            round: None,
            sampler: Mutex::new(None),
        }
    }

    pub fn kind(&self) -> DistributionKind {
        self.kind
    }

    pub fn source(&self) -> RandSource {
        self.source
    }

    pub fn seed(&self) -> Option<&AttrValue> {
        self.seed.as_ref()
    }

    pub fn min(&self) -> Option<&AttrValue> {
        self.min.as_ref()
    }

    pub fn mean(&self) -> Option<&AttrValue> {
        self.mean.as_ref()
    }

    pub fn shape(&self) -> Option<&AttrValue> {
        self.shape.as_ref()
    }

    pub fn round(&self) -> Option<&AttrValue> {
        self.round.as_ref()
    }

    pub fn set_kind(&mut self, kind: DistributionKind) {
        self.kind = kind;
    }

    pub fn set_source(&mut self, source: RandSource) {
        self.source = source;
    }

    pub fn set_seed(&mut self, seed: AttrValue) {
        self.seed = Some(seed);
    }

    pub fn set_min(&mut self, min: AttrValue) {
        self.min = Some(min);
    }

    pub fn set_mean(&mut self, mean: AttrValue) {
        self.mean = Some(mean);
    }

    pub fn set_shape(&mut self, shape: AttrValue) {
        self.shape = Some(shape);
    }

    pub fn set_round(&mut self, round: AttrValue) {
        self.round = Some(round);
    }

    /// Install the sampler that realizes this generator's distribution
    pub fn install_sampler(&self, sampler: Box<dyn Sampler>) {
        *self.sampler.lock().unwrap() = Some(sampler);
    }

    /// Discard the current sampler so the next draw rebuilds it
    pub fn reset_sampler(&self) {
        *self.sampler.lock().unwrap() = None;
    }

    /// Draw one sample
    ///
    /// Resolves min/mean/shape through the live attribute accessors, draws
    /// from the installed sampler (building the uniform default on first
    /// use), and applies the round-to policy. Sampling a gamma or tabular
    /// generator whose sampler was never installed is logged and reads 0.0.
    pub fn sample(&self, space: &VarSpace) -> f64 {
        let inputs = SampleInputs {
            min: attr::get_dbl(space, self.min.as_ref()),
            mean: attr::get_dbl(space, self.mean.as_ref()),
            shape: attr::get_dbl(space, self.shape.as_ref()),
        };

        let mut guard = self.sampler.lock().unwrap();
        if guard.is_none() {
            match self.default_sampler(space) {
                Some(sampler) => *guard = Some(sampler),
                None => {
                    error!("no sampler installed for {} generator", self.kind.label());
                    return 0.0;
                }
            }
        }
        let raw = guard.as_mut().unwrap().sample(&inputs);
        drop(guard);

        self.round_to(space, raw)
    }

    fn default_sampler(&self, space: &VarSpace) -> Option<Box<dyn Sampler>> {
        match self.kind {
            DistributionKind::Uniform => Some(match self.source {
                RandSource::PseudoRandom => {
                    let seed = attr::get_int(space, self.seed.as_ref());
                    Box::new(UniformSampler::new(StdRng::seed_from_u64(seed)))
                }
                RandSource::SystemEntropy => Box::new(UniformSampler::new(OsRng)),
            }),
            // Gamma and tabular samplers come from the engine
            _ => None,
        }
    }

    fn round_to(&self, space: &VarSpace, raw: f64) -> f64 {
        let step = attr::get_dbl(space, self.round.as_ref());
        if step > 0.0 {
            (raw / step).round() * step
        } else {
            raw
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
