//! Random-variable definition and parameter rendering

use log::error;
use serde::{Deserialize, Serialize};

use crate::arena::GenId;
use crate::attr;
use crate::generator::Generator;

use super::{strip_sigil, BindError, VarId, VarKind, VarSpace, VarValue};

/// Which generator parameter a rendering request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandParam {
    Type,
    Source,
    Seed,
    Min,
    Mean,
    Shape,
    Round,
}

impl VarSpace {
    /// Define a new random variable with a fresh generator bound to it
    ///
    /// Fails with `AlreadyDefined` if the name exists anywhere in the
    /// ambient search order - random variables are never redefined in
    /// place. The generator starts with no parameters set; the caller
    /// configures it through [`generator_mut`](VarSpace::generator_mut).
    pub fn define_random(&mut self, name: &str) -> Result<VarId, BindError> {
        let bare = strip_sigil(name);

        if self.find(bare).is_some() {
            error!("variable name already in use: ${}", bare);
            return Err(BindError::AlreadyDefined {
                name: bare.to_string(),
            });
        }

        let id = match self.alloc(bare, VarKind::Random) {
            Ok(id) => id,
            Err(e) => {
                error!("failed to alloc random variable ${}: {}", bare, e);
                return Err(e.into());
            }
        };

        let gen = match self.arena.alloc_gen(Generator::new()) {
            Ok(gen) => gen,
            Err(e) => {
                error!("failed to alloc random distribution object: {}", e);
                return Err(e.into());
            }
        };

        self.arena.var_mut(id).set_value(VarValue::Generator(gen));
        Ok(id)
    }

    /// Find an existing random variable to attach behavior to
    ///
    /// Fails if the name is unknown, or known but not random-kind with a
    /// generator bound. This path never creates anything - that is
    /// [`define_random`](VarSpace::define_random)'s job.
    pub fn find_random(&self, name: &str) -> Result<VarId, BindError> {
        let bare = strip_sigil(name);

        let id = match self.find(bare) {
            Some(id) => id,
            None => {
                error!("failed to locate random variable ${}", bare);
                return Err(BindError::NotFound {
                    name: bare.to_string(),
                });
            }
        };

        match (self.arena.var(id).kind(), self.arena.var(id).value()) {
            (VarKind::Random, Some(VarValue::Generator(_))) => Ok(id),
            _ => {
                error!("found variable ${} not random", bare);
                Err(BindError::WrongKind {
                    name: bare.to_string(),
                })
            }
        }
    }

    /// Generator id bound to a variable, when it has one
    pub fn generator_of(&self, id: VarId) -> Option<GenId> {
        match self.arena.var(id).value() {
            Some(VarValue::Generator(gen)) => Some(*gen),
            _ => None,
        }
    }

    /// Render one distribution parameter of a random variable as a string
    ///
    /// Type and source render their labels; the numeric parameters resolve
    /// through the attribute accessors and render as exact decimal. A name
    /// that is unknown or not random falls back to
    /// [`var_to_string`](VarSpace::var_to_string).
    pub fn rand_param_string(&mut self, name: &str, param: RandParam) -> Option<String> {
        let bare = strip_sigil(name);

        let gen = match self.find(bare).and_then(|id| self.generator_of(id)) {
            Some(gen) => gen,
            None => return self.var_to_string(name),
        };

        let generator = self.arena.generator(gen);
        let value = match param {
            RandParam::Type => return Some(generator.kind().label().to_string()),
            RandParam::Source => return Some(generator.source().label().to_string()),
            RandParam::Seed => attr::get_int(self, generator.seed()),
            RandParam::Min => attr::get_int(self, generator.min()),
            RandParam::Mean => attr::get_int(self, generator.mean()),
            RandParam::Shape => attr::get_int(self, generator.shape()),
            RandParam::Round => attr::get_int(self, generator.round()),
        };

        Some(value.to_string())
    }
}
