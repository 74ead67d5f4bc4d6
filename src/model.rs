//! Capabilities of latent-variable models.
//!
//! Unlike a distribution, a model holds on to data: attaching data creates latent
//! state (labels, state sequences, ...) for it, and the inference steps below update
//! parameters and latent state over everything currently attached.

use rand::Rng;

use crate::em::{fit_em, EmSettings, EmTrace};
use crate::error::Result;

/// How a model stores the data passed to [`Model::add_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOwnership {
    /// The model keeps its own copy; the caller's storage is not referenced.
    Owned,
    /// The model shares the caller's buffer (e.g. through an `Arc`). The caller
    /// must not mutate it while the model is in use.
    Shared,
}

pub trait Model {
    /// One dataset, as attached by `add_data` and produced by `generate`.
    type Data;
    /// The latent state that goes with one dataset.
    type Latent;
    /// Options for the generative process, e.g. the number of observations.
    type GenerateConfig;

    /// Every implementation states how it holds attached data.
    const DATA_OWNERSHIP: DataOwnership;

    /// Attach `data` along with fresh latent state for it.
    fn add_data(&mut self, data: Self::Data) -> Result<()>;

    /// Sample data and latent state from the joint generative process.
    ///
    /// With `keep` set, the pair is attached to the model just like `add_data`
    /// would.
    fn generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        keep: bool,
        config: &Self::GenerateConfig,
    ) -> Result<(Self::Data, Self::Latent)>;

    /// Number of datasets currently attached.
    fn num_attached(&self) -> usize;
}

/// Sampling observations from a model without attaching them.
///
/// This is implemented for every [`Model`] and cannot be overridden.
pub trait ModelRvs: Model {
    fn rvs<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &Self::GenerateConfig,
    ) -> Result<Self::Data>;
}

impl<M: Model + ?Sized> ModelRvs for M {
    fn rvs<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &Self::GenerateConfig,
    ) -> Result<Self::Data> {
        let (data, _latent) = self.generate(rng, false, config)?;
        Ok(data)
    }
}

pub trait ModelGibbsSampling: Model + Clone {
    /// Resample the parameters and all latent state given the attached data.
    fn resample_model<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()>;

    /// Return a copy suitable for a list of posterior samples.
    ///
    /// Defaults to a full clone. Override to share attached data instead of
    /// duplicating it; the copy must not change when `self` is resampled.
    fn copy_sample(&self) -> Self {
        self.clone()
    }

    fn resample_and_copy<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Self> {
        self.resample_model(rng)?;
        Ok(self.copy_sample())
    }
}

pub trait ModelMeanField: Model {
    /// Run one sweep of coordinate ascent over the local and global factors.
    ///
    /// Returns the variational lower bound after the sweep.
    fn meanfield_coordinate_descent_step(&mut self) -> Result<f64>;
}

/// The log likelihood of the attached data, used to monitor EM.
pub trait ModelLikelihood: Model {
    fn log_likelihood(&self) -> Result<f64>;
}

pub trait ModelEm: ModelLikelihood {
    /// One expectation step followed by one maximization step.
    fn em_step(&mut self) -> Result<()>;

    /// Iterate [`ModelEm::em_step`] until convergence or `settings.maxiter`.
    fn em_fit(&mut self, settings: EmSettings) -> Result<EmTrace>
    where
        Self: Sized,
    {
        fit_em(self, settings, |model: &mut Self| model.em_step())
    }
}

pub trait ModelMapEm: ModelLikelihood {
    /// Like an EM step, with the prior pseudocounts folded into the maximization.
    fn map_em_step(&mut self) -> Result<()>;

    fn map_em_fit(&mut self, settings: EmSettings) -> Result<EmTrace>
    where
        Self: Sized,
    {
        fit_em(self, settings, |model: &mut Self| model.map_em_step())
    }
}
