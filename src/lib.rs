//! Capability traits for Bayesian inference.
//!
//! Concrete distributions and latent-variable models take part in inference
//! algorithms by implementing the traits in this crate:
//!
//! | algorithm               | distribution        | model                  |
//! |-------------------------|---------------------|------------------------|
//! | Gibbs sampling          | [`GibbsSampling`]   | [`ModelGibbsSampling`] |
//! | mean field              | [`MeanField`]       | [`ModelMeanField`]     |
//! | collapsed inference     | [`Collapsed`]       |                        |
//! | maximum likelihood / EM | [`MaxLikelihood`]   | [`ModelEm`]            |
//! | MAP / MAP EM            | [`Map`]             | [`ModelMapEm`]         |
//!
//! Each capability is independent. The only loop driven by this crate is the
//! EM convergence loop in [`em`]; schedules for samplers and variational
//! solvers belong to the caller.
//!
//! All methods mutate in place through `&mut self` and are synchronous. To run
//! several chains in parallel, use one instance per chain.

pub mod data;
pub mod distribution;
pub mod em;
pub mod error;
pub mod math;
pub mod model;


pub use data::{combine_data, MaskedData};
pub use distribution::{Collapsed, Distribution, GibbsSampling, Map, MaxLikelihood, MeanField};
pub use em::{fit_em, EmLoop, EmSettings, EmStatus, EmTrace};
pub use error::{BayesError, Result};
pub use model::{
    DataOwnership, Model, ModelEm, ModelGibbsSampling, ModelLikelihood, ModelMapEm,
    ModelMeanField, ModelRvs,
};
