//! Capabilities of distributions.
//!
//! A distribution is stateless with respect to data: observations are passed
//! into each call by reference and never retained. Each inference algorithm is
//! a separate trait, and a concrete distribution implements whichever subset it
//! supports.

use rand::Rng;

use crate::data::{combine_data, MaskedData};
use crate::error::{BayesError, Result};

/// Sampling and likelihood evaluation at the current parameter values.
pub trait Distribution {
    /// The native shape of a single observation.
    type Datum;

    /// Draw `size` independent samples.
    fn rvs<R: Rng + ?Sized>(&self, rng: &mut R, size: usize) -> Vec<Self::Datum>;

    /// Elementwise log probability density (or mass) of `x`.
    ///
    /// The result has the same length and mask as `x`. Aggregates over it must
    /// skip masked entries, see [`MaskedData::sum_observed`].
    fn log_likelihood(&self, x: &MaskedData<Self::Datum>) -> Result<MaskedData<f64>>;
}

/// Posterior simulation of the parameters.
pub trait GibbsSampling: Distribution + Clone {
    /// Replace the parameters with a draw from their posterior given `data`.
    ///
    /// Data without observed entries means a draw from the prior.
    fn resample<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        data: &MaskedData<Self::Datum>,
    ) -> Result<()>;

    /// Return a copy suitable for a list of posterior samples.
    ///
    /// The default is a full clone. Implementations holding large buffers they
    /// do not own may override this to share them instead, as long as the copy
    /// is never changed by later resampling of `self`.
    fn copy_sample(&self) -> Self {
        self.clone()
    }

    /// Resample, then return a copy of the new state.
    fn resample_and_copy<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        data: &MaskedData<Self::Datum>,
    ) -> Result<Self> {
        self.resample(rng, data)?;
        Ok(self.copy_sample())
    }
}

/// Mean field variational inference over the parameters.
pub trait MeanField: Distribution {
    /// Elementwise expectation of the log likelihood of `x` under the current
    /// variational distribution of the parameters.
    fn expected_log_likelihood(&self, x: &MaskedData<Self::Datum>) -> Result<MaskedData<f64>>;

    /// Update the variational parameters from weighted observations.
    ///
    /// `weights` has one entry per element of `data` (masked ones included) and
    /// is used as fractional, expected sufficient-statistic counts.
    fn meanfield_update(&mut self, data: &MaskedData<Self::Datum>, weights: &[f64]) -> Result<()>;

    /// This factor's contribution to the variational lower bound.
    fn get_vlb(&self) -> Result<f64> {
        Err(BayesError::unimplemented::<Self>("get_vlb"))
    }
}

/// Marginal likelihood with the parameters integrated out against the prior.
pub trait Collapsed: Distribution {
    fn log_marginal_likelihood(&self, data: &MaskedData<Self::Datum>) -> Result<f64>;

    /// Log posterior predictive density of `newdata` having observed `olddata`.
    fn log_predictive(
        &self,
        newdata: &MaskedData<Self::Datum>,
        olddata: &MaskedData<Self::Datum>,
    ) -> Result<f64>
    where
        Self::Datum: Clone,
    {
        if olddata.count_observed() == 0 {
            return self.log_marginal_likelihood(newdata);
        }
        let combined = combine_data(&[newdata, olddata]);
        Ok(self.log_marginal_likelihood(&combined)? - self.log_marginal_likelihood(olddata)?)
    }

    fn predictive(
        &self,
        newdata: &MaskedData<Self::Datum>,
        olddata: &MaskedData<Self::Datum>,
    ) -> Result<f64>
    where
        Self::Datum: Clone,
    {
        Ok(self.log_predictive(newdata, olddata)?.exp())
    }
}

/// Point estimation by maximum likelihood.
pub trait MaxLikelihood: Distribution {
    /// Set the parameters to their maximum likelihood values.
    ///
    /// `weights` defaults to one per entry.
    fn max_likelihood(
        &mut self,
        data: &MaskedData<Self::Datum>,
        weights: Option<&[f64]>,
    ) -> Result<()>;

    /// Build a new instance at the maximum likelihood estimate, with
    /// hyperparameters chosen from the data in an empirical Bayes fashion.
    fn max_likelihood_constructor(
        _data: &MaskedData<Self::Datum>,
        _weights: Option<&[f64]>,
    ) -> Result<Self>
    where
        Self: Sized,
    {
        Err(BayesError::unimplemented::<Self>("max_likelihood_constructor"))
    }

    /// Maximum likelihood including the prior pseudo-observations, for MAP EM.
    fn max_likelihood_with_prior(
        &mut self,
        _data: &MaskedData<Self::Datum>,
        _weights: Option<&[f64]>,
    ) -> Result<()> {
        Err(BayesError::unimplemented::<Self>("max_likelihood_with_prior"))
    }
}

/// Maximum a posteriori point estimation.
pub trait Map: Distribution {
    /// Set the parameters to their MAP values: the (weighted) likelihood plus
    /// the prior pseudocounts.
    fn map(&mut self, data: &MaskedData<Self::Datum>, weights: Option<&[f64]>) -> Result<()>;
}
