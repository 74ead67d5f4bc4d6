//! The convergence loop shared by EM and MAP EM.

use log::{debug, warn};

use crate::error::{BayesError, Result};
use crate::model::ModelLikelihood;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmSettings {
    /// Stop once the log likelihood improves by less than this.
    pub tol: f64,
    /// Maximum number of EM steps.
    pub maxiter: u64,
}

impl Default for EmSettings {
    fn default() -> EmSettings {
        EmSettings {
            tol: 1e-1,
            maxiter: 100,
        }
    }
}

impl EmSettings {
    pub fn with_tol(self, tol: f64) -> EmSettings {
        EmSettings { tol, ..self }
    }

    pub fn with_maxiter(self, maxiter: u64) -> EmSettings {
        EmSettings { maxiter, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmStatus {
    Running,
    /// The last step improved the log likelihood by less than `tol`.
    ///
    /// The comparison is signed, so a step that lowers the likelihood also
    /// ends the loop here.
    Converged,
    /// `maxiter` steps ran without meeting the tolerance. The trace is still valid.
    MaxIterReached,
}

impl EmStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, EmStatus::Running)
    }
}

/// Log likelihoods after each EM step and how the loop ended.
#[derive(Debug, Clone, PartialEq)]
pub struct EmTrace {
    pub likelihoods: Vec<f64>,
    pub status: EmStatus,
}

impl EmTrace {
    pub fn converged(&self) -> bool {
        self.status == EmStatus::Converged
    }

    pub fn iterations(&self) -> usize {
        self.likelihoods.len()
    }

    pub fn final_likelihood(&self) -> Option<f64> {
        self.likelihoods.last().copied()
    }
}

/// State machine for the convergence test, fed one log likelihood per step.
#[derive(Debug, Clone)]
pub struct EmLoop {
    settings: EmSettings,
    likelihoods: Vec<f64>,
    status: EmStatus,
}

impl EmLoop {
    pub fn new(settings: EmSettings) -> EmLoop {
        let mut em = EmLoop {
            settings,
            likelihoods: Vec::new(),
            status: EmStatus::Running,
        };
        em.check_maxiter();
        em
    }

    pub fn status(&self) -> EmStatus {
        self.status
    }

    pub fn likelihoods(&self) -> &[f64] {
        &self.likelihoods
    }

    /// Record the log likelihood after one completed step.
    ///
    /// Once the loop has finished, further values are ignored and the terminal
    /// status is returned unchanged.
    pub fn advance(&mut self, log_likelihood: f64) -> EmStatus {
        if self.status.is_finished() {
            return self.status;
        }
        self.likelihoods.push(log_likelihood);
        let iteration = self.likelihoods.len();
        debug!("EM iteration {iteration}: log likelihood {log_likelihood}");

        if let [.., previous, last] = self.likelihoods[..] {
            if last - previous < self.settings.tol {
                debug!("EM converged after {iteration} iterations");
                self.status = EmStatus::Converged;
                return self.status;
            }
        }
        self.check_maxiter();
        self.status
    }

    fn check_maxiter(&mut self) {
        if self.likelihoods.len() as u64 >= self.settings.maxiter {
            warn!("EM fit reached maxiter of {}", self.settings.maxiter);
            self.status = EmStatus::MaxIterReached;
        }
    }

    pub fn into_trace(self) -> EmTrace {
        EmTrace {
            likelihoods: self.likelihoods,
            status: self.status,
        }
    }
}

/// Run `step` on `model` until the log likelihood stops improving.
///
/// The model is not re-initialized; each call continues from the current
/// parameters.
pub fn fit_em<M, F>(model: &mut M, settings: EmSettings, mut step: F) -> Result<EmTrace>
where
    M: ModelLikelihood + ?Sized,
    F: FnMut(&mut M) -> Result<()>,
{
    let mut em = EmLoop::new(settings);
    while !em.status().is_finished() {
        step(model)?;
        let value = model.log_likelihood()?;
        if !value.is_finite() {
            return Err(BayesError::NonFiniteLikelihood {
                iteration: em.likelihoods().len() as u64 + 1,
                value,
            });
        }
        em.advance(value);
    }
    Ok(em.into_trace())
}
