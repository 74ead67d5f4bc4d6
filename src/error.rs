use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BayesError {
    /// A provided capability method was called on a type that does not override it.
    #[error("{capability} is not implemented for {type_name}")]
    Unimplemented {
        capability: &'static str,
        type_name: &'static str,
    },
    #[error("length mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// The model reported a log likelihood that cannot be compared after an EM step.
    #[error("log likelihood is not finite after EM iteration {iteration}: {value}")]
    NonFiniteLikelihood { iteration: u64, value: f64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BayesError {
    pub(crate) fn unimplemented<T: ?Sized>(capability: &'static str) -> Self {
        BayesError::Unimplemented {
            capability,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Whether this error signals a capability the implementing type does not provide.
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, BayesError::Unimplemented { .. })
    }
}

pub type Result<T> = std::result::Result<T, BayesError>;
