use crate::engine::ViterbiDecoder;
use crate::error::{HmmError, Result};
use crate::model::Model;
use crate::traits::PathScore;

/// Where a decoder's initial-state distribution comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum StartDistribution {
    /// An explicit vector of N probabilities.
    Explicit(Vec<f64>),
    /// Row `s` of the transition matrix, for models whose state `s` is a
    /// reserved start state.
    TransitionRow(usize),
}

impl StartDistribution {
    fn resolve(&self, model: &Model) -> Result<Vec<f64>> {
        match self {
            StartDistribution::Explicit(p) => Ok(p.clone()),
            StartDistribution::TransitionRow(s) => model
                .transitions()
                .get(*s)
                .cloned()
                .ok_or_else(|| HmmError::shape("transition matrix rows", s + 1, model.n_states())),
        }
    }
}

pub struct DecoderBuilder<'m> {
    model: &'m Model,
    start: Option<StartDistribution>,
}

impl<'m> DecoderBuilder<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self { model, start: None }
    }

    pub fn start(mut self, start: StartDistribution) -> Self {
        self.start = Some(start);
        self
    }

    /// There is no default start distribution; one must be supplied.
    pub fn build<S: PathScore>(self) -> Result<ViterbiDecoder<S>> {
        let start = self.start.ok_or(HmmError::MissingStart)?;
        let start = start.resolve(self.model)?;
        ViterbiDecoder::from_matrices(self.model.transitions(), self.model.emissions(), &start)
    }
}
