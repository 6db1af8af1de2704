use burn::prelude::*;

use super::temporal_difference::temporal_difference_from_values;
use crate::{
    error::{self, Error},
    module::component::{Batch, Value},
};

#[derive(Config, Debug)]
pub struct GeneralizedAdvantageEstimatorConfig {
    #[config(default = 0.99)]
    pub discount_factor: f64,
    #[config(default = 0.95)]
    pub trace_decay: f64,
}

impl GeneralizedAdvantageEstimatorConfig {
    pub fn init(&self) -> GeneralizedAdvantageEstimator {
        for (parameter, value) in [
            ("discount_factor", self.discount_factor),
            ("trace_decay", self.trace_decay),
        ] {
            if !(0.0..=1.0).contains(&value) {
                tracing::warn!(parameter, value, "expected a value in the interval [0,1]");
            }
        }
        GeneralizedAdvantageEstimator {
            discount_factor: self.discount_factor,
            trace_decay: self.trace_decay,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GeneralizedAdvantageEstimator {
    discount_factor: f64,
    trace_decay: f64,
}

impl GeneralizedAdvantageEstimator {
    pub fn compute<B: Backend, V: Value<B>>(
        &self,
        critic: &V,
        states: &V::OBatch,
        reward: &[f64],
    ) -> error::Result<Vec<f64>> {
        generalized_advantage_estimate(
            critic,
            states,
            reward,
            self.discount_factor,
            self.trace_decay,
        )
    }
}

/// `states` includes the final state, so it holds one entry more than `reward`.
pub fn generalized_advantage_estimate<B: Backend, V: Value<B>>(
    critic: &V,
    states: &V::OBatch,
    reward: &[f64],
    discount_factor: f64,
    trace_decay: f64,
) -> error::Result<Vec<f64>> {
    let n_states = states.batch_size();
    if n_states == 0 || reward.len() != n_states - 1 {
        return Err(Error::TrajectoryLength {
            states: n_states,
            rewards: reward.len(),
        });
    }

    let value = critic.v_batch(states);
    let n_values = value.dims()[0];
    if n_values != n_states {
        return Err(Error::ValueCount {
            expected: n_states,
            actual: n_values,
        });
    }
    if reward.is_empty() {
        return Ok(Vec::new());
    }
    tracing::trace!(
        steps = reward.len(),
        discount_factor,
        trace_decay,
        "computing generalized advantage estimate"
    );

    let value = value
        .into_data()
        .convert::<f64>()
        .to_vec::<f64>()
        .map_err(|err| Error::Data(format!("{err:?}")))?;
    let delta = temporal_difference_from_values(reward, &value, discount_factor);

    Ok(advantages_from_residuals(
        &delta,
        discount_factor,
        trace_decay,
    ))
}

pub fn advantages_from_residuals(delta: &[f64], discount_factor: f64, trace_decay: f64) -> Vec<f64> {
    let decay = discount_factor * trace_decay;
    let mut advantages = vec![0.0; delta.len()];
    let mut running = 0.0;
    for (advantage, delta) in advantages.iter_mut().zip(delta.iter()).rev() {
        running = delta + decay * running;
        *advantage = running;
    }
    advantages
}
