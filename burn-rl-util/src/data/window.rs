use burn::prelude::*;

use crate::error::{self, Error};

#[derive(Config, Debug)]
pub struct StateWindowingConfig {
    pub window_len: usize,
}

impl StateWindowingConfig {
    pub fn init(&self) -> error::Result<StateWindowing> {
        if self.window_len == 0 {
            return Err(Error::InvalidWindow(self.window_len));
        }
        Ok(StateWindowing {
            window_len: self.window_len,
        })
    }
}

#[derive(Clone, Debug)]
pub struct StateWindowing {
    window_len: usize,
}

impl StateWindowing {
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn forward<B: Backend, const D: usize, const D2: usize>(
        &self,
        observations: Tensor<B, D>,
    ) -> error::Result<Tensor<B, D2>> {
        state_windowing(observations, self.window_len)
    }
}

/// Output shape is `[T, window_len, ...]`, lags ordered oldest first. Lags before the
/// first observation are zero.
pub fn state_windowing<B: Backend, const D: usize, const D2: usize>(
    observations: Tensor<B, D>,
    window_len: usize,
) -> error::Result<Tensor<B, D2>> {
    if window_len == 0 {
        return Err(Error::InvalidWindow(window_len));
    }
    if D == 0 || D2 != D + 1 {
        return Err(Error::RankMismatch {
            input: D,
            output: D2,
        });
    }

    let steps = observations.dims()[0];
    if window_len > steps {
        tracing::warn!(
            window_len,
            steps,
            "window is longer than the sequence, leading lags are zero filled"
        );
    }

    let lags = (0..window_len)
        .rev()
        .map(|shift| lagged(&observations, shift))
        .collect();
    Ok(Tensor::<B, D>::stack::<D2>(lags, 1))
}

// Row `t` of the result is row `t - shift` of `observations`, or zero when that index is negative.
fn lagged<B: Backend, const D: usize>(observations: &Tensor<B, D>, shift: usize) -> Tensor<B, D> {
    let mut dims = observations.dims();
    let steps = dims[0];
    if shift == 0 {
        return observations.clone();
    }
    if shift >= steps {
        return Tensor::zeros(dims, &observations.device());
    }

    dims[0] = shift;
    let padding = Tensor::zeros(dims, &observations.device());
    let kept = observations.clone().slice([0..steps - shift]);
    Tensor::cat(vec![padding, kept], 0)
}
