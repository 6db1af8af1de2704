use burn::{nn::loss::Reduction, prelude::*};

use crate::error::{self, Error};

#[derive(Config, Debug)]
pub struct HuberLossConfig {
    #[config(default = 1.0)]
    pub clip_value: f64,
}

impl HuberLossConfig {
    pub fn init(&self) -> error::Result<HuberLoss> {
        check_clip_value(self.clip_value)?;
        Ok(HuberLoss {
            clip_value: self.clip_value,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HuberLoss {
    clip_value: f64,
}

impl HuberLoss {
    pub fn forward<B: Backend, const D: usize>(
        &self,
        y_true: Tensor<B, D>,
        y_pred: Tensor<B, D>,
        reduction: Reduction,
    ) -> error::Result<Tensor<B, 1>> {
        let loss = huber_loss(y_true, y_pred, self.clip_value)?;
        Ok(match reduction {
            Reduction::Mean | Reduction::Auto => loss.mean(),
            Reduction::Sum => loss.sum(),
        })
    }
}

fn check_clip_value(clip_value: f64) -> error::Result<()> {
    if clip_value.is_nan() || clip_value <= 0.0 {
        Err(Error::InvalidClipValue(clip_value))
    } else {
        Ok(())
    }
}

/// Element-wise Huber loss: `0.5 * x^2` for `|x| < clip_value`, and
/// `clip_value * (|x| - 0.5 * clip_value)` beyond it, where `x = y_true - y_pred`.
///
/// An infinite `clip_value` gives the plain squared loss.
pub fn huber_loss<B: Backend, const D: usize>(
    y_true: Tensor<B, D>,
    y_pred: Tensor<B, D>,
    clip_value: f64,
) -> error::Result<Tensor<B, D>> {
    check_clip_value(clip_value)?;

    let x = y_true - y_pred;
    let squared_loss = (x.clone() * x.clone()).mul_scalar(0.5);
    if clip_value.is_infinite() {
        return Ok(squared_loss);
    }

    let x = x.abs();
    let condition = x.clone().lower_elem(clip_value);
    let linear_loss = x.sub_scalar(0.5 * clip_value).mul_scalar(clip_value);
    Ok(linear_loss.mask_where(condition, squared_loss))
}
