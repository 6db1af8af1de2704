use burn::{prelude::Backend, tensor::Tensor};

/// One-step TD residuals `reward[i] + discount_factor * value[i + 1] - value[i]`.
///
/// `value` holds one estimate per state, so it is exactly one entry longer than
/// `reward`, which must not be empty.
pub fn temporal_difference<B: Backend>(
    reward: Tensor<B, 1>,
    value: Tensor<B, 1>,
    discount_factor: f64,
) -> Tensor<B, 1> {
    let n = reward.dims()[0];
    let value_before = value.clone().slice([0..n]);
    let value_after = value.slice([1..n + 1]);
    reward + value_after * discount_factor - value_before
}

pub fn temporal_difference_from_values(
    reward: &[f64],
    value: &[f64],
    discount_factor: f64,
) -> Vec<f64> {
    reward
        .iter()
        .zip(value.windows(2))
        .map(|(reward, value)| reward + discount_factor * value[1] - value[0])
        .collect()
}
