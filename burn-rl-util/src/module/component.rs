use std::marker::PhantomData;

use burn::{
    prelude::Backend,
    tensor::{BasicOps, Tensor, TensorKind},
};

/// A batch of inputs whose leading axis indexes the samples.
pub trait Batch {
    fn batch_size(&self) -> usize;
}

impl<T> Batch for Vec<T> {
    fn batch_size(&self) -> usize {
        self.len()
    }
}

impl<B, const D: usize, K> Batch for Tensor<B, D, K>
where
    B: Backend,
    K: TensorKind<B> + BasicOps<B>,
{
    fn batch_size(&self) -> usize {
        self.dims().first().copied().unwrap_or_default()
    }
}

/// Batched state-value estimates.
///
/// `v_batch` must return exactly one value per input observation, in input order.
pub trait Value<B: Backend> {
    type OBatch: Batch;

    fn v_batch(&self, observations: &Self::OBatch) -> Tensor<B, 1>;
}

/// Adapts a closure into a [`Value`] critic.
pub struct ValueFn<O, F> {
    evaluate: F,
    observations: PhantomData<fn(&O)>,
}

impl<O, F> ValueFn<O, F> {
    pub fn new(evaluate: F) -> Self {
        Self {
            evaluate,
            observations: PhantomData,
        }
    }
}

impl<B, O, F> Value<B> for ValueFn<O, F>
where
    B: Backend,
    O: Batch,
    F: Fn(&O) -> Tensor<B, 1>,
{
    type OBatch = O;

    fn v_batch(&self, observations: &O) -> Tensor<B, 1> {
        (self.evaluate)(observations)
    }
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;

    use super::*;

    #[test]
    fn test_batch_size() {
        let device = &Default::default();
        let states = Tensor::<NdArray, 2>::zeros([5, 3], device);
        assert_eq!(states.batch_size(), 5);
        assert_eq!(vec![[0.0; 4]; 7].batch_size(), 7);
    }

    #[test]
    fn test_value_fn() {
        let device = &Default::default();
        let critic = ValueFn::<Tensor<NdArray, 2>, _>::new(|states: &Tensor<NdArray, 2>| {
            states.clone().sum_dim(1).squeeze::<1>(1)
        });
        let states = Tensor::<NdArray, 2>::from_floats([[1.0, 2.0], [3.0, 4.0]], device);
        let values = critic.v_batch(&states).into_data().to_vec::<f32>().unwrap();
        assert_eq!(values, vec![3.0, 7.0]);
    }
}
