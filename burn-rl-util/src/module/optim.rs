use burn::{
    module::AutodiffModule,
    optim::{GradientsParams, Optimizer},
    tensor::backend::AutodiffBackend,
};

use crate::{
    error::{Error, Result},
    module::nn::target_model::WithTarget,
};

/// Wraps an optimizer so that every `update_interval` steps the target model is
/// soft updated towards the freshly optimized online model.
pub struct TargetUpdatingOptimizer<O> {
    optim: O,
    tau: f64,
    update_interval: usize,
    steps: usize,
}

impl<O> TargetUpdatingOptimizer<O> {
    pub fn new(optim: O, tau: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&tau) {
            return Err(Error::InvalidTau(tau));
        }
        Ok(Self {
            optim,
            tau,
            update_interval: 1,
            steps: 0,
        })
    }

    pub fn with_update_interval(mut self, update_interval: usize) -> Self {
        self.update_interval = update_interval.max(1);
        self
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn step<B, M>(
        &mut self,
        lr: f64,
        module: WithTarget<B, M>,
        grads: GradientsParams,
    ) -> Result<WithTarget<B, M>>
    where
        B: AutodiffBackend,
        M: AutodiffModule<B>,
        O: Optimizer<M, B>,
    {
        let optim = &mut self.optim;
        let module = module.map_model(|model| optim.step(lr, model, grads));
        self.steps += 1;

        if self.steps % self.update_interval == 0 {
            tracing::trace!(step = self.steps, tau = self.tau, "updating target model");
            module.update_target_model(self.tau)
        } else {
            Ok(module)
        }
    }
}
