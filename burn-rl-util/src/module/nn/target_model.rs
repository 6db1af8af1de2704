use burn::{
    module::{ModuleMapper, ModuleVisitor, ParamId},
    prelude::*,
};
use std::{any::Any, marker::PhantomData};

use crate::error::{Error, Result};

/// An online model paired with a target copy that follows it slowly.
#[derive(Module, Debug)]
pub struct WithTarget<B: Backend, T: Module<B>> {
    pub model: T,
    pub target: T,
    backend: PhantomData<B>,
}

// Float parameter in traversal order. Boxed so tensors of different rank share one list.
struct Captured {
    dims: Vec<usize>,
    tensor: Box<dyn Any>,
}

struct ParameterCollector<B: Backend> {
    parameters: Vec<Captured>,
    backend: PhantomData<B>,
}

impl<B: Backend> ModuleVisitor<B> for ParameterCollector<B> {
    fn visit_float<const D: usize>(&mut self, _id: ParamId, tensor: &Tensor<B, D>) {
        self.parameters.push(Captured {
            dims: tensor.dims().to_vec(),
            tensor: Box::new(tensor.clone()),
        });
    }
}

fn collect_parameters<B: Backend, M: Module<B>>(module: &M) -> Vec<Captured> {
    let mut collector = ParameterCollector::<B> {
        parameters: Vec::new(),
        backend: PhantomData,
    };
    module.visit(&mut collector);
    collector.parameters
}

fn check_parameters(model: &[Captured], target: &[Captured]) -> Result<()> {
    let matching = model.len() == target.len()
        && model
            .iter()
            .zip(target.iter())
            .all(|(model, target)| model.dims == target.dims);
    if matching {
        Ok(())
    } else {
        Err(Error::ParameterMismatch {
            model: model.len(),
            target: target.len(),
        })
    }
}

struct SoftUpdater<B: Backend> {
    source: std::vec::IntoIter<Captured>,
    tau: f64,
    backend: PhantomData<B>,
}

impl<B: Backend> ModuleMapper<B> for SoftUpdater<B> {
    fn map_float<const D: usize>(&mut self, _id: ParamId, tensor: Tensor<B, D>) -> Tensor<B, D> {
        // Both parameter lists are checked against each other before mapping starts.
        match self
            .source
            .next()
            .and_then(|captured| captured.tensor.downcast::<Tensor<B, D>>().ok())
        {
            Some(source) => (tensor * (1.0 - self.tau) + *source * self.tau).detach(),
            None => tensor,
        }
    }
}

/// Polyak update of every float parameter of `target` towards `source`:
/// `target = tau * source + (1 - tau) * target`.
///
/// Parameters are matched in traversal order, so `target` does not need to be a clone
/// of `source`, only to share its architecture.
pub fn soft_update<B: Backend, M: Module<B>>(source: &M, target: M, tau: f64) -> Result<M> {
    if !(0.0..=1.0).contains(&tau) {
        return Err(Error::InvalidTau(tau));
    }
    let source = collect_parameters::<B, M>(source);
    check_parameters(&source, &collect_parameters::<B, M>(&target))?;
    tracing::debug!(tau, parameters = source.len(), "soft updating target model");

    let mut updater = SoftUpdater::<B> {
        source: source.into_iter(),
        tau,
        backend: PhantomData,
    };
    Ok(target.map(&mut updater))
}

impl<B: Backend, T: Module<B>> WithTarget<B, T> {
    pub fn init(model: T) -> Self {
        let target = model.clone();
        WithTarget {
            model,
            target,
            backend: PhantomData,
        }
    }

    /// Pairs `model` with a separately built `target` of the same architecture.
    pub fn from_parts(model: T, target: T) -> Result<Self> {
        check_parameters(
            &collect_parameters::<B, T>(&model),
            &collect_parameters::<B, T>(&target),
        )?;
        Ok(WithTarget {
            model,
            target,
            backend: PhantomData,
        })
    }

    pub fn update_target_model(self, tau: f64) -> Result<Self> {
        let target = soft_update::<B, T>(&self.model, self.target, tau)?;
        Ok(WithTarget {
            model: self.model,
            target,
            backend: PhantomData,
        })
    }

    pub fn hard_update(self) -> Self {
        let target = self.model.clone();
        WithTarget {
            model: self.model,
            target,
            backend: PhantomData,
        }
    }

    pub fn map_model<F: FnOnce(T) -> T>(self, f: F) -> Self {
        WithTarget {
            model: f(self.model),
            target: self.target,
            backend: PhantomData,
        }
    }
}
