pub mod component;
pub mod nn;
pub mod optim;
