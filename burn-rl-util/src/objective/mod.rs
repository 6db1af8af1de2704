pub mod advantage;
pub mod huber;
pub mod temporal_difference;
