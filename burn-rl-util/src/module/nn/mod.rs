pub mod target_model;
