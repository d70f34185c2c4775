pub mod classify;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod model;
pub mod normalize;
pub mod report;
pub mod spj;
pub mod stats;
pub mod values;
