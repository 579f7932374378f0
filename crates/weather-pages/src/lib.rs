pub mod config;
pub mod controller;
pub mod demo;
pub mod error;
pub mod model;
pub mod normalize;
pub mod providers;
pub mod render;
pub mod units;
