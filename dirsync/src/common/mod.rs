pub mod blocks;
pub mod cli;
pub mod compare;
pub mod config;
pub mod prove;
pub mod scan;
pub mod sync;
pub mod utils;
