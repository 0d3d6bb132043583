pub mod fan_out;
pub mod fetcher;
pub mod pipeline;
