pub mod audit;
pub mod controls;
pub mod header;
pub mod pipeline;
