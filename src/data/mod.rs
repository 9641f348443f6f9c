pub mod export;
pub mod grid;
pub mod metric;
pub mod panel;
pub mod readout;
pub mod recorder;
pub mod sample;
pub mod window;
