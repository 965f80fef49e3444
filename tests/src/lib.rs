//! Host-based integration tests for the Morse trainer core

pub mod testbench;

mod timing_tests;
mod pin_adapter_tests;
mod task_tests;
