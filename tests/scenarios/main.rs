//! Scenario-based tests for blog-pipeline

mod helpers;

mod failure_handling;
mod iteration_loop;
mod output;
mod research;
