//! Integration tests for shalltell

mod cli_test;
mod helpers;
mod playback_test;
