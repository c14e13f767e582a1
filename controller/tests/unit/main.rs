//! Integration tests for marathonctl

mod support;
mod test_client;
mod test_run;
