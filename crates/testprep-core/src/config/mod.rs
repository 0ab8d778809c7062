//! Test framework configuration
//!
//! Everything the pipeline needs to know about the test framework it installs:
//! the package, the manifest script, and the bundled config file.

mod jest;

pub use jest::{write_config, CONFIG_FILE, CONFIG_TEMPLATE, TEST_FRAMEWORK_PACKAGE, TEST_SCRIPT};
