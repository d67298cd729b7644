mod argument_rewriter_tests;
mod imports_tests;
mod rewrite_driver_tests;
mod rewrite_property_tests;
mod template_tests;
mod utils;
