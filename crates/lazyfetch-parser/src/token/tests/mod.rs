mod java_token_kind_tests;
mod keyword_tests;
