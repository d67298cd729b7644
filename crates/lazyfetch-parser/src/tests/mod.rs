mod java_parser_lossless_tests;
mod java_token_stream_tests;
mod parse_result_tests;
mod utils;
