/// logging setup (simplelog): terminal logger, optionally combined with a file logger
pub mod logger;
