pub mod ahma_error;
pub mod utils;
