pub mod ahma_config;
