pub mod date_range;
pub mod price_record;
pub mod run_summary;
pub mod session;
pub mod symbol_batch;
