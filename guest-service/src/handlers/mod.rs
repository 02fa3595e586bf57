pub mod export_handlers;
pub mod family_handlers;
pub mod stats_handlers;
