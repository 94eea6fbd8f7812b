mod pmtiles_cli_engine;

pub use pmtiles_cli_engine::PmtilesCliEngine;
