mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, ExtractionSettings, LoggingSettings, ServerSettings, Settings,
    SourceSettings, StorageSettings,
};
