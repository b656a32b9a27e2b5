// Adapters - External system implementations

pub mod memory_log;
pub mod probe_ffprobe;
pub mod probe_json;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use memory_log::MemoryLogAdapter;
pub use probe_ffprobe::FfprobeAdapter;
pub use probe_json::ProbeJsonAdapter;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::TracingLogAdapter;
