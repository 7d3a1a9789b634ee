//! Gate settings loaded from TOML and `VIRTUOHUB_GATE_*` environment variables.

pub use virtuohub_conf::*;
