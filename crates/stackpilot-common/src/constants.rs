//! System-wide constants and defaults.

/// Environment key listing the compose files to use, comma separated.
pub const COMPOSE_FILES_KEY: &str = "COMPOSE_FILES";

/// Compose file used when the environment file does not set [`COMPOSE_FILES_KEY`].
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.server.yml";

/// Separator between entries of [`COMPOSE_FILES_KEY`].
pub const COMPOSE_FILES_SEPARATOR: char = ',';

/// Default environment file, relative to the project root.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Default orchestration binary.
pub const DEFAULT_COMPOSE_BINARY: &str = "docker compose";

/// Placeholder for inventory fields that could not be determined.
pub const UNKNOWN: &str = "unknown";

