//! Default values and fixed constants.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

/// Prefix of the include directive, including the separating space.
pub const SOURCE_DIRECTIVE: &str = "source ";

/// Maximum nesting of `source` directives.
pub const MAX_INCLUDE_DEPTH: usize = 64;

/// System-wide directories searched by [`crate::locate::find_config`], in order.
pub const SYSTEM_CONFIG_DIRS: [&str; 3] = ["/etc", "/usr/local/etc", "/usr/pkg/etc"];

/// File name the `check` command looks for when no path is given.
pub const UPDATER_CONFIG_NAME: &str = "dyndns.conf";
