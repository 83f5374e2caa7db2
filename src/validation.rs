//! Input validation for caller-supplied identifiers and free text.
//!
//! Entry ids, project ids, and approver ids end up in file path
//! construction; these checks reject path traversal and other unsafe
//! input before it reaches the store.

use anyhow::{bail, Result};

/// Maximum allowed length for identifiers (entries, projects, approvers).
pub const MAX_ID_LENGTH: usize = 128;

/// Maximum allowed length for rejection reasons and notes.
pub const MAX_REASON_LENGTH: usize = 500;

/// Names that cannot be used as identifiers (case-insensitive).
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Validates that an identifier is safe for use in file paths.
///
/// An identifier is valid if it is non-empty, at most [`MAX_ID_LENGTH`]
/// characters, contains only alphanumeric characters, dashes, and
/// underscores, and does not use a reserved system name.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("identifier cannot be empty");
    }

    if id.len() > MAX_ID_LENGTH {
        bail!(
            "identifier too long: {} characters (max {})",
            id.len(),
            MAX_ID_LENGTH
        );
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        bail!("identifier '{id}' contains invalid characters. Use only alphanumeric characters, dashes (-), and underscores (_)");
    }

    if RESERVED_NAMES.contains(&id.to_lowercase().as_str()) {
        bail!("identifier '{id}' uses a reserved name");
    }

    Ok(())
}

/// Validates that reason/note text is within acceptable length limits.
pub fn validate_reason(reason: &str) -> Result<()> {
    if reason.len() > MAX_REASON_LENGTH {
        bail!(
            "text too long: {} characters (max {})",
            reason.len(),
            MAX_REASON_LENGTH
        );
    }

    Ok(())
}

/// Clap value parser for identifier arguments.
pub fn clap_id_validator(s: &str) -> Result<String, String> {
    validate_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for reason/note arguments.
pub fn clap_reason_validator(s: &str) -> Result<String, String> {
    validate_reason(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
