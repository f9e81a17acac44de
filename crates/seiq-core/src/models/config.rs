//! Fixed pipeline constants.

/// Characters not allowed in output filenames; each is replaced with '_'.
pub const RESERVED_FILENAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// A page whose stripped text is shorter than this is treated as near-blank.
pub const NEAR_BLANK_THRESHOLD: usize = 100;

/// Suffix appended to every output filename, before the extension.
pub const FILENAME_SUFFIX: &str = "請求書";

/// Counterparty name used when no honorific line is found on a page.
pub const UNKNOWN_COMPANY: &str = "不明";
