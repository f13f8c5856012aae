//! Result type alias for renumber

use super::errors::RenumberError;

/// Result type alias for renumber operations
///
/// # Examples
///
/// ```
/// use renumber::domain::result::Result;
/// use renumber::domain::errors::RenumberError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RenumberError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RenumberError>;
