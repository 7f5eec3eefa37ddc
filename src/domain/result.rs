//! Result type alias for the ETL run

use super::errors::EtlError;

/// Result type alias for ETL operations
///
/// # Examples
///
/// ```
/// use attack_etl::domain::result::Result;
/// use attack_etl::domain::errors::EtlError;
///
/// fn failing_function() -> Result<()> {
///     Err(EtlError::Load("nothing to write".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<usize> {
            Ok(4)
        }

        let value = inner()?;
        assert_eq!(value, 4);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<()> = Err(EtlError::Interrupted);
        assert!(result.is_err());
    }
}
