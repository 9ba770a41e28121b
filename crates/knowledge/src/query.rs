//! Query validation and the semicolon batch convention.

use docqa_core::{AppError, AppResult};

/// Separates questions typed into a single input.
pub const QUERY_DELIMITER: char = ';';

/// Split user input into a query batch.
///
/// Segments are trimmed and empty ones dropped, so `"What is X?;  ;What is Y?"`
/// yields two queries. The result may be empty.
pub fn parse_query_batch(input: &str) -> Vec<String> {
    input
        .split(QUERY_DELIMITER)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trimmed query, or `InvalidQuery` when blank.
pub fn validate_query(query: &str) -> AppResult<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidQuery(
            "query is empty or whitespace-only".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Trim every query and drop the blank ones, keeping order.
///
/// Fails with `InvalidQuery` when nothing is left.
pub fn normalize_batch<S: AsRef<str>>(queries: &[S]) -> AppResult<Vec<String>> {
    let normalized: Vec<String> = queries
        .iter()
        .filter_map(|q| validate_query(q.as_ref()).ok())
        .map(str::to_string)
        .collect();

    if normalized.is_empty() {
        return Err(AppError::InvalidQuery(
            "no non-empty questions in batch".to_string(),
        ));
    }

    if normalized.len() < queries.len() {
        tracing::debug!(
            "Dropped {} blank queries from batch",
            queries.len() - normalized.len()
        );
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_empty_segments() {
        assert_eq!(
            parse_query_batch("What is X?;  ;What is Y?"),
            vec!["What is X?", "What is Y?"]
        );
    }

    #[test]
    fn test_parse_single_question() {
        assert_eq!(parse_query_batch("  Apa itu AI?  "), vec!["Apa itu AI?"]);
    }

    #[test]
    fn test_parse_only_delimiters() {
        assert!(parse_query_batch(";;  ; ").is_empty());
        assert!(parse_query_batch("").is_empty());
    }

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query("  hello ").unwrap(), "hello");
        assert!(matches!(
            validate_query("  "),
            Err(AppError::InvalidQuery(_))
        ));
        assert!(validate_query("\t\n").is_err());
    }

    #[test]
    fn test_normalize_batch_keeps_order() {
        let batch = normalize_batch(&["b", " ", " a "]).unwrap();
        assert_eq!(batch, vec!["b", "a"]);
    }

    #[test]
    fn test_normalize_batch_all_blank() {
        let result = normalize_batch(&["", "   "]);
        assert!(matches!(result, Err(AppError::InvalidQuery(_))));

        let empty: [&str; 0] = [];
        assert!(normalize_batch(&empty).is_err());
    }
}
