//! Identifier helpers shared by the parser and composer

/// Upper-case the first character, leaving the rest untouched
///
/// # Examples
/// ```
/// use aws_schema_composer_common::upper_first;
///
/// assert_eq!(upper_first("s3"), "S3");
/// assert_eq!(upper_first("dynamoDB"), "DynamoDB");
/// assert_eq!(upper_first(""), "");
/// ```
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest untouched
///
/// # Examples
/// ```
/// use aws_schema_composer_common::lower_first;
///
/// assert_eq!(lower_first("ListBuckets"), "listBuckets");
/// assert_eq!(lower_first("S3"), "s3");
/// ```
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
