/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `apibench <version>`
pub fn version_line() -> String {
    format!("apibench {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_format() {
        assert_eq!(version_line(), format!("apibench {}", VERSION));
        assert!(VERSION.split('.').count() >= 2);
    }
}
