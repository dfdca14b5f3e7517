//! Client-side input checks, run before anything is sent to the server.

/// Lower-cased extension after the last `.`, if any.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

pub fn is_valid_file_extension(file_name: &str, allowed: &[String]) -> bool {
    match file_extension(file_name) {
        Some(ext) => allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

pub fn is_valid_file_size(size_bytes: u64, max_bytes: u64) -> bool {
    size_bytes <= max_bytes
}

pub fn is_in_range(value: &str, min: f64, max: f64) -> bool {
    match value.trim().parse::<f64>() {
        Ok(n) => n >= min && n <= max,
        Err(_) => false,
    }
}

pub fn is_valid_year(value: &str) -> bool {
    is_in_range(value, 2000.0, 2100.0)
}

pub fn is_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// `local@domain.tld` with no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["xlsx".into(), "xls".into(), "csv".into()]
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("report.XLSX").as_deref(), Some("xlsx"));
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("broken."), None);
    }

    #[test]
    fn test_upload_checks() {
        assert!(is_valid_file_extension("budget.csv", &allowed()));
        assert!(is_valid_file_extension("Budget.Xls", &allowed()));
        assert!(!is_valid_file_extension("notes.txt", &allowed()));
        assert!(is_valid_file_size(10 * 1024 * 1024, 10 * 1024 * 1024));
        assert!(!is_valid_file_size(10 * 1024 * 1024 + 1, 10 * 1024 * 1024));
    }

    #[test]
    fn test_ranges() {
        assert!(is_valid_year("2024"));
        assert!(!is_valid_year("1999"));
        assert!(!is_valid_year("year"));
        assert!(is_in_range(" 4.5 ", 0.0, 5.0));
        assert!(!is_required("   "));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("admin@univ.ac.kr"));
        assert!(!is_valid_email("admin@localhost"));
        assert!(!is_valid_email("ad min@univ.ac.kr"));
        assert!(!is_valid_email("@univ.ac.kr"));
    }
}
