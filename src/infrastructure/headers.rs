use std::collections::HashSet;

/// Give every column a usable, unique name.
///
/// Blank headers become `Unnamed: <i>`; repeats of a name get a `.1`, `.2`, ...
/// suffix in order of appearance.
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());

    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        out.push(name);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        normalize_headers(raw.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_blank_headers() {
        assert_eq!(headers(&["a", "", " "]), vec!["a", "Unnamed: 1", "Unnamed: 2"]);
    }

    #[test]
    fn test_repeated_headers() {
        assert_eq!(headers(&["x", "x", "x"]), vec!["x", "x.1", "x.2"]);
        assert_eq!(headers(&["x", "x.1", "x"]), vec!["x", "x.1", "x.2"]);
    }
}
