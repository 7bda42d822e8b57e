//! Definition-level outlines of source files.
//!
//! Keeps only the lines that declare something (functions, types, classes,
//! modules) so a whole tree fits in a plan's context.

use regex::Regex;
use std::sync::OnceLock;

fn definition_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            // Rust
            r"^\s*(pub(\([^)]*\))?\s+)?(async\s+)?(unsafe\s+)?",
            r"(fn|struct|enum|trait|impl|type|mod|const|static)\b",
            r"|^\s*macro_rules!",
            // TypeScript / JavaScript
            r"|^\s*(export\s+)?(default\s+)?(abstract\s+)?(async\s+)?",
            r"(function|class|interface|type|enum)\b",
            // Python
            r"|^\s*(async\s+)?def\s+\w+|^\s*class\s+\w+",
            // Go
            r"|^func\s|^type\s+\w+\s",
        ))
        .expect("definition pattern is valid")
    })
}

/// Extract the definition lines of `source`, or `None` when it declares nothing.
pub fn extract_definitions(source: &str) -> Option<String> {
    let pattern = definition_pattern();
    let lines: Vec<&str> = source
        .lines()
        .filter(|line| pattern.is_match(line))
        .map(|line| line.trim_end().trim_end_matches('{').trim_end())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_rust_definitions() {
        let source = r#"
use std::fmt;

pub struct Plan {
    id: String,
}

impl Plan {
    pub async fn create(name: &str) -> Self {
        let x = 1;
        todo!()
    }
}
"#;
        let defs = extract_definitions(source).unwrap();
        assert_eq!(
            defs,
            "pub struct Plan\nimpl Plan\n    pub async fn create(name: &str) -> Self"
        );
    }

    #[test]
    fn test_extracts_python_and_typescript() {
        let py = "class Loader:\n    def load(self):\n        return 1\n";
        assert_eq!(
            extract_definitions(py).unwrap(),
            "class Loader:\n    def load(self):"
        );

        let ts = "export default function main() {\n  return 1;\n}\nconsole.log(main());\n";
        assert_eq!(extract_definitions(ts).unwrap(), "export default function main()");
    }

    #[test]
    fn test_plain_text_has_no_definitions() {
        assert!(extract_definitions("just some notes\nabout things\n").is_none());
    }
}
