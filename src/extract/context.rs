//! Specific context extraction: libraries, functions, modules and keywords.
//!
//! This is what lets a post name the concrete things that were worked on
//! without any hard-coded knowledge of the project's stack.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::diff::added_lines;
use crate::data::CommitRecord;

/// Maximum number of libraries kept.
pub const MAX_LIBRARIES: usize = 5;
/// Maximum number of function or class names kept.
pub const MAX_FUNCTIONS: usize = 5;
/// Maximum number of module paths kept.
pub const MAX_MODULES: usize = 5;
/// Maximum number of keywords kept.
pub const MAX_KEYWORDS: usize = 8;

/// Root directories that carry no meaning in a module path.
const SKIP_ROOTS: &[&str] = &["src", "lib", "dist", "build", "app", "pages"];

/// Import targets too generic to count as a library.
const GENERIC_PACKAGES: &[&str] = &[
    "src",
    "lib",
    "utils",
    "components",
    "helpers",
    "types",
    "constants",
];

/// Identifiers the method pattern picks up from control flow.
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "function", "return"];

/// Libraries that make a good headline when present.
const WELL_KNOWN_LIBRARIES: &[&str] = &[
    "next-auth",
    "nextauth",
    "prisma",
    "stripe",
    "react",
    "next",
    "express",
    "fastify",
    "postgresql",
    "mongodb",
    "redis",
    "jwt",
    "bcrypt",
];

/// Technical vocabulary searched for in lower-cased commit messages.
const TECH_TERM_PATTERNS: &[&str] = &[
    // auth & security
    r"\b(auth|authentication|authorization|oauth|jwt|token|session|cookie|passport|bcrypt|argon2)\b",
    // payments
    r"\b(stripe|payment|checkout|billing|subscription|invoice|paypal|square)\b",
    // databases
    r"\b(postgres|mysql|mongodb|redis|prisma|sequelize|typeorm|mongoose|database|sql)\b",
    // apis & networking
    r"\b(api|endpoint|route|rest|graphql|webhook|http|axios|fetch|request)\b",
    // frontend
    r"\b(react|vue|angular|next|nuxt|component|hook|state|redux|zustand)\b",
    // backend
    r"\b(express|fastify|nest|koa|middleware|server|node|deno)\b",
    // testing
    r"\b(jest|mocha|vitest|cypress|playwright|test|testing|unit|integration)\b",
    // devops
    r"\b(docker|kubernetes|ci/cd|github\s+actions|deployment|terraform)\b",
    // other
    r"\b(websocket|socket\.io|real-?time|async|promise|cache|queue)\b",
];

#[allow(clippy::expect_used)] // Compile-time constant regex patterns
static TECH_TERMS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TECH_TERM_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("tech term pattern must compile"))
        .collect()
});

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"["']([^"']+)["']"#).unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static ES_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"import\s+.*\s+from\s+['"]([^'"]+)['"]"#).unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static REQUIRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static PY_FROM_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"from\s+([a-zA-Z0-9_]+)\s+import").unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static PY_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"import\s+([a-zA-Z0-9_]+)").unwrap());

/// Definition patterns, tried in order; the first match names the line.
#[allow(clippy::expect_used)] // Compile-time constant regex patterns
static DEFINITIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"function\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*\(",
        r"const\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*=\s*(?:async\s*)?\(",
        r"class\s+([a-zA-Z_$][a-zA-Z0-9_$]*)",
        r"(?:async\s+)?([a-zA-Z_$][a-zA-Z0-9_$]*)\s*\([^)]*\)\s*\{",
        r"def\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("definition pattern must compile"))
    .collect()
});

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[^/.]+$").unwrap());

/// Concrete details pulled out of a batch of commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificContext {
    /// Imported packages, first seen first.
    pub libraries: Vec<String>,
    /// Function and class names that were added.
    pub functions: Vec<String>,
    /// Short module paths that were touched.
    pub modules: Vec<String>,
    /// Technical terms and quoted phrases from commit messages.
    pub keywords: Vec<String>,
}

impl SpecificContext {
    /// Renders a short phrase such as `using react, built LoginForm, in auth/session`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.libraries.is_empty() {
            let libs: Vec<&str> = self.libraries.iter().take(3).map(String::as_str).collect();
            parts.push(format!("using {}", libs.join(", ")));
        }
        if !self.functions.is_empty() {
            let funcs: Vec<&str> = self.functions.iter().take(2).map(String::as_str).collect();
            parts.push(format!("built {}", funcs.join(" and ")));
        }
        if !self.modules.is_empty() {
            let mods: Vec<&str> = self.modules.iter().take(2).map(String::as_str).collect();
            parts.push(format!("in {}", mods.join(" and ")));
        }
        parts.join(", ")
    }

    /// Returns the most headline-worthy technology, if any.
    pub fn primary_tech(&self) -> Option<&str> {
        self.libraries
            .iter()
            .find(|lib| {
                let lower = lib.to_lowercase();
                WELL_KNOWN_LIBRARIES.iter().any(|known| lower.contains(known))
            })
            .or_else(|| self.libraries.first())
            .or_else(|| self.keywords.first())
            .map(String::as_str)
    }
}

/// Insertion-ordered set of strings.
#[derive(Default)]
struct OrderedSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedSet {
    fn insert(&mut self, value: String) {
        if self.seen.insert(value.clone()) {
            self.items.push(value);
        }
    }

    fn extend(&mut self, values: impl IntoIterator<Item = String>) {
        for value in values {
            self.insert(value);
        }
    }

    fn into_truncated(mut self, cap: usize) -> Vec<String> {
        self.items.truncate(cap);
        self.items
    }
}

/// Scans commit messages, paths and added lines for concrete details.
pub fn extract_specific_context(commits: &[CommitRecord]) -> SpecificContext {
    let mut libraries = OrderedSet::default();
    let mut functions = OrderedSet::default();
    let mut modules = OrderedSet::default();
    let mut keywords = OrderedSet::default();

    for commit in commits {
        keywords.extend(extract_keywords(&commit.message));

        for file in &commit.files {
            if let Some(module) = extract_module_path(&file.filename) {
                modules.insert(module);
            }

            if file.patch.is_some() {
                let lines = added_lines(file.patch.as_deref());
                libraries.extend(extract_libraries(&lines));
                functions.extend(extract_function_names(&lines));
            }
        }
    }

    SpecificContext {
        libraries: libraries.into_truncated(MAX_LIBRARIES),
        functions: functions.into_truncated(MAX_FUNCTIONS),
        modules: modules.into_truncated(MAX_MODULES),
        keywords: keywords.into_truncated(MAX_KEYWORDS),
    }
}

/// Pulls technical terms and quoted phrases out of a commit message.
pub fn extract_keywords(message: &str) -> Vec<String> {
    let mut keywords = OrderedSet::default();
    let normalized = message.to_lowercase();

    for pattern in TECH_TERMS.iter() {
        keywords.extend(
            pattern
                .find_iter(&normalized)
                .map(|m| m.as_str().trim().to_string()),
        );
    }

    for caps in QUOTED.captures_iter(message) {
        let phrase = caps[1].trim();
        if phrase.chars().count() > 3 {
            keywords.insert(phrase.to_string());
        }
    }

    keywords.items
}

/// Extracts package names from import statements.
pub fn extract_libraries(lines: &[String]) -> Vec<String> {
    let mut libraries = OrderedSet::default();

    for line in lines {
        if let Some(caps) = ES_IMPORT.captures(line) {
            if let Some(lib) = clean_library_name(&caps[1]) {
                libraries.insert(lib);
            }
            continue;
        }
        if let Some(caps) = REQUIRE.captures(line) {
            if let Some(lib) = clean_library_name(&caps[1]) {
                libraries.insert(lib);
            }
            continue;
        }
        if let Some(caps) = PY_FROM_IMPORT.captures(line) {
            libraries.insert(caps[1].to_string());
            continue;
        }
        if let Some(caps) = PY_IMPORT.captures(line) {
            libraries.insert(caps[1].to_string());
        }
    }

    libraries.items
}

/// Normalises an import specifier to its package name.
///
/// Relative paths and generic directory names yield `None`.
pub fn clean_library_name(raw: &str) -> Option<String> {
    if raw.starts_with('.') || raw.starts_with('/') {
        return None;
    }

    if raw.starts_with('@') {
        return Some(raw.split('/').take(2).collect::<Vec<_>>().join("/"));
    }

    let package = raw.split('/').next().unwrap_or(raw);
    if package.is_empty() || GENERIC_PACKAGES.contains(&package) {
        return None;
    }
    Some(package.to_string())
}

/// Extracts function, method and class names from added lines.
pub fn extract_function_names(lines: &[String]) -> Vec<String> {
    let mut names = OrderedSet::default();

    for line in lines {
        let found = DEFINITIONS
            .iter()
            .find_map(|pattern| pattern.captures(line).map(|caps| caps[1].to_string()));
        if let Some(name) = found {
            if !CONTROL_KEYWORDS.contains(&name.as_str()) {
                names.insert(name);
            }
        }
    }

    names
        .items
        .into_iter()
        .filter(|name| {
            let lower = name.to_lowercase();
            !lower.contains("test")
                && !lower.contains("mock")
                && !lower.contains("example")
                && name.chars().count() > 3
        })
        .collect()
}

/// Reduces a file path to its last two meaningful segments, without extension.
pub fn extract_module_path(path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }

    let without_ext = EXTENSION.replace(path, "");
    let segments: Vec<&str> = without_ext
        .split('/')
        .filter(|seg| !seg.is_empty() && !SKIP_ROOTS.contains(seg))
        .collect();

    match segments.len() {
        0 => None,
        n if n > 2 => Some(segments[n - 2..].join("/")),
        _ => Some(segments.join("/")),
    }
}
