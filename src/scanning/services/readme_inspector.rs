use regex::Regex;
use std::sync::OnceLock;

/// README.md that Azure Repos commits when a repository is initialized with a README
const PLACEHOLDER_README: &str = r#"# Introduction
TODO: Give a short introduction of your project. Let this section explain the objectives or the motivation behind this project.

# Getting Started
TODO: Guide users through getting your code up and running on their own system. In this section you can talk about:
1.	Installation process
2.	Software dependencies
3.	Latest releases
4.	API references

# Build and Test
TODO: Describe and show how to build your code and run the tests.

# Contribute
TODO: Explain how other users and developers can contribute to make your code better.

If you want to learn more about creating good readme files then refer the following [guidelines](https://docs.microsoft.com/en-us/azure/devops/repos/git/create-a-readme?view=azure-devops). You can also seek inspiration from the below readme files:
- [ASP.NET Core](https://github.com/aspnet/Home)
- [Visual Studio Code](https://github.com/Microsoft/vscode)
- [Chakra Core](https://github.com/Microsoft/ChakraCore)"#;

const OWNER_KEYWORDS: [&str; 2] = ["owner", "contact"];

/// Email address or `@domain.tld` handle
const OWNER_PATTERN: &str = r"(?i)[a-z0-9._%+-]*@[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]{2,}";

fn owner_regex() -> Option<&'static Regex> {
    static OWNER_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    OWNER_REGEX
        .get_or_init(|| Regex::new(OWNER_PATTERN).ok())
        .as_ref()
}

/// Collapses all whitespace runs so line endings and trailing spaces do not matter
///
/// A leading byte order mark is dropped as well.
fn normalize(content: &str) -> String {
    content
        .trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the README is the untouched template Azure Repos creates
pub fn is_placeholder(content: &str) -> bool {
    normalize(content) == normalize(PLACEHOLDER_README)
}

/// Whether a README exists with content of its own
pub fn has_readme(content: &str) -> bool {
    !is_placeholder(content)
}

/// Whether the README names somebody responsible for the repository
///
/// Matches "owner" or "contact" in any case, or anything shaped like an email
/// address or domain handle.
pub fn has_owner(content: &str) -> bool {
    let lowered = content.to_lowercase();
    if OWNER_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        return true;
    }
    owner_regex().is_some_and(|regex| regex.is_match(content))
}
