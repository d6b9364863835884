//! Routing metadata for the calling agent: which phrasing selects which tool.
//! Nothing here is evaluated by the tools themselves.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolIntent {
    pub name: &'static str,
    pub summary: &'static str,
    pub triggers: &'static [&'static str],
    pub avoid: &'static [&'static str],
}

pub const TOOL_INTENTS: &[ToolIntent] = &[
    ToolIntent {
        name: "create_github_repository",
        summary: "Create a GitHub repository. Use ONLY when the user explicitly wants to create a new repository.",
        triggers: &["create repo", "create repository", "create private repo", "create public repo"],
        avoid: &["README generation", "auditing", "file creation"],
    },
    ToolIntent {
        name: "commit_and_push_file",
        summary: "Create or update a file in a GitHub repository and commit it.",
        triggers: &["commit file", "push file", "upload file to repo"],
        avoid: &["creating repositories", "README generation"],
    },
    ToolIntent {
        name: "create_issue",
        summary: "Create a GitHub issue.",
        triggers: &["create issue", "open issue", "report bug"],
        avoid: &["pull requests"],
    },
    ToolIntent {
        name: "create_pr",
        summary: "Create a pull request.",
        triggers: &["create pr", "open pull request"],
        avoid: &["issues"],
    },
    ToolIntent {
        name: "audit_repo",
        summary: "Suggest GitHub best practices for the given repository.",
        triggers: &["audit repo", "best practices", "review repository setup"],
        avoid: &["README generation", "creating repositories"],
    },
    ToolIntent {
        name: "create_readme_file",
        summary: "Generate a professional README for a GitHub repository. Use ONLY when the user wants to generate or update a README.md file.",
        triggers: &["generate readme", "create readme", "update readme"],
        avoid: &["creating repositories", "auditing repositories"],
    },
];

pub fn lookup(name: &str) -> Option<&'static ToolIntent> {
    TOOL_INTENTS.iter().find(|i| i.name == name)
}

/// Plain-text rendering handed to agents as server instructions.
pub fn agent_instructions() -> String {
    let mut out = String::from("GitHub tools. Pick a tool by the user's intent:\n");
    for intent in TOOL_INTENTS {
        out.push_str(&format!("\n{}: {}\n", intent.name, intent.summary));
        if !intent.triggers.is_empty() {
            out.push_str(&format!("  Triggers: {}\n", quoted(intent.triggers)));
        }
        if !intent.avoid.is_empty() {
            out.push_str(&format!("  Do NOT use for: {}\n", intent.avoid.join(", ")));
        }
    }
    out
}

fn quoted(items: &[&str]) -> String {
    items.iter().map(|t| format!("\"{t}\"")).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in TOOL_INTENTS.iter().enumerate() {
            assert!(TOOL_INTENTS[i + 1..].iter().all(|b| b.name != a.name), "duplicate {}", a.name);
        }
    }

    #[test]
    fn lookup_finds_readme_triggers() {
        let intent = lookup("create_readme_file").unwrap();
        assert!(intent.triggers.contains(&"update readme"));
        assert!(lookup("delete_repo").is_none());
    }

    #[test]
    fn instructions_list_every_tool_and_exclusion() {
        let text = agent_instructions();
        for intent in TOOL_INTENTS {
            assert!(text.contains(intent.name));
        }
        assert!(text.contains("\"create private repo\""));
        assert!(text.contains("Do NOT use for: README generation, auditing, file creation"));
    }
}
