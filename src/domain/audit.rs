//! Best-practice checks over repository metadata.

use chrono::{DateTime, Utc};

use super::{CommunityProfile, RepoInfo};

/// Repositories without a push for this long are flagged as stale.
pub const STALE_AFTER_DAYS: i64 = 180;

/// Produce suggestions in a stable order. `profile` is `None` when GitHub
/// would not serve the community profile (private repos on some plans).
pub fn suggest(info: &RepoInfo, profile: Option<&CommunityProfile>, now: DateTime<Utc>) -> Vec<String> {
    let mut out = Vec::new();

    if info.archived {
        out.push("Repository is archived; unarchive it before making further changes.".to_string());
    }
    if info.description.as_deref().map_or(true, |d| d.trim().is_empty()) {
        out.push("Add a short repository description so the project is discoverable.".to_string());
    }
    if info.topics.is_empty() {
        out.push("Add topics to help others find the repository.".to_string());
    }
    if info.homepage.as_deref().map_or(true, |h| h.trim().is_empty()) {
        out.push("Set a homepage URL pointing at documentation or a demo.".to_string());
    }
    if info.license.is_none() {
        out.push("Add a LICENSE file so others know how they may use the code.".to_string());
    }
    if let Some(profile) = profile {
        let files = &profile.files;
        let checks = [
            (&files.readme, "Add a README.md describing what the project does and how to use it."),
            (&files.contributing, "Add a CONTRIBUTING.md with guidelines for contributors."),
            (&files.code_of_conduct, "Add a CODE_OF_CONDUCT.md."),
            (&files.issue_template, "Add issue templates under .github/ISSUE_TEMPLATE."),
            (
                &files.pull_request_template,
                "Add a pull request template (.github/pull_request_template.md).",
            ),
        ];
        for (file, advice) in checks {
            if file.as_ref().map_or(true, |v| v.is_null()) {
                out.push(advice.to_string());
            }
        }
    }
    if !info.has_issues {
        out.push("Enable issues so users can report bugs and request features.".to_string());
    }
    if let Some(pushed_at) = info.pushed_at {
        let idle = now.signed_duration_since(pushed_at).num_days();
        if idle > STALE_AFTER_DAYS {
            out.push(format!(
                "No pushes in {idle} days; refresh the project or archive it."
            ));
        }
    }
    out
}

pub fn render(repo: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return format!("Repository '{repo}' already follows the recommended GitHub practices.");
    }
    let mut text = format!("Suggestions for '{repo}':");
    for s in suggestions {
        text.push_str("\n- ");
        text.push_str(s);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn tidy_repo() -> RepoInfo {
        serde_json::from_value(json!({
            "name": "tools",
            "full_name": "octo/tools",
            "html_url": "https://github.com/octo/tools",
            "description": "Agent tools",
            "homepage": "https://octo.dev",
            "topics": ["mcp"],
            "license": {"spdx_id": "MIT", "name": "MIT License"},
            "pushed_at": "2025-05-20T10:00:00Z"
        }))
        .unwrap()
    }

    fn full_profile() -> CommunityProfile {
        serde_json::from_value(json!({
            "health_percentage": 100,
            "files": {
                "readme": {"url": "r"},
                "contributing": {"url": "c"},
                "code_of_conduct": {"url": "coc"},
                "issue_template": {"url": "i"},
                "pull_request_template": {"url": "p"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn tidy_repo_has_no_suggestions() {
        let out = suggest(&tidy_repo(), Some(&full_profile()), now());
        assert!(out.is_empty(), "unexpected: {out:?}");
        assert!(render("octo/tools", &out).contains("already follows"));
    }

    #[test]
    fn flags_missing_metadata_and_files() {
        let mut info = tidy_repo();
        info.description = Some("  ".into());
        info.topics.clear();
        info.license = None;
        let profile: CommunityProfile =
            serde_json::from_value(json!({"files": {"readme": {"url": "r"}, "contributing": null}})).unwrap();

        let out = suggest(&info, Some(&profile), now());
        assert!(out.iter().any(|s| s.contains("description")));
        assert!(out.iter().any(|s| s.contains("topics")));
        assert!(out.iter().any(|s| s.contains("LICENSE")));
        assert!(out.iter().any(|s| s.contains("CONTRIBUTING")));
        assert!(out.iter().any(|s| s.contains("CODE_OF_CONDUCT")));
        assert!(!out.iter().any(|s| s.contains("README")));
    }

    #[test]
    fn missing_profile_skips_file_checks() {
        let out = suggest(&tidy_repo(), None, now());
        assert!(out.is_empty());
    }

    #[test]
    fn flags_stale_archived_and_issueless() {
        let mut info = tidy_repo();
        info.pushed_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        info.archived = true;
        info.has_issues = false;
        let out = suggest(&info, Some(&full_profile()), now());
        assert_eq!(out.len(), 3);
        assert!(out[0].contains("archived"));
        assert!(out[1].contains("Enable issues"));
        assert!(out[2].starts_with("No pushes in 517 days"));
    }

    #[test]
    fn renders_bulleted_list() {
        let text = render("octo/tools", &["one".into(), "two".into()]);
        assert_eq!(text, "Suggestions for 'octo/tools':\n- one\n- two");
    }
}
