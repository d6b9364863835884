//! README rendering from repository metadata.

use std::collections::BTreeMap;

use super::RepoInfo;

/// Render a README. `languages` maps language name to bytes of code, as
/// returned by `GET /repos/{owner}/{repo}/languages`.
pub fn render(info: &RepoInfo, languages: &BTreeMap<String, u64>) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", info.name));

    let mut badges = Vec::new();
    if let Some(spdx) = info.license.as_ref().and_then(|l| l.spdx_id.as_deref()) {
        badges.push(format!(
            "![License](https://img.shields.io/badge/license-{}-blue.svg)",
            spdx.replace('-', "--")
        ));
    }
    if let Some(lang) = info.language.as_deref() {
        badges.push(format!(
            "![Language](https://img.shields.io/badge/language-{}-informational.svg)",
            lang.replace(' ', "%20")
        ));
    }
    if !badges.is_empty() {
        out.push_str(&badges.join(" "));
        out.push_str("\n\n");
    }

    match info.description.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => out.push_str(&format!("{d}\n\n")),
        _ => out.push_str(&format!("{} is hosted at {}.\n\n", info.full_name, info.html_url)),
    }

    if !info.topics.is_empty() {
        let tags: Vec<String> = info.topics.iter().map(|t| format!("`{t}`")).collect();
        out.push_str(&format!("**Topics:** {}\n\n", tags.join(" ")));
    }

    let clone_url = info
        .clone_url
        .clone()
        .unwrap_or_else(|| format!("{}.git", info.html_url.trim_end_matches('/')));
    out.push_str("## Getting Started\n\n");
    out.push_str(&format!("```sh\ngit clone {clone_url}\ncd {}\n```\n\n", info.name));

    let total: u64 = languages.values().sum();
    if total > 0 {
        let mut by_size: Vec<(&String, &u64)> = languages.iter().collect();
        by_size.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        out.push_str("## Languages\n\n");
        for (lang, bytes) in by_size {
            let pct = (*bytes as f64) * 100.0 / (total as f64);
            out.push_str(&format!("- {lang}: {pct:.1}%\n"));
        }
        out.push('\n');
    }

    let branch = info.default_branch.as_deref().unwrap_or("main");
    out.push_str("## Contributing\n\n");
    out.push_str(&format!(
        "Issues and pull requests are welcome. Please branch from `{branch}` and open a pull request against it.\n\n"
    ));

    out.push_str("## License\n\n");
    match &info.license {
        Some(l) => out.push_str(&format!("Distributed under the {}.\n", l.name)),
        None => out.push_str("No license has been chosen for this project yet.\n"),
    }
    out
}
