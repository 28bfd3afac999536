use super::*;

use std::path::Component;

pub(super) fn lint(document: &Document) -> Vec<Violation> {
    let base = document.path().parent().unwrap_or_else(|| Path::new(""));
    let text = strip_code(document.text());

    let mut violations = Vec::new();
    for link in extract_links(&text) {
        let LinkTarget::Relative { written, path, .. } = LinkTarget::parse(link.target) else {
            continue;
        };
        let resolved = resolve(base, &path);
        if !resolved.exists() {
            violations.push(Violation::broken_link(document.path(), written, resolved));
        }
    }
    violations
}

/// Absolute, lexically normalized location of `target` relative to `base`.
fn resolve(base: &Path, target: &str) -> PathBuf {
    let joined = base.join(target);
    let absolute = std::path::absolute(&joined).unwrap_or(joined);
    normalize_path(&absolute)
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => {
                has_root = true;
                out.push(Path::new("/"));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !has_root {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_path_folds_dot_segments() {
        assert_eq!(
            normalize_path(Path::new("/repo/docs/./guides/../missing.md")),
            PathBuf::from("/repo/docs/missing.md")
        );
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize_path(Path::new("../a/./b")), PathBuf::from("../a/b"));
    }

    #[test]
    fn resolve_is_absolute_and_normalized() {
        let resolved = resolve(Path::new("/repo/docs"), "../README.md");
        assert_eq!(resolved, PathBuf::from("/repo/README.md"));
        assert!(resolve(Path::new("docs"), "./missing.md").is_absolute());
    }

    #[test]
    fn skipped_targets_never_touch_the_filesystem() {
        let text = "\
[web](https://example.com/nope.md)
[mail](mailto:team@example.com)
[anchor](#section)
[win](C:/nope.md)
![img](<>)
```
[fenced](./fenced-missing.md)
```
    [indented](./indented-missing.md)
";
        let doc = Document::new("/nonexistent-root/docs/a.md", text);
        assert_eq!(lint(&doc), Vec::new());
    }

    #[test]
    fn missing_relative_target_reports_written_and_resolved_forms() {
        let doc = Document::new(
            "/nonexistent-root/docs/a.md",
            "See [x](./missing.md#part \"Title\") and ![y](<../img/a b.png>).",
        );
        let rendered: Vec<String> = lint(&doc).iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "/nonexistent-root/docs/a.md:./missing.md#part -> /nonexistent-root/docs/missing.md",
                "/nonexistent-root/docs/a.md:../img/a b.png -> /nonexistent-root/img/a b.png",
            ]
        );
    }
}
