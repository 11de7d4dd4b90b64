//! Directory tree collection and HTML rendering

use super::ignore::IgnoreRules;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A file or directory in the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File { name: String },
    Dir { name: String, children: Vec<Node> },
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::File { name } | Node::Dir { name, .. } => name,
        }
    }

    /// Directories first by name, then files by extension then stem
    /// (all case-insensitive)
    fn sort_key(&self) -> (u8, String, String) {
        match self {
            Node::Dir { name, .. } => (0, String::new(), name.to_lowercase()),
            Node::File { name } => {
                let lower = name.to_lowercase();
                match lower.rfind('.') {
                    Some(dot) if dot > 0 => (1, lower[dot..].to_string(), lower[..dot].to_string()),
                    _ => (1, String::new(), lower),
                }
            }
        }
    }
}

/// Collect the tree under `root`, skipping ignored entries
pub fn collect_tree(root: &Path, rules: &IgnoreRules) -> Result<Vec<Node>> {
    collect_dir(root, "", rules)
}

fn collect_dir(dir: &Path, rel_dir: &str, rules: &IgnoreRules) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel_path = join_rel(rel_dir, &name);

        if rules.is_ignored(&rel_path) {
            log::debug!("Ignored: {}", rel_path);
            continue;
        }

        if entry.path().is_dir() {
            let children = collect_dir(&entry.path(), &rel_path, rules)?;
            nodes.push(Node::Dir { name, children });
        } else {
            nodes.push(Node::File { name });
        }
    }

    nodes.sort_by_cached_key(Node::sort_key);
    Ok(nodes)
}

fn join_rel(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}

/// Element id for a directory's collapsible block
pub fn dir_id(base: &str, name: &str) -> String {
    let id = if base.is_empty() {
        format!("dir_{}", name)
    } else {
        format!("dir_{}_{}", base.replace('/', "_"), name)
    };
    // Ids are embedded in `toggleDirectory('...')`, where quotes would end the string
    id.replace([' ', '-', '\'', '"', '\\'], "_")
}

/// Render nodes as nested toggle blocks and links
pub fn render_tree(nodes: &[Node]) -> String {
    let mut html = String::new();
    render_level(nodes, "", 0, &mut html);
    html
}

fn render_level(nodes: &[Node], base: &str, level: usize, html: &mut String) {
    let indent = "  ".repeat(level);

    for node in nodes {
        match node {
            Node::File { name } => {
                let href = join_rel(base, name);
                html.push_str(&format!(
                    "{}<a href=\"{}\">{}</a>\n",
                    indent,
                    escape_html(&href),
                    escape_html(name)
                ));
            }
            Node::Dir { name, children } => {
                let id = escape_html(&dir_id(base, name));
                html.push_str(&format!(
                    "{indent}<span class=\"dir-toggle\" onclick=\"toggleDirectory('{id}')\">▶</span> \
                     <span class=\"dir-name\" onclick=\"toggleDirectory('{id}')\">{}/</span>\n",
                    escape_html(name)
                ));
                html.push_str(&format!(
                    "{indent}  <div id=\"{id}\" class=\"dir-content collapsed\">\n"
                ));
                render_level(children, &join_rel(base, name), level + 1, html);
                html.push_str(&format!("{indent}  </div>\n"));
            }
        }
    }
}

pub(crate) fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(name: &str) -> Node {
        Node::File {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_dir_id() {
        assert_eq!(dir_id("", "rock"), "dir_rock");
        assert_eq!(dir_id("rock/80s", "hair metal"), "dir_rock_80s_hair_metal");
        assert_eq!(dir_id("j-pop", "a-b"), "dir_j_pop_a_b");
        assert_eq!(dir_id("", "rock 'n' roll"), "dir_rock__n__roll");
        assert_eq!(dir_id("say \"hi\"", "a\\b"), "dir_say__hi___a_b");
    }

    #[test]
    fn test_collect_tree_sorts_and_ignores() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Zeta")).unwrap();
        fs::create_dir_all(root.join("alpha/inner")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("b.json"), b"").unwrap();
        fs::write(root.join("a.json"), b"").unwrap();
        fs::write(root.join("Index.html"), b"").unwrap();
        fs::write(root.join("alpha/song.mp3"), b"").unwrap();
        fs::write(root.join("cache.pyc"), b"").unwrap();

        let rules = IgnoreRules::new([".git", "*.pyc"]);
        let tree = collect_tree(root, &rules).unwrap();
        let names: Vec<&str> = tree.iter().map(Node::name).collect();
        assert_eq!(names, vec!["alpha", "Zeta", "Index.html", "a.json", "b.json"]);

        match &tree[0] {
            Node::Dir { children, .. } => {
                let inner: Vec<&str> = children.iter().map(Node::name).collect();
                assert_eq!(inner, vec!["inner", "song.mp3"]);
            }
            other => panic!("expected directory, got {:?}", other),
        }
    }

    #[test]
    fn test_render_tree() {
        let tree = vec![
            Node::Dir {
                name: "rock".to_string(),
                children: vec![file("a&b.mp3")],
            },
            file("data.json"),
        ];

        let html = render_tree(&tree);
        let expected = "<span class=\"dir-toggle\" onclick=\"toggleDirectory('dir_rock')\">▶</span> \
                        <span class=\"dir-name\" onclick=\"toggleDirectory('dir_rock')\">rock/</span>\n\
                        \x20 <div id=\"dir_rock\" class=\"dir-content collapsed\">\n\
                        \x20 <a href=\"rock/a&amp;b.mp3\">a&amp;b.mp3</a>\n\
                        \x20 </div>\n\
                        <a href=\"data.json\">data.json</a>\n";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
