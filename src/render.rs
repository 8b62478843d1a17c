// ABOUTME: Streaming Markdown renderer for one document's outline graph
// ABOUTME: Applies indentation, checkbox, heading, numbering, and color rules

use crate::{Error, OutlineNode, Result};
use std::collections::HashMap;
use std::io::Write;

/// The id Dynalist gives a document's root node.
pub const ROOT_ID: &str = "root";

/// Formatting switches, supplied once per run and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Indent with one tab per level instead of spaces.
    pub use_tab: bool,
    /// Spaces per indent level when not using tabs.
    pub tab_size: usize,
    /// End every line with a Markdown hard break (two trailing spaces).
    pub strict_line_breaks: bool,
    /// Emit `[X]` for checked items even when the item has no checkbox.
    pub add_checkboxes: bool,
    /// Start the file with `# <root content>`.
    pub root_node_header: bool,
    /// Tag appended for `color = n`; out-of-range colors are ignored.
    pub color_tags: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            use_tab: false,
            tab_size: 4,
            strict_line_breaks: false,
            add_checkboxes: false,
            root_node_header: true,
            color_tags: Vec::new(),
        }
    }
}

/// Renders one fetched document body into `out`, streaming line by line.
pub fn render_document<W: Write>(
    nodes: &[OutlineNode],
    config: &RenderConfig,
    out: &mut W,
) -> Result<()> {
    let mut index: HashMap<&str, &OutlineNode> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if index.insert(node.id.as_str(), node).is_some() {
            return Err(Error::malformed(
                "/doc/read",
                format!("duplicate node id {}", node.id),
            ));
        }
    }

    let root = *index
        .get(ROOT_ID)
        .ok_or_else(|| Error::malformed("/doc/read", "document has no root node"))?;

    let indent = if config.use_tab {
        "\t".to_string()
    } else {
        " ".repeat(config.tab_size)
    };

    let mut renderer = Renderer {
        index: &index,
        config,
        indent,
        out,
    };
    renderer.document(root)
}

struct Renderer<'a, W: Write> {
    index: &'a HashMap<&'a str, &'a OutlineNode>,
    config: &'a RenderConfig,
    indent: String,
    out: &'a mut W,
}

impl<'a, W: Write> Renderer<'a, W> {
    fn document(&mut self, root: &OutlineNode) -> Result<()> {
        if self.config.root_node_header {
            write!(self.out, "# {}", root.content)?;
            self.line_break()?;
        }

        // The root note has no bullet and no indentation
        if let Some(note) = &root.note {
            for line in split_lines(note) {
                self.out.write_all(line.as_bytes())?;
                self.line_break()?;
            }
        }

        self.children_of(root, 0)
    }

    fn children_of(&mut self, parent: &OutlineNode, level: usize) -> Result<()> {
        for (pos, child_id) in parent.children.iter().enumerate() {
            let child = *self.index.get(child_id.as_str()).ok_or_else(|| {
                Error::MissingReference {
                    id: child_id.clone(),
                    context: parent.id.clone(),
                }
            })?;
            // Numbering is local to this parent; it never propagates down
            let number = if parent.numbered { Some(pos + 1) } else { None };
            self.node(child, level, number)?;
        }
        Ok(())
    }

    fn node(&mut self, node: &OutlineNode, level: usize, number: Option<usize>) -> Result<()> {
        for (i, line) in split_lines(&node.content).enumerate() {
            for _ in 0..level {
                self.out.write_all(self.indent.as_bytes())?;
            }

            if i == 0 {
                match number {
                    Some(n) => write!(self.out, "{}. ", n)?,
                    None => self.out.write_all(b"- ")?,
                }

                if node.checked && (node.checkbox || self.config.add_checkboxes) {
                    self.out.write_all(b"[X] ")?;
                } else if node.checkbox {
                    self.out.write_all(b"[ ] ")?;
                }

                if node.heading > 0 {
                    for _ in 0..node.heading {
                        self.out.write_all(b"#")?;
                    }
                    self.out.write_all(b" ")?;
                }

                self.out.write_all(line.as_bytes())?;

                if let Some(color) = node.color {
                    if let Some(tag) = self.config.color_tags.get(color) {
                        write!(self.out, " {}", tag)?;
                    }
                }
            } else {
                // Continuation lines align under the bullet with one extra unit
                self.out.write_all(self.indent.as_bytes())?;
                self.out.write_all(line.as_bytes())?;
            }

            self.line_break()?;
        }

        // A note nests one level deeper as a plain bullet of its own
        if let Some(note) = &node.note {
            let synthetic = OutlineNode {
                content: note.clone(),
                ..Default::default()
            };
            self.node(&synthetic, level + 1, None)?;
        }

        self.children_of(node, level + 1)
    }

    fn line_break(&mut self) -> Result<()> {
        if self.config.strict_line_breaks {
            self.out.write_all(b"  \n")?;
        } else {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, content: &str, children: &[&str]) -> OutlineNode {
        OutlineNode {
            id: id.into(),
            content: content.into(),
            children: children.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn render(nodes: &[OutlineNode], config: &RenderConfig) -> String {
        let mut buf = Vec::new();
        render_document(nodes, config, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn body_config() -> RenderConfig {
        RenderConfig {
            root_node_header: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_root_header() {
        let nodes = vec![node("root", "Title", &[])];
        let out = render(&nodes, &RenderConfig::default());
        assert_eq!(out, "# Title\n");
    }

    #[test]
    fn test_root_header_strict_line_breaks() {
        let nodes = vec![node("root", "Title", &[])];
        let config = RenderConfig {
            strict_line_breaks: true,
            ..Default::default()
        };
        assert_eq!(render(&nodes, &config), "# Title  \n");
    }

    #[test]
    fn test_root_note_has_no_bullet_or_indent() {
        let mut root = node("root", "Title", &["n1"]);
        root.note = Some("intro line one\nintro line two".into());
        let nodes = vec![root, node("n1", "first", &[])];

        let out = render(&nodes, &RenderConfig::default());
        assert_eq!(
            out,
            "# Title\nintro line one\nintro line two\n- first\n"
        );
    }

    #[test]
    fn test_checked_checkbox_with_heading() {
        let mut task = node("n1", "Task", &[]);
        task.heading = 2;
        task.checkbox = true;
        task.checked = true;
        let nodes = vec![node("root", "Doc", &["n1"]), task];

        let out = render(&nodes, &body_config());
        assert_eq!(out, "- [X] ## Task\n");
    }

    #[test]
    fn test_unchecked_checkbox() {
        let mut task = node("n1", "Todo", &[]);
        task.checkbox = true;
        let nodes = vec![node("root", "Doc", &["n1"]), task];

        assert_eq!(render(&nodes, &body_config()), "- [ ] Todo\n");
    }

    #[test]
    fn test_checked_without_checkbox_needs_config() {
        let mut done = node("n1", "Done", &[]);
        done.checked = true;
        let nodes = vec![node("root", "Doc", &["n1"]), done];

        assert_eq!(render(&nodes, &body_config()), "- Done\n");

        let config = RenderConfig {
            add_checkboxes: true,
            ..body_config()
        };
        assert_eq!(render(&nodes, &config), "- [X] Done\n");
    }

    #[test]
    fn test_multiline_content_continuation_indent() {
        let nodes = vec![
            node("root", "Doc", &["n1"]),
            node("n1", "top", &["n2"]),
            node("n2", "a\nb\nc", &[]),
        ];
        let config = RenderConfig {
            tab_size: 2,
            ..body_config()
        };

        let out = render(&nodes, &config);
        assert_eq!(out, "- top\n  - a\n    b\n    c\n");
    }

    #[test]
    fn test_multiline_content_crlf() {
        let nodes = vec![
            node("root", "Doc", &["n1"]),
            node("n1", "a\r\nb", &[]),
        ];
        let config = RenderConfig {
            tab_size: 2,
            ..body_config()
        };
        assert_eq!(render(&nodes, &config), "- a\n  b\n");
    }

    #[test]
    fn test_tab_indent() {
        let nodes = vec![
            node("root", "Doc", &["n1"]),
            node("n1", "outer", &["n2"]),
            node("n2", "inner", &[]),
        ];
        let config = RenderConfig {
            use_tab: true,
            ..body_config()
        };
        assert_eq!(render(&nodes, &config), "- outer\n\t- inner\n");
    }

    #[test]
    fn test_numbered_children_in_order() {
        let mut root = node("root", "Doc", &["a", "b", "c"]);
        root.numbered = true;
        let nodes = vec![
            root,
            node("a", "first", &[]),
            node("b", "second", &[]),
            node("c", "third", &[]),
        ];

        let out = render(&nodes, &body_config());
        assert_eq!(out, "1. first\n2. second\n3. third\n");
    }

    #[test]
    fn test_numbering_does_not_propagate_to_grandchildren() {
        let mut root = node("root", "Doc", &["a"]);
        root.numbered = true;
        let nodes = vec![
            root,
            node("a", "parent", &["b"]),
            node("b", "child", &[]),
        ];
        let config = RenderConfig {
            tab_size: 2,
            ..body_config()
        };

        assert_eq!(render(&nodes, &config), "1. parent\n  - child\n");
    }

    #[test]
    fn test_numbered_flag_applies_per_parent() {
        let mut inner = node("a", "parent", &["b", "c"]);
        inner.numbered = true;
        let nodes = vec![
            node("root", "Doc", &["a"]),
            inner,
            node("b", "one", &[]),
            node("c", "two", &[]),
        ];
        let config = RenderConfig {
            tab_size: 2,
            ..body_config()
        };

        assert_eq!(render(&nodes, &config), "- parent\n  1. one\n  2. two\n");
    }

    #[test]
    fn test_note_renders_as_nested_bullet() {
        let mut item = node("n1", "item", &[]);
        item.note = Some("the note".into());
        let nodes = vec![node("root", "Doc", &["n1"]), item];
        let config = RenderConfig {
            tab_size: 2,
            ..body_config()
        };

        assert_eq!(render(&nodes, &config), "- item\n  - the note\n");
    }

    #[test]
    fn test_note_precedes_children() {
        let mut item = node("n1", "item", &["n2"]);
        item.note = Some("note".into());
        let nodes = vec![
            node("root", "Doc", &["n1"]),
            item,
            node("n2", "child", &[]),
        ];
        let config = RenderConfig {
            tab_size: 2,
            ..body_config()
        };

        assert_eq!(render(&nodes, &config), "- item\n  - note\n  - child\n");
    }

    #[test]
    fn test_note_ignores_parent_numbering() {
        let mut parent = node("n1", "item", &["n2"]);
        parent.numbered = true;
        parent.note = Some("note".into());
        let nodes = vec![
            node("root", "Doc", &["n1"]),
            parent,
            node("n2", "child", &[]),
        ];
        let config = RenderConfig {
            tab_size: 2,
            ..body_config()
        };

        // the note stays a plain bullet while the real child is numbered
        assert_eq!(render(&nodes, &config), "- item\n  - note\n  1. child\n");
    }

    #[test]
    fn test_color_tag_on_first_line_only() {
        let mut hot = node("n1", "alpha\nbeta", &[]);
        hot.color = Some(1);
        let nodes = vec![node("root", "Doc", &["n1"]), hot];
        let config = RenderConfig {
            tab_size: 2,
            color_tags: vec!["#gray".into(), "#red".into()],
            ..body_config()
        };

        assert_eq!(render(&nodes, &config), "- alpha #red\n  beta\n");
    }

    #[test]
    fn test_color_out_of_range_is_ignored() {
        let mut hot = node("n1", "alpha", &[]);
        hot.color = Some(9);
        let nodes = vec![node("root", "Doc", &["n1"]), hot];
        let config = RenderConfig {
            color_tags: vec!["#gray".into()],
            ..body_config()
        };

        assert_eq!(render(&nodes, &config), "- alpha\n");
    }

    #[test]
    fn test_empty_content_still_gets_bullet() {
        let nodes = vec![node("root", "Doc", &["n1"]), node("n1", "", &[])];
        assert_eq!(render(&nodes, &body_config()), "- \n");
    }

    #[test]
    fn test_strict_line_breaks_on_every_line() {
        let nodes = vec![
            node("root", "Doc", &["n1"]),
            node("n1", "a\nb", &[]),
        ];
        let config = RenderConfig {
            tab_size: 2,
            strict_line_breaks: true,
            ..body_config()
        };

        assert_eq!(render(&nodes, &config), "- a  \n  b  \n");
    }

    #[test]
    fn test_missing_child_reference() {
        let nodes = vec![node("root", "Doc", &["ghost"])];
        let mut buf = Vec::new();
        let err = render_document(&nodes, &body_config(), &mut buf).unwrap_err();
        match err {
            Error::MissingReference { id, context } => {
                assert_eq!(id, "ghost");
                assert_eq!(context, "root");
            }
            other => panic!("expected MissingReference, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_root_node() {
        let nodes = vec![node("n1", "floating", &[])];
        let mut buf = Vec::new();
        let err = render_document(&nodes, &body_config(), &mut buf).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_duplicate_node_id() {
        let nodes = vec![
            node("root", "Doc", &[]),
            node("n1", "a", &[]),
            node("n1", "b", &[]),
        ];
        let mut buf = Vec::new();
        let err = render_document(&nodes, &body_config(), &mut buf).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_full_document_shape() {
        let mut task = node("n2", "ship it", &[]);
        task.checkbox = true;
        let nodes = vec![
            node("root", "Release", &["n1"]),
            node("n1", "Checklist", &["n2"]),
            task,
        ];
        let config = RenderConfig {
            tab_size: 2,
            ..Default::default()
        };

        let out = render(&nodes, &config);
        assert_eq!(out, "# Release\n- Checklist\n  - [ ] ship it\n");
    }
}
