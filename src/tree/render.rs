//! Indented text rendering.
//!
//! Pre-order walk producing one line per node: a connector glyph (`\---` for
//! a last sibling, `+---` otherwise), the node name, and the formatted
//! subtree weight when the node holds any own weight. Children render in
//! ascending name order, so output is byte-identical across runs for the
//! same tree. The tree is not mutated.

use super::{NodeId, SampleTree};

/// Render the tree under `indent` with a caller-supplied value formatter.
/// The root is treated as a last sibling.
pub fn render<F>(tree: &SampleTree, indent: &str, format_value: F) -> String
where
    F: Fn(u64) -> String,
{
    let mut out = String::new();
    render_node(tree, tree.root(), indent, true, &format_value, &mut out);
    out
}

fn render_node<F>(
    tree: &SampleTree,
    id: NodeId,
    indent: &str,
    is_last: bool,
    format_value: &F,
    out: &mut String,
) where
    F: Fn(u64) -> String,
{
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str(if is_last { "\\---" } else { "+---" });
    out.push_str(tree.name(id));
    if tree.own_weight(id) > 0 {
        out.push_str(&format!("({})", format_value(tree.subtree_weight(id))));
    }

    let next_indent = format!("{}{}", indent, if is_last { "    " } else { "|   " });
    let children: Vec<NodeId> = tree.children(id).collect();
    for (position, &child) in children.iter().enumerate() {
        render_node(
            tree,
            child,
            &next_indent,
            position + 1 == children.len(),
            format_value,
            out,
        );
    }
}
