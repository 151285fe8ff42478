//! Structure pane: draws the canonical model and marks the current step's targets
//!
//! Every structure is drawn as plain text lines:
//!
//! - arrays and heaps as a row of boxed cells (heaps add one line per level)
//! - linked lists as a chain from head to tail
//! - hash tables as one line per bucket
//! - Huffman trees as an indented outline, followed by the code table and
//!   the encode/decode buffers

use super::utils::{pane_block, Focus};
use crate::step::TargetRef;
use crate::structures::array::ArrayModel;
use crate::structures::hash_table::HashTableModel;
use crate::structures::heap::BinaryHeapModel;
use crate::structures::huffman::{HuffmanTree, TreeNodeId};
use crate::structures::linked_list::LinkedListModel;
use crate::structures::Structure;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Padding, Paragraph, Wrap},
    Frame,
};

/// Render the structure pane
pub fn render_structure_pane(
    frame: &mut Frame,
    area: Rect,
    structure: &Structure,
    focus: Focus,
    is_focused: bool,
) {
    let title = format!(" {} ", structure.kind());
    let block = pane_block(&title, is_focused).padding(Padding::new(1, 1, 1, 0));

    let mut lines = match structure {
        Structure::Array(array) => array_lines(array, focus),
        Structure::LinkedList(list) => list_lines(list, focus),
        Structure::HashTable(table) => hash_lines(table, focus),
        Structure::Heap(heap) => heap_lines(heap, focus),
        Structure::Huffman(tree) => huffman_lines(tree, focus),
    };

    if focus.touches(TargetRef::Whole) {
        if let Some(step) = focus.step {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                step.description.clone(),
                Style::default()
                    .fg(DEFAULT_THEME.step_color(step.kind))
                    .add_modifier(Modifier::ITALIC),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn muted() -> Style {
    Style::default().fg(DEFAULT_THEME.comment)
}

fn cell_span(text: String, target: TargetRef, base: Style, focus: Focus) -> Span<'static> {
    Span::styled(format!("[{:^4}]", text), focus.style(target, base))
}

fn index_row(len: usize) -> Line<'static> {
    let spans: Vec<Span> = (0..len)
        .map(|i| Span::styled(format!(" {:^4} ", i), muted()))
        .collect();
    Line::from(spans)
}

fn array_lines(array: &ArrayModel, focus: Focus) -> Vec<Line<'static>> {
    if array.is_empty() {
        return vec![Line::from(Span::styled("(empty array)", muted()))];
    }
    let cells: Vec<Span> = array
        .cells()
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = if cell.sorted {
                Style::default().fg(DEFAULT_THEME.success)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            cell_span(cell.value.to_string(), TargetRef::Cell(i), base, focus)
        })
        .collect();
    vec![Line::from(cells), index_row(array.len())]
}

fn list_lines(list: &LinkedListModel, focus: Focus) -> Vec<Line<'static>> {
    let link = Style::default().fg(DEFAULT_THEME.link);
    let mut spans = vec![Span::styled("head → ", link)];

    let ids = list.node_ids();
    if ids.is_empty() {
        spans.push(Span::styled("null", muted()));
        return vec![Line::from(spans)];
    }
    for (n, id) in ids.iter().enumerate() {
        if n > 0 {
            spans.push(Span::styled(" ⇄ ", link));
        }
        let value = list.value(*id).map_or_else(|| "?".to_string(), |v| v.to_string());
        spans.push(cell_span(
            value,
            TargetRef::Node(*id),
            Style::default().fg(DEFAULT_THEME.fg),
            focus,
        ));
    }
    spans.push(Span::styled(" ← tail", link));

    vec![
        Line::from(spans),
        Line::from(Span::styled(format!("{} nodes", list.len()), muted())),
    ]
}

fn hash_lines(table: &HashTableModel, focus: Focus) -> Vec<Line<'static>> {
    table
        .buckets()
        .iter()
        .enumerate()
        .map(|(b, chain)| {
            let label_style = if table.has_collision(b) {
                Style::default().fg(DEFAULT_THEME.secondary)
            } else {
                muted()
            };
            let mut spans = vec![Span::styled(
                format!("{:>3} │ ", b),
                focus.style(TargetRef::Bucket(b), label_style),
            )];
            if chain.is_empty() {
                spans.push(Span::styled("·", muted()));
            }
            for (position, value) in chain.iter().enumerate() {
                if position > 0 {
                    spans.push(Span::styled(" → ", Style::default().fg(DEFAULT_THEME.link)));
                }
                spans.push(cell_span(
                    value.to_string(),
                    TargetRef::Entry {
                        bucket: b,
                        position,
                    },
                    Style::default().fg(DEFAULT_THEME.fg),
                    focus,
                ));
            }
            Line::from(spans)
        })
        .collect()
}

fn heap_lines(heap: &BinaryHeapModel, focus: Focus) -> Vec<Line<'static>> {
    let items = heap.items();
    if items.is_empty() {
        return vec![Line::from(Span::styled(format!("(empty {})", heap.kind()), muted()))];
    }
    let base = Style::default().fg(DEFAULT_THEME.fg);
    let slot = |i: usize| cell_span(items[i].to_string(), TargetRef::Slot(i), base, focus);

    let mut lines = vec![
        Line::from((0..items.len()).map(&slot).collect::<Vec<_>>()),
        index_row(items.len()),
        Line::from(""),
    ];

    // Level by level: slots 2^d - 1 .. 2^(d+1) - 1
    let mut start = 0;
    let mut width = 1;
    while start < items.len() {
        let end = (start + width).min(items.len());
        lines.push(Line::from((start..end).map(&slot).collect::<Vec<_>>()));
        start += width;
        width *= 2;
    }

    let validity = if heap.is_valid() {
        Span::styled(format!("valid {}", heap.kind()), Style::default().fg(DEFAULT_THEME.success))
    } else {
        Span::styled(format!("not yet a {}", heap.kind()), muted())
    };
    lines.push(Line::from(validity));
    lines
}

fn huffman_lines(tree: &HuffmanTree, focus: Focus) -> Vec<Line<'static>> {
    if tree.nodes().is_empty() {
        return vec![Line::from(Span::styled("(no tree)", muted()))];
    }

    let mut lines = Vec::new();
    let forest: Vec<TreeNodeId> = (0..tree.nodes().len())
        .filter(|&id| tree.node(id).is_some_and(|n| n.parent.is_none()))
        .collect();
    for id in forest {
        outline(tree, id, String::new(), "", focus, &mut lines);
    }

    if tree.is_built() {
        let mut codes: Vec<(char, String)> = tree.codes().into_iter().collect();
        codes.sort();
        lines.push(Line::from(""));
        let spans: Vec<Span> = codes
            .into_iter()
            .map(|(symbol, code)| {
                Span::styled(
                    format!("{:?}={}  ", symbol, code),
                    Style::default().fg(DEFAULT_THEME.primary),
                )
            })
            .collect();
        lines.push(Line::from(spans));
    }
    if !tree.encoded().is_empty() {
        lines.push(Line::from(vec![
            Span::styled("encoded: ", muted()),
            Span::raw(tree.encoded().to_string()),
        ]));
    }
    if !tree.decoded().is_empty() {
        lines.push(Line::from(vec![
            Span::styled("decoded: ", muted()),
            Span::raw(tree.decoded().to_string()),
        ]));
    }
    lines
}

fn outline(
    tree: &HuffmanTree,
    id: TreeNodeId,
    indent: String,
    edge: &str,
    focus: Focus,
    lines: &mut Vec<Line<'static>>,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let label = match node.symbol {
        Some(symbol) => format!("{:?}:{}", symbol, node.frequency),
        None => format!("({})", node.frequency),
    };
    let base = if node.is_leaf() {
        Style::default().fg(DEFAULT_THEME.fg)
    } else {
        muted()
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{}{}", indent, edge), Style::default().fg(DEFAULT_THEME.link)),
        Span::styled(label, focus.style(TargetRef::TreeNode(id), base)),
    ]));

    let child_indent = if edge.is_empty() {
        indent
    } else {
        format!("{}   ", indent)
    };
    if let Some(left) = node.left {
        outline(tree, left, child_indent.clone(), "├0 ", focus, lines);
    }
    if let Some(right) = node.right {
        outline(tree, right, child_indent, "└1 ", focus, lines);
    }
}
