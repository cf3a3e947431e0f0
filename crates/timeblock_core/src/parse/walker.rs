//! Recursive walk over note payloads.
//!
//! # Responsibility
//! - Visit every text-bearing field of every reachable node.
//! - Collect scheduled blocks and unscheduled tasks in discovery order.
//!
//! # Invariants
//! - Field order per node: markdown, content, text, page title, then
//!   `blocks`, `subblocks`, `children`, `page`.
//! - No deduplication: content reachable through two relations is
//!   classified twice.
//! - Scheduled output is stably sorted by start time.

use crate::model::block::ParsedBlocks;
use crate::model::payload::{BlockContent, ContentItem, NoteBlock, NotePayload};
use crate::parse::classify::{classify_line, Classified, LineContext, StructuralHint};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static LEGACY_PAGE_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<pageTitle>([^<]+)</pageTitle>").expect("valid legacy page title regex")
});
static LEGACY_CONTENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<content>([^<]+)</content>").expect("valid legacy content regex"));

/// Parses a note payload into scheduled blocks and unscheduled tasks.
///
/// Unrecognized nodes and prose lines are skipped silently.
pub fn parse_blocks(payload: &NotePayload) -> ParsedBlocks {
    let mut walker = Walker::default();

    match payload {
        NotePayload::Legacy(text) => walker.visit_legacy(text),
        NotePayload::Blocks(blocks) => blocks.iter().for_each(|block| walker.visit_block(block)),
        NotePayload::Block(root) => {
            if let Some(page) = root.page.as_deref() {
                walker.visit_block(page);
            } else if !root.blocks.is_empty() {
                root.blocks.iter().for_each(|block| walker.visit_block(block));
            } else {
                walker.visit_block(root);
            }
        }
    }

    let mut parsed = walker.parsed;
    parsed
        .scheduled
        .sort_by(|left, right| left.start.total_cmp(&right.start));

    debug!(
        "event=parse_blocks module=parse status=ok nodes={} scheduled={} unscheduled={}",
        walker.nodes_visited,
        parsed.scheduled.len(),
        parsed.unscheduled.len()
    );
    parsed
}

#[derive(Default)]
struct Walker {
    parsed: ParsedBlocks,
    nodes_visited: usize,
}

impl Walker {
    fn push(&mut self, classified: Option<Classified>) {
        match classified {
            Some(Classified::Scheduled(block)) => self.parsed.scheduled.push(block),
            Some(Classified::Unscheduled(task)) => self.parsed.unscheduled.push(task),
            None => {}
        }
    }

    fn visit_text(&mut self, text: &str, context: &LineContext<'_>) {
        self.push(classify_line(text, context));
    }

    fn visit_legacy(&mut self, text: &str) {
        let context = LineContext::default();
        for caps in LEGACY_PAGE_TITLE_RE.captures_iter(text) {
            self.visit_text(caps[1].trim(), &context);
        }
        for caps in LEGACY_CONTENT_RE.captures_iter(text) {
            self.visit_text(caps[1].trim(), &context);
        }
    }

    fn visit_block(&mut self, block: &NoteBlock) {
        self.nodes_visited += 1;
        let id = block.id.as_deref();
        let color = block.resolved_color();
        let colored = LineContext {
            id,
            highlight: color,
            hint: None,
        };
        let plain = LineContext {
            id,
            highlight: None,
            hint: None,
        };

        if let Some(markdown) = block.markdown.as_deref() {
            let with_hint = LineContext {
                hint: Some(StructuralHint {
                    list_style: block.list_style,
                    task_state: block.task_state(),
                }),
                ..colored
            };
            self.visit_text(markdown, &with_hint);
        }

        match &block.content {
            Some(BlockContent::Text(text)) => self.visit_text(text, &colored),
            Some(BlockContent::Items(items)) => {
                for item in items {
                    match item {
                        ContentItem::Text(text) => self.visit_text(text, &colored),
                        ContentItem::Block(child) => self.visit_block(child),
                        ContentItem::Other(_) => {}
                    }
                }
            }
            Some(BlockContent::Other(_)) | None => {}
        }

        if let Some(text) = block.text.as_deref() {
            self.visit_text(text, &plain);
        }
        if let Some(title) = block.page_title.as_deref() {
            self.visit_text(title, &plain);
        }

        for child in block
            .blocks
            .iter()
            .chain(&block.subblocks)
            .chain(&block.children)
        {
            self.visit_block(child);
        }
        if let Some(page) = block.page.as_deref() {
            self.visit_block(page);
        }
    }
}
