use std::fmt::Write;

use jokes_core::{AggregateView, EntryRowView, JokeDetail};

pub const HELP: &str = "\
Commands:
  e <row>          expand or collapse a category
  m <row>          load more jokes for a category
  t <row>          move a category to the top
  s <row> <joke>   show a joke
  r                refresh all categories
  h                this help
  q                quit
";

const SKELETON_ROWS: usize = 7;

pub fn render(view: &AggregateView) -> String {
    let mut out = String::new();

    if view.boot_loading {
        out.push_str("Loading categories...\n");
        for _ in 0..SKELETON_ROWS {
            out.push_str("  ░░░░░░░░░░░░░░░░░░░░\n");
        }
        return out;
    }

    if view.refreshing {
        out.push_str("Refreshing...\n");
    }
    if view.rows.is_empty() {
        out.push_str("No categories loaded. Type `r` to retry.\n");
        return out;
    }

    for row in &view.rows {
        render_row(&mut out, row);
    }
    out
}

fn render_row(out: &mut String, row: &EntryRowView) {
    let marker = if row.expanded { '▾' } else { '▸' };
    let top = if row.is_on_top { " (top)" } else { "" };
    let _ = writeln!(out, "{:>2}. {} {}{}", row.position, marker, row.title, top);
    if !row.expanded {
        return;
    }

    for (index, joke) in row.jokes.iter().enumerate() {
        let _ = writeln!(out, "      {}) {}", index + 1, joke);
    }
    if row.fetching_initial || row.loading_more {
        out.push_str("      loading...\n");
    } else if row.can_grow {
        out.push_str("      [more]\n");
    }
}

pub fn render_detail(detail: &JokeDetail) -> String {
    format!(
        "┌─ {} {}\n│ {}\n└─\n",
        detail.emoji, detail.category, detail.text
    )
}
