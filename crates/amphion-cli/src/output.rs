use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render_table(headers, &rows));
}

/// Aligned `label: value` block, one pair per line.
pub fn print_fields(fields: &[(&str, String)]) {
    print!("{}", render_fields(fields));
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn width(s: &str) -> usize {
    s.chars().count()
}

/// Left-align `cells` to `widths`, two spaces apart, without trailing padding.
fn render_line(cells: &[&str], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let w = widths.get(i).copied().unwrap_or(0);
        line.extend(std::iter::repeat(' ').take(w.saturating_sub(width(cell))));
    }
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let mut out = render_line(headers, &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_line(&cells, &widths));
    }
    out
}

fn render_fields(fields: &[(&str, String)]) -> String {
    let label_width = fields.iter().map(|(l, _)| width(l) + 1).max().unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| format!("{:<label_width$} {value}\n", format!("{label}:")))
        .collect()
}
