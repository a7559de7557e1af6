/// Normalizes raw extracted text before boundary detection: non-breaking
/// spaces become ordinary spaces, every line loses trailing whitespace, and
/// runs of three or more newlines collapse to exactly two. Idempotent.
pub fn normalize_text(text: &str) -> String {
    let rtrimmed = text
        .replace('\u{00a0}', " ")
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");

    collapse_newline_runs(&rtrimmed, 2)
}

fn collapse_newline_runs(text: &str, max_run: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;

    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run > max_run {
                continue;
            }
        } else {
            run = 0;
        }
        out.push(ch);
    }

    out
}
