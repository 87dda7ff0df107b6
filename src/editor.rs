//! Structured text-editing behavior for the query editor.
//!
//! [`apply_keystroke`] is a pure function from (text, selection, key event)
//! to a replacement text and selection. It implements bracket auto-closing
//! and type-through, tab indent/outdent for a cursor or a multi-line
//! selection, indent-preserving Enter with bracket-pair expansion, and
//! indent-aware Backspace. A `None` return means the key was not handled and
//! the caller should apply its default behavior.
//!
//! Offsets are character offsets, not bytes. Bracket, Enter, and Backspace
//! rules only apply to a collapsed selection; Tab and Shift+Tab are the
//! range-aware rules.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One indent level.
pub const INDENT_WIDTH: usize = 4;

const OPENING: [char; 3] = ['{', '(', '['];
const CLOSING: [char; 3] = ['}', ')', ']'];

/// The closing bracket paired with an opening one.
pub const fn closing_for(open: char) -> Option<char> {
    match open {
        '{' => Some('}'),
        '(' => Some(')'),
        '[' => Some(']'),
        _ => None,
    }
}

/// The opening bracket paired with a closing one.
pub const fn opening_for(close: char) -> Option<char> {
    match close {
        '}' => Some('{'),
        ')' => Some('('),
        ']' => Some('['),
        _ => None,
    }
}

/// Result of a handled keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystrokeEdit {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

impl KeystrokeEdit {
    fn cursor(text: String, at: usize) -> Self {
        Self {
            text,
            selection_start: at,
            selection_end: at,
        }
    }
}

/// Apply one keystroke to `text` with the selection `[start, end]`.
pub fn apply_keystroke(
    text: &str,
    start: usize,
    end: usize,
    key: KeyEvent,
) -> Option<KeystrokeEdit> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let chars: Vec<char> = text.chars().collect();
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());

    match key.code {
        KeyCode::Char(c) if CLOSING.contains(&c) => handle_closing_bracket(&chars, start, end, c),
        KeyCode::Char(c) if OPENING.contains(&c) => handle_opening_bracket(&chars, start, end, c),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            handle_outdent(&chars, start, end)
        }
        KeyCode::BackTab => handle_outdent(&chars, start, end),
        KeyCode::Tab => handle_indent(&chars, start, end),
        KeyCode::Enter => handle_enter(&chars, start, end),
        KeyCode::Backspace if key.modifiers.is_empty() => handle_backspace(&chars, start, end),
        _ => None,
    }
}

/// Index of the first character of the line containing `pos`.
fn line_start(chars: &[char], pos: usize) -> usize {
    chars[..pos]
        .iter()
        .rposition(|&c| c == '\n')
        .map_or(0, |i| i + 1)
}

/// Number of leading whitespace characters on the line starting at `ls`.
fn leading_whitespace(chars: &[char], ls: usize) -> usize {
    chars[ls..]
        .iter()
        .take_while(|&&c| c != '\n' && c.is_whitespace())
        .count()
}

fn splice(chars: &[char], from: usize, to: usize, insert: &str) -> String {
    let mut out: String = chars[..from].iter().collect();
    out.push_str(insert);
    out.extend(&chars[to..]);
    out
}

/// Typing a closing bracket directly before the same closing bracket steps
/// over it instead of inserting a duplicate.
fn handle_closing_bracket(
    chars: &[char],
    start: usize,
    end: usize,
    c: char,
) -> Option<KeystrokeEdit> {
    if start == end && chars.get(start) == Some(&c) {
        return Some(KeystrokeEdit::cursor(chars.iter().collect(), start + 1));
    }
    None
}

/// Opening brackets auto-close, except when the cursor already sits inside a
/// matched empty pair, where only the typed character is inserted.
fn handle_opening_bracket(
    chars: &[char],
    start: usize,
    end: usize,
    c: char,
) -> Option<KeystrokeEdit> {
    if start != end {
        return None;
    }
    let inside_matched_pair = matches!(
        (start.checked_sub(1).and_then(|i| chars.get(i)), chars.get(start)),
        (Some(&prev), Some(&next))
            if CLOSING.contains(&next) && opening_for(next) == Some(prev)
    );
    let insert = if inside_matched_pair {
        c.to_string()
    } else {
        let close = closing_for(c)?;
        let mut s = c.to_string();
        s.push(close);
        s
    };
    Some(KeystrokeEdit::cursor(
        splice(chars, start, start, &insert),
        start + 1,
    ))
}

/// Positions within `[start, end)` where a line begins, relative to `start`:
/// offset 0 plus the offset after every newline in the range (including one
/// directly at `end`). This mirrors multiline `^` matching over the selected
/// slice.
fn line_starts_in_selection(chars: &[char], start: usize, end: usize) -> Vec<usize> {
    let mut positions = vec![start];
    for (i, &c) in chars[start..end].iter().enumerate() {
        if c == '\n' {
            positions.push(start + i + 1);
        }
    }
    positions
}

fn handle_indent(chars: &[char], start: usize, end: usize) -> Option<KeystrokeEdit> {
    let pad = " ".repeat(INDENT_WIDTH);
    if start == end {
        return Some(KeystrokeEdit::cursor(
            splice(chars, start, start, &pad),
            start + INDENT_WIDTH,
        ));
    }
    let positions = line_starts_in_selection(chars, start, end);
    let mut out: Vec<char> = chars.to_vec();
    for &pos in positions.iter().rev() {
        for (k, c) in pad.chars().enumerate() {
            out.insert(pos + k, c);
        }
    }
    Some(KeystrokeEdit {
        text: out.iter().collect(),
        selection_start: start,
        selection_end: end + INDENT_WIDTH * positions.len(),
    })
}

fn handle_outdent(chars: &[char], start: usize, end: usize) -> Option<KeystrokeEdit> {
    if start == end {
        let ls = line_start(chars, start);
        let before_cursor_is_ws =
            start > ls && chars[ls..start].iter().all(|c| c.is_whitespace());
        if !before_cursor_is_ws {
            return Some(KeystrokeEdit::cursor(chars.iter().collect(), start));
        }
        let spaces = chars[ls..start]
            .iter()
            .rev()
            .take_while(|&&c| c == ' ')
            .count()
            .min(INDENT_WIDTH);
        return Some(KeystrokeEdit::cursor(
            splice(chars, start - spaces, start, ""),
            start - spaces,
        ));
    }

    // Strip one exact 4-space run from each line start in the selection. The
    // run may extend past the selection end; only the part before `end`
    // shrinks the selection.
    let positions = line_starts_in_selection(chars, start, end);
    let mut out: Vec<char> = chars.to_vec();
    let mut removed_before_end = 0;
    for &pos in positions.iter().rev() {
        let has_indent = pos + INDENT_WIDTH <= out.len()
            && out[pos..pos + INDENT_WIDTH].iter().all(|&c| c == ' ');
        if has_indent && pos < end {
            out.drain(pos..pos + INDENT_WIDTH);
            removed_before_end += INDENT_WIDTH.min(end - pos);
        }
    }
    Some(KeystrokeEdit {
        text: out.iter().collect(),
        selection_start: start,
        selection_end: end - removed_before_end,
    })
}

fn handle_enter(chars: &[char], start: usize, end: usize) -> Option<KeystrokeEdit> {
    if start != end {
        return None;
    }
    let ls = line_start(chars, start);
    let indent = leading_whitespace(chars, ls);

    let last_char = chars[..start].iter().rev().find(|c| !c.is_whitespace());
    let next_char = chars[start..].iter().find(|c| !c.is_whitespace());

    let between_pair = matches!(
        (last_char, next_char),
        (Some(l), Some(n)) if OPENING.contains(l) && CLOSING.contains(n)
    );

    if between_pair {
        // Push the closing bracket to its own line at the original indent and
        // leave the cursor one level deeper.
        let insert = format!(
            "\n{}\n{}",
            " ".repeat(indent + INDENT_WIDTH),
            " ".repeat(indent)
        );
        Some(KeystrokeEdit::cursor(
            splice(chars, start, start, &insert),
            start + 1 + indent + INDENT_WIDTH,
        ))
    } else {
        let insert = format!("\n{}", " ".repeat(indent));
        Some(KeystrokeEdit::cursor(
            splice(chars, start, start, &insert),
            start + 1 + indent,
        ))
    }
}

/// Backspace in leading whitespace deletes up to one indent level.
fn handle_backspace(chars: &[char], start: usize, end: usize) -> Option<KeystrokeEdit> {
    if start != end {
        return None;
    }
    let ls = line_start(chars, start);
    if start == ls || !chars[ls..start].iter().all(|c| c.is_whitespace()) {
        return None;
    }
    let n = (start - ls).min(INDENT_WIDTH);
    Some(KeystrokeEdit::cursor(
        splice(chars, start - n, start, ""),
        start - n,
    ))
}
