//! Tab-aware visual column mapping.
//!
//! Every byte occupies one terminal cell except `\t`, which advances to the
//! next multiple of the tab stop. The mapping is recomputed on demand; nothing
//! is cached per line.

pub const DEFAULT_TAB_STOP: usize = 8;

/// Visual column of byte offset `cx` in `line`. Offsets past the end are
/// treated as the line end.
pub fn visual_col(line: &[u8], cx: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut rx = 0;
    for &b in line.iter().take(cx) {
        if b == b'\t' {
            rx += (tab_stop - 1) - (rx % tab_stop);
        }
        rx += 1;
    }
    rx
}

/// Render form of a line: tabs replaced by spaces up to the next tab stop.
pub fn expand_tabs(line: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let mut out = Vec::with_capacity(line.len());
    for &b in line {
        if b == b'\t' {
            out.push(b' ');
            while out.len() % tab_stop != 0 {
                out.push(b' ');
            }
        } else {
            out.push(b);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tab_jumps_to_tab_stop() {
        assert_eq!(visual_col(b"\t", 0, 8), 0);
        assert_eq!(visual_col(b"\t", 1, 8), 8);
    }

    #[test]
    fn mixed_line_columns() {
        let cols: Vec<usize> = (0..=3).map(|cx| visual_col(b"a\tb", cx, 8)).collect();
        assert_eq!(cols, vec![0, 1, 8, 9]);
    }

    #[test]
    fn custom_tab_stop() {
        assert_eq!(visual_col(b"ab\tc", 3, 4), 4);
        assert_eq!(visual_col(b"abcd\t", 5, 4), 8);
    }

    #[test]
    fn expansion_matches_visual_columns() {
        let line = b"a\tbc\t\td";
        let expanded = expand_tabs(line, 8);
        assert_eq!(expanded.len(), visual_col(line, line.len(), 8));
        assert_eq!(&expanded[..9], b"a       b");
    }

    #[test]
    fn zero_tab_stop_is_treated_as_one() {
        assert_eq!(visual_col(b"\t\t", 2, 0), 2);
        assert_eq!(expand_tabs(b"\t", 0), b" ".to_vec());
    }
}
