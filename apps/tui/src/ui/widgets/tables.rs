/// First row to draw so that `selected_index` stays visible.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || max_visible_rows == 0 {
        return 0;
    }

    if selected_index >= max_visible_rows {
        let offset = selected_index + 1 - max_visible_rows;
        let last_page = total_rows - max_visible_rows;
        return if offset > last_page { last_page } else { offset };
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tables_never_scroll() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
    }

    #[test]
    fn selection_past_the_fold_scrolls_just_enough() {
        assert_eq!(scroll_offset(20, 5, 4), 0);
        assert_eq!(scroll_offset(20, 5, 5), 1);
        assert_eq!(scroll_offset(20, 5, 19), 15);
        assert_eq!(scroll_offset(20, 5, 40), 15, "clamped to the last page");
    }
}
