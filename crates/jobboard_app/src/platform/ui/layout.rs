use ratatui::layout::{Constraint, Flex, Layout, Rect};

use super::constants::COLUMN_WIDTHS;

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub table: Rect,
    pub status: Rect,
}

pub fn screen(area: Rect) -> ScreenLayout {
    let [header, table, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);
    ScreenLayout {
        header,
        table,
        status,
    }
}

pub fn column_constraints() -> Vec<Constraint> {
    COLUMN_WIDTHS
        .iter()
        .map(|percent| Constraint::Percentage(*percent))
        .collect()
}

/// A box centered in `area`, `percent_x` wide and `height` rows tall.
pub fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_widths_fill_the_table() {
        assert_eq!(COLUMN_WIDTHS.iter().sum::<u16>(), 100);
    }

    #[test]
    fn screen_reserves_header_and_status_rows() {
        let layout = screen(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.status.y, 29);
        assert_eq!(layout.table.height, 26);
    }

    #[test]
    fn centered_box_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 30);
        let rect = centered(area, 60, 7);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 7);
        assert_eq!(rect.x, 20);
        assert!(rect.bottom() <= area.bottom());
    }
}
