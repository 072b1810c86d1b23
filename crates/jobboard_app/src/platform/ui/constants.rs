use ratatui::style::Color;

pub const TITLE: &str = "Job Updates";
pub const FETCH_LABEL_IDLE: &str = "Fetch Latest Job Updates";
pub const FETCH_LABEL_BUSY: &str = "Fetching Updates...";
pub const APPLY_LABEL: &str = "Apply Here";
pub const SHARE_LABEL: &str = "Share";
pub const COPIED_LABEL: &str = "✓ Copied";
pub const EMPTY_TABLE_HINT: &str = "No postings yet. Press f to fetch the latest job updates.";
pub const ALERT_TITLE: &str = " Error ";
pub const ALERT_FOOTER: &str = "Press Enter to dismiss";
pub const KEY_HELP: &str = "f fetch | ↑/↓ select | s share | enter apply | q quit";

pub const COLUMN_HEADERS: [&str; 7] = [
    "Company Name",
    "Role",
    "Years of Experience",
    "Batch Eligible",
    "Salary",
    "Apply",
    "Share",
];
/// Percent of the table width per column; sums to 100.
pub const COLUMN_WIDTHS: [u16; 7] = [18, 18, 14, 16, 14, 10, 10];

pub const ACCENT: Color = Color::Rgb(79, 70, 229);
pub const ROW_EVEN_BG: Color = Color::Rgb(38, 38, 46);
pub const ROW_ODD_BG: Color = Color::Reset;
pub const COPIED_FG: Color = Color::Green;
pub const BUSY_FG: Color = Color::DarkGray;
pub const ALERT_FG: Color = Color::Red;
