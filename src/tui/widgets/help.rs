use ratatui::widgets::{Block, Borders, Paragraph, Clear, Wrap};
use ratatui::style::Style;
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment, Constraint, Layout, Flex};
use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 80);

    // Clear the background first so list content doesn't show through
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Help - Key Bindings")
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(fg_color).bg(bg_color)))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

/// Centered rect using a percentage of the available rect
/// Based on ratatui popup example: https://ratatui.rs/examples/apps/popup/
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!("  {} / {}: Switch tabs\n", key(&kb.tab_left), key(&kb.tab_right)));
    text.push_str(&format!("  {} / {} / {}: Closet, Outfits, Calendar\n", key(&kb.tab_1), key(&kb.tab_2), key(&kb.tab_3)));
    text.push_str(&format!("  {} / {}: Move up/down\n", key(&kb.list_up), key(&kb.list_down)));
    text.push('\n');

    text.push_str("Closet:\n");
    text.push_str("  h / l: Move between filter chips, Space: apply chip\n");
    text.push_str(&format!("  {}: Add item\n", key(&kb.new)));
    text.push_str(&format!("  {}: Log a wash\n", key(&kb.wash)));
    text.push_str(&format!("  {}: Mark dirty\n", key(&kb.mark_dirty)));
    text.push_str(&format!("  {}: Delete item\n", key(&kb.delete)));
    text.push('\n');

    text.push_str("Outfits:\n");
    text.push_str(&format!("  {}: Random outfit (any tab)\n", key(&kb.generate)));
    text.push_str(&format!("  {}: Build an outfit\n", key(&kb.new)));
    text.push_str(&format!("  {}: Toggle favorite\n", key(&kb.favorite)));
    text.push_str(&format!("  {}: Delete outfit\n", key(&kb.delete)));
    text.push('\n');

    text.push_str("Calendar:\n");
    text.push_str(&format!("  h / l, {} / {}: Move by day / week\n", key(&kb.list_up), key(&kb.list_down)));
    text.push_str(&format!("  {}: Select or deselect day\n", key(&kb.select)));
    text.push_str("  [ / ]: Previous / next month\n");
    text.push('\n');

    text.push_str("Forms:\n");
    text.push_str("  Tab / Shift+Tab: Next / previous field\n");
    text.push_str("  Left / Right: Change choice fields\n");
    text.push_str(&format!("  {}: Save\n", key(&kb.save)));
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", key(&kb.quit)));
    text.push_str(&format!("  {}: Show/hide help\n", key(&kb.help)));
    text.push_str(&format!("  {}: Settings\n", key(&kb.settings)));

    text
}
