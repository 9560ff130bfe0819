use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tours_core::{CardView, GalleryView};

const HELP_TEXT: &str = "Up/Down select  Enter read more/show less  x not interested  q quit";
/// Borders plus the image, price and controls rows.
const CARD_CHROME_ROWS: u16 = 5;

pub fn render(frame: &mut Frame<'_>, view: &GalleryView, selected: usize) {
    match view {
        GalleryView::Loading { text } => {
            frame.render_widget(Paragraph::new(text.as_str()), frame.area());
        }
        GalleryView::Error { text } => {
            frame.render_widget(
                Paragraph::new(text.as_str()).style(Style::default().fg(Color::Red)),
                frame.area(),
            );
        }
        GalleryView::Cards(cards) => render_gallery(frame, cards, selected),
    }
}

fn render_gallery(frame: &mut Frame<'_>, cards: &[CardView], selected: usize) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());
    let body = layout[0];

    frame.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
        layout[1],
    );

    if cards.is_empty() || body.width < 3 {
        return;
    }

    let inner_width = body.width - 2;
    let heights: Vec<u16> = cards
        .iter()
        .map(|card| card_height(card, inner_width))
        .collect();
    let selected = selected.min(cards.len() - 1);
    let start = first_visible(&heights, selected, body.height);

    let mut y = body.y;
    let bottom = body.y + body.height;
    for (index, card) in cards.iter().enumerate().skip(start) {
        if y >= bottom {
            break;
        }
        let height = heights[index].min(bottom - y);
        let area = Rect::new(body.x, y, body.width, height);
        render_card(frame, card, area, index == selected);
        y += height;
    }
}

fn render_card(frame: &mut Frame<'_>, card: &CardView, area: Rect, is_selected: bool) {
    let border_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", card.name));

    let inner_width = area.width.saturating_sub(2);
    let mut lines = vec![
        Line::from(Span::styled(
            card.image.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            card.price_label.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(
        wrap_chars(&card.description, inner_width)
            .into_iter()
            .map(Line::from),
    );
    let toggle_style = if card.expanded {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Yellow)
    };
    lines.push(Line::from(vec![
        Span::styled(format!("[Enter] {}", card.toggle_label), toggle_style),
        Span::raw("  "),
        Span::styled(
            format!("[x] {}", card.remove_label),
            Style::default().fg(Color::Red),
        ),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn card_height(card: &CardView, inner_width: u16) -> u16 {
    let rows = wrap_chars(&card.description, inner_width).len();
    CARD_CHROME_ROWS.saturating_add(u16::try_from(rows).unwrap_or(u16::MAX))
}

/// Earliest card index that still keeps `selected` fully inside `available` rows.
fn first_visible(heights: &[u16], selected: usize, available: u16) -> usize {
    let mut start = selected;
    let mut used = heights[selected];
    while start > 0 {
        let next = used.saturating_add(heights[start - 1]);
        if next > available {
            break;
        }
        start -= 1;
        used = next;
    }
    start
}

/// Hard-wraps at `width` characters; always yields at least one row.
fn wrap_chars(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
