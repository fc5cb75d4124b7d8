use crate::application::{App, Container, FormField, FormView, LoadingView, ViewKind};
use crate::domain::{FilterKind, SortKind, format_form_datetime};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_summary(f, app, chunks[1]);
    render_sort_bar(f, app, chunks[2]);
    render_board(f, app, chunks[3]);
    render_status_bar(f, app, chunks[4]);

    if app.help_open {
        render_help_popup(f);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let active = app.list_presenter.filter_kind();
    let mut spans = vec![
        Span::styled("tript - Terminal Trip Planner", Style::default().fg(Color::Cyan)),
        Span::raw("  |  Filter: "),
    ];
    for kind in FilterKind::ALL {
        let style = if kind == active {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::styled(format!(" {} ", kind.label()), style));
    }
    spans.push(Span::raw("  |  "));
    let create = if app.list_presenter.create_enabled() {
        Span::styled("N: New event", Style::default().fg(Color::Green))
    } else {
        Span::styled("N: New event", Style::default().fg(Color::DarkGray))
    };
    spans.push(create);
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_summary(f: &mut Frame, app: &App, area: Rect) {
    let summary = app
        .surface
        .components(Container::Summary)
        .iter()
        .find_map(|mounted| match &mounted.view {
            ViewKind::Summary(view) => Some(&view.summary),
            _ => None,
        });
    let Some(summary) = summary else { return };

    let lines = vec![
        Line::from(Span::styled(
            summary.route.clone(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(format!("{}   Cost: €{}", summary.dates, summary.total_cost)),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_sort_bar(f: &mut Frame, app: &App, area: Rect) {
    let active = app
        .surface
        .components(Container::Controls)
        .iter()
        .find_map(|mounted| match &mounted.view {
            ViewKind::SortBar(view) => Some(view.active),
            _ => None,
        });
    let Some(active) = active else { return };

    let mut spans = vec![Span::raw("Sort by: ")];
    for kind in SortKind::ALL {
        let style = if kind == active {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::styled(format!(" {} ", kind.label()), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let components = app.surface.components(Container::Board);
    let mut constraints: Vec<Constraint> = components
        .iter()
        .map(|mounted| match &mounted.view {
            ViewKind::Form(_) => Constraint::Length(9),
            _ => Constraint::Length(1),
        })
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut card_index = 0usize;
    for (mounted, row) in components.iter().zip(rows.iter()) {
        match &mounted.view {
            ViewKind::Loading(_) => {
                f.render_widget(
                    Paragraph::new(LoadingView::TEXT).style(Style::default().fg(Color::Yellow)),
                    *row,
                );
            }
            ViewKind::Message(message) => {
                f.render_widget(Paragraph::new(message.text.as_str()), *row);
            }
            ViewKind::Card(card) => {
                let selected = card_index == app.selected && !app.is_editing();
                card_index += 1;
                let style = if selected {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                let star = if card.is_favorite { " ★" } else { "" };
                let offers = if card.offer_titles.is_empty() {
                    String::new()
                } else {
                    format!("  +{}", card.offer_titles.join(", "))
                };
                let text = format!(
                    "{:<7} {} ({})  {:<14} €{}{}{}",
                    card.day, card.times, card.duration, card.title, card.price, offers, star,
                );
                f.render_widget(Paragraph::new(text).style(style), *row);
            }
            ViewKind::Form(form) => render_form(f, app, form, *row),
            ViewKind::SortBar(_) | ViewKind::Summary(_) => {}
        }
    }
}

fn render_form(f: &mut Frame, app: &App, form: &FormView, area: Rect) {
    let data = app.trip_model.data();
    let focused = Style::default().fg(Color::Green);

    let destination = data
        .destination(form.draft.destination)
        .map(|d| d.name.as_str())
        .unwrap_or("Unknown");
    let names = app.trip_model.destination_names().join(" | ");
    let destination_line = Line::from(vec![
        Span::raw("Destination: "),
        Span::styled(
            format!("< {} >", destination),
            if form.field == FormField::Destination { focused } else { Style::default() },
        ),
        Span::styled(format!("   ({})", names), Style::default().fg(Color::DarkGray)),
    ]);

    let text_line = |field: FormField, shown: String| {
        let value = if form.field == field { form.input.clone() } else { shown };
        Line::from(vec![
            Span::raw(format!("{:<12} ", format!("{}:", field.label()))),
            Span::styled(
                value,
                if form.field == field { focused } else { Style::default() },
            ),
        ])
    };
    let from_line = text_line(FormField::DateFrom, format_form_datetime(form.draft.date_from));
    let to_line = text_line(FormField::DateTo, format_form_datetime(form.draft.date_to));
    let price_line = text_line(FormField::Price, form.draft.base_price.to_string());

    let mut offer_spans = vec![Span::raw("Offers:      ")];
    for (index, offer) in data.offers.iter().enumerate() {
        let mark = if form.draft.has_offer(offer.id) { "[x]" } else { "[ ]" };
        let style = if form.field == FormField::Offers && index == form.offer_cursor {
            focused
        } else {
            Style::default()
        };
        offer_spans.push(Span::styled(
            format!("{} {} €{}  ", mark, offer.title, offer.price),
            style,
        ));
    }

    let error_line = match &form.error {
        Some(error) => Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    };
    let hint = if form.is_new {
        "Enter: save  Esc: cancel  Tab: next field"
    } else {
        "Enter: save  Esc: cancel  Tab: next field  Ctrl+D: delete"
    };

    let lines = vec![
        destination_line,
        from_line,
        to_line,
        price_line,
        Line::from(offer_spans),
        error_line,
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    let title = if form.is_new { "New point" } else { "Edit point" };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(ref status) = app.status_message {
        status.clone()
    } else if app.is_editing() {
        "Editing: Tab/Shift+Tab move between fields, Enter saves, Esc cancels".to_string()
    } else {
        "↑↓/jk: select | Enter: edit | f: favorite | n: new | s: sort | 1-3: filter | y: copy | Ctrl+E: export CSV | F1/?: help | q: quit"
            .to_string()
    };

    let style = if app.is_editing() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 8,
        y: area.height / 8,
        width: area.width * 3 / 4,
        height: area.height * 3 / 4,
    };

    f.render_widget(Clear, popup_area);

    let help_widget = Paragraph::new(get_help_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("tript Help")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"TRIPT KEY REFERENCE

=== BROWSING ===
Up/Down or k/j  Move the selection
Enter or F2     Edit the selected point
f               Toggle favorite on the selected point
n               Create a new point (resets sort and filter first)
s               Cycle sort: Day -> Time -> Price
1 / 2 / 3       Filter: Everything / Future / Past
y               Copy the selected point to the clipboard
Ctrl+E          Export the itinerary to itinerary.csv
q               Quit

=== EDITING A POINT ===
Tab / Shift+Tab Move between fields
Left/Right      Cycle destinations, move over offers, move the cursor
Space           Toggle the offer under the cursor
Enter           Save (the form stays open on invalid input)
Esc             Cancel and discard changes
Ctrl+D          Delete the point (cancel in the creation form)

=== DATA ===
tript [file]    Load and persist the itinerary at [file]
tript [url]     Fetch the itinerary from an HTTP endpoint
With no argument, itinerary.json is used when present, otherwise a
small built-in itinerary is loaded. Changes are saved after every
edit, addition and deletion."#
        .to_string()
}
