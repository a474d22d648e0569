use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Tabs, Wrap,
    },
};

use crate::app::{App, DashboardTab, InputMode, LoginField, Screen, SignupField};
use crate::chat::{ChatRole, QUICK_QUESTIONS};
use crate::handler::home_menu_items;
use crate::market::{self, Period, PriceSeries, Signal};
use crate::theme::Palette;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let palette = app.theme.palette();

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area, &palette);

    match app.screen {
        Screen::Home => render_home(app, frame, body_area, &palette),
        Screen::Dashboard => render_dashboard(app, frame, body_area, &palette),
        Screen::StockDetail => render_detail(app, frame, body_area, &palette),
        Screen::Login => render_login(app, frame, body_area, &palette),
        Screen::Signup => render_signup(app, frame, body_area, &palette),
    }

    render_footer(app, frame, footer_area, &palette);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let auth_indicator = if app.auth.is_logged_in() {
        let dot = if app.auth.new_notification_available { " ● " } else { " " };
        format!("{dot}signed in ")
    } else {
        " guest ".to_string()
    };

    let title = Line::from(vec![
        Span::styled(" StockAI ", Style::default().fg(palette.accent).bold()),
        Span::styled(
            format!("[{}] ", app.theme.label()),
            Style::default().fg(palette.dim),
        ),
        Span::styled(auth_indicator, Style::default().fg(palette.fg)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(palette.dim),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(palette.header_bg));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().fg(palette.fg);

    let mut hints: Vec<Span> = Vec::new();
    let mut push = |key: &'static str, label: &'static str| {
        hints.push(Span::styled(format!(" {key} "), key_style));
        hints.push(Span::styled(format!(" {label}  "), label_style));
    };

    match (app.screen, app.input_mode) {
        (Screen::Home, _) => {
            push("j/k", "select");
            push("Enter", "open");
            push("d", "dashboard");
            push("t", "theme");
            push("q", "quit");
        }
        (Screen::Dashboard, InputMode::Editing) => {
            push("Enter", "send");
            push("Esc", "done");
        }
        (Screen::Dashboard, InputMode::Normal) => {
            push("Tab", "tab");
            match app.tab {
                DashboardTab::Assistant => {
                    push("i", "ask");
                    push("1-3", "quick question");
                    push("h/l", "stock");
                    push("Enter", "detail");
                }
                DashboardTab::Market => {
                    push("r", "refresh");
                    push("h/l", "stock");
                    push("Enter", "detail");
                }
                DashboardTab::Watchlist => {
                    push("j/k", "nav");
                    push("Enter", "detail");
                    push("d", "remove");
                }
            }
            push("Esc", "home");
        }
        (Screen::StockDetail, _) => {
            push("1-4", "period");
            push("p", "cycle");
            push("w", "watch");
            push("a", "ask AI");
            push("Esc", "back");
        }
        (Screen::Login, _) | (Screen::Signup, _) => {
            push("Tab", "field");
            push("Enter", "submit");
            push("Esc", "back");
        }
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

// Home

fn render_home(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let [hero_area, menu_area, features_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(home_menu_items().len() as u16 + 2),
        Constraint::Min(0),
    ])
    .areas(area);

    let hero = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            "Stock Market AI Assistant",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Get real-time stock analysis, insights, and recommendations powered by advanced AI",
            Style::default().fg(palette.dim),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(hero, hero_area);

    let items: Vec<ListItem> = home_menu_items()
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if i == app.home_selected {
                Style::default().bg(palette.highlight).fg(Color::White).bold()
            } else {
                Style::default().fg(palette.fg)
            };
            ListItem::new(Line::from(Span::styled(format!("  {label}  "), style)))
        })
        .collect();

    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim)),
    );
    let menu_area = centered_horizontal(menu_area, 40);
    frame.render_widget(menu, menu_area);

    let features = Paragraph::new(vec![
        Line::default(),
        Line::from(vec![
            Span::styled("  ▲ ", Style::default().fg(palette.up)),
            Span::raw("Real-Time Stock Data: prices, trends, and market movements"),
        ]),
        Line::from(vec![
            Span::styled("  ✦ ", Style::default().fg(palette.accent)),
            Span::raw("AI-Powered Insights: ask questions in plain language"),
        ]),
        Line::from(vec![
            Span::styled("  ◆ ", Style::default().fg(palette.highlight)),
            Span::raw("Personal Watchlist: keep the tickers you care about in one place"),
        ]),
    ])
    .style(Style::default().fg(palette.dim))
    .alignment(Alignment::Center);
    frame.render_widget(features, features_area);
}

fn centered_horizontal(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect { x, width, ..area }
}

// Dashboard

fn render_dashboard(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    app.chat_area = None;

    let [tabs_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let titles: Vec<Line> = DashboardTab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.label())))
        .collect();
    let selected = DashboardTab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(palette.dim))
        .highlight_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    match app.tab {
        DashboardTab::Assistant => render_assistant_tab(app, frame, body_area, palette),
        DashboardTab::Market => render_market_tab(app, frame, body_area, palette),
        DashboardTab::Watchlist => render_watchlist_tab(app, frame, body_area, palette),
    }
}

fn render_assistant_tab(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let [chat_col, side_col] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(area);

    let [transcript_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(chat_col);

    render_transcript(app, frame, transcript_area, palette);
    render_chat_input(app, frame, input_area, palette);
    render_assistant_sidebar(app, frame, side_col, palette);
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.dim))
        .title(" AI Stock Assistant ");

    // Remember geometry for mouse hit-testing and scroll math
    app.chat_area = Some(area);
    app.chat_area_height = area.height.saturating_sub(2);
    app.chat_area_width = area.width.saturating_sub(2);

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.chat.messages() {
        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(Line::from(line.to_string()));
                }
            }
            ChatRole::Assistant => {
                lines.push(Line::from(Span::styled(
                    "AI:",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                // Error replies get a distinct background so they read as
                // failures, not answers
                let body_style = if msg.is_error {
                    Style::default().fg(palette.error_fg).bg(palette.error_bg)
                } else {
                    Style::default().fg(palette.fg)
                };
                for line in msg.content.lines() {
                    lines.push(Line::from(Span::styled(line.to_string(), body_style)));
                }
            }
        }
        lines.push(Line::default());
    }

    if app.chat.is_awaiting() {
        lines.push(Line::from(Span::styled(
            "AI:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{dots}"),
            Style::default().fg(palette.dim).add_modifier(Modifier::ITALIC),
        )));
    }

    let total_lines = lines.len() as u16;
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(paragraph, area);

    if total_lines > app.chat_area_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));
        let mut scrollbar_state =
            ScrollbarState::new(total_lines as usize).position(app.chat_scroll as usize);
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin { vertical: 1, horizontal: 0 }),
            &mut scrollbar_state,
        );
    }
}

fn render_chat_input(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let editing = app.input_mode == InputMode::Editing;
    let border = if editing { Color::Yellow } else { palette.dim };

    // The input is disabled while a request is outstanding: the gate in
    // the session enforces it, the title just makes it visible.
    let title = if app.chat.is_awaiting() { " Waiting for reply... " } else { " Ask about stocks " };

    let input = Paragraph::new(app.chat_input.as_str())
        .style(Style::default().fg(if app.chat.is_awaiting() { palette.dim } else { palette.fg }))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        );
    frame.render_widget(input, area);

    if editing {
        frame.set_cursor_position((area.x + 1 + app.chat_cursor as u16, area.y + 1));
    }
}

fn render_assistant_sidebar(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let [quick_area, asking_area, snapshot_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(QUICK_QUESTIONS.len() as u16 + 3),
        Constraint::Min(5),
    ])
    .areas(area);

    // Quick access ticker chips
    let chips: Vec<Span> = market::POPULAR_TICKERS
        .iter()
        .enumerate()
        .flat_map(|(i, ticker)| {
            let style = if i == app.quick_selected {
                Style::default().bg(palette.highlight).fg(Color::White).bold()
            } else {
                Style::default().fg(palette.fg)
            };
            [Span::styled(format!(" {ticker} "), style), Span::raw(" ")]
        })
        .collect();
    let quick = Paragraph::new(vec![Line::from(chips)])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.dim))
                .title(" Quick Access "),
        );
    frame.render_widget(quick, quick_area);

    // Canned prompts
    let mut asking_lines: Vec<Line> = vec![Line::from(Span::styled(
        "Try asking:",
        Style::default().fg(palette.fg).bold(),
    ))];
    for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
        asking_lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), Style::default().fg(palette.accent).bold()),
            Span::styled(format!("\"{question}\""), Style::default().fg(palette.dim)),
        ]));
    }
    let asking = Paragraph::new(asking_lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim)),
    );
    frame.render_widget(asking, asking_area);

    render_snapshot(app, frame, snapshot_area, palette);
}

fn render_snapshot(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines: Vec<Line> = app
        .snapshot
        .iter()
        .map(|quote| {
            let style = if quote.percent_change >= 0.0 {
                Style::default().fg(palette.up)
            } else {
                Style::default().fg(palette.down)
            };
            Line::from(vec![
                Span::styled(format!("{:<10}", quote.name), Style::default().fg(palette.fg)),
                Span::styled(format!("{:+.2}%", quote.percent_change), style),
            ])
        })
        .collect();

    let snapshot = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim))
            .title(" Market Snapshot "),
    );
    frame.render_widget(snapshot, area);
}

fn render_market_tab(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let [chart_area, movers_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    render_price_chart(&app.overview_series, frame, chart_area, palette);

    let [gainers_area, losers_area] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(movers_area);

    render_movers(" Top Gainers ", &app.gainers, frame, gainers_area, palette, palette.up);
    render_movers(" Top Losers ", &app.losers, frame, losers_area, palette, palette.down);
}

fn render_movers(
    title: &'static str,
    movers: &[market::Mover],
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    change_color: Color,
) {
    let lines: Vec<Line> = movers
        .iter()
        .map(|mover| {
            Line::from(vec![
                Span::styled(format!("{:<8}", mover.ticker), Style::default().fg(palette.fg)),
                Span::styled(
                    format!("{:+.2}%", mover.percent_change),
                    Style::default().fg(change_color),
                ),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim))
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

fn render_watchlist_tab(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.dim))
        .title(" Watchlist ");

    if !app.auth.is_logged_in() {
        let placeholder = Paragraph::new("Login to create and manage your watchlist")
            .style(Style::default().fg(palette.dim))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    if app.watchlist.is_empty() {
        let placeholder =
            Paragraph::new("Your watchlist is empty. Press 'w' on a stock's detail page to add it.")
                .style(Style::default().fg(palette.dim))
                .alignment(Alignment::Center)
                .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .watchlist
        .iter()
        .map(|ticker| {
            ListItem::new(format!(" {}  {}", ticker, market::company_name(ticker)))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(palette.highlight).fg(Color::White).bold())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.watchlist_state);
}

// Stock detail

fn render_detail(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let [title_area, chart_area, period_area, grid_area, news_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(10),
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Length(5),
    ])
    .areas(area);

    let stats = &app.detail_stats;
    let change_style = if stats.is_up() {
        Style::default().fg(palette.up)
    } else {
        Style::default().fg(palette.down)
    };
    let arrow = if stats.is_up() { "▲" } else { "▼" };
    let watched = if app.is_watched(&stats.ticker) { "  [watching]" } else { "" };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", stats.name),
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("({}) ", stats.ticker), Style::default().fg(palette.dim)),
        Span::styled(format!(" ${:.2} ", stats.price), Style::default().fg(palette.fg).bold()),
        Span::styled(
            format!("{arrow} {:+.2} ({:+.2}%)", stats.change, stats.percent_change),
            change_style,
        ),
        Span::styled(watched, Style::default().fg(palette.accent)),
    ]));
    frame.render_widget(title, title_area);

    render_price_chart(&app.detail_series, frame, chart_area, palette);
    render_period_selector(app.detail_period, frame, period_area, palette);

    let [stats_area, analysis_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .areas(grid_area);
    render_key_stats(app, frame, stats_area, palette);
    render_analysis(app, frame, analysis_area, palette);
    render_news(app, frame, news_area, palette);
}

fn render_news(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines: Vec<Line> = Vec::new();
    for item in &app.detail_news {
        lines.push(Line::from(Span::styled(
            item.headline.clone(),
            Style::default().fg(palette.fg),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", item.summary),
            Style::default().fg(palette.dim),
        )));
    }

    let news = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim))
            .title(" Recent News "),
    );
    frame.render_widget(news, area);
}

fn render_period_selector(current: Period, frame: &mut Frame, area: Rect, palette: &Palette) {
    let spans: Vec<Span> = Period::ALL
        .iter()
        .flat_map(|period| {
            let style = if *period == current {
                Style::default().bg(palette.highlight).fg(Color::White).bold()
            } else {
                Style::default().fg(palette.dim)
            };
            [Span::styled(format!(" {} ", period.label()), style), Span::raw(" ")]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_key_stats(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let stats = &app.detail_stats;
    let label = Style::default().fg(palette.dim);
    let value = Style::default().fg(palette.fg);

    let row = |name: &str, val: &str| {
        Line::from(vec![
            Span::styled(format!(" {name:<16}"), label),
            Span::styled(val.to_string(), value),
        ])
    };

    let lines = vec![
        row("Market Cap", &stats.market_cap),
        row("P/E Ratio", &format!("{:.2}", stats.pe_ratio)),
        row("Volume", &stats.volume),
        row("Avg. Volume", &stats.avg_volume),
        row("Day Range", &stats.day_range),
        row("52 Week Range", &stats.year_range),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim))
            .title(" Key Statistics "),
    );
    frame.render_widget(paragraph, area);
}

fn render_analysis(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let signal_style = match app.detail_signal {
        Signal::Bullish => Style::default().fg(palette.up).bold(),
        Signal::Bearish => Style::default().fg(palette.down).bold(),
    };

    let lines = vec![
        Line::from("Based on recent market trends and company"),
        Line::from("performance, our AI suggests:"),
        Line::default(),
        Line::from(vec![
            Span::raw("  Signal: "),
            Span::styled(app.detail_signal.label(), signal_style),
        ]),
        Line::default(),
        Line::from(Span::styled(
            format!("Press 'a' to ask the assistant about {}.", app.detail_ticker),
            Style::default().fg(palette.dim),
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim))
            .title(" AI Analysis "),
    );
    frame.render_widget(paragraph, area);
}

fn render_price_chart(series: &PriceSeries, frame: &mut Frame, area: Rect, palette: &Palette) {
    let data: Vec<(f64, f64)> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| (i as f64, point.close))
        .collect();

    let min = series.min_close();
    let max = series.max_close();
    // Pad the y bounds so the line doesn't hug the frame
    let pad = ((max - min) * 0.1).max(0.5);
    let (y_min, y_max) = (min - pad, max + pad);

    let x_labels: Vec<Span> = [
        series.points.first(),
        series.points.get(series.points.len() / 2),
        series.points.last(),
    ]
    .into_iter()
    .flatten()
    .map(|point| Span::styled(point.date.format("%b %d").to_string(), Style::default().fg(palette.dim)))
    .collect();

    let y_labels: Vec<Span> = [y_min, (y_min + y_max) / 2.0, y_max]
        .into_iter()
        .map(|value| Span::styled(format!("{value:.0}"), Style::default().fg(palette.dim)))
        .collect();

    let dataset = Dataset::default()
        .name(series.ticker.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette.accent))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.dim))
                .title(format!(" {} Stock Price ({}) ", series.ticker, series.period.label())),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette.dim))
                .bounds([0.0, (series.points.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette.dim))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

// Login / Signup

fn render_login(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let form_area = centered_form(area, 50, 14);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.dim))
        .title(" Sign In ");
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let [error_area, email_area, password_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(2),
    ])
    .areas(inner);

    if let Some(error) = &app.login_error {
        let error_line = Paragraph::new(error.as_str())
            .style(Style::default().fg(palette.error_fg).bg(palette.error_bg))
            .wrap(Wrap { trim: true });
        frame.render_widget(error_line, error_area);
    }

    render_form_field(
        frame,
        email_area,
        " Email ",
        &app.login_email,
        app.login_field == LoginField::Email,
        false,
        palette,
    );
    render_form_field(
        frame,
        password_area,
        " Password ",
        &app.login_password,
        app.login_field == LoginField::Password,
        true,
        palette,
    );

    let hint = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            format!("Demo credentials: {} / {}", crate::auth::DEMO_EMAIL, crate::auth::DEMO_PASSWORD),
            Style::default().fg(palette.dim),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

fn render_signup(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let form_area = centered_form(area, 50, 16);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.dim))
        .title(" Create Account ");
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let [error_area, name_area, email_area, password_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .areas(inner);

    if let Some(error) = &app.signup_error {
        let error_line = Paragraph::new(error.as_str())
            .style(Style::default().fg(palette.error_fg).bg(palette.error_bg))
            .wrap(Wrap { trim: true });
        frame.render_widget(error_line, error_area);
    }

    render_form_field(
        frame,
        name_area,
        " Name ",
        &app.signup_name,
        app.signup_field == SignupField::Name,
        false,
        palette,
    );
    render_form_field(
        frame,
        email_area,
        " Email ",
        &app.signup_email,
        app.signup_field == SignupField::Email,
        false,
        palette,
    );
    render_form_field(
        frame,
        password_area,
        " Password ",
        &app.signup_password,
        app.signup_field == SignupField::Password,
        true,
        palette,
    );

    let hint = Paragraph::new(Line::from(Span::styled(
        "No account is created server-side; this is a local demo.",
        Style::default().fg(palette.dim),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

fn render_form_field(
    frame: &mut Frame,
    area: Rect,
    title: &'static str,
    value: &str,
    focused: bool,
    mask: bool,
    palette: &Palette,
) {
    let border = if focused { Color::Yellow } else { palette.dim };
    let shown = if mask { "•".repeat(value.chars().count()) } else { value.to_string() };

    let field = Paragraph::new(Text::from(shown))
        .style(Style::default().fg(palette.fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        );
    frame.render_widget(field, area);

    if focused {
        frame.set_cursor_position((area.x + 1 + value.chars().count() as u16, area.y + 1));
    }
}

fn centered_form(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
