use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

use ward_core::models::{CheckStatus, SignalAction, VoteChoice};

use crate::app::{App, InputFocus, Tab};
use crate::portfolio::Phase;

const BORDER: Color = Color::DarkGray;

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(7),
        ])
        .split(size);

    render_header(f, app, main_layout[0]);

    match app.tab {
        Tab::Scanner => render_scanner(f, app, main_layout[1]),
        Tab::Portfolio => render_portfolio(f, app, main_layout[1]),
        Tab::Dao => render_dao(f, app, main_layout[1]),
    }

    render_logs(f, app, main_layout[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Ward AI ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    for tab in [Tab::Scanner, Tab::Portfolio, Tab::Dao] {
        let style = if tab == app.tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
    }
    spans.push(Span::raw("  "));
    match &app.wallet_label {
        Some(label) => spans.push(Span::styled(
            format!("Wallet: {label}"),
            Style::default().fg(Color::Green),
        )),
        None => spans.push(Span::styled(
            "Wallet: disconnected",
            Style::default().fg(Color::DarkGray),
        )),
    }

    let header = Paragraph::new(TextLine::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER))
            .title("Tab: switch | Esc: quit"),
    );
    f.render_widget(header, area);
}

fn input_style(app: &App, focus: InputFocus) -> Style {
    if app.focus == Some(focus) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_scanner(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(area);

    let input = Paragraph::new(TextLine::from(vec![Span::styled(
        app.scanner.address_input.as_str(),
        input_style(app, InputFocus::ScannerAddress),
    )]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title("Contract Address (Enter to scan)"),
    );
    f.render_widget(input, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER))
                .title("Scan Progress"),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(app.scanner.progress as u16);
    f.render_widget(gauge, chunks[1]);

    if let Some(result) = &app.scanner.result {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);

        let score_color = if result.overall_score >= 70 {
            Color::Green
        } else if result.overall_score >= 40 {
            Color::Yellow
        } else {
            Color::Red
        };

        let mut summary = vec![
            TextLine::from(vec![
                Span::raw("Token: "),
                Span::styled(
                    format!("{} ({})", result.token_info.name, result.token_info.symbol),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            TextLine::from(vec![
                Span::raw("Score: "),
                Span::styled(
                    format!("{}/100", result.overall_score),
                    Style::default().fg(score_color).add_modifier(Modifier::BOLD),
                ),
            ]),
            TextLine::from(format!("Liquidity: ${:.0}", result.token_info.liquidity)),
            TextLine::from(format!("FDV: ${:.0}", result.token_info.fdv)),
            TextLine::from(format!("24h Volume: ${:.0}", result.token_info.volume_24h)),
            TextLine::from(format!(
                "GitHub repos: {}",
                result.verification.github.total_repos
            )),
            TextLine::from(format!("Scanned: {}", result.scan_time.format("%H:%M:%S"))),
        ];

        if app.scanner.shows_official_banner() {
            summary.push(TextLine::from(""));
            summary.push(TextLine::from(Span::styled(
                "OFFICIAL WARD AI TOKEN",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(entry) = app.scanner.manually_verified() {
            summary.push(TextLine::from(""));
            summary.push(TextLine::from(Span::styled(
                format!("Manually verified: {} ({})", entry.name, entry.verified_date),
                Style::default().fg(Color::Green),
            )));
            if let Some(notes) = entry.notes {
                summary.push(TextLine::from(Span::styled(
                    notes,
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        let summary_panel = Paragraph::new(summary).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER))
                .title("Audit Summary"),
        );
        f.render_widget(summary_panel, body[0]);

        let rows: Vec<Row> = result
            .vulnerabilities
            .iter()
            .map(|check| {
                let (label, color) = match check.status {
                    CheckStatus::Pass => ("PASS", Color::Green),
                    CheckStatus::Warning => ("WARN", Color::Yellow),
                    CheckStatus::Fail => ("FAIL", Color::Red),
                };
                Row::new(vec![
                    check.name.clone(),
                    label.to_string(),
                    check.description.clone(),
                ])
                .style(Style::default().fg(color))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(10),
                Constraint::Percentage(60),
            ],
        )
        .header(
            Row::new(vec!["Check", "Status", "Detail"]).style(Style::default().fg(Color::Yellow)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER))
                .title("Security Checklist"),
        );
        f.render_widget(table, body[1]);
    } else {
        let text = match &app.scanner.error {
            Some(error) => vec![TextLine::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))],
            None if app.scanner.scanning => vec![TextLine::from("Scanning...")],
            None => vec![TextLine::from(
                "Enter a Solana token address above and press Enter.",
            )],
        };
        let placeholder = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER))
                .title("Audit Result"),
        );
        f.render_widget(placeholder, chunks[2]);
    }
}

fn render_portfolio(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(area);

    let input = Paragraph::new(TextLine::from(vec![Span::styled(
        app.portfolio.wallet_input.as_str(),
        input_style(app, InputFocus::PortfolioWallet),
    )]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title("Wallet Address (Enter to monitor, Esc to stop)"),
    );
    f.render_widget(input, chunks[0]);

    let phase = match app.portfolio.phase {
        Phase::Idle => Span::styled("idle", Style::default().fg(Color::DarkGray)),
        Phase::Loading => Span::styled("loading", Style::default().fg(Color::Yellow)),
        Phase::Monitoring => Span::styled("monitoring", Style::default().fg(Color::Green)),
        Phase::Refreshing => Span::styled("refreshing", Style::default().fg(Color::Cyan)),
    };
    let mut status_spans = vec![
        Span::raw("Status: "),
        phase,
        Span::raw(format!(
            "  Value: ${:.2}  Avg Risk: {}/100  Refresh in {}s",
            app.portfolio.live_total_value(),
            app.portfolio.average_risk_score(),
            app.portfolio.next_refresh_in
        )),
    ];
    if let Some(error) = &app.portfolio.error {
        status_spans.push(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ));
    }
    let status = Paragraph::new(TextLine::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER)),
    );
    f.render_widget(status, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    let rows: Vec<Row> = app
        .portfolio
        .live
        .iter()
        .map(|holding| {
            let change_color = if holding.price_change_24h >= 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            Row::new(vec![
                Span::raw(holding.symbol.clone()),
                Span::raw(format!("{:.4}", holding.balance)),
                Span::raw(format!("${:.6}", holding.price)),
                Span::raw(format!("${:.2}", holding.value)),
                Span::styled(
                    format!("{:+.2}%", holding.price_change_24h),
                    Style::default().fg(change_color),
                ),
                Span::raw(format!("{}", holding.risk_score)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(15),
            Constraint::Percentage(17),
            Constraint::Percentage(20),
            Constraint::Percentage(18),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
        ],
    )
    .header(
        Row::new(vec!["Token", "Balance", "Price", "Value", "24h", "Risk"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title("Holdings"),
    );
    f.render_widget(table, body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(body[1]);

    render_signals(f, app, right[0]);

    let alert_lines: Vec<TextLine> = if app.portfolio.alerts.is_empty() {
        vec![TextLine::from(Span::styled(
            "No alerts",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.portfolio
            .alerts
            .iter()
            .map(|alert| {
                TextLine::from(Span::styled(
                    alert.as_str(),
                    Style::default().fg(Color::Red),
                ))
            })
            .collect()
    };
    let alerts = Paragraph::new(alert_lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title("Alerts"),
    );
    f.render_widget(alerts, right[1]);
}

fn render_signals(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .portfolio
        .live
        .iter()
        .filter_map(|holding| {
            let signal = app.portfolio.signals.get(&holding.address)?;
            let (label, color) = match signal.action {
                SignalAction::Buy => ("BUY", Color::Green),
                SignalAction::Sell => ("SELL", Color::Red),
                SignalAction::Hold => ("HOLD", Color::Yellow),
            };
            let reason = signal.reasons.first().cloned().unwrap_or_default();
            Some(
                Row::new(vec![
                    Span::raw(holding.symbol.clone()),
                    Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(format!("{}%", signal.confidence)),
                    Span::raw(format!("{:.1}", signal.risk_reward)),
                    Span::raw(reason),
                ]),
            )
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(15),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(11),
            Constraint::Percentage(50),
        ],
    )
    .header(
        Row::new(vec!["Token", "Signal", "Conf", "R/R", "Reason"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title("Trading Signals"),
    );
    f.render_widget(table, area);
}

fn render_dao(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let rows: Vec<Row> = app
        .dao
        .proposals
        .iter()
        .enumerate()
        .map(|(i, proposal)| {
            let for_pct = if proposal.total_votes > 0 {
                proposal.votes_for as f64 / proposal.total_votes as f64 * 100.0
            } else {
                0.0
            };
            let voted = match app.dao.votes.get(&proposal.id) {
                Some(VoteChoice::For) => "FOR",
                Some(VoteChoice::Against) => "AGAINST",
                None => "-",
            };
            let style = if i == app.dao.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                format!("#{}", proposal.id),
                proposal.title.clone(),
                format!("{for_pct:.0}% for"),
                proposal.ends_in.clone(),
                voted.to_string(),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(6),
            Constraint::Percentage(54),
            Constraint::Percentage(14),
            Constraint::Percentage(13),
            Constraint::Percentage(13),
        ],
    )
    .header(
        Row::new(vec!["ID", "Proposal", "Tally", "Ends", "Your Vote"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title("Proposals (Up/Down select, f: for, a: against, n: new)"),
    );
    f.render_widget(table, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(8)])
        .split(chunks[1]);

    if app.in_proposal_form() {
        let form_lines = vec![
            TextLine::from(vec![
                Span::raw("Title: "),
                Span::styled(
                    app.dao.form.title.as_str(),
                    input_style(app, InputFocus::ProposalTitle),
                ),
            ]),
            TextLine::from(vec![
                Span::raw("Category: "),
                Span::styled(
                    app.dao.form.category.as_str(),
                    input_style(app, InputFocus::ProposalCategory),
                ),
            ]),
            TextLine::from(vec![
                Span::raw("Description: "),
                Span::styled(
                    app.dao.form.description.as_str(),
                    input_style(app, InputFocus::ProposalDescription),
                ),
            ]),
            TextLine::from(""),
            TextLine::from(Span::styled(
                "Tab: next field | Enter: submit | Esc: close",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let form = Paragraph::new(form_lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER))
                .title("New Proposal"),
        );
        f.render_widget(form, right[0]);
    } else if let Some(proposal) = app.dao.proposals.get(app.dao.selected) {
        let detail_lines = vec![
            TextLine::from(Span::styled(
                proposal.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            TextLine::from(format!("Category: {}", proposal.category)),
            TextLine::from(format!("Proposer: {}", proposal.proposer)),
            TextLine::from(vec![
                Span::styled(
                    format!("For: {}", proposal.votes_for),
                    Style::default().fg(Color::Green),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("Against: {}", proposal.votes_against),
                    Style::default().fg(Color::Red),
                ),
            ]),
            TextLine::from(""),
            TextLine::from(proposal.description.as_str()),
        ];
        let detail = Paragraph::new(detail_lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER))
                .title("Proposal Detail"),
        );
        f.render_widget(detail, right[0]);
    }

    let mut status_lines = vec![TextLine::from(format!(
        "Voting power: {} WARD",
        app.dao.voting_power
    ))];
    if let Some(status) = &app.dao.status {
        status_lines.push(TextLine::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Cyan),
        )));
    }
    let status = Paragraph::new(status_lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title("Governance"),
    );
    f.render_widget(status, right[1]);
}

fn render_logs(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.logs.len().saturating_sub(visible);
    let lines: Vec<TextLine> = app.logs[start..]
        .iter()
        .map(|log| TextLine::from(log.as_str()))
        .collect();

    let logs = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title("Activity"),
    );
    f.render_widget(logs, area);
}
