//! Main UI renderer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::api::{Evaluation, SkillTest};
use crate::screening::{display_name, match_label, match_summary};
use crate::tui::app::{App, InputMode};
use crate::tui::theme::Theme;

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠸", "⠴"];

/// Render the whole page
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    if app.input_mode == InputMode::UploadPath {
        render_upload_prompt(frame, app);
    }
    if let Some(popup) = &app.error_popup {
        render_error_popup(frame, &popup.title, &popup.message);
    }
    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(" cv-screen │ {} ", app.config.api_base_url);

    let header = Paragraph::new(title)
        .style(Theme::header())
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    render_resumes(frame, columns[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Job URL
            Constraint::Percentage(40), // Results
            Constraint::Min(0),         // Selected row detail
        ])
        .split(columns[1]);

    render_job_url(frame, right[0], app);
    render_results(frame, right[1], app);
    render_detail(frame, right[2], app);
}

/// Render the uploaded resume list
fn render_resumes(frame: &mut Frame, area: Rect, app: &App) {
    let resumes = app.session.resumes();

    let items: Vec<ListItem> = if app.resumes_loading && resumes.is_empty() {
        vec![ListItem::new("  Loading resumes...")]
    } else if resumes.is_empty() {
        vec![
            ListItem::new("  No resumes uploaded"),
            ListItem::new(""),
            ListItem::new("  Press [u] to upload a PDF"),
        ]
    } else {
        resumes
            .iter()
            .map(|r| ListItem::new(format!("  {}", display_name(r))))
            .collect()
    };

    let title = if app.uploading {
        format!(" Resumes ({}) · uploading… ", resumes.len())
    } else {
        format!(" Resumes ({}) ", resumes.len())
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );

    frame.render_widget(list, area);
}

/// Render the job URL field, editable after [/]
fn render_job_url(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::JobUrl;

    let line = if editing {
        Line::from(vec![
            Span::raw(format!(" {}", app.input)),
            Span::styled("█", Style::default().fg(Theme::PRIMARY)),
        ])
    } else if app.session.job_url().is_empty() {
        Line::from(Span::styled(
            " Press [/] to enter a job posting URL",
            Theme::muted(),
        ))
    } else {
        Line::from(format!(" {}", app.session.job_url()))
    };

    let border = if editing {
        Style::default().fg(Theme::PRIMARY)
    } else {
        Theme::normal()
    };

    let field = Paragraph::new(line).block(
        Block::default()
            .title(" Job URL ")
            .borders(Borders::ALL)
            .border_style(border),
    );

    frame.render_widget(field, area);
}

/// Render the ranked result list with per-row activity markers
fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let results = app.session.results();

    let items: Vec<ListItem> = if app.session.is_loading() {
        let spinner = SPINNER[app.tick_counter % SPINNER.len()];
        vec![ListItem::new(format!("  {} Screening resumes...", spinner))]
    } else if results.is_empty() {
        vec![ListItem::new("  No results yet. Press [s] to screen.")]
    } else {
        results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let mut spans = vec![
                    Span::raw(format!("  {:<28} ", display_name(&result.resume))),
                    Span::styled(
                        match_summary(result.score),
                        Theme::match_label(match_label(result.score)),
                    ),
                ];
                if app.presenter.is_evaluating(&result.resume) {
                    spans.push(Span::styled("  Evaluating…", Theme::muted()));
                }
                if app.presenter.is_generating_tests(&result.resume) {
                    spans.push(Span::styled("  Generating tests…", Theme::muted()));
                }

                let item = ListItem::new(Line::from(spans));
                if i == app.result_selection.selected {
                    item.style(Theme::selected())
                } else {
                    item
                }
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Results ({}) ", results.len()))
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );

    frame.render_widget(list, area);
}

/// Render evaluation and skill tests for the selected row
fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.selected_result() else {
        let empty = Paragraph::new("").block(
            Block::default()
                .title(" Candidate ")
                .borders(Borders::ALL),
        );
        frame.render_widget(empty, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let row = app.presenter.row(&result.resume);

    if let Some(err) = row.and_then(|r| r.last_error.as_deref()) {
        lines.push(Line::styled(format!(" {}", err), Theme::error()));
        lines.push(Line::raw(""));
    }

    match row.and_then(|r| r.evaluation.as_ref()) {
        Some(evaluation) => lines.extend(evaluation_lines(evaluation)),
        None => lines.push(Line::styled(" Press [e] to evaluate", Theme::muted())),
    }

    if let Some(tests) = row.and_then(|r| r.skill_tests.as_deref()) {
        lines.push(Line::raw(""));
        lines.extend(skill_test_lines(tests));
    } else if app.presenter.can_generate_tests(&result.resume) {
        lines.push(Line::raw(""));
        lines.push(Line::styled(" Press [t] to generate skill tests", Theme::muted()));
    }

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(format!(" {} ", display_name(&result.resume)))
            .borders(Borders::ALL),
    );

    frame.render_widget(detail, area);
}

fn evaluation_lines(evaluation: &Evaluation) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Relevance: ", Theme::section()),
            Span::styled(format!("{}%", evaluation.relevance), relevance_style(evaluation)),
        ]),
        Line::styled(" Strengths", Theme::section()),
    ];
    lines.extend(
        evaluation
            .strengths
            .iter()
            .map(|s| Line::raw(format!("   • {}", s))),
    );
    lines.push(Line::styled(" Weaknesses", Theme::section()));
    lines.extend(
        evaluation
            .weaknesses
            .iter()
            .map(|w| Line::raw(format!("   • {}", w))),
    );
    lines.push(Line::from(vec![
        Span::styled(" Recommendation: ", Theme::section()),
        Span::raw(evaluation.recommendation.clone()),
    ]));
    lines
}

/// Relevance is on a 0-100 scale; colour it with the same bands as scores
fn relevance_style(evaluation: &Evaluation) -> Style {
    match evaluation.relevance.as_f64() {
        Some(relevance) => Theme::match_label(match_label(relevance / 100.0)),
        None => Theme::normal(),
    }
}

fn skill_test_lines(tests: &[SkillTest]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(" Generated Skill Tests", Theme::section())];
    for (i, test) in tests.iter().enumerate() {
        let confidence = test
            .confidence
            .as_ref()
            .map(|c| format!(" (Confidence: {})", c))
            .unwrap_or_default();
        lines.push(Line::raw(format!(
            "   {}. Skill: {}{}",
            i + 1,
            test.skill,
            confidence
        )));
        lines.push(Line::raw(format!("      Test: {}", test.test_text())));
    }
    lines
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status_text = match &app.status_message {
        Some(msg) => format!(" {}", msg),
        None => format!(" Top {} │ ? for help ", app.session.top_n()),
    };

    let status = Paragraph::new(status_text)
        .style(Theme::status_bar())
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(status, area);
}

/// Centered rectangle for popups
fn centered(area: Rect, width_pct: u16, max_width: u16, height: u16) -> Rect {
    let width = ((u32::from(area.width) * u32::from(width_pct) / 100) as u16).min(max_width);
    let height = height.min(area.height);
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn render_upload_prompt(frame: &mut Frame, app: &App) {
    let popup_area = centered(frame.area(), 70, 80, 5);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(vec![
            Span::raw(format!(" {}", app.input)),
            Span::styled("█", Style::default().fg(Theme::PRIMARY)),
        ]),
        Line::styled(" [Enter] Upload  [Esc] Cancel", Theme::muted()),
    ];

    let prompt = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Upload resume (path to PDF) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::PRIMARY)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(prompt, popup_area);
}

fn render_error_popup(frame: &mut Frame, title: &str, message: &str) {
    let height = message.lines().count() as u16 + 4;
    let popup_area = centered(frame.area(), 70, 80, height);
    frame.render_widget(Clear, popup_area);

    let mut text: Vec<Line> = message.lines().map(|l| Line::raw(format!(" {}", l))).collect();
    text.push(Line::raw(""));
    text.push(Line::styled(" [Enter] Dismiss", Theme::muted()));

    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Theme::error()),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(popup, popup_area);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered(frame.area(), 60, 60, 14);
    frame.render_widget(Clear, popup_area);

    let text: Vec<Line> = HELP_KEYS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:12}", key), Style::default().fg(Color::Cyan)),
                Span::raw(*desc),
            ])
        })
        .collect();

    let help = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help, popup_area);
}

const HELP_KEYS: [(&str, &str); 10] = [
    ("/", "Edit job URL (Enter screens)"),
    ("s", "Screen resumes"),
    ("u", "Upload a resume"),
    ("r", "Refresh resume list"),
    ("j / ↓", "Next result"),
    ("k / ↑", "Previous result"),
    ("e", "Evaluate selected resume"),
    ("t", "Generate skill tests"),
    ("?", "Show this help"),
    ("q", "Quit"),
];

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::api::{ApiClient, HttpBackend, Outcome, Rating, ScreeningResult};
    use crate::core::config::Config;
    use crate::tui::app::AsyncMessage;

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        let config = Config::default();
        let api = ApiClient::new(HttpBackend::new(&config.api_base_url).unwrap());
        App::new(config, api)
    }

    fn screened_alice(app: &mut App) {
        app.handle_async_message(AsyncMessage::ScreeningFinished {
            job_url: "https://example.com/job/42".into(),
            outcome: Outcome::Success(vec![ScreeningResult {
                resume: "alice.pdf".into(),
                score: 0.85,
            }]),
        });
    }

    #[test]
    fn test_results_show_match_summary() {
        let mut app = app();
        screened_alice(&mut app);

        let text = screen_text(&app);
        assert!(text.contains("85% match (Excellent match)"));
        assert!(text.contains("Press [e] to evaluate"));
    }

    #[test]
    fn test_evaluation_detail_is_rendered() {
        let mut app = app();
        screened_alice(&mut app);
        app.presenter.finish_evaluate(
            "alice.pdf",
            Outcome::Success(Evaluation {
                relevance: Rating::Number(90.0),
                strengths: vec!["Python".into()],
                weaknesses: vec![],
                recommendation: "Hire".into(),
            }),
        );

        let text = screen_text(&app);
        assert!(text.contains("Relevance: 90%"));
        assert!(text.contains("Recommendation: Hire"));
        assert!(text.contains("Press [t] to generate skill tests"));
    }

    #[test]
    fn test_help_overlay_lists_keys() {
        let mut app = app();
        app.show_help = true;
        assert!(screen_text(&app).contains("Generate skill tests"));
    }

    #[test]
    fn test_uploading_shows_in_resume_pane() {
        let mut app = app();
        app.uploading = true;
        assert!(screen_text(&app).contains("uploading…"));
    }

    #[test]
    fn test_relevance_coloured_by_band() {
        let mut evaluation = Evaluation {
            relevance: Rating::Number(90.0),
            strengths: vec![],
            weaknesses: vec![],
            recommendation: "Hire".into(),
        };
        assert_eq!(relevance_style(&evaluation), Style::default().fg(Theme::SUCCESS));

        evaluation.relevance = Rating::Text("30%".into());
        assert_eq!(relevance_style(&evaluation), Style::default().fg(Theme::ERROR));

        evaluation.relevance = Rating::Text("high".into());
        assert_eq!(relevance_style(&evaluation), Theme::normal());
    }

    #[test]
    fn test_popups_fit_very_wide_terminals() {
        let area = Rect::new(0, 0, 2000, 50);
        let popup = centered(area, 70, 80, 5);
        assert_eq!(popup.width, 80);
        assert_eq!(popup.x, 960);

        let narrow = centered(Rect::new(0, 0, 40, 3), 70, 80, 5);
        assert_eq!(narrow.width, 28);
        assert_eq!(narrow.height, 3);
    }
}
