//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::api::{ApiClient, Evaluation, HttpBackend, Outcome, ResumeId, ScreeningResult, SkillTest};
use crate::cli::resumes::accepted_file_name;
use crate::core::config::Config;
use crate::error::{Result, ScreenError};
use crate::screening::{ResultsPresenter, ScreeningSession};
use crate::tui::event::{is_cancel_key, is_quit_key, AppEvent, EventHandler};
use crate::tui::ui;

/// Message type for async operation results
#[derive(Debug)]
pub enum AsyncMessage {
    /// Resume list request settled
    ResumesLoaded(Outcome<Vec<ResumeId>>),
    /// Upload request settled
    UploadFinished {
        file_name: String,
        outcome: Outcome<()>,
    },
    /// Screening request settled
    ScreeningFinished {
        job_url: String,
        outcome: Outcome<Vec<ScreeningResult>>,
    },
    /// Evaluation for one row settled
    EvaluationFinished {
        resume: ResumeId,
        outcome: Outcome<Evaluation>,
    },
    /// Skill-test generation for one row settled
    SkillTestsFinished {
        resume: ResumeId,
        outcome: Outcome<Vec<SkillTest>>,
    },
}

/// Which text field, if any, is receiving keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    JobUrl,
    UploadPath,
}

/// List selection state
#[derive(Debug, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total items in the list
    pub total: usize,
}

impl ListState {
    pub fn new(total: usize) -> Self {
        Self { selected: 0, total }
    }

    pub fn next(&mut self) {
        if self.total > 0 {
            self.selected = (self.selected + 1) % self.total;
        }
    }

    pub fn previous(&mut self) {
        if self.total > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.total - 1);
        }
    }
}

/// Error popup for problems that require user acknowledgment
#[derive(Debug, Clone)]
pub struct ErrorPopup {
    /// Title of the popup (e.g., "Screening", "Upload")
    pub title: String,
    /// The full error message to display
    pub message: String,
}

/// Main TUI application
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Resolved configuration for this session
    pub config: Config,
    /// Resume list, job URL and screening results
    pub session: ScreeningSession,
    /// Per-row evaluation and skill-test state
    pub presenter: ResultsPresenter,
    /// Job URL the current results were screened against
    pub results_job_url: Option<String>,
    /// Result row selection
    pub result_selection: ListState,
    /// Current text input target
    pub input_mode: InputMode,
    /// Text being edited
    pub input: String,
    /// Whether a resume-list request is in flight
    pub resumes_loading: bool,
    /// Whether an upload is in flight
    pub uploading: bool,
    /// Whether the pending resume refresh was triggered by an upload
    refresh_after_upload: bool,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Blocking error popup
    pub error_popup: Option<ErrorPopup>,
    /// Tick counter for spinner animation
    pub tick_counter: usize,

    api: Arc<ApiClient<HttpBackend>>,
    async_tx: mpsc::Sender<AsyncMessage>,
    async_rx: mpsc::Receiver<AsyncMessage>,
}

impl App {
    /// Create a new app for the given configuration and API client
    pub fn new(config: Config, api: ApiClient<HttpBackend>) -> Self {
        let (async_tx, async_rx) = mpsc::channel(32);

        Self {
            running: true,
            session: ScreeningSession::new(config.top_n),
            config,
            presenter: ResultsPresenter::new(),
            results_job_url: None,
            result_selection: ListState::default(),
            input_mode: InputMode::Normal,
            input: String::new(),
            resumes_loading: false,
            uploading: false,
            refresh_after_upload: false,
            status_message: None,
            show_help: false,
            error_popup: None,
            tick_counter: 0,
            api: Arc::new(api),
            async_tx,
            async_rx,
        }
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| ScreenError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| ScreenError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| ScreenError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| ScreenError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| ScreenError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| ScreenError::Terminal(e.to_string()))?;
        Ok(())
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let mut events = EventHandler::new(Duration::from_millis(250));

        // The page loads the resume list once on mount
        self.fetch_resumes();

        while self.running {
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|e| ScreenError::Terminal(e.to_string()))?;

            // Check for async messages (non-blocking)
            while let Ok(msg) = self.async_rx.try_recv() {
                self.handle_async_message(msg);
            }

            if let Some(event) = events.next().await {
                match event {
                    AppEvent::Key(key) => self.handle_key_event(key),
                    AppEvent::Resize(_, _) => {
                        // Terminal resize is handled automatically by ratatui
                    }
                    AppEvent::Tick => {
                        self.tick_counter = self.tick_counter.wrapping_add(1);
                    }
                }
            }
        }

        Self::restore_terminal(&mut terminal)?;
        Ok(())
    }

    /// Apply the result of a background request
    pub fn handle_async_message(&mut self, msg: AsyncMessage) {
        match msg {
            AsyncMessage::ResumesLoaded(outcome) => {
                self.resumes_loading = false;
                self.session.apply_resume_list(outcome);
                let after_upload = std::mem::take(&mut self.refresh_after_upload);
                if let Some(failure) = self.session.last_failure() {
                    self.status_message = Some(failure.to_string());
                } else if !after_upload {
                    self.status_message =
                        Some(format!("Loaded {} resumes", self.session.resumes().len()));
                }
            }
            AsyncMessage::UploadFinished { file_name, outcome } => {
                self.uploading = false;
                self.session.finish_upload(&outcome);
                self.status_message = match outcome.error() {
                    None => Some(format!("Uploaded {}", file_name)),
                    Some(e) => Some(format!("Upload failed: {}", e.summary())),
                };
                // Exactly one refresh follows every upload
                self.refresh_after_upload = true;
                self.fetch_resumes();
            }
            AsyncMessage::ScreeningFinished { job_url, outcome } => {
                self.session.finish_screening(outcome);
                // Rows are judged against the job they were ranked for
                self.results_job_url = Some(job_url);
                self.presenter.on_results_replaced(self.session.results());
                self.result_selection = ListState::new(self.session.results().len());
                self.status_message = match self.session.last_failure() {
                    Some(failure) => Some(failure.to_string()),
                    None if self.session.results().is_empty() => {
                        Some("No matching resumes".to_string())
                    }
                    None => Some(format!(
                        "Screened {} resumes",
                        self.session.results().len()
                    )),
                };
            }
            AsyncMessage::EvaluationFinished { resume, outcome } => {
                let failed = !outcome.is_success();
                self.presenter.finish_evaluate(&resume, outcome);
                if failed {
                    self.status_message = Some(format!("Evaluation of {} failed", resume));
                }
            }
            AsyncMessage::SkillTestsFinished { resume, outcome } => {
                let failed = !outcome.is_success();
                self.presenter.finish_generate_tests(&resume, outcome);
                if failed {
                    self.status_message = Some(format!("Test generation for {} failed", resume));
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Background requests
    // ─────────────────────────────────────────────────────────────────────────

    /// Spawn a task to fetch the resume list
    pub fn fetch_resumes(&mut self) {
        self.resumes_loading = true;

        let api = Arc::clone(&self.api);
        let tx = self.async_tx.clone();
        tokio::spawn(async move {
            let outcome = api.list_resumes().await;
            let _ = tx.send(AsyncMessage::ResumesLoaded(outcome)).await;
        });
    }

    /// Validate the path and spawn the upload
    fn upload_from_input(&mut self) {
        let path = PathBuf::from(self.input.trim());

        let prepared = accepted_file_name(&path)
            .and_then(|name| Ok((name, std::fs::read(&path)?)));
        let (file_name, bytes) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                self.show_error("Upload", &e);
                return;
            }
        };

        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.uploading = true;
        self.status_message = Some(format!("Uploading {}...", file_name));

        let api = Arc::clone(&self.api);
        let tx = self.async_tx.clone();
        tokio::spawn(async move {
            let outcome = api.upload_resume(&file_name, bytes).await;
            let _ = tx
                .send(AsyncMessage::UploadFinished { file_name, outcome })
                .await;
        });
    }

    /// Validate the job URL and spawn the screening request
    pub fn start_screening(&mut self) {
        if self.session.is_loading() {
            return;
        }

        let request = match self.session.begin_screening() {
            Ok(request) => request,
            Err(e) => {
                self.show_error("Screening", &e);
                return;
            }
        };

        self.status_message = Some("Screening resumes...".to_string());

        let api = Arc::clone(&self.api);
        let tx = self.async_tx.clone();
        tokio::spawn(async move {
            let outcome = api.run_screening(&request.job_url, request.top_n).await;
            let _ = tx
                .send(AsyncMessage::ScreeningFinished {
                    job_url: request.job_url,
                    outcome,
                })
                .await;
        });
    }

    /// Spawn an evaluation of the selected row
    fn evaluate_selected(&mut self) {
        let Some((resume, job_url)) = self.selected_target() else {
            return;
        };

        self.presenter.begin_evaluate(&resume);

        let api = Arc::clone(&self.api);
        let tx = self.async_tx.clone();
        tokio::spawn(async move {
            let outcome = api.evaluate_resume(&resume, &job_url).await;
            let _ = tx
                .send(AsyncMessage::EvaluationFinished { resume, outcome })
                .await;
        });
    }

    /// Spawn skill-test generation for the selected row, once it has an evaluation
    fn generate_tests_for_selected(&mut self) {
        let Some((resume, job_url)) = self.selected_target() else {
            return;
        };
        if !self.presenter.can_generate_tests(&resume) {
            self.status_message = Some("Evaluate this resume first [e]".to_string());
            return;
        }

        self.presenter.begin_generate_tests(&resume);

        let api = Arc::clone(&self.api);
        let tx = self.async_tx.clone();
        tokio::spawn(async move {
            let outcome = api.generate_skill_tests(&resume, &job_url).await;
            let _ = tx
                .send(AsyncMessage::SkillTestsFinished { resume, outcome })
                .await;
        });
    }

    /// The selected result row, if any
    pub fn selected_result(&self) -> Option<&ScreeningResult> {
        self.session.results().get(self.result_selection.selected)
    }

    fn selected_target(&self) -> Option<(ResumeId, String)> {
        let resume = self.selected_result()?.resume.clone();
        let job_url = self.results_job_url.clone()?;
        Some((resume, job_url))
    }

    fn show_error(&mut self, title: &str, error: &ScreenError) {
        self.error_popup = Some(ErrorPopup {
            title: title.to_string(),
            message: error.to_string(),
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Route a key press
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // If help is shown, any key dismisses it
        if self.show_help {
            self.show_help = false;
            return;
        }

        // If error popup is shown, only allow dismissal keys
        if self.error_popup.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                self.error_popup = None;
            }
            return;
        }

        if self.input_mode != InputMode::Normal {
            self.handle_input_key(key);
            return;
        }

        if key.code == KeyCode::Char('?') {
            self.show_help = true;
            return;
        }

        if is_quit_key(&key) {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('/') => {
                self.input = self.session.job_url().to_string();
                self.input_mode = InputMode::JobUrl;
            }
            KeyCode::Char('u') => {
                if self.uploading {
                    self.status_message = Some("An upload is already in progress".to_string());
                    return;
                }
                self.input.clear();
                self.input_mode = InputMode::UploadPath;
            }
            KeyCode::Char('s') => self.start_screening(),
            KeyCode::Char('r') => {
                self.status_message = Some("Loading resumes...".to_string());
                self.fetch_resumes();
            }
            KeyCode::Char('j') | KeyCode::Down => self.result_selection.next(),
            KeyCode::Char('k') | KeyCode::Up => self.result_selection.previous(),
            KeyCode::Char('e') => self.evaluate_selected(),
            KeyCode::Char('t') => self.generate_tests_for_selected(),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if is_cancel_key(&key) {
            self.input_mode = InputMode::Normal;
            self.input.clear();
            return;
        }

        match key.code {
            KeyCode::Enter => match self.input_mode {
                InputMode::JobUrl => {
                    self.session.set_job_url(std::mem::take(&mut self.input));
                    self.input_mode = InputMode::Normal;
                    self.start_screening();
                }
                InputMode::UploadPath => self.upload_from_input(),
                InputMode::Normal => {}
            },
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            _ => {}
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::api::Rating;

    fn app() -> App {
        let config = Config::default();
        let api = ApiClient::new(HttpBackend::new(&config.api_base_url).unwrap());
        App::new(config, api)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screened(app: &mut App) {
        app.handle_async_message(AsyncMessage::ScreeningFinished {
            job_url: "https://example.com/job/42".into(),
            outcome: Outcome::Success(vec![
                ScreeningResult {
                    resume: "alice.pdf".into(),
                    score: 0.85,
                },
                ScreeningResult {
                    resume: "bob.pdf".into(),
                    score: 0.3,
                },
            ]),
        });
    }

    #[test]
    fn test_empty_job_url_shows_prompt_without_loading() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));

        let popup = app.error_popup.as_ref().unwrap();
        assert!(popup.message.starts_with("Please enter a job URL."));
        assert!(!app.session.is_loading());
        assert!(app.results_job_url.is_none());

        // Popup blocks other keys until dismissed
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Normal);
        press(&mut app, KeyCode::Enter);
        assert!(app.error_popup.is_none());
    }

    #[test]
    fn test_job_url_editing_can_be_cancelled() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::JobUrl);

        type_text(&mut app, "https://x");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "https://");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.job_url(), "");
    }

    #[test]
    fn test_quit_key_is_text_while_editing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.input, "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_upload_rejects_non_pdf_before_any_request() {
        let mut app = app();
        press(&mut app, KeyCode::Char('u'));
        type_text(&mut app, "notes.txt");
        press(&mut app, KeyCode::Enter);

        assert!(!app.uploading);
        assert!(app
            .error_popup
            .as_ref()
            .unwrap()
            .message
            .contains("Only PDF"));
    }

    #[test]
    fn test_screening_results_reset_selection() {
        let mut app = app();
        screened(&mut app);

        assert_eq!(app.result_selection.total, 2);
        assert_eq!(app.selected_result().unwrap().resume, "alice.pdf");
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_result().unwrap().resume, "bob.pdf");
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_result().unwrap().resume, "alice.pdf");
        assert_eq!(app.status_message.as_deref(), Some("Screened 2 resumes"));
    }

    #[test]
    fn test_failed_screening_shows_request_failed_status() {
        let mut app = app();
        screened(&mut app);
        app.handle_async_message(AsyncMessage::ScreeningFinished {
            job_url: "https://example.com/job/42".into(),
            outcome: Outcome::Failed(ScreenError::Transport("connection refused".into())),
        });

        assert!(app.session.results().is_empty());
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Screening failed"));
    }

    #[test]
    fn test_tests_gated_on_evaluation() {
        let mut app = app();
        screened(&mut app);

        press(&mut app, KeyCode::Char('t'));
        assert!(!app.presenter.is_generating_tests("alice.pdf"));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Evaluate this resume first [e]")
        );
    }

    #[test]
    fn test_evaluation_message_updates_only_its_row() {
        let mut app = app();
        screened(&mut app);
        app.presenter.begin_evaluate("alice.pdf");
        app.presenter.begin_evaluate("bob.pdf");

        app.handle_async_message(AsyncMessage::EvaluationFinished {
            resume: "alice.pdf".into(),
            outcome: Outcome::Success(Evaluation {
                relevance: Rating::Number(90.0),
                strengths: vec!["Python".into()],
                weaknesses: vec![],
                recommendation: "Hire".into(),
            }),
        });

        assert!(app.presenter.can_generate_tests("alice.pdf"));
        assert!(!app.presenter.is_evaluating("alice.pdf"));
        assert!(app.presenter.is_evaluating("bob.pdf"));
    }

    #[test]
    fn test_resume_list_failure_sets_status() {
        let mut app = app();
        app.handle_async_message(AsyncMessage::ResumesLoaded(Outcome::Failed(
            ScreenError::Decode("expected value".into()),
        )));

        assert!(app.session.resumes().is_empty());
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Could not load resumes"));
    }

    #[tokio::test]
    async fn test_upload_completion_refreshes_and_keeps_upload_status() {
        let mut app = app();
        app.uploading = true;
        app.handle_async_message(AsyncMessage::UploadFinished {
            file_name: "carol.pdf".into(),
            outcome: Outcome::Success(()),
        });

        assert!(!app.uploading);
        assert!(app.resumes_loading);
        assert_eq!(app.status_message.as_deref(), Some("Uploaded carol.pdf"));

        app.handle_async_message(AsyncMessage::ResumesLoaded(Outcome::Success(vec![
            "carol.pdf".into(),
        ])));
        assert!(!app.resumes_loading);
        assert_eq!(app.session.resumes(), ["carol.pdf"]);
        assert_eq!(app.status_message.as_deref(), Some("Uploaded carol.pdf"));
    }

    #[tokio::test]
    async fn test_rows_keep_their_job_until_new_results_arrive() {
        let mut app = app();
        screened(&mut app);

        // A new run is in flight for another posting
        app.session.set_job_url("https://example.com/job/99");
        app.start_screening();
        assert!(app.session.is_loading());
        assert_eq!(
            app.results_job_url.as_deref(),
            Some("https://example.com/job/42")
        );

        app.handle_async_message(AsyncMessage::ScreeningFinished {
            job_url: "https://example.com/job/99".into(),
            outcome: Outcome::Success(vec![ScreeningResult {
                resume: "carol.pdf".into(),
                score: 0.7,
            }]),
        });
        assert_eq!(
            app.results_job_url.as_deref(),
            Some("https://example.com/job/99")
        );
        assert!(!app.session.is_loading());
    }

    #[test]
    fn test_second_upload_refused_while_one_is_in_flight() {
        let mut app = app();
        app.uploading = true;

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(
            app.status_message.as_deref(),
            Some("An upload is already in progress")
        );
    }
}
