//! TUI application state and event loop
//!
//! The grid mirrors the puzzle: type a guess, mark each cell with the
//! feedback the puzzle showed, commit the turn. The engine narrows the
//! candidate set; ranking runs in the background and is superseded by any
//! newer request, so the interface never blocks on entropy math.

use crate::core::{Mark, Pattern, WORD_LEN};
use crate::solver::{Engine, RankedGuess, SessionStatus, SingleFlight};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// Rows in the guess grid; also the session's turn budget.
pub const GRID_ROWS: usize = 6;

/// How many ranked guesses the sidebar shows.
pub const SUGGESTION_COUNT: usize = 15;

/// One cell of the guess grid.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub letter: Option<char>,
    pub mark: Mark,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            letter: None,
            mark: Mark::Absent,
        }
    }
}

/// What keyboard input currently means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typing the guess word for the active row.
    Typing,
    /// Marking the feedback colors on the active row.
    Marking,
}

/// Session state as the TUI sees it. Solved and Contradiction come from
/// the engine; Exhausted is this layer's turn budget running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    Solved,
    Contradiction,
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state.
pub struct App {
    engine: Engine,
    pub grid: [[Cell; WORD_LEN]; GRID_ROWS],
    pub turn: usize,
    pub input: String,
    pub cursor: usize,
    pub mode: InputMode,
    pub phase: SessionPhase,
    pub suggestions: Vec<RankedGuess>,
    pub ranking_in_flight: bool,
    pub messages: Vec<Message>,
    pub should_quit: bool,
    ranking: SingleFlight<Vec<RankedGuess>>,
    history: Vec<(String, Pattern)>,
}

impl App {
    #[must_use]
    pub fn new(mut engine: Engine) -> Self {
        engine.reset();
        let mut app = Self {
            engine,
            grid: [[Cell::default(); WORD_LEN]; GRID_ROWS],
            turn: 0,
            input: String::new(),
            cursor: 0,
            mode: InputMode::Typing,
            phase: SessionPhase::InProgress,
            suggestions: Vec::new(),
            ranking_in_flight: false,
            messages: Vec::new(),
            should_quit: false,
            ranking: SingleFlight::new(),
            history: Vec::new(),
        };
        app.add_message("Type a guess, Enter, then mark the colors.", MessageStyle::Info);
        app.request_ranking();
        app
    }

    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.engine.candidate_count()
    }

    /// The solved word, when the candidate set has narrowed to one.
    #[must_use]
    pub fn solution(&self) -> Option<String> {
        self.engine.solution().map(|w| w.text().to_uppercase())
    }

    /// Ask for a fresh ranking; any in-flight one is superseded.
    fn request_ranking(&mut self) {
        self.engine.spawn_ranking(SUGGESTION_COUNT, &mut self.ranking);
        self.ranking_in_flight = true;
    }

    /// Collect a finished background ranking, if one arrived.
    pub fn poll_ranking(&mut self) {
        if let Some(ranking) = self.ranking.poll() {
            self.suggestions = ranking;
            self.ranking_in_flight = false;
        }
    }

    pub fn type_char(&mut self, c: char) {
        if self.input.len() < WORD_LEN && c.is_ascii_alphabetic() {
            self.input.push(c.to_ascii_lowercase());
            self.sync_active_row();
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.sync_active_row();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.sync_active_row();
    }

    fn sync_active_row(&mut self) {
        let row = &mut self.grid[self.turn];
        for (i, cell) in row.iter_mut().enumerate() {
            cell.letter = self.input.chars().nth(i);
            cell.mark = Mark::Absent;
        }
    }

    /// Enter pressed while typing: validate the word, then switch to
    /// marking. Rejection leaves the session untouched.
    pub fn confirm_word(&mut self) {
        if self.input.len() < WORD_LEN {
            self.add_message("The guess needs five letters.", MessageStyle::Error);
            return;
        }
        if !self.engine.guesses().contains(&self.input) {
            self.add_message(
                &format!("'{}' is not in the guess list.", self.input.to_uppercase()),
                MessageStyle::Error,
            );
            return;
        }
        self.mode = InputMode::Marking;
        self.cursor = 0;
        self.add_message(
            "Mark each cell: space cycles, 0/1/2 or -/y/g set directly.",
            MessageStyle::Info,
        );
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let pos = self.cursor as isize + delta;
        self.cursor = pos.clamp(0, WORD_LEN as isize - 1) as usize;
    }

    pub fn cycle_mark(&mut self) {
        let cell = &mut self.grid[self.turn][self.cursor];
        cell.mark = cell.mark.cycled();
    }

    /// Set the mark under the cursor and advance to the next cell.
    pub fn set_mark(&mut self, mark: Mark) {
        self.grid[self.turn][self.cursor].mark = mark;
        if self.cursor + 1 < WORD_LEN {
            self.cursor += 1;
        }
    }

    /// Esc while marking: back to editing the word, marks discarded.
    pub fn cancel_marking(&mut self) {
        for cell in &mut self.grid[self.turn] {
            cell.mark = Mark::Absent;
        }
        self.mode = InputMode::Typing;
    }

    /// Enter while marking: apply the turn to the engine.
    pub fn commit_turn(&mut self) {
        let mut marks = [Mark::Absent; WORD_LEN];
        for (i, cell) in self.grid[self.turn].iter().enumerate() {
            marks[i] = cell.mark;
        }
        let pattern = Pattern::from_marks(marks);
        let word = self.input.clone();

        match self.engine.update(&word, pattern) {
            Ok(remaining) => {
                self.history.push((word, pattern));
                self.turn += 1;
                self.input.clear();
                self.cursor = 0;
                self.mode = InputMode::Typing;
                self.refresh_phase();

                match self.phase {
                    SessionPhase::Solved => {
                        let solution = self.solution().unwrap_or_default();
                        self.add_message(
                            &format!("Solved! The word is {solution}."),
                            MessageStyle::Success,
                        );
                    }
                    SessionPhase::Contradiction => self.add_message(
                        "No candidate matches; some feedback must be wrong. 'u' undoes.",
                        MessageStyle::Error,
                    ),
                    SessionPhase::Exhausted => self.add_message(
                        "Out of turns. 'n' starts a new session, 'u' undoes.",
                        MessageStyle::Error,
                    ),
                    SessionPhase::InProgress => {
                        self.add_message(
                            &format!("{remaining} candidates remain."),
                            MessageStyle::Info,
                        );
                        self.request_ranking();
                    }
                }
            }
            // The word was validated before marking, so this is unexpected;
            // surface it rather than guessing.
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    fn refresh_phase(&mut self) {
        self.phase = match self.engine.status() {
            SessionStatus::Solved => SessionPhase::Solved,
            SessionStatus::Contradiction => SessionPhase::Contradiction,
            SessionStatus::InProgress if self.turn >= GRID_ROWS => SessionPhase::Exhausted,
            SessionStatus::InProgress => SessionPhase::InProgress,
        };
    }

    pub fn new_session(&mut self) {
        self.engine.reset();
        self.grid = [[Cell::default(); WORD_LEN]; GRID_ROWS];
        self.turn = 0;
        self.input.clear();
        self.cursor = 0;
        self.mode = InputMode::Typing;
        self.phase = SessionPhase::InProgress;
        self.history.clear();
        self.suggestions.clear();
        self.add_message("New session started.", MessageStyle::Info);
        self.request_ranking();
    }

    /// Revert the last committed turn by replaying the rest of the history
    /// against a fresh candidate set.
    pub fn undo_last(&mut self) {
        if self.history.pop().is_none() {
            self.add_message("Nothing to undo.", MessageStyle::Error);
            return;
        }

        self.engine.reset();
        self.grid = [[Cell::default(); WORD_LEN]; GRID_ROWS];
        for (row, (word, pattern)) in self.history.iter().enumerate() {
            for (i, cell) in self.grid[row].iter_mut().enumerate() {
                cell.letter = word.chars().nth(i);
                cell.mark = pattern.mark(i);
            }
        }
        // engine.update needs &mut self, so replay from an owned copy.
        for (word, pattern) in self.history.clone() {
            if let Err(err) = self.engine.update(&word, pattern) {
                self.add_message(&err.to_string(), MessageStyle::Error);
            }
        }

        self.turn = self.history.len();
        self.input.clear();
        self.cursor = 0;
        self.mode = InputMode::Typing;
        self.refresh_phase();
        self.add_message(&format!("Undone, back to turn {}.", self.turn + 1), MessageStyle::Info);
        self.request_ranking();
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });
        if self.messages.len() > 4 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application.
///
/// # Errors
/// Returns an error if terminal setup/teardown fails or on an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.poll_ranking();
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        // Short poll so background ranking results surface promptly.
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            match app.phase {
                SessionPhase::InProgress => handle_turn_key(&mut app, key.code, key.modifiers),
                _ => handle_terminal_key(&mut app, key.code),
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_turn_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app.mode {
        InputMode::Typing => match code {
            KeyCode::Char('n') if modifiers.contains(KeyModifiers::CONTROL) => app.new_session(),
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => app.undo_last(),
            KeyCode::Char(c) => app.type_char(c),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Esc => app.clear_input(),
            KeyCode::Enter => app.confirm_word(),
            _ => {}
        },
        InputMode::Marking => match code {
            KeyCode::Left => app.move_cursor(-1),
            KeyCode::Right => app.move_cursor(1),
            KeyCode::Up | KeyCode::Down | KeyCode::Char(' ') => app.cycle_mark(),
            KeyCode::Char('0' | '-' | 'b' | 'x') => app.set_mark(Mark::Absent),
            KeyCode::Char('1' | 'y') => app.set_mark(Mark::Present),
            KeyCode::Char('2' | 'g') => app.set_mark(Mark::Exact),
            KeyCode::Enter => app.commit_turn(),
            KeyCode::Esc => app.cancel_marking(),
            _ => {}
        },
    }
}

fn handle_terminal_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('n') => app.new_session(),
        KeyCode::Char('u') => app.undo_last(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::solver::PatternMatrix;
    use crate::wordlists::WordList;

    fn app() -> App {
        let guesses: WordList = ["crane", "slate", "irate", "grate"]
            .iter()
            .map(|t| Word::parse(t).unwrap())
            .collect();
        let answers: WordList = ["slate", "irate", "grate"]
            .iter()
            .map(|t| Word::parse(t).unwrap())
            .collect();
        let matrix = PatternMatrix::build(&guesses, &answers);
        App::new(Engine::new(guesses, answers, matrix).unwrap())
    }

    fn enter_word(app: &mut App, word: &str) {
        for c in word.chars() {
            app.type_char(c);
        }
        app.confirm_word();
    }

    #[test]
    fn typing_fills_the_active_row() {
        let mut app = app();
        app.type_char('s');
        app.type_char('l');
        assert_eq!(app.input, "sl");
        assert_eq!(app.grid[0][0].letter, Some('s'));
        assert_eq!(app.grid[0][1].letter, Some('l'));
        assert_eq!(app.grid[0][2].letter, None);

        app.backspace();
        assert_eq!(app.grid[0][1].letter, None);
    }

    #[test]
    fn short_or_unknown_words_stay_in_typing_mode() {
        let mut app = app();
        enter_word(&mut app, "sla");
        assert_eq!(app.mode, InputMode::Typing);

        app.clear_input();
        enter_word(&mut app, "zzzzz");
        assert_eq!(app.mode, InputMode::Typing);

        app.clear_input();
        enter_word(&mut app, "slate");
        assert_eq!(app.mode, InputMode::Marking);
    }

    #[test]
    fn marking_and_committing_advances_the_turn() {
        let mut app = app();
        enter_word(&mut app, "grate");

        // The puzzle showed all greens.
        for _ in 0..WORD_LEN {
            app.set_mark(Mark::Exact);
        }
        app.commit_turn();

        assert_eq!(app.turn, 1);
        assert_eq!(app.mode, InputMode::Typing);
        assert_eq!(app.phase, SessionPhase::Solved);
        assert_eq!(app.solution().unwrap(), "GRATE");
    }

    #[test]
    fn contradictory_feedback_is_reported() {
        let mut app = app();
        enter_word(&mut app, "crane");
        for _ in 0..WORD_LEN {
            app.set_mark(Mark::Exact);
        }
        app.commit_turn();
        assert_eq!(app.phase, SessionPhase::Contradiction);
    }

    #[test]
    fn undo_restores_the_previous_turn() {
        let mut app = app();
        enter_word(&mut app, "crane");
        for _ in 0..WORD_LEN {
            app.set_mark(Mark::Exact);
        }
        app.commit_turn();
        assert_eq!(app.phase, SessionPhase::Contradiction);

        app.undo_last();
        assert_eq!(app.turn, 0);
        assert_eq!(app.phase, SessionPhase::InProgress);
        assert_eq!(app.candidate_count(), 3);
    }

    #[test]
    fn new_session_clears_everything() {
        let mut app = app();
        enter_word(&mut app, "slate");
        app.set_mark(Mark::Exact);
        app.commit_turn();

        app.new_session();
        assert_eq!(app.turn, 0);
        assert_eq!(app.candidate_count(), 3);
        assert!(app.grid[0][0].letter.is_none());
    }

    #[test]
    fn background_ranking_arrives_via_poll() {
        let mut app = app();
        assert!(app.ranking_in_flight);

        for _ in 0..200 {
            app.poll_ranking();
            if !app.ranking_in_flight {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!app.ranking_in_flight);
        assert!(!app.suggestions.is_empty());
    }

    #[test]
    fn cursor_stays_inside_the_row() {
        let mut app = app();
        enter_word(&mut app, "slate");
        app.move_cursor(-3);
        assert_eq!(app.cursor, 0);
        for _ in 0..10 {
            app.move_cursor(1);
        }
        assert_eq!(app.cursor, WORD_LEN - 1);
    }
}
