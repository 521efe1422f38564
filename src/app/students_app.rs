use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::students::{SortOrder, StoreError, StudentForm, StudentStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    View,
    Delete,
    Update,
}

impl CodePurpose {
    pub fn title(&self) -> &'static str {
        match self {
            CodePurpose::View => "View Student",
            CodePurpose::Delete => "Delete Student",
            CodePurpose::Update => "Update Student",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPurpose {
    Add,
    Update(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentsMode {
    Browse,
    PromptCode { purpose: CodePurpose, input: String },
    SortChoice,
    Form {
        purpose: FormPurpose,
        form: StudentForm,
        field: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub const MENU: &str = "(v)iew all  (i)ndividual  (h)ighest  (l)owest  (s)ort  (a)dd  (d)elete  (u)pdate  (q)uit";

/// Student manager frontend: one text pane, a status line, and modal prompts
#[derive(Debug)]
pub struct StudentsApp {
    store: StudentStore,
    pub mode: StudentsMode,
    output: String,
    notice: Option<Notice>,
    pub scroll: u16,
    should_quit: bool,
}

impl StudentsApp {
    pub fn new(store: StudentStore) -> Self {
        let mut app = Self {
            store,
            mode: StudentsMode::Browse,
            output: String::new(),
            notice: None,
            scroll: 0,
            should_quit: false,
        };
        app.view_all();
        app
    }

    pub fn store(&self) -> &StudentStore {
        &self.store
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn view_all(&mut self) {
        self.display(self.store.report());
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let mode = std::mem::replace(&mut self.mode, StudentsMode::Browse);
        self.mode = match mode {
            StudentsMode::Browse => {
                self.notice = None;
                self.on_browse_key(key)
            }
            StudentsMode::PromptCode { purpose, input } => self.on_prompt_key(key, purpose, input),
            StudentsMode::SortChoice => self.on_sort_key(key),
            StudentsMode::Form {
                purpose,
                form,
                field,
            } => self.on_form_key(key, purpose, form, field),
        };
    }

    fn on_browse_key(&mut self, key: KeyEvent) -> StudentsMode {
        let prompt = |purpose| StudentsMode::PromptCode {
            purpose,
            input: String::new(),
        };

        match key.code {
            KeyCode::Char('v') => self.view_all(),
            KeyCode::Char('i') => return prompt(CodePurpose::View),
            KeyCode::Char('d') => return prompt(CodePurpose::Delete),
            KeyCode::Char('u') => return prompt(CodePurpose::Update),
            KeyCode::Char('h') => {
                let best = self.store.highest().map(ToString::to_string);
                self.show_extreme("Highest", best);
            }
            KeyCode::Char('l') => {
                let worst = self.store.lowest().map(ToString::to_string);
                self.show_extreme("Lowest", worst);
            }
            KeyCode::Char('s') => return StudentsMode::SortChoice,
            KeyCode::Char('a') => {
                return StudentsMode::Form {
                    purpose: FormPurpose::Add,
                    form: StudentForm::default(),
                    field: 0,
                }
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
        StudentsMode::Browse
    }

    fn on_prompt_key(&mut self, key: KeyEvent, purpose: CodePurpose, mut input: String) -> StudentsMode {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => return StudentsMode::Browse,
            KeyCode::Enter => {
                // Like closing the dialog without a number: nothing happens
                let Ok(code) = input.parse::<u32>() else {
                    return StudentsMode::Browse;
                };
                return self.run_code_action(purpose, code);
            }
            _ => {}
        }
        StudentsMode::PromptCode { purpose, input }
    }

    fn run_code_action(&mut self, purpose: CodePurpose, code: u32) -> StudentsMode {
        match purpose {
            CodePurpose::View => match self.store.find(code).map(ToString::to_string) {
                Ok(text) => self.display(text),
                Err(err) => self.report_error(err),
            },
            CodePurpose::Delete => match self.store.delete(code) {
                Ok(_) => {
                    self.view_all();
                    self.info("Student removed.");
                }
                Err(err) => self.report_error(err),
            },
            CodePurpose::Update => match self.store.find(code) {
                Ok(record) => {
                    return StudentsMode::Form {
                        purpose: FormPurpose::Update(code),
                        form: StudentForm::from_record(record),
                        field: 1,
                    }
                }
                Err(err) => self.report_error(err),
            },
        }
        StudentsMode::Browse
    }

    fn on_sort_key(&mut self, key: KeyEvent) -> StudentsMode {
        let order = match key.code {
            KeyCode::Char('a') | KeyCode::Up => SortOrder::Ascending,
            KeyCode::Char('d') | KeyCode::Down => SortOrder::Descending,
            KeyCode::Esc => return StudentsMode::Browse,
            _ => return StudentsMode::SortChoice,
        };

        match self.store.sort(order) {
            Ok(()) => {
                self.view_all();
                self.info("Records sorted successfully.");
            }
            Err(err) => self.report_error(err),
        }
        StudentsMode::Browse
    }

    fn on_form_key(
        &mut self,
        key: KeyEvent,
        purpose: FormPurpose,
        mut form: StudentForm,
        mut field: usize,
    ) -> StudentsMode {
        // The code of an existing student is fixed
        let first_field = match purpose {
            FormPurpose::Add => 0,
            FormPurpose::Update(_) => 1,
        };
        let last_field = StudentForm::LABELS.len() - 1;

        match key.code {
            KeyCode::Esc => return StudentsMode::Browse,
            KeyCode::Tab | KeyCode::Down => field = (field + 1).min(last_field),
            KeyCode::BackTab | KeyCode::Up => field = field.saturating_sub(1).max(first_field),
            KeyCode::Backspace => {
                form.field_mut(field).pop();
            }
            KeyCode::Char(c) if !c.is_control() => form.field_mut(field).push(c),
            KeyCode::Enter => {
                if let Some(mode) = self.save_form(purpose, &form) {
                    return mode;
                }
            }
            _ => {}
        }

        StudentsMode::Form {
            purpose,
            form,
            field,
        }
    }

    /// Returns the next mode when the save went through; `None` keeps the form open.
    fn save_form(&mut self, purpose: FormPurpose, form: &StudentForm) -> Option<StudentsMode> {
        let record = match form.to_record() {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "rejected student form");
                self.error("Invalid input.");
                return None;
            }
        };

        let (saved, message) = match purpose {
            FormPurpose::Add => (self.store.add(record), "Student added successfully."),
            FormPurpose::Update(code) => (
                self.store.update(code, record),
                "Student updated successfully.",
            ),
        };

        match saved {
            Ok(()) => {
                self.view_all();
                self.info(message);
                Some(StudentsMode::Browse)
            }
            Err(err) => {
                self.report_error(err);
                None
            }
        }
    }

    fn show_extreme(&mut self, label: &str, record: Option<String>) {
        match record {
            Some(text) => self.display(format!("{label} Scoring Student:\n\n{text}")),
            None => self.info("No student records."),
        }
    }

    fn display(&mut self, text: String) {
        self.output = text;
        self.scroll = 0;
    }

    fn info(&mut self, message: &str) {
        self.notice = Some(Notice::Info(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.notice = Some(Notice::Error(message.to_string()));
    }

    fn report_error(&mut self, err: StoreError) {
        let message = match err {
            StoreError::NotFound(_) => "Student not found.".to_string(),
            StoreError::DuplicateCode(code) => format!("Student {code} already exists."),
            other => {
                warn!(err = %other, "student store failure");
                format!("Could not save records: {other}")
            }
        };
        self.notice = Some(Notice::Error(message));
    }
}
