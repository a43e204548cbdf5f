use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::filesystem::{FsError, NodeKind, VirtualFileSystem, VirtualPath};
use crate::games::{Game, GameKind};

use super::command::Command;
use super::editor::{EditorAction, EditorSession};
use super::response::{LineStyle, Response};

const HELP: &[&str] = &[
    "Available commands:",
    "clear - Clear the terminal",
    "pwd - Print working directory",
    "ls [directory] - List directory contents",
    "mkdir <directory_name> - Create a new directory",
    "touch <file_name> - Create a new file",
    "cd <directory> - Change directory",
    "nano <file_name> - Edit a file",
    "cat <file_name> - Display file contents",
    "rm <file_or_directory_name> - Remove a file or directory",
    "mv <source> <destination> - Move a file or directory",
    "play guess_number - Play the Guess the Number game",
    "play rock_paper_scissors - Play the Rock Paper Scissors game",
    "help - Show this help message",
    "exit - Leave the terminal",
];

#[derive(Debug, Clone)]
enum Mode {
    Shell,
    Editing(EditorSession),
    Playing(Game),
}

/// Turns typed lines into filesystem calls and renders their results.
///
/// The working directory lives here, not in the filesystem.
#[derive(Debug, Clone)]
pub struct Interpreter {
    fs: VirtualFileSystem,
    cwd: VirtualPath,
    mode: Mode,
    rng: StdRng,
}

impl Interpreter {
    pub fn new(fs: VirtualFileSystem, cwd: VirtualPath) -> Self {
        Self::with_rng(fs, cwd, StdRng::from_os_rng())
    }

    pub fn with_rng(fs: VirtualFileSystem, cwd: VirtualPath, rng: StdRng) -> Self {
        Self {
            fs,
            cwd,
            mode: Mode::Shell,
            rng,
        }
    }

    pub fn cwd(&self) -> &VirtualPath {
        &self.cwd
    }

    pub fn filesystem(&self) -> &VirtualFileSystem {
        &self.fs
    }

    pub fn prompt(&self) -> String {
        match &self.mode {
            Mode::Shell => format!("{} $ ", self.cwd),
            Mode::Editing(session) => format!("{}> ", session.name()),
            Mode::Playing(game) => game.prompt().to_string(),
        }
    }

    pub fn execute(&mut self, line: &str) -> Response {
        match &mut self.mode {
            Mode::Shell => self.run_command(Command::parse(line)),
            Mode::Editing(session) => match session.handle(line) {
                EditorAction::Continue(lines) => {
                    let mut response = Response::default();
                    response.extend_text(lines);
                    response
                }
                EditorAction::Save(content) => {
                    let session = session.clone();
                    self.mode = Mode::Shell;
                    self.save_edit(&session, content)
                }
                EditorAction::Cancel => {
                    self.mode = Mode::Shell;
                    Response::text("File edit cancelled")
                }
            },
            Mode::Playing(game) => {
                if line.trim().is_empty() {
                    return Response::default();
                }
                let turn = game.play(line, &mut self.rng);
                if turn.finished {
                    self.mode = Mode::Shell;
                }
                let mut response = Response::default();
                response.extend_text(turn.lines);
                response
            }
        }
    }

    fn run_command(&mut self, command: Command) -> Response {
        debug!("Running {:?} in {}", command, self.cwd);
        match command {
            Command::Empty => Response::default(),
            Command::Clear => Response {
                clear: true,
                ..Response::default()
            },
            Command::Exit => Response {
                exit: true,
                ..Response::default()
            },
            Command::Pwd => Response::text(self.cwd.to_string()),
            Command::Help => {
                let mut response = Response::default();
                response.extend_text(HELP.iter().map(|line| line.to_string()));
                response
            }
            Command::Usage(usage) => Response::text(usage),
            Command::Unknown(word) => Response::error(format!("Command not found: {word}")),
            Command::Ls(dir) => self.ls(dir),
            Command::Cd(dir) => self.cd(&dir),
            Command::Mkdir(operand) => self
                .with_operand("mkdir", &operand, |fs, parent, name| {
                    fs.create_directory(parent.to_string(), name)
                })
                .unwrap_or_else(|| Response::text(format!("Directory created: {operand}"))),
            Command::Touch(operand) => self
                .with_operand("touch", &operand, |fs, parent, name| {
                    fs.create_file(parent.to_string(), name, "")
                })
                .unwrap_or_else(|| Response::text(format!("File created: {operand}"))),
            Command::Rm(operand) => self
                .with_operand("rm", &operand, |fs, parent, name| {
                    fs.remove_item(parent.to_string(), name)
                })
                .unwrap_or_else(|| Response::text(format!("Removed: {operand}"))),
            Command::Cat(operand) => self.cat(&operand),
            Command::Nano(operand) => self.nano(&operand),
            Command::Mv {
                source,
                destination,
            } => {
                let from = self.resolve_operand(&source);
                let to = self.resolve_operand(&destination);
                match self.fs.move_item(from.to_string(), to.to_string()) {
                    Ok(()) => Response::text(format!("Moved {source} to {destination}")),
                    Err(error) => {
                        debug!("Move failed at {}", error.path());
                        operand_error("mv", &source, &error)
                    }
                }
            }
            Command::Play(name) => self.play(&name),
        }
    }

    fn ls(&self, dir: Option<String>) -> Response {
        let target = dir
            .as_deref()
            .map_or_else(|| self.cwd.clone(), |dir| self.resolve_operand(dir));
        match self.fs.list_directory(target.to_string()) {
            Ok(entries) => {
                let mut response = Response::default();
                for entry in entries {
                    match entry.kind {
                        NodeKind::Directory => {
                            response.push(LineStyle::Directory, format!("{}/", entry.name))
                        }
                        NodeKind::File => response.push_text(entry.name),
                    }
                }
                response
            }
            Err(error) => operand_error("ls", dir.as_deref().unwrap_or("."), &error),
        }
    }

    /// `..` is resolved here by dropping the last segment of the working
    /// directory; the filesystem itself never sees it.
    fn cd(&mut self, dir: &str) -> Response {
        let target = if dir == ".." {
            self.cwd.parent()
        } else {
            self.resolve_operand(dir)
        };

        if self.fs.directory_exists(target.to_string()) {
            self.cwd = target;
            Response::text(format!("Changed directory to: {}", self.cwd))
        } else {
            Response::error(format!("cd: {dir}: No such file or directory"))
        }
    }

    fn cat(&self, operand: &str) -> Response {
        let content = self
            .split_operand(operand)
            .and_then(|(parent, name)| self.fs.get_file_content(parent.to_string(), name));
        match content {
            Ok(content) => {
                let mut response = Response::default();
                response.extend_text(content.lines().map(str::to_string));
                response
            }
            Err(error) => operand_error("cat", operand, &error),
        }
    }

    fn nano(&mut self, operand: &str) -> Response {
        let (parent, name) = match self.split_operand(operand) {
            Ok(split) => split,
            Err(error) => return operand_error("nano", operand, &error),
        };

        let content = match self.fs.get_file_content(parent.to_string(), &name) {
            Ok(content) => content.to_string(),
            Err(FsError::NotFound { .. }) if self.fs.directory_exists(parent.to_string()) => {
                String::new()
            }
            Err(error) => return operand_error("nano", operand, &error),
        };

        let session = EditorSession::open(parent, name, &content);
        let mut response = Response::default();
        response.extend_text(session.banner());
        self.mode = Mode::Editing(session);
        response
    }

    /// Writes the buffer back, creating the file if it vanished or never
    /// existed.
    fn save_edit(&mut self, session: &EditorSession, content: String) -> Response {
        let parent = session.parent().to_string();
        let name = session.name();
        let exists = self.fs.get_file_content(&parent, name).is_ok();
        let saved = if exists {
            self.fs.update_file_content(&parent, name, content)
        } else {
            self.fs.create_file(&parent, name, content)
        };
        match saved {
            Ok(()) => Response::text(format!("File saved: {name}")),
            Err(error) => operand_error("nano", name, &error),
        }
    }

    fn play(&mut self, name: &str) -> Response {
        let Some(kind) = GameKind::from_name(name) else {
            let available: Vec<String> = GameKind::ALL.iter().map(ToString::to_string).collect();
            return Response::text(format!(
                "Unknown game. Available games: {}",
                available.join(", ")
            ));
        };

        if self
            .fs
            .get_file_content(self.cwd.to_string(), kind.file_name())
            .is_err()
        {
            return Response::error("Error: Please navigate to the Games directory to play.");
        }

        let (game, intro) = Game::start(kind, &mut self.rng);
        let mut response = Response::default();
        response.extend_text(intro);
        self.mode = Mode::Playing(game);
        response
    }

    /// Runs a single-operand mutation; `None` means it succeeded.
    fn with_operand(
        &mut self,
        command: &str,
        operand: &str,
        apply: impl FnOnce(&mut VirtualFileSystem, &VirtualPath, &str) -> Result<(), FsError>,
    ) -> Option<Response> {
        let result = self
            .split_operand(operand)
            .and_then(|(parent, name)| apply(&mut self.fs, &parent, &name));
        result
            .err()
            .map(|error| operand_error(command, operand, &error))
    }

    fn resolve_operand(&self, operand: &str) -> VirtualPath {
        if operand.starts_with('/') {
            VirtualPath::parse(operand)
        } else {
            self.cwd.join(operand)
        }
    }

    fn split_operand(&self, operand: &str) -> Result<(VirtualPath, String), FsError> {
        let target = self.resolve_operand(operand);
        match target.file_name() {
            Some(name) => Ok((target.parent(), name.to_string())),
            None => Err(FsError::InvalidName {
                path: target.to_string(),
            }),
        }
    }
}

fn operand_error(command: &str, operand: &str, error: &FsError) -> Response {
    Response::error(format!("{command}: {operand}: {}", error.reason()))
}
