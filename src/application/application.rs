use std::io::{self, BufRead, Write};

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::console::Console;
use crate::config::{SeedError, SeedHierarchy};
use crate::filesystem::{VirtualPath, normalize};
use crate::terminal::Interpreter;

const WELCOME: &str = "Welcome to RetroOS. Type \"help\" for a list of commands.";

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let seed = match &runtime_config.seed {
            Some(path) => {
                info!("Loading seed hierarchy from {}", path.display());
                SeedHierarchy::from_path(path).await
            }
            None => {
                info!("Loading built-in seed hierarchy");
                SeedHierarchy::builtin()
            }
        }
        .context(SeedLoadSnafu)?;

        let fs = seed.into_filesystem();
        let cwd = normalize(&runtime_config.cwd);
        ensure!(
            fs.directory_exists(&cwd),
            StartDirectorySnafu { path: cwd.clone() }
        );
        debug!("Starting session in {}", cwd);

        let mut interpreter = Interpreter::new(fs, VirtualPath::parse(cwd));
        let mut console = Console::stdout();
        let stdin = io::stdin();
        run_session(
            &mut interpreter,
            &runtime_config.commands,
            stdin.lock(),
            &mut console,
        )
        .context(IoSnafu)?;

        Ok(())
    }
}

/// Feeds the interpreter until `exit` or end of input. Scripted commands,
/// when present, replace the interactive loop and are echoed after the
/// prompt.
fn run_session<R: BufRead, W: Write>(
    interpreter: &mut Interpreter,
    commands: &[String],
    mut input: R,
    console: &mut Console<W>,
) -> io::Result<()> {
    if !commands.is_empty() {
        for command in commands {
            console.write_prompt(&interpreter.prompt())?;
            console.write_line(command)?;
            let response = interpreter.execute(command);
            console.write_response(&response)?;
            if response.exit {
                break;
            }
        }
        return Ok(());
    }

    console.write_line(WELCOME)?;
    let mut line = String::new();
    loop {
        console.write_prompt(&interpreter.prompt())?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            console.write_line("")?;
            debug!("End of input");
            return Ok(());
        }

        let response = interpreter.execute(line.trim_end_matches(['\n', '\r']));
        console.write_response(&response)?;
        if response.exit {
            return Ok(());
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Could not load the initial filesystem hierarchy"))]
    SeedLoadError { source: SeedError },
    #[snafu(display("Start directory {path} does not exist"))]
    StartDirectoryError { path: String },
    #[snafu(display("Terminal input/output failed"))]
    IoError { source: io::Error },
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn interpreter() -> Interpreter {
        let fs = SeedHierarchy::builtin().unwrap().into_filesystem();
        Interpreter::with_rng(fs, VirtualPath::parse("/home/user"), StdRng::seed_from_u64(7))
    }

    fn session(commands: &[&str], input: &str) -> (Interpreter, String) {
        let mut interpreter = interpreter();
        let commands: Vec<String> = commands.iter().map(|c| c.to_string()).collect();
        let mut console = Console::new(Vec::new(), false);
        run_session(
            &mut interpreter,
            &commands,
            Cursor::new(input.to_string()),
            &mut console,
        )
        .unwrap();
        let output = String::from_utf8(console.into_inner()).unwrap();
        (interpreter, output)
    }

    #[test]
    fn interactive_session_runs_until_end_of_input() {
        let (interpreter, output) = session(&[], "mkdir Work\ncd Work\n");
        assert_eq!(
            output,
            format!(
                "{WELCOME}\n/home/user $ Directory created: Work\n\
                 /home/user $ Changed directory to: /home/user/Work\n\
                 /home/user/Work $ \n"
            )
        );
        assert_eq!(interpreter.cwd().to_string(), "/home/user/Work");
    }

    #[test]
    fn exit_stops_reading() {
        let (interpreter, output) = session(&[], "exit\r\nmkdir Never\n");
        assert!(output.ends_with("/home/user $ "));
        assert!(!interpreter.filesystem().directory_exists("/home/user/Never"));
    }

    #[test]
    fn scripted_commands_are_echoed() {
        let (_, output) = session(&["pwd", "cat CONFIG.SYS", "exit", "pwd"], "");
        assert_eq!(
            output,
            "/home/user $ pwd\n/home/user\n\
             /home/user $ cat CONFIG.SYS\nFILES=40\nBUFFERS=20\n\
             DEVICE=C:\\DOS\\HIMEM.SYS\nDEVICE=C:\\DOS\\EMM386.EXE RAM\n\
             /home/user $ exit\n"
        );
    }

    #[test]
    fn editor_session_through_the_console() {
        let (interpreter, _) = session(&[], "nano memo.txt\nremember the milk\n:w\n");
        assert_eq!(
            interpreter
                .filesystem()
                .get_file_content("/home/user", "memo.txt"),
            Ok("remember the milk")
        );
    }

    #[compio::test]
    async fn missing_start_directory_is_rejected() {
        let config = RuntimeConfig {
            seed: None,
            cwd: "/home/nobody".to_string(),
            commands: vec!["exit".to_string()],
        };
        let error = Application::run(config).await.unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::StartDirectoryError { ref path } if path == "/home/nobody"
        ));
    }
}
