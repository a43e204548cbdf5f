/// A parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Clear,
    Pwd,
    Ls(Option<String>),
    Mkdir(String),
    Touch(String),
    Cd(String),
    Cat(String),
    Nano(String),
    Rm(String),
    Mv { source: String, destination: String },
    Play(String),
    Help,
    Exit,
    /// Known command with the wrong number of arguments.
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    /// The command word is case-insensitive; arguments are split on
    /// whitespace and kept verbatim.
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Command::Empty;
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        match (word.to_lowercase().as_str(), args.as_slice()) {
            ("clear", _) => Command::Clear,
            ("pwd", _) => Command::Pwd,
            ("help", _) => Command::Help,
            ("exit", _) => Command::Exit,
            ("ls", []) => Command::Ls(None),
            ("ls", [dir]) => Command::Ls(Some(dir.clone())),
            ("ls", _) => Command::Usage("Usage: ls [directory]"),
            ("mkdir", [name]) => Command::Mkdir(name.clone()),
            ("mkdir", _) => Command::Usage("Usage: mkdir <directory_name>"),
            ("touch", [name]) => Command::Touch(name.clone()),
            ("touch", _) => Command::Usage("Usage: touch <file_name>"),
            ("cd", [dir]) => Command::Cd(dir.clone()),
            ("cd", _) => Command::Usage("Usage: cd <directory>"),
            ("cat", [name]) => Command::Cat(name.clone()),
            ("cat", _) => Command::Usage("Usage: cat <file_name>"),
            ("nano", [name]) => Command::Nano(name.clone()),
            ("nano", _) => Command::Usage("Usage: nano <file_name>"),
            ("rm", [name]) => Command::Rm(name.clone()),
            ("rm", _) => Command::Usage("Usage: rm <file_or_directory_name>"),
            ("mv", [source, destination]) => Command::Mv {
                source: source.clone(),
                destination: destination.clone(),
            },
            ("mv", _) => Command::Usage("Usage: mv <source> <destination>"),
            ("play", [game]) => Command::Play(game.clone()),
            ("play", _) => Command::Usage("Usage: play <game_name>"),
            (other, _) => Command::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("", Command::Empty)]
    #[case("   ", Command::Empty)]
    #[case("ls", Command::Ls(None))]
    #[case("LS Documents", Command::Ls(Some("Documents".into())))]
    #[case("  mkdir   Games ", Command::Mkdir("Games".into()))]
    #[case("cd ..", Command::Cd("..".into()))]
    #[case("cat CONFIG.SYS", Command::Cat("CONFIG.SYS".into()))]
    #[case("mv a.txt Documents", Command::Mv { source: "a.txt".into(), destination: "Documents".into() })]
    #[case("play guess_number", Command::Play("guess_number".into()))]
    #[case("pwd extra", Command::Pwd)]
    #[case("connect", Command::Unknown("connect".into()))]
    fn parses_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(line), expected);
    }

    #[rstest]
    #[case("mkdir", "Usage: mkdir <directory_name>")]
    #[case("touch a b", "Usage: touch <file_name>")]
    #[case("cd", "Usage: cd <directory>")]
    #[case("rm", "Usage: rm <file_or_directory_name>")]
    #[case("mv only-one", "Usage: mv <source> <destination>")]
    #[case("ls a b", "Usage: ls [directory]")]
    #[case("play", "Usage: play <game_name>")]
    fn wrong_arity_yields_usage(#[case] line: &str, #[case] usage: &'static str) {
        assert_eq!(Command::parse(line), Command::Usage(usage));
    }

    #[test]
    fn arguments_keep_their_case() {
        assert_eq!(
            Command::parse("TOUCH README.TXT"),
            Command::Touch("README.TXT".into())
        );
    }
}
