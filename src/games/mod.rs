//! Text games playable from the terminal.
//!
//! Each game is a small state machine fed one input line at a time.

mod guess_number;
mod rock_paper_scissors;

use derive_more::Display;
use rand::Rng;

use guess_number::{GuessNumber, GuessOutcome};
use rock_paper_scissors::{Choice, RockPaperScissors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameKind {
    #[display("guess_number")]
    GuessNumber,
    #[display("rock_paper_scissors")]
    RockPaperScissors,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::GuessNumber, GameKind::RockPaperScissors];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.to_string() == name)
    }

    /// The file that has to be present in the working directory to play.
    pub fn file_name(&self) -> String {
        format!("{self}.bas")
    }

    fn title(&self) -> &'static str {
        match self {
            GameKind::GuessNumber => "Guess the Number",
            GameKind::RockPaperScissors => "Rock Paper Scissors",
        }
    }
}

/// What one line of input did to a running game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub lines: Vec<String>,
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Game {
    GuessNumber(GuessNumber),
    RockPaperScissors(RockPaperScissors),
}

impl Game {
    /// Starts a game and returns it with its opening lines.
    pub fn start(kind: GameKind, rng: &mut impl Rng) -> (Self, Vec<String>) {
        let mut lines = vec![format!("Starting {} game...", kind.title())];
        let game = match kind {
            GameKind::GuessNumber => {
                lines.extend(GuessNumber::intro());
                Game::GuessNumber(GuessNumber::new(rng))
            }
            GameKind::RockPaperScissors => {
                lines.extend(RockPaperScissors::intro());
                Game::RockPaperScissors(RockPaperScissors::default())
            }
        };
        (game, lines)
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Game::GuessNumber(_) => "What's your guess? ",
            Game::RockPaperScissors(_) => "What's your choice? ",
        }
    }

    pub fn play(&mut self, input: &str, rng: &mut impl Rng) -> Turn {
        match self {
            Game::GuessNumber(game) => {
                let outcome = game.guess(input);
                Turn {
                    lines: vec![outcome.message()],
                    finished: matches!(outcome, GuessOutcome::Correct { .. }),
                }
            }
            Game::RockPaperScissors(game) => {
                if input.trim().eq_ignore_ascii_case("quit") {
                    return Turn {
                        lines: vec!["Thanks for playing Rock Paper Scissors!".to_string()],
                        finished: true,
                    };
                }
                match Choice::parse(input) {
                    Some(player) => Turn {
                        lines: game.play_round(player, Choice::random(rng)),
                        finished: false,
                    },
                    None => Turn {
                        lines: vec![
                            "Invalid choice. Please enter 'rock', 'paper', 'scissors', or 'quit'."
                                .to_string(),
                        ],
                        finished: false,
                    },
                }
            }
        }
    }
}
