use derive_more::Display;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Choice {
    #[display("rock")]
    Rock,
    #[display("paper")]
    Paper,
    #[display("scissors")]
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "rock" => Some(Choice::Rock),
            "paper" => Some(Choice::Paper),
            "scissors" => Some(Choice::Scissors),
            _ => None,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Paper, Choice::Rock)
                | (Choice::Scissors, Choice::Paper)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Tie,
    Player,
    Computer,
}

pub fn resolve_round(player: Choice, computer: Choice) -> Verdict {
    if player == computer {
        Verdict::Tie
    } else if player.beats(computer) {
        Verdict::Player
    } else {
        Verdict::Computer
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RockPaperScissors {
    player_score: u32,
    computer_score: u32,
}

impl RockPaperScissors {
    pub fn intro() -> Vec<String> {
        vec![
            "Enter 'rock', 'paper', or 'scissors' to play.".to_string(),
            "Enter 'quit' to end the game.".to_string(),
        ]
    }

    pub fn score(&self) -> (u32, u32) {
        (self.player_score, self.computer_score)
    }

    /// Settles one round and returns the lines to show.
    pub fn play_round(&mut self, player: Choice, computer: Choice) -> Vec<String> {
        let verdict = match resolve_round(player, computer) {
            Verdict::Tie => "It's a tie!",
            Verdict::Player => {
                self.player_score += 1;
                "You win this round!"
            }
            Verdict::Computer => {
                self.computer_score += 1;
                "Computer wins this round!"
            }
        };

        let (you, computer_score) = self.score();
        vec![
            format!("You chose {player}, computer chose {computer}. {verdict}"),
            format!("Score - You: {you}, Computer: {computer_score}"),
        ]
    }
}
